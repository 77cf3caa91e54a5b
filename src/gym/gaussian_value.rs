use log::{debug, warn};

use crate::{
    env::{Bandits, BanditsConfig, BanditsState},
    randomizer::{DefaultRandomizer, NormalRandomizer},
};

/// Configuration for [`GaussianValueBandits`]
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBanditsConfig {
    pub base: BanditsConfig,
    /// The mean reward for all bandits
    pub global_reward_mean: f64,
    /// The deviation of the mean reward across bandits
    pub global_reward_sigma: f64,
    /// The deviation of the reward on each action
    ///
    /// Passed to the randomizer as-is. A negative value is not rejected, the default randomizer
    /// treats it like its absolute value.
    pub reward_sigma: f64,
}

impl Default for GaussianBanditsConfig {
    fn default() -> Self {
        Self {
            base: BanditsConfig::default(),
            global_reward_mean: 0.0,
            global_reward_sigma: 1.0,
            reward_sigma: 1.0,
        }
    }
}

impl GaussianBanditsConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.base.validate()?;
        (self.global_reward_sigma >= 0.0)
            .then_some(())
            .ok_or_else(|| String::from("`global_reward_sigma` must be non-negative"))
    }
}

impl AsRef<BanditsConfig> for GaussianBanditsConfig {
    fn as_ref(&self) -> &BanditsConfig {
        &self.base
    }
}

/// Bandit environment where each arm yields a normally distributed reward
///
/// The mean reward of every arm is fixed when the environment is created, drawn from
/// `N(global_reward_mean, global_reward_sigma)`. Pulling an arm samples `N(mean, reward_sigma)`.
#[derive(Debug, Clone)]
pub struct GaussianValueBandits<R = DefaultRandomizer> {
    state: BanditsState<GaussianBanditsConfig, R>,
    rewards: Vec<f64>,
}

impl<R: NormalRandomizer> GaussianValueBandits<R> {
    /// Initialize the environment with a randomizer obtained from `randomizer(config.base.seed)`
    pub fn new<F>(config: GaussianBanditsConfig, randomizer: F) -> Self
    where
        F: FnOnce(Option<u64>) -> R,
    {
        if config.reward_sigma < 0.0 {
            warn!(
                "negative `reward_sigma` ({}) forwarded to the randomizer",
                config.reward_sigma
            );
        }

        let mut state = BanditsState::new(config, randomizer);
        let config = state.config();
        let (num_bandits, seed) = (config.base.num_bandits, config.base.seed);
        let (mean, sigma) = (config.global_reward_mean, config.global_reward_sigma);
        let rewards = state.rng_mut().normal_n(mean, sigma, num_bandits);
        debug!("gaussian value bandits: {num_bandits} arms, seed {seed:?}, means {rewards:?}");

        Self { state, rewards }
    }

    /// Per-arm mean rewards
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }
}

impl GaussianValueBandits {
    /// Initialize the environment with the [`DefaultRandomizer`]
    pub fn from_config(config: GaussianBanditsConfig) -> Self {
        Self::new(config, DefaultRandomizer::new)
    }
}

impl<R: NormalRandomizer> Bandits for GaussianValueBandits<R> {
    type Config = GaussianBanditsConfig;
    type Rng = R;

    fn state(&self) -> &BanditsState<GaussianBanditsConfig, R> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BanditsState<GaussianBanditsConfig, R> {
        &mut self.state
    }

    fn get_reward(&mut self, action: usize) -> f64 {
        assert!(action < self.num_bandits(), "Invalid action: {}", action);

        let reward_sigma = self.state.config().reward_sigma;
        self.state
            .rng_mut()
            .normal(self.rewards[action], reward_sigma)
    }
}

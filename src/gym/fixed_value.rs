use log::debug;

use crate::{
    env::{Bandits, BanditsConfig, BanditsState},
    randomizer::{DefaultRandomizer, UniformRandomizer},
};

/// Lower bound of the thresholds and of every roll
const MIN_ROLL: f64 = 0.001;

/// Configuration for [`FixedValueBandits`]
#[derive(Debug, Clone, PartialEq)]
pub struct FixedBanditsConfig {
    pub base: BanditsConfig,
    /// The winning reward for all bandits
    pub hit_reward_value: f64,
    /// The losing reward for all bandits
    pub miss_reward_value: f64,
}

impl Default for FixedBanditsConfig {
    fn default() -> Self {
        Self {
            base: BanditsConfig::default(),
            hit_reward_value: 10.0,
            miss_reward_value: -1.0,
        }
    }
}

impl FixedBanditsConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.base.validate()
    }
}

impl AsRef<BanditsConfig> for FixedBanditsConfig {
    fn as_ref(&self) -> &BanditsConfig {
        &self.base
    }
}

/// Bandit environment where each arm yields either a winning or a losing reward
///
/// Every arm gets a threshold drawn once from `[0.001, 1.0)` at construction. Pulling the arm rolls
/// a fresh value from the same interval: a roll at or above the threshold is a hit, anything lower
/// is a miss. The hit and miss rewards are the same for all arms.
#[derive(Debug, Clone)]
pub struct FixedValueBandits<R = DefaultRandomizer> {
    state: BanditsState<FixedBanditsConfig, R>,
    probabilities: Vec<f64>,
}

impl<R: UniformRandomizer> FixedValueBandits<R> {
    /// Initialize the environment with a randomizer obtained from `randomizer(config.base.seed)`
    pub fn new<F>(config: FixedBanditsConfig, randomizer: F) -> Self
    where
        F: FnOnce(Option<u64>) -> R,
    {
        let mut state = BanditsState::new(config, randomizer);
        let num_bandits = state.config().base.num_bandits;
        let probabilities = state.rng_mut().uniform_n(MIN_ROLL, 1.0, num_bandits);
        debug!(
            "fixed value bandits: {num_bandits} arms, seed {:?}, thresholds {probabilities:?}",
            state.config().base.seed
        );

        Self {
            state,
            probabilities,
        }
    }

    /// Per-arm roll thresholds
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

impl FixedValueBandits {
    /// Initialize the environment with the [`DefaultRandomizer`]
    pub fn from_config(config: FixedBanditsConfig) -> Self {
        Self::new(config, DefaultRandomizer::new)
    }
}

impl<R: UniformRandomizer> Bandits for FixedValueBandits<R> {
    type Config = FixedBanditsConfig;
    type Rng = R;

    fn state(&self) -> &BanditsState<FixedBanditsConfig, R> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BanditsState<FixedBanditsConfig, R> {
        &mut self.state
    }

    fn get_reward(&mut self, action: usize) -> f64 {
        assert!(action < self.num_bandits(), "Invalid action: {}", action);

        let roll = self.state.rng_mut().uniform(MIN_ROLL, 1.0);
        let config = self.state.config();
        if roll >= self.probabilities[action] {
            config.hit_reward_value
        } else {
            config.miss_reward_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::spy::RandomizerSpy;

    fn fixed_bandits_config() -> FixedBanditsConfig {
        FixedBanditsConfig {
            base: BanditsConfig {
                num_bandits: 3,
                max_steps: 5,
                seed: Some(0),
            },
            hit_reward_value: 10.0,
            miss_reward_value: -1.0,
        }
    }

    #[test]
    fn fixed_value_bandits() {
        let mut bandits = FixedValueBandits::new(fixed_bandits_config(), RandomizerSpy::new);

        assert_eq!(bandits.probabilities(), [0.2, 0.2, 0.2], "Thresholds drawn");
        assert_eq!(bandits.rng().calls, [Some(0)], "Seeded from config");
        assert_eq!(
            bandits.rng().uniform_calls,
            [(0.001, 1.0, Some(3))],
            "One sequence draw at construction"
        );

        let reward = bandits.get_reward(0);
        assert_eq!(reward, -1.0, "Roll below threshold misses");
        assert_eq!(
            bandits.rng().uniform_calls.last(),
            Some(&(0.001, 1.0, None)),
            "Scalar roll"
        );

        let reward = bandits.get_reward(1);
        assert_eq!(reward, 10.0, "Roll above threshold hits");
        assert_eq!(
            bandits.rng().uniform_calls.last(),
            Some(&(0.001, 1.0, None)),
            "Scalar roll"
        );
    }

    #[test]
    fn reset_keeps_thresholds() {
        let mut bandits = FixedValueBandits::new(fixed_bandits_config(), RandomizerSpy::new);

        let (_, first, _) = bandits.step(2);
        let (_, second, _) = bandits.step(2);
        bandits.reset();

        assert_eq!(bandits.step_num(), 0, "Counter reset");
        assert_eq!(bandits.probabilities(), [0.2, 0.2, 0.2], "Thresholds kept");
        assert_eq!(bandits.rng().uniform_calls.len(), 3, "No redraw on reset");

        let (_, third, _) = bandits.step(2);
        let (_, fourth, _) = bandits.step(2);
        assert_eq!((first, second), (third, fourth), "Same rewards after reset");
    }

    #[test]
    fn seeded_episodes_match() {
        let config = FixedBanditsConfig {
            base: BanditsConfig::default().with_seed(5),
            ..Default::default()
        };
        let mut a = FixedValueBandits::from_config(config.clone());
        let mut b = FixedValueBandits::from_config(config);

        assert_eq!(a.probabilities(), b.probabilities(), "Thresholds match");
        assert_eq!(a.probabilities().len(), 10, "One threshold per arm");

        while a.is_active() {
            let action = a.step_num() % a.num_bandits();
            let (_, reward_a, done_a) = a.step(action);
            let (_, reward_b, done_b) = b.step(action);
            assert_eq!(reward_a, reward_b, "Rewards match");
            assert_eq!(done_a, done_b, "Done flags match");
            a.report_mut().take();
            assert!(
                reward_a == 10.0 || reward_a == -1.0,
                "Reward is hit or miss"
            );
        }
        assert_eq!(a.step_num(), 1000, "Episode runs to max steps");
        assert_eq!(a.report_mut()["steps"], 0.0, "Report drained each step");
        assert_eq!(b.report_mut()["steps"], 1000.0, "Report counts every step");
    }

    #[test]
    #[should_panic(expected = "Invalid action")]
    fn invalid_action_panics() {
        let mut bandits = FixedValueBandits::new(fixed_bandits_config(), RandomizerSpy::new);
        bandits.step(3);
    }

    #[test]
    fn config_defaults() {
        let config = FixedBanditsConfig::default();
        assert_eq!(config.base.num_bandits, 10);
        assert_eq!(config.base.max_steps, 1000);
        assert_eq!(config.base.seed, None);
        assert_eq!(config.hit_reward_value, 10.0);
        assert_eq!(config.miss_reward_value, -1.0);
        assert!(config.validate().is_ok());
    }
}

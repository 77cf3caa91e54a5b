use std::collections::BTreeMap;
use std::ops::Index;

use log::trace;

/// Observation of the environment state, always empty for bandit environments
///
/// Kept so that [`Bandits::step`] has the same shape as a general reinforcement learning loop.
pub type Observation = Vec<f64>;

/// The result of a single step: `(observation, reward, done)`
pub type Step = (Observation, f64, bool);

/// Base configuration for all bandit environments
#[derive(Debug, Clone, PartialEq)]
pub struct BanditsConfig {
    /// Number of arms, i.e. possible actions
    pub num_bandits: usize,
    /// The length of an episode
    pub max_steps: usize,
    /// Seed for the environment's randomizer, or `None` for system entropy
    pub seed: Option<u64>,
}

impl Default for BanditsConfig {
    fn default() -> Self {
        Self {
            num_bandits: 10,
            max_steps: 1000,
            seed: None,
        }
    }
}

impl BanditsConfig {
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Check that the configuration describes a usable environment
    ///
    /// Constructors never call this, invalid values are passed through to the randomizer.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_bandits == 0 {
            return Err(String::from("`num_bandits` must be positive"));
        }
        if self.max_steps == 0 {
            return Err(String::from("`max_steps` must be positive"));
        }
        Ok(())
    }
}

impl AsRef<BanditsConfig> for BanditsConfig {
    fn as_ref(&self) -> &BanditsConfig {
        self
    }
}

/// Named running statistics of an episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    data: BTreeMap<&'static str, f64>,
}

impl Report {
    /// Initialize a report tracking `keys`, all starting at zero
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            data: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.data.keys().copied().collect()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.data.get(key).copied()
    }

    /// Access a value for in-place modification
    pub fn entry(
        &mut self,
        key: &'static str,
    ) -> std::collections::btree_map::Entry<'_, &'static str, f64> {
        self.data.entry(key)
    }

    /// Take the current values, leaving every key at zero
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let zeroed = self.data.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.data, zeroed)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.data[key]
    }
}

/// State shared by every bandit environment: its configuration, its randomizer and the step counter
///
/// Callers outside this crate cannot draw from or reseed the randomizer:
///
/// ```compile_fail
/// use k_armed_bandits::env::Bandits;
/// use k_armed_bandits::gym::{FixedBanditsConfig, FixedValueBandits};
/// use k_armed_bandits::randomizer::Randomizer;
///
/// let mut env = FixedValueBandits::from_config(FixedBanditsConfig::default());
/// env.state_mut().rng_mut().reseed(Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct BanditsState<C, R> {
    config: C,
    rng: R,
    step_num: usize,
    /// Accumulated `"score"` (sum of rewards) and `"steps"`, untouched by [`Bandits::reset`]
    pub report: Report,
}

impl<C: AsRef<BanditsConfig>, R> BanditsState<C, R> {
    /// Start a new episode, obtaining a randomizer bound to `config.seed` from `randomizer`
    pub fn new<F>(config: C, randomizer: F) -> Self
    where
        F: FnOnce(Option<u64>) -> R,
    {
        let rng = randomizer(config.as_ref().seed);
        Self {
            config,
            rng,
            step_num: 0,
            report: Report::new(vec!["score", "steps"]),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Draws are reserved for the environments in this crate, the stream is never reseeded after construction
    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn step_num(&self) -> usize {
        self.step_num
    }
}

/// A k-armed bandit environment
///
/// Follows the usual environment lifecycle of `actions`, `is_active`, `step` and `reset`, with the
/// reward for pulling an arm supplied by implementors through [`get_reward`](Bandits::get_reward).
/// An environment must not be stepped from more than one thread at a time.
pub trait Bandits {
    type Config: AsRef<BanditsConfig>;
    type Rng;

    fn state(&self) -> &BanditsState<Self::Config, Self::Rng>;

    fn state_mut(&mut self) -> &mut BanditsState<Self::Config, Self::Rng>;

    /// Get reward from bandit #`action`
    ///
    /// `action` must be less than [`num_bandits`](Bandits::num_bandits).
    fn get_reward(&mut self, action: usize) -> f64;

    fn config(&self) -> &Self::Config {
        self.state().config()
    }

    fn rng(&self) -> &Self::Rng {
        self.state().rng()
    }

    fn num_bandits(&self) -> usize {
        self.config().as_ref().num_bandits
    }

    fn step_num(&self) -> usize {
        self.state().step_num
    }

    /// Determine if the episode is still running, i.e. has not reached `max_steps`
    fn is_active(&self) -> bool {
        self.step_num() < self.config().as_ref().max_steps
    }

    /// Running episode statistics, see [`BanditsState::report`]
    fn report_mut(&mut self) -> &mut Report {
        &mut self.state_mut().report
    }

    /// Get every available action
    fn actions(&self) -> Vec<usize> {
        (0..self.num_bandits()).collect()
    }

    /// Reset the environment to start a new episode
    ///
    /// Only the step counter is reset, the arms keep their latent parameters.
    fn reset(&mut self) {
        self.state_mut().step_num = 0;
    }

    /// Take a single action in the environment
    ///
    /// Stepping past the end of the episode is allowed, the counter keeps growing and `done` stays `true`.
    ///
    /// **Returns** `(observation, reward, done)` where `observation` is always empty
    fn step(&mut self, action: usize) -> Step {
        let reward = self.get_reward(action);

        let state = self.state_mut();
        state.step_num += 1;
        state.report.entry("score").and_modify(|x| *x += reward);
        state.report.entry("steps").and_modify(|x| *x += 1.0);

        let step_num = state.step_num;
        let done = !self.is_active();
        trace!("step {step_num}: action {action} -> reward {reward} (done: {done})");

        (Vec::new(), reward, done)
    }
}

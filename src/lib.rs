/// Bandit environment base: episode lifecycle and configuration
pub mod env;

/// Concrete bandit environments
pub mod gym;

/// Injectable sources of randomness
pub mod randomizer;

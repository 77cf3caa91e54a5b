pub mod fixed_value;
pub mod gaussian_value;

pub use fixed_value::{FixedBanditsConfig, FixedValueBandits};
pub use gaussian_value::{GaussianBanditsConfig, GaussianValueBandits};

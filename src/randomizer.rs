use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A seedable source of random draws, owned by a single environment
pub trait Randomizer {
    /// Discard the current stream and reinitialize it from `seed`
    ///
    /// The same seed always produces the same sequence of future draws. `None` reseeds from system entropy.
    fn reseed(&mut self, seed: Option<u64>);
}

/// A [`Randomizer`] that draws from a uniform distribution
pub trait UniformRandomizer: Randomizer {
    /// Draw a single value in `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Draw `size` independent values in `[low, high)`
    fn uniform_n(&mut self, low: f64, high: f64, size: usize) -> Vec<f64> {
        (0..size).map(|_| self.uniform(low, high)).collect()
    }
}

/// A [`Randomizer`] that draws from a normal distribution
pub trait NormalRandomizer: Randomizer {
    /// Draw a single value with mean `loc` and standard deviation `scale`
    fn normal(&mut self, loc: f64, scale: f64) -> f64;

    /// Draw `size` independent values with mean `loc` and standard deviation `scale`
    fn normal_n(&mut self, loc: f64, scale: f64, size: usize) -> Vec<f64> {
        (0..size).map(|_| self.normal(loc, scale)).collect()
    }
}

/// Randomizer backed by any seedable [`rand`] generator
///
/// ### Draws
/// - uniform: [`Rng::gen_range`] over `[low, high)`. An empty range (`low >= high`) yields `low`
/// - normal: `loc + scale * z` where `z` is standard normal. A `scale` of zero yields `loc`, and a
///   negative `scale` mirrors the draw around `loc`, which is distributed the same as `|scale|`
#[derive(Debug, Clone)]
pub struct RngRandomizer<R = StdRng> {
    rng: R,
}

/// The randomizer used when none is provided
pub type DefaultRandomizer = RngRandomizer<StdRng>;

fn seed_rng<R: SeedableRng>(seed: Option<u64>) -> R {
    match seed {
        Some(seed) => R::seed_from_u64(seed),
        None => R::from_entropy(),
    }
}

impl<R: SeedableRng> RngRandomizer<R> {
    /// Initialize a randomizer bound to `seed`, or to system entropy if `seed` is `None`
    ///
    /// This is the factory expected by environment constructors, e.g. `FixedValueBandits::new(config, DefaultRandomizer::new)`
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed_rng(seed),
        }
    }
}

impl<R: SeedableRng> Randomizer for RngRandomizer<R> {
    fn reseed(&mut self, seed: Option<u64>) {
        self.rng = seed_rng(seed);
    }
}

impl<R: Rng + SeedableRng> UniformRandomizer for RngRandomizer<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low < high {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }
}

impl<R: Rng + SeedableRng> NormalRandomizer for RngRandomizer<R> {
    fn normal(&mut self, loc: f64, scale: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        loc + scale * z
    }
}

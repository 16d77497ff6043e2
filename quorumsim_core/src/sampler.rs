//! Stochastic transition sampler.
//!
//! Sojourn durations are exponential draws truncated toward zero to whole
//! ticks. A zero-tick draw is legal and means the server transitions again
//! on the very next tick.

use crate::error::{ensure_positive_mean, Result, SimError};
use rand::Rng;
use rand_distr::{Distribution, Exp};

/// Exponential duration distribution with a fixed mean.
#[derive(Debug, Clone, Copy)]
pub struct DurationSampler {
    mean: f64,
    dist: Exp<f64>,
}

impl DurationSampler {
    /// Creates a sampler for the given mean duration (rate `1 / mean`).
    pub fn new(name: &'static str, mean: f64) -> Result<Self> {
        ensure_positive_mean(name, mean)?;
        let dist = Exp::new(1.0 / mean).map_err(|e| SimError::invalid(name, e.to_string()))?;
        Ok(Self { mean, dist })
    }

    /// Returns the configured mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Draws one duration in whole ticks.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        // `as` truncates toward zero and saturates on overflow
        self.dist.sample(rng) as u64
    }
}

/// Draws a single sojourn duration with mean `mean`.
///
/// Fails with `InvalidParameter` if `mean` is not finite and positive.
pub fn sample_duration<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> Result<u64> {
    Ok(DurationSampler::new("mean", mean)?.sample(rng))
}

/// Paired up/down samplers for one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SojournSampler {
    uptime: DurationSampler,
    downtime: DurationSampler,
}

impl SojournSampler {
    /// Builds the samplers for `mtbf` (up sojourns) and `mttr` (down sojourns).
    pub fn new(mtbf: f64, mttr: f64) -> Result<Self> {
        Ok(Self {
            uptime: DurationSampler::new("mtbf", mtbf)?,
            downtime: DurationSampler::new("mttr", mttr)?,
        })
    }

    /// Ticks to stay up after a repair.
    pub fn uptime<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.uptime.sample(rng)
    }

    /// Ticks to stay down after a failure.
    pub fn downtime<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.downtime.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_non_positive_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(sample_duration(&mut rng, 0.0).is_err());
        assert!(sample_duration(&mut rng, -5.0).is_err());
        assert!(sample_duration(&mut rng, f64::NAN).is_err());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let sampler = DurationSampler::new("mtbf", 50.0).unwrap();
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);

        let a: Vec<u64> = (0..32).map(|_| sampler.sample(&mut rng1)).collect();
        let b: Vec<u64> = (0..32).map(|_| sampler.sample(&mut rng2)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_mean_is_truncated_exponential() {
        // E[floor(X)] for X ~ Exp(1/mu) is 1 / (e^(1/mu) - 1), about mu - 0.5
        let mean = 20.0;
        let sampler = DurationSampler::new("mtbf", mean).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let n = 200_000;
        let total: u64 = (0..n).map(|_| sampler.sample(&mut rng)).sum();
        let observed = total as f64 / n as f64;
        let expected = 1.0 / ((1.0f64 / mean).exp() - 1.0);

        assert!(
            (observed - expected).abs() < 0.25,
            "observed mean {} vs expected {}",
            observed,
            expected
        );
    }

    #[test]
    fn test_tiny_mean_yields_mostly_zero() {
        let sampler = DurationSampler::new("mttr", 0.01).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let zeros = (0..1000).filter(|_| sampler.sample(&mut rng) == 0).count();
        assert!(zeros > 990);
    }

    #[test]
    fn test_sojourn_sampler_reports_bad_field() {
        let err = SojournSampler::new(10.0, 0.0).unwrap_err();
        assert_eq!(err.parameter(), "mttr");
    }
}

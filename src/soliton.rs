//! Robust Soliton degree distribution.
//!
//! The degree of an encoded block (how many source blocks it XORs) is drawn
//! from the Robust Soliton distribution over `1..=k`. The Ideal Soliton
//! gives peeling exactly one degree-1 block in expectation per step, which
//! is too fragile in practice; the robust component adds mass at low
//! degrees and a spike near `k/R` so the ripple of peelable blocks keeps a
//! safe size.
//!
//! The whole probability mass function:
//!
//! - `rho(1) = 1/k`, `rho(d) = 1/(d(d-1))` for `2 <= d <= k`
//! - `R = c * ln(k/delta) * sqrt(k)`, spike position `kr = floor(k/R)`
//! - `tau(d) = R/(d*k)` below the spike, `R * ln(R/delta) / k` at it,
//!   zero above
//! - `mu(d) = (rho(d) + tau(d)) / Z` with `Z` the normalizer
//!
//! The CDF of `mu` is precomputed once per encoder or decoder; sampling is
//! a single unit draw plus a binary search.

use crate::prng::Prng;

/// Default tuning constant `c`.
pub const DEFAULT_C: f64 = 0.03;

/// Default decode-failure bound `delta`.
pub const DEFAULT_DELTA: f64 = 0.05;

/// Precomputed Robust Soliton CDF over `1..=k`.
#[derive(Debug, Clone)]
pub struct RobustSoliton {
    k: u32,
    cdf: Vec<f64>,
}

impl RobustSoliton {
    /// Build the distribution for `k` source blocks with default tuning.
    pub fn new(k: u32) -> Self {
        Self::with_params(k, DEFAULT_C, DEFAULT_DELTA)
    }

    /// Build the distribution with explicit `c` and `delta`.
    ///
    /// Encoder and decoder must agree on both, the same way they must agree
    /// on `k`. Requires `k >= 1`, `c > 0` and `0 < delta < 1`.
    pub fn with_params(k: u32, c: f64, delta: f64) -> Self {
        debug_assert!(k >= 1, "degree distribution needs at least one block");
        debug_assert!(c > 0.0, "c must be positive");
        debug_assert!(delta > 0.0 && delta < 1.0, "delta must be in (0, 1)");

        let kf = f64::from(k);
        let n = k as usize;

        // Ideal Soliton.
        let mut pmf = vec![0.0; n];
        pmf[0] = 1.0 / kf;
        for d in 2..=n {
            pmf[d - 1] = 1.0 / (d as f64 * (d as f64 - 1.0));
        }

        // Robust component. For small k the spike position k/R can land
        // outside 1..=k, so it is clamped; the spike weight is clamped to
        // zero from below so the mass function never goes negative.
        let r = c * (kf / delta).ln() * kf.sqrt();
        let kr = if r > 0.0 {
            ((kf / r).floor() as u32).clamp(1, k)
        } else {
            1
        };
        for d in 1..kr {
            pmf[(d - 1) as usize] += r / (f64::from(d) * kf);
        }
        pmf[(kr - 1) as usize] += (r * (r / delta).ln() / kf).max(0.0);

        // Normalize and accumulate.
        let z: f64 = pmf.iter().sum();
        let mut cdf = Vec::with_capacity(n);
        let mut acc = 0.0;
        for p in &pmf {
            acc += p / z;
            cdf.push(acc);
        }
        // Pin the endpoint so float drift cannot leave a unit draw above it.
        cdf[n - 1] = 1.0;

        Self { k, cdf }
    }

    /// Number of source blocks the distribution covers.
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Sample a degree in `1..=k` using one unit draw from `prng`.
    ///
    /// Returns the smallest `d` whose cumulative probability reaches the
    /// draw; ties go to the smaller degree.
    pub fn sample(&self, prng: &mut Prng) -> u32 {
        let u = prng.gen_unit();
        let d = self.cdf.partition_point(|&p| p < u);
        (d as u32 + 1).min(self.k)
    }
}

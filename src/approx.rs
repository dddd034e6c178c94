use std::sync::{LazyLock, PoisonError, RwLock};

use bon::Builder;
use rand::rngs::ThreadRng;
use rand::{thread_rng, RngCore};
use tracing::debug;

use crate::map::{Accumulator, ProbabilityMap};
use crate::{Distribution, Probability, Value, APPROX_MIN_SAMPLE_SIZE};

static APPROX_SAMPLE_SIZE: LazyLock<RwLock<u32>> =
    LazyLock::new(|| RwLock::new(APPROX_MIN_SAMPLE_SIZE));

/// Empirical distribution of a random process, estimated by sampling it.
///
/// Each outcome gets its observed frequency as probability, so the result
/// sums to one whenever at least one sample was drawn.
#[derive(Debug, Builder)]
pub struct Approx<G = ThreadRng>
where
    G: RngCore,
{
    #[builder(finish_fn)]
    rng: G,
    #[builder(default = default_sample_size())]
    sample_size: u32,
}

impl<G> Approx<G>
where
    G: RngCore,
{
    /// Changes the sample size used by builders that do not set one.
    pub fn set_default_sample_size(value: u32) {
        let value = value.max(APPROX_MIN_SAMPLE_SIZE);
        let mut guard = APPROX_SAMPLE_SIZE
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = value;
    }

    #[must_use]
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    #[must_use]
    pub fn eval<T, F>(&mut self, mut op: F) -> Distribution<T>
    where
        T: Value,
        F: FnMut(&mut G) -> T,
    {
        let mut counts = Accumulator::new();
        for _ in 0..self.sample_size {
            counts.add(op(&mut self.rng), 1.0);
        }

        let counts = counts.finish();
        let n = Probability::from(self.sample_size);
        debug!(
            samples = self.sample_size,
            outcomes = counts.len(),
            "approximated distribution"
        );
        Distribution::from(ProbabilityMap::build_with_capacity(counts.len(), |acc| {
            for (v, c) in counts.iter() {
                acc.add(v.clone(), c / n);
            }
        }))
    }
}

fn default_sample_size() -> u32 {
    *APPROX_SAMPLE_SIZE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

impl Default for Approx<ThreadRng> {
    fn default() -> Self {
        Self::builder().build(thread_rng())
    }
}

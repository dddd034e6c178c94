mod approx;
mod dist;
mod map;
mod ops;
mod value;

use ahash::AHashMap;
pub use self::approx::Approx;
pub use dist::Distribution;
pub use map::{Accumulator, Iter, ProbabilityMap};
use thiserror::Error;
pub use value::{ComputableValue, DefaultValue, OrderedValue, Value};

pub type Probability = f64;
pub type Dice<T = DefaultValue> = Distribution<T>;
pub type Result<T> = ::core::result::Result<T, Error>;
type Index<T> = AHashMap<T, usize>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("a die needs at least one side, got {0}")]
    InvalidSideCount(DefaultValue),
    #[error("cannot fold zero dice")]
    EmptyFold,
    #[error("distribution has no outcomes")]
    EmptyDistribution,
}

pub const DEFAULT_SIMPLIFY_THRESHOLD: Probability = 0.005;
const APPROX_MIN_SAMPLE_SIZE: u32 = 100_000;

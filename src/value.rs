use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

pub type DefaultValue = i32;

/// Outcome type of a distribution.
///
/// Coalescing relies on `Eq` and `Hash` agreeing with each other: two
/// outcomes that compare equal must hash equally, otherwise the same outcome
/// may end up stored twice and lookups only see one of the copies.
pub trait Value: Sized + Debug + Clone + Eq + Hash {}

pub trait OrderedValue: Value + PartialOrd + Ord {}

/// Outcomes that can be projected onto the real line for statistics.
pub trait ComputableValue: Value {
    fn compute(&self) -> f64;
}

macro_rules! impl_computable_value_from {
    ($typ:ty) => {
        impl $crate::value::ComputableValue for $typ {
            fn compute(&self) -> f64 {
                f64::from(*self)
            }
        }
    };
}

macro_rules! impl_computable_value_trunc {
    ($typ:ty) => {
        impl $crate::value::ComputableValue for $typ {
            fn compute(&self) -> f64 {
                *self as f64
            }
        }
    };
}

impl<T> Value for T where T: Sized + Debug + Clone + Eq + Hash {}

impl<T> OrderedValue for T where T: Value + PartialOrd + Ord {}

impl ComputableValue for bool {
    fn compute(&self) -> f64 {
        if *self {
            1.0
        } else {
            0.0
        }
    }
}

impl ComputableValue for Ordering {
    fn compute(&self) -> f64 {
        match self {
            Ordering::Less => -1.0,
            Ordering::Equal => 0.0,
            Ordering::Greater => 1.0,
        }
    }
}

impl_computable_value_from!(u8);
impl_computable_value_from!(u16);
impl_computable_value_from!(u32);
impl_computable_value_trunc!(u64);
impl_computable_value_trunc!(usize);
impl_computable_value_from!(i8);
impl_computable_value_from!(i16);
impl_computable_value_from!(i32);
impl_computable_value_trunc!(i64);
impl_computable_value_trunc!(isize);

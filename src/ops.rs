use std::ops::{Add, Mul, Neg, Sub};

use crate::value::{DefaultValue, OrderedValue, Value};
use crate::Distribution;

impl<T> Distribution<T>
where
    T: OrderedValue,
{
    /// Higher of two independent rolls.
    #[must_use]
    pub fn max(&self, rhs: &Self) -> Self {
        self.combine(rhs, |x, y| x.max(y).clone())
    }

    /// Lower of two independent rolls.
    #[must_use]
    pub fn min(&self, rhs: &Self) -> Self {
        self.combine(rhs, |x, y| x.min(y).clone())
    }

    /// Best of `count` independent rolls, `self` when `count < 2`.
    #[must_use]
    pub fn max_of(&self, count: usize) -> Self {
        self.repeat(count, |x, y| x.max(y).clone())
    }

    #[must_use]
    pub fn min_of(&self, count: usize) -> Self {
        self.repeat(count, |x, y| x.min(y).clone())
    }

    /// `1` for outcomes `>= threshold`, `0` otherwise.
    ///
    /// Adding these together counts successes across several dice.
    #[must_use]
    pub fn higher_or_equal(&self, threshold: &T) -> Distribution<DefaultValue> {
        self.when(|v| v >= threshold, |_| 1, |_| 0)
    }

    fn repeat<F>(&self, count: usize, f: F) -> Self
    where
        F: Fn(&T, &T) -> T,
    {
        self.fold(count.max(1), f).unwrap_or_else(|_| self.clone())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl<L, R> $trait<Distribution<R>> for Distribution<L>
        where
            L: Value + $trait<R>,
            R: Value,
            <L as $trait<R>>::Output: Value,
        {
            type Output = Distribution<<L as $trait<R>>::Output>;

            fn $method(self, rhs: Distribution<R>) -> Self::Output {
                self.combine(&rhs, |x, y| x.clone().$method(y.clone()))
            }
        }

        impl<L, R> $trait<&Distribution<R>> for Distribution<L>
        where
            L: Value + $trait<R>,
            R: Value,
            <L as $trait<R>>::Output: Value,
        {
            type Output = Distribution<<L as $trait<R>>::Output>;

            fn $method(self, rhs: &Distribution<R>) -> Self::Output {
                self.combine(rhs, |x, y| x.clone().$method(y.clone()))
            }
        }

        impl<L, R> $trait<Distribution<R>> for &Distribution<L>
        where
            L: Value + $trait<R>,
            R: Value,
            <L as $trait<R>>::Output: Value,
        {
            type Output = Distribution<<L as $trait<R>>::Output>;

            fn $method(self, rhs: Distribution<R>) -> Self::Output {
                self.combine(&rhs, |x, y| x.clone().$method(y.clone()))
            }
        }

        impl<L, R> $trait<&Distribution<R>> for &Distribution<L>
        where
            L: Value + $trait<R>,
            R: Value,
            <L as $trait<R>>::Output: Value,
        {
            type Output = Distribution<<L as $trait<R>>::Output>;

            fn $method(self, rhs: &Distribution<R>) -> Self::Output {
                self.combine(rhs, |x, y| x.clone().$method(y.clone()))
            }
        }
    };
}

// Shifting by a constant only relabels outcomes, so it goes through `map`.
macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $($typ:ty),+) => {
        $(
            impl $trait<$typ> for Distribution<$typ> {
                type Output = Distribution<$typ>;

                fn $method(self, rhs: $typ) -> Self::Output {
                    self.map(|x| x.$method(rhs))
                }
            }

            impl $trait<$typ> for &Distribution<$typ> {
                type Output = Distribution<$typ>;

                fn $method(self, rhs: $typ) -> Self::Output {
                    self.map(|x| x.$method(rhs))
                }
            }
        )+
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl_scalar_op!(Add, add, i8, i16, i32, i64, u8, u16, u32, u64);
impl_scalar_op!(Sub, sub, i8, i16, i32, i64, u8, u16, u32, u64);
impl_scalar_op!(Mul, mul, i8, i16, i32, i64, u8, u16, u32, u64);

impl<T> Neg for Distribution<T>
where
    T: Value + Neg,
    T::Output: Value,
{
    type Output = Distribution<T::Output>;

    fn neg(self) -> Self::Output {
        self.map(|x| x.clone().neg())
    }
}

impl<T> Neg for &Distribution<T>
where
    T: Value + Neg,
    T::Output: Value,
{
    type Output = Distribution<T::Output>;

    fn neg(self) -> Self::Output {
        self.map(|x| x.clone().neg())
    }
}

use std::collections::hash_map::Entry;
use std::iter::Zip;
use std::slice;

use crate::value::Value;
use crate::{Index, Probability};

pub type Iter<'a, T> = Zip<slice::Iter<'a, T>, slice::Iter<'a, Probability>>;

/// Finalized collection of outcomes and their probability mass.
///
/// Outcomes are unique under `Eq` and are kept in order of their first
/// insertion. A map is only produced by [`Accumulator::finish`] (or one of
/// the helpers built on it) and cannot be changed afterwards.
#[derive(Clone, Debug)]
pub struct ProbabilityMap<T>
where
    T: Value,
{
    values: Vec<T>,
    probabilities: Vec<Probability>,
    index: Index<T>,
}

/// One-shot builder for a [`ProbabilityMap`].
///
/// Every [`add`](Accumulator::add) for an outcome already seen increases the
/// weight of the existing entry instead of creating a new one.
#[derive(Debug)]
pub struct Accumulator<T>
where
    T: Value,
{
    values: Vec<T>,
    probabilities: Vec<Probability>,
    index: Index<T>,
}

impl<T> Accumulator<T>
where
    T: Value,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            probabilities: Vec::with_capacity(capacity),
            index: Index::<T>::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, value: T, weight: Probability) {
        match self.index.entry(value) {
            Entry::Occupied(e) => {
                self.probabilities[*e.get()] += weight;
            }
            Entry::Vacant(e) => {
                self.values.push(e.key().clone());
                self.probabilities.push(weight);
                e.insert(self.values.len() - 1);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> ProbabilityMap<T> {
        ProbabilityMap {
            values: self.values,
            probabilities: self.probabilities,
            index: self.index,
        }
    }
}

impl<T> Default for Accumulator<T>
where
    T: Value,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<(T, Probability)> for Accumulator<T>
where
    T: Value,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, Probability)>,
    {
        for (value, weight) in iter {
            self.add(value, weight);
        }
    }
}

impl<T> ProbabilityMap<T>
where
    T: Value,
{
    /// Runs `f` once against a fresh [`Accumulator`] and freezes the result.
    #[must_use]
    pub fn build<F>(f: F) -> Self
    where
        F: FnOnce(&mut Accumulator<T>),
    {
        Self::build_with_capacity(0, f)
    }

    #[must_use]
    pub fn build_with_capacity<F>(capacity: usize, f: F) -> Self
    where
        F: FnOnce(&mut Accumulator<T>),
    {
        let mut acc = Accumulator::with_capacity(capacity);
        f(&mut acc);
        acc.finish()
    }

    /// Accumulated weight of `value`, `0.0` when it never occurred.
    #[must_use]
    pub fn probability_of(&self, value: &T) -> Probability {
        self.index
            .get(value)
            .map_or(0.0, |&i| self.probabilities[i])
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn probabilities(&self) -> &[Probability] {
        &self.probabilities
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter().zip(self.probabilities.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> Probability {
        self.probabilities.iter().sum()
    }
}

impl<T> FromIterator<(T, Probability)> for ProbabilityMap<T>
where
    T: Value,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, Probability)>,
    {
        Self::build(|acc| acc.extend(iter))
    }
}

impl<'a, T> IntoIterator for &'a ProbabilityMap<T>
where
    T: Value,
{
    type Item = (&'a T, &'a Probability);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use std::fmt::{self, Display};

use itertools::Itertools;
use rand::{thread_rng, Rng};
use tracing::{debug, trace};

use crate::map::{Iter, ProbabilityMap};
use crate::value::{ComputableValue, DefaultValue, Value};
use crate::{Error, Probability, Result, DEFAULT_SIMPLIFY_THRESHOLD};

/// Discrete probability distribution over outcomes of type `T`.
///
/// Every combinator borrows its inputs and returns a new distribution, so a
/// distribution never changes after construction. Weights are taken as given:
/// only [`Distribution::uniform`] normalizes, and total mass is preserved by
/// [`map`](Self::map), [`combine`](Self::combine) and
/// [`map_to`](Self::map_to) as long as the inputs sum to one.
#[derive(Clone, Debug)]
pub struct Distribution<T = DefaultValue>
where
    T: Value,
{
    map: ProbabilityMap<T>,
}

impl Distribution {
    /// Die with faces `1..=sides`, each with probability `1 / sides`.
    ///
    /// `sides < 1` yields a distribution without outcomes; use
    /// [`try_uniform`](Self::try_uniform) to reject it instead.
    #[must_use]
    pub fn uniform(sides: DefaultValue) -> Self {
        let weight = 1.0 / f64::from(sides.max(1));
        Self::from_pairs((1..=sides).map(|face| (face, weight)))
    }

    pub fn try_uniform(sides: DefaultValue) -> Result<Self> {
        if sides < 1 {
            return Err(Error::InvalidSideCount(sides));
        }
        Ok(Self::uniform(sides))
    }
}

impl<T> Distribution<T>
where
    T: Value,
{
    /// Builds a distribution from literal `(outcome, weight)` pairs.
    ///
    /// Repeated outcomes are coalesced. Weights are not normalized.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, Probability)>,
    {
        Self::new(pairs.into_iter().collect())
    }

    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::from_pairs([(value, 1.0)])
    }

    #[must_use]
    pub fn probability_of(&self, value: &T) -> Probability {
        self.map.probability_of(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        self.map.values()
    }

    #[must_use]
    pub fn total_probability(&self) -> Probability {
        self.map.total()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.map.iter()
    }

    /// Owned snapshot of every `(outcome, probability)` entry.
    #[must_use]
    pub fn pairs(&self) -> Vec<(T, Probability)> {
        self.iter().map(|(v, p)| (v.clone(), *p)).collect()
    }

    #[must_use]
    pub fn map<O, F>(&self, f: F) -> Distribution<O>
    where
        O: Value,
        F: Fn(&T) -> O,
    {
        Distribution::new(ProbabilityMap::build_with_capacity(self.len(), |acc| {
            for (v, p) in self.iter() {
                acc.add(f(v), *p);
            }
        }))
    }

    #[must_use]
    pub fn cast<O>(&self) -> Distribution<O>
    where
        O: Value + From<T>,
    {
        self.map(|v| O::from(v.clone()))
    }

    /// Distribution of `f(x, y)` for independent `x` from `self` and `y`
    /// from `other`.
    ///
    /// Not suitable for correlated variables: every pair of outcomes is
    /// weighted by the product of their probabilities.
    #[must_use]
    pub fn combine<R, O, F>(&self, other: &Distribution<R>, f: F) -> Distribution<O>
    where
        R: Value,
        O: Value,
        F: Fn(&T, &R) -> O,
    {
        trace!(lhs = self.len(), rhs = other.len(), "combining distributions");
        Distribution::new(ProbabilityMap::build(|acc| {
            for (v1, p1) in self.iter() {
                for (v2, p2) in other.iter() {
                    acc.add(f(v1, v2), p1 * p2);
                }
            }
        }))
    }

    /// Marginal distribution of a two-stage process.
    ///
    /// `f(x)` is the distribution of the second stage given that the first
    /// stage produced `x`; each of its probabilities is scaled by the
    /// probability of `x`.
    #[must_use]
    pub fn map_to<O, F>(&self, f: F) -> Distribution<O>
    where
        O: Value,
        F: Fn(&T) -> Distribution<O>,
    {
        let map = ProbabilityMap::build(|acc| {
            for (v, p) in self.iter() {
                let inner = f(v);
                for (w, q) in inner.iter() {
                    acc.add(w.clone(), p * q);
                }
            }
        });
        trace!(outer = self.len(), outcomes = map.len(), "flattened distribution");
        Distribution::new(map)
    }

    /// Same as `map(|v| if condition(v) { if_true(v) } else { if_false(v) })`.
    #[must_use]
    pub fn when<O, C, P, Q>(&self, condition: C, if_true: P, if_false: Q) -> Distribution<O>
    where
        O: Value,
        C: Fn(&T) -> bool,
        P: Fn(&T) -> O,
        Q: Fn(&T) -> O,
    {
        self.map(|v| if condition(v) { if_true(v) } else { if_false(v) })
    }

    /// Drops every outcome with probability `<= threshold`.
    ///
    /// The remaining probabilities are left untouched, so the result may sum
    /// to less than one and later combinators inherit the missing mass.
    #[must_use]
    pub fn simplify(&self, threshold: Probability) -> Self {
        let map: ProbabilityMap<T> = self
            .iter()
            .filter(|(_, p)| **p > threshold)
            .map(|(v, p)| (v.clone(), *p))
            .collect();
        debug!(
            threshold,
            retained = map.len(),
            dropped = self.len() - map.len(),
            "simplified distribution"
        );
        Self::new(map)
    }

    #[must_use]
    pub fn simplify_default(&self) -> Self {
        self.simplify(DEFAULT_SIMPLIFY_THRESHOLD)
    }

    /// Independent combination of any number of distributions.
    ///
    /// An empty slice yields `constant(f(&[]))`.
    #[must_use]
    pub fn apply<O, F>(dice: &[Self], f: F) -> Distribution<O>
    where
        O: Value,
        F: Fn(&[&T]) -> O,
    {
        if dice.is_empty() {
            return Distribution::constant(f(&[]));
        }

        trace!(dice = dice.len(), "applying over distributions");
        let mut value = Vec::with_capacity(dice.len());
        Distribution::new(ProbabilityMap::build(|acc| {
            for p in dice.iter().map(Self::iter).multi_cartesian_product() {
                value.clear();
                let mut weight: Probability = 1.0;
                for (v, q) in p {
                    value.push(v);
                    weight *= q;
                }
                acc.add(f(&value), weight);
            }
        }))
    }

    /// Combines `n` independent copies of `self` left to right with `f`.
    pub fn fold<F>(&self, n: usize, f: F) -> Result<Self>
    where
        F: Fn(&T, &T) -> T,
    {
        if n == 0 {
            return Err(Error::EmptyFold);
        }

        let mut die = self.clone();
        for _ in 1..n {
            die = die.combine(self, &f);
        }
        Ok(die)
    }

    /// Outcome with the largest probability, first one on ties.
    #[must_use]
    pub fn mode(&self) -> Option<&T> {
        self.iter()
            .max_set_by(|(_, p1), (_, p2)| p1.total_cmp(p2))
            .into_iter()
            .next()
            .map(|(v, _)| v)
    }

    #[must_use]
    pub fn modes(&self) -> Vec<&T> {
        self.iter()
            .max_set_by(|(_, p1), (_, p2)| p1.total_cmp(p2))
            .into_iter()
            .map(|(v, _)| v)
            .collect()
    }

    /// Draws one outcome proportionally to its weight.
    pub fn sample_rng<G>(&self, rng: &mut G) -> Result<&T>
    where
        G: Rng,
    {
        let total = self.total_probability();
        if !(total.is_finite() && total > 0.0) {
            return Err(Error::EmptyDistribution);
        }

        let x = rng.gen_range(0.0..total);
        let mut pos = 0.0;
        for (v, p) in self.iter() {
            pos += p;
            if x < pos {
                return Ok(v);
            }
        }
        self.values().last().ok_or(Error::EmptyDistribution)
    }

    pub fn sample(&self) -> Result<&T> {
        self.sample_rng(&mut thread_rng())
    }

    pub(crate) fn new(map: ProbabilityMap<T>) -> Self {
        Self { map }
    }
}

impl<T> Distribution<T>
where
    T: ComputableValue,
{
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.iter().map(|(v, p)| v.compute() * p).sum()
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.iter()
            .map(|(v, p)| (v.compute() - mean).powi(2) * p)
            .sum()
    }

    #[must_use]
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl<T> From<ProbabilityMap<T>> for Distribution<T>
where
    T: Value,
{
    fn from(map: ProbabilityMap<T>) -> Self {
        Self::new(map)
    }
}

impl<T> FromIterator<(T, Probability)> for Distribution<T>
where
    T: Value,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, Probability)>,
    {
        Self::from_pairs(iter)
    }
}

impl<'a, T> IntoIterator for &'a Distribution<T>
where
    T: Value,
{
    type Item = (&'a T, &'a Probability);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Display for Distribution<T>
where
    T: Value,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (v, p)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v:?} with {:.2}%", p * 100.0)?;
        }
        Ok(())
    }
}

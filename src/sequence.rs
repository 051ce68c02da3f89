use crate::error::{TestgenError, TestgenResult};
use crate::rand::{Generating, UniDist, UniformInt, Xoshiro256pp, draw_between};
use std::fmt;
use std::ops::{Add, AddAssign, Deref, DerefMut};

/// Vector that prints as one space-separated line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sequence<T>(Vec<T>);

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// `n` elements, each produced by calling `f` once, in order.
    pub fn from_fn(n: usize, mut f: impl FnMut() -> T) -> Self {
        Self((0..n).map(|_| f()).collect())
    }

    /// `n` elements, element `i` produced by `f(i)`.
    pub fn from_indexed(n: usize, f: impl FnMut(usize) -> T) -> Self {
        Self((0..n).map(f).collect())
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Sequence<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(v: Vec<T>) -> Self {
        Self(v)
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Clone> Add<&Sequence<T>> for &Sequence<T> {
    type Output = Sequence<T>;

    fn add(self, rhs: &Sequence<T>) -> Sequence<T> {
        let mut out = Vec::with_capacity(self.len() + rhs.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(&rhs.0);
        Sequence(out)
    }
}

impl<T> Add for Sequence<T> {
    type Output = Sequence<T>;

    fn add(mut self, rhs: Sequence<T>) -> Sequence<T> {
        self.0.extend(rhs.0);
        self
    }
}

impl<T: Clone> AddAssign<&Sequence<T>> for Sequence<T> {
    fn add_assign(&mut self, rhs: &Sequence<T>) {
        self.0.extend_from_slice(&rhs.0);
    }
}

impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut it = self.0.iter();
        if let Some(first) = it.next() {
            write!(f, "{}", first)?;
            for x in it {
                write!(f, " {}", x)?;
            }
        }
        Ok(())
    }
}

/// `n` independent uniform draws from `[lo, hi]`.
#[derive(Clone, Copy, Debug)]
pub struct UniSequence<T> {
    n: usize,
    dist: UniDist<T>,
}

impl<T: UniformInt> UniSequence<T> {
    pub fn new(n: usize, lo: T, hi: T) -> TestgenResult<Self> {
        Ok(Self {
            n,
            dist: UniDist::new(lo, hi)?,
        })
    }
}

impl<T: UniformInt> Generating for UniSequence<T> {
    type Output = Sequence<T>;

    fn generate(&self, rng: &mut Xoshiro256pp) -> Sequence<T> {
        Sequence::from_fn(self.n, || self.dist.sample(rng))
    }
}

/// `n` uniform picks from a fixed alphabet.
#[derive(Clone, Debug)]
pub struct FiniteSequence<T> {
    n: usize,
    alphabet: Vec<T>,
}

impl<T: Clone> FiniteSequence<T> {
    pub fn new(n: usize, alphabet: impl Into<Vec<T>>) -> TestgenResult<Self> {
        let alphabet = alphabet.into();
        if alphabet.is_empty() {
            return Err(TestgenError::InvalidParameter {
                what: "alphabet size",
                value: 0,
            });
        }
        Ok(Self { n, alphabet })
    }
}

impl<T: Clone> Generating for FiniteSequence<T> {
    type Output = Sequence<T>;

    fn generate(&self, rng: &mut Xoshiro256pp) -> Sequence<T> {
        let last = self.alphabet.len() - 1;
        Sequence::from_fn(self.n, || self.alphabet[draw_between(0usize, last, rng)].clone())
    }
}

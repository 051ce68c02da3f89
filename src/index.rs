//! Test/suite indices and the judge file naming scheme.
//!
//! Numbered suites name their tests with letters (`pro2a.in`, `pro2b.in`, ...),
//! the sample ("ocen") suite keeps plain numbers (`pro1ocen.in`, `pro2ocen.in`, ...).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SuiteId {
    /// Ungraded example tests, written as `<abbr><n>ocen.in`.
    Sample,
    /// Graded suite `n`, `n >= 1`.
    Numbered(u32),
}

impl SuiteId {
    /// The suite after this one: sample is followed by suite 1.
    /// `None` once the suite number would overflow.
    pub fn next(self) -> Option<SuiteId> {
        match self {
            SuiteId::Sample => Some(SuiteId::Numbered(1)),
            SuiteId::Numbered(k) => k.checked_add(1).map(SuiteId::Numbered),
        }
    }

    /// Position in enumeration order: 0 for sample, `n` for suite `n`.
    pub fn ordinal(self) -> u32 {
        match self {
            SuiteId::Sample => 0,
            SuiteId::Numbered(n) => n,
        }
    }
}

impl fmt::Display for SuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteId::Sample => f.write_str("ocen"),
            SuiteId::Numbered(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestIndex {
    pub suite: SuiteId,
    /// 1-based position inside the suite.
    pub test: u32,
}

impl TestIndex {
    pub const fn new(test: u32, suite: SuiteId) -> Self {
        Self { suite, test }
    }

    pub const fn sample(test: u32) -> Self {
        Self::new(test, SuiteId::Sample)
    }

    pub const fn numbered(test: u32, suite: u32) -> Self {
        Self::new(test, SuiteId::Numbered(suite))
    }

    /// Judge file name for this index, e.g. `pro2aa.in` or `pro3ocen.in`.
    pub fn file_name(&self, abbreviation: &str) -> String {
        format!("{}{}.in", abbreviation, self)
    }
}

/// Short label without abbreviation and extension (`2b`, `3ocen`).
impl fmt::Display for TestIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suite {
            SuiteId::Sample => write!(f, "{}ocen", self.test),
            SuiteId::Numbered(s) => write!(f, "{}{}", s, letter_suffix(self.test)),
        }
    }
}

/// Bijective base-26 letters: 1 -> "a", 26 -> "z", 27 -> "aa", 53 -> "ba".
/// Zero has no letters and maps to the empty string.
pub fn letter_suffix(n: u32) -> String {
    const SIZE: u32 = (b'z' - b'a' + 1) as u32;
    let mut letters = Vec::new();
    let mut t = n;
    while t > 0 {
        let digit = (t - 1) % SIZE;
        letters.push(b'a' + digit as u8);
        t = (t - 1) / SIZE;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Judge file name of `index` under `abbreviation`.
pub fn file_name(index: &TestIndex, abbreviation: &str) -> String {
    index.file_name(abbreviation)
}

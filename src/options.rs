use crate::rand::DEFAULT_SEED;
use crate::registry::ForkPolicy;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Options {
    /// Problem abbreviation prefixed to every file name, e.g. `pro` in `pro2a.in`.
    pub abbreviation: String,
    /// Seed of the source engine that every test engine is forked from.
    pub seed: u64,
    /// Start in the sample ("ocen") suite. When false the first test is `<abbr>1a.in`.
    /// Either way a `next_suite` before the first test lands on `<abbr>1a.in`.
    pub start_with_sample: bool,
    /// Where new test engines are forked from.
    pub fork_policy: ForkPolicy,
    /// Directory for file sinks; the working directory when `None`.
    pub output_dir: Option<PathBuf>,
    /// Announce every new output file at info level.
    pub verbose: bool,
}

impl Options {
    pub fn new(abbreviation: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            ..Default::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            abbreviation: String::new(),
            seed: DEFAULT_SEED,
            start_with_sample: true,
            fork_policy: ForkPolicy::Global,
            output_dir: None,
            verbose: true,
        }
    }
}

use crate::error::{TestgenError, TestgenResult};
use crate::index::{SuiteId, TestIndex};
use crate::rand::{GeneratorHandle, Xoshiro256pp};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Opens the output stream for a freshly visited test.
pub trait SinkFactory {
    type Sink: Write;

    fn open(&mut self, file_name: &str) -> TestgenResult<Self::Sink>;
}

/// Buffered files under a directory (the working directory when unset).
/// A file is created (and truncated) on the first visit of its index only.
#[derive(Clone, Debug, Default)]
pub struct FileSinks {
    dir: Option<PathBuf>,
}

impl FileSinks {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Some(dir.into()))
    }
}

impl SinkFactory for FileSinks {
    type Sink = BufWriter<File>;

    fn open(&mut self, file_name: &str) -> TestgenResult<Self::Sink> {
        let path = match &self.dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        };
        let file = File::create(&path).map_err(|e| TestgenError::io(file_name, e))?;
        Ok(BufWriter::new(file))
    }
}

/// In-memory buffers, one per test.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemorySinks;

impl SinkFactory for MemorySinks {
    type Sink = Vec<u8>;

    fn open(&mut self, _file_name: &str) -> TestgenResult<Self::Sink> {
        Ok(Vec::new())
    }
}

/// How new test records obtain their engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForkPolicy {
    /// Fork one source engine in visit order.
    #[default]
    Global,
    /// Fork a per-suite source engine, so a suite's streams do not depend on
    /// how many tests other suites opened before it.
    PerSuite,
}

/// Output stream and engine owned by one test index.
#[derive(Debug)]
pub struct TestRecord<W> {
    file_name: String,
    sink: W,
    generator: GeneratorHandle,
}

impl<W> TestRecord<W> {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn generator(&self) -> &GeneratorHandle {
        &self.generator
    }

    /// Stream and engine at once, for writers that draw while printing.
    pub fn parts_mut(&mut self) -> (&mut W, &GeneratorHandle) {
        (&mut self.sink, &self.generator)
    }
}

/// One line of the creation log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ManifestEntry {
    pub file: String,
    pub index: TestIndex,
}

#[derive(Debug)]
struct SourceEngines {
    seed: u64,
    policy: ForkPolicy,
    global: Xoshiro256pp,
    per_suite: HashMap<SuiteId, Xoshiro256pp>,
}

impl SourceEngines {
    fn new(seed: u64, policy: ForkPolicy) -> Self {
        Self {
            seed,
            policy,
            global: Xoshiro256pp::new(seed),
            per_suite: HashMap::new(),
        }
    }

    fn fork_for(&mut self, suite: SuiteId) -> Xoshiro256pp {
        match self.policy {
            ForkPolicy::Global => self.global.fork(),
            ForkPolicy::PerSuite => {
                let seed = self.seed;
                self.per_suite
                    .entry(suite)
                    .or_insert_with(|| suite_source(seed, suite))
                    .fork()
            }
        }
    }
}

/// Source engine of `suite`: the seeded engine long-jumped once per preceding suite.
/// Suites are 2^192 draws apart, tests inside a suite 2^128.
pub fn suite_source(seed: u64, suite: SuiteId) -> Xoshiro256pp {
    let mut engine = Xoshiro256pp::new(seed);
    for _ in 0..suite.ordinal() {
        engine.long_jump();
    }
    engine
}

/// Memoizing map from index to record.
///
/// Revisiting an index returns the very same stream and engine: nothing is
/// truncated, rewound or re-forked.
pub struct Registry<F: SinkFactory> {
    factory: F,
    abbreviation: String,
    records: HashMap<TestIndex, TestRecord<F::Sink>>,
    order: Vec<TestIndex>,
    sources: SourceEngines,
    verbose: bool,
}

impl<F: SinkFactory> Registry<F> {
    pub fn new(factory: F, abbreviation: impl Into<String>, seed: u64, policy: ForkPolicy) -> Self {
        Self {
            factory,
            abbreviation: abbreviation.into(),
            records: HashMap::new(),
            order: Vec::new(),
            sources: SourceEngines::new(seed, policy),
            verbose: false,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn seed(&self) -> u64 {
        self.sources.seed
    }

    pub fn fork_policy(&self) -> ForkPolicy {
        self.sources.policy
    }

    /// Restart the source engines from `seed`. Records already created keep their engines.
    pub fn reseed(&mut self, seed: u64) {
        self.sources = SourceEngines::new(seed, self.sources.policy);
    }

    pub fn file_name(&self, index: &TestIndex) -> String {
        index.file_name(&self.abbreviation)
    }

    /// Existing record for `index`, or a new one with a fresh sink and a forked engine.
    pub fn resolve(&mut self, index: TestIndex) -> TestgenResult<&mut TestRecord<F::Sink>> {
        match self.records.entry(index) {
            Entry::Occupied(e) => {
                tracing::debug!(test = %index, "revisiting test");
                Ok(e.into_mut())
            }
            Entry::Vacant(e) => {
                let file_name = index.file_name(&self.abbreviation);
                if self.verbose {
                    tracing::info!(file = %file_name, "printing to");
                } else {
                    tracing::debug!(file = %file_name, "printing to");
                }
                let sink = self.factory.open(&file_name)?;
                let generator = GeneratorHandle::new(self.sources.fork_for(index.suite));
                self.order.push(index);
                Ok(e.insert(TestRecord {
                    file_name,
                    sink,
                    generator,
                }))
            }
        }
    }

    pub fn get(&self, index: &TestIndex) -> Option<&TestRecord<F::Sink>> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: &TestIndex) -> Option<&mut TestRecord<F::Sink>> {
        self.records.get_mut(index)
    }

    pub fn contains(&self, index: &TestIndex) -> bool {
        self.records.contains_key(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices in the order their records were created.
    pub fn created(&self) -> &[TestIndex] {
        &self.order
    }

    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.order
            .iter()
            .map(|index| ManifestEntry {
                file: self.file_name(index),
                index: *index,
            })
            .collect()
    }

    /// Flush every sink, in creation order.
    pub fn flush_all(&mut self) -> TestgenResult<()> {
        for index in &self.order {
            if let Some(record) = self.records.get_mut(index) {
                record
                    .sink
                    .flush()
                    .map_err(|e| TestgenError::io(record.file_name.clone(), e))?;
            }
        }
        Ok(())
    }
}

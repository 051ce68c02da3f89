use crate::error::{TestgenError, TestgenResult};
use crate::index::{SuiteId, TestIndex};
use crate::options::Options;
use crate::rand::{GeneratorHandle, Xoshiro256pp};
use crate::registry::{ManifestEntry, Registry, SinkFactory, TestRecord};

/// Cursor over test indices plus the record bound to it.
///
/// Moving the cursor and rebinding the output happen in the same call, so a
/// write can never land in the file of a different index.
pub struct Manager<F: SinkFactory> {
    registry: Registry<F>,
    current: TestIndex,
    bound: bool,
}

impl<F: SinkFactory> Manager<F> {
    pub fn new(factory: F, opts: &Options) -> Self {
        let mut registry = Registry::new(
            factory,
            opts.abbreviation.clone(),
            opts.seed,
            opts.fork_policy,
        );
        registry.set_verbose(opts.verbose);
        let suite = if opts.start_with_sample {
            SuiteId::Sample
        } else {
            SuiteId::Numbered(1)
        };
        Self {
            registry,
            current: TestIndex::new(0, suite),
            bound: false,
        }
    }

    pub fn current_index(&self) -> TestIndex {
        self.current
    }

    /// True when no stream is bound (before the first test or after a skip).
    pub fn is_empty(&self) -> bool {
        !self.bound
    }

    pub fn file_name(&self) -> String {
        self.registry.file_name(&self.current)
    }

    pub fn next_test(&mut self) -> TestgenResult<&mut TestRecord<F::Sink>> {
        let test = self.following_test()?;
        self.set_test(test, self.current.suite)
    }

    /// Test 1 of the following suite. From the untouched cursor (before the
    /// first test) this is the first graded suite: suite 1 whether or not the
    /// run starts with samples.
    pub fn next_suite(&mut self) -> TestgenResult<&mut TestRecord<F::Sink>> {
        let suite = match self.current {
            TestIndex {
                test: 0,
                suite: SuiteId::Numbered(n),
            } => SuiteId::Numbered(n),
            TestIndex { suite, .. } => suite.next().ok_or(TestgenError::InvalidParameter {
                what: "suite number",
                value: u64::from(u32::MAX),
            })?,
        };
        tracing::debug!(%suite, "entering suite");
        self.set_test(1, suite)
    }

    /// Bind `(test, suite)`. The cursor only moves once the record is open,
    /// so a failed open leaves the previous binding in place.
    pub fn set_test(&mut self, test: u32, suite: SuiteId) -> TestgenResult<&mut TestRecord<F::Sink>> {
        if test == 0 {
            return Err(TestgenError::InvalidParameter {
                what: "test number",
                value: 0,
            });
        }
        if suite == SuiteId::Numbered(0) {
            return Err(TestgenError::InvalidParameter {
                what: "suite number",
                value: 0,
            });
        }
        let index = TestIndex::new(test, suite);
        let record = self.registry.resolve(index)?;
        self.current = index;
        self.bound = true;
        Ok(record)
    }

    /// Reserve the next slot without opening it; the stream stays unbound until
    /// the next `next_test` or `set_test`.
    pub fn skip_test(&mut self) -> TestgenResult<()> {
        self.current.test = self.following_test()?;
        self.bound = false;
        tracing::debug!(test = %self.current, "skipping test");
        Ok(())
    }

    fn following_test(&self) -> TestgenResult<u32> {
        self.current
            .test
            .checked_add(1)
            .ok_or(TestgenError::InvalidParameter {
                what: "test number",
                value: u64::from(u32::MAX),
            })
    }

    pub fn active(&mut self) -> TestgenResult<&mut TestRecord<F::Sink>> {
        if !self.bound {
            return Err(TestgenError::NoActiveTest);
        }
        self.registry
            .get_mut(&self.current)
            .ok_or(TestgenError::NoActiveTest)
    }

    pub fn stream(&mut self) -> TestgenResult<&mut F::Sink> {
        Ok(self.active()?.sink_mut())
    }

    pub fn generator(&self) -> TestgenResult<GeneratorHandle> {
        if !self.bound {
            return Err(TestgenError::NoActiveTest);
        }
        self.registry
            .get(&self.current)
            .map(|record| record.generator().clone())
            .ok_or(TestgenError::NoActiveTest)
    }

    /// Reseed the source engine; only records created afterwards are affected.
    pub fn set_main_seed(&mut self, seed: u64) {
        self.registry.reseed(seed);
    }

    /// Replace the engine of the bound test with a freshly seeded one.
    pub fn set_test_seed(&mut self, seed: u64) -> TestgenResult<()> {
        self.active()?.generator().replace(Xoshiro256pp::new(seed));
        Ok(())
    }

    pub fn registry(&self) -> &Registry<F> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<F> {
        &mut self.registry
    }

    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.registry.manifest()
    }

    pub fn flush(&mut self) -> TestgenResult<()> {
        self.registry.flush_all()
    }
}

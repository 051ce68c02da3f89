use crate::assumptions::{Assumptions, Scope};
use crate::error::{TestgenError, TestgenResult};
use crate::index::{SuiteId, TestIndex};
use crate::manager::Manager;
use crate::options::Options;
use crate::output::{Printable, dump_output};
use crate::rand::{GeneratorHandle, RngUtilities, Xoshiro256pp};
use crate::registry::{FileSinks, ManifestEntry, SinkFactory};
use std::fmt;
use std::io;

/// Value written once per test slot.
///
/// Types that want to keep drawing from their slot's stream store the handle
/// passed to [`attach_generator`](Testcase::attach_generator).
pub trait Testcase: Default {
    fn attach_generator(&mut self, _generator: GeneratorHandle) {}
}

impl Testcase for () {}

/// Ties testcase values to named output files and per-test engines.
///
/// A rejected testcase halts generation: the failing call returns
/// [`TestgenError::AssumptionFailed`] and every later call returns
/// [`TestgenError::Halted`].
pub struct Testing<F: SinkFactory, T = ()> {
    manager: Manager<F>,
    assumptions: Assumptions<T>,
    halted: Option<String>,
}

impl<T: Testcase> Testing<FileSinks, T> {
    /// Files land in `opts.output_dir`, or the working directory.
    pub fn new(opts: &Options) -> Self {
        Self::with_sinks(FileSinks::new(opts.output_dir.clone()), opts)
    }
}

impl<F: SinkFactory, T: Testcase> Testing<F, T> {
    pub fn with_sinks(sinks: F, opts: &Options) -> Self {
        Self {
            manager: Manager::new(sinks, opts),
            assumptions: Assumptions::new(),
            halted: None,
        }
    }

    fn ensure_running(&self) -> TestgenResult<()> {
        match &self.halted {
            Some(file) => Err(TestgenError::Halted { file: file.clone() }),
            None => Ok(()),
        }
    }

    fn open_testcase(&mut self) -> TestgenResult<T> {
        let generator = self.manager.generator()?;
        let mut testcase = T::default();
        testcase.attach_generator(generator);
        Ok(testcase)
    }

    /// Move to the next test of the current suite.
    pub fn next_test(&mut self) -> TestgenResult<T> {
        self.ensure_running()?;
        self.manager.next_test()?;
        self.assumptions.reset_test();
        self.open_testcase()
    }

    /// Move to test 1 of the following suite. Suite and test assumptions are dropped.
    pub fn next_suite(&mut self) -> TestgenResult<T> {
        self.ensure_running()?;
        self.manager.next_suite()?;
        self.assumptions.reset_suite();
        self.assumptions.reset_test();
        self.open_testcase()
    }

    /// Jump to an explicit index, e.g. to append to a test written earlier.
    /// Suite and test assumptions are dropped.
    pub fn set_test(&mut self, test: u32, suite: SuiteId) -> TestgenResult<T> {
        self.ensure_running()?;
        self.manager.set_test(test, suite)?;
        self.assumptions.reset_suite();
        self.assumptions.reset_test();
        self.open_testcase()
    }

    /// Reserve the next slot without creating its file. Writes fail with
    /// [`TestgenError::NoActiveTest`] until the next `next_test` or `set_test`.
    pub fn skip_test(&mut self) -> TestgenResult<()> {
        self.ensure_running()?;
        self.manager.skip_test()?;
        self.assumptions.reset_test();
        Ok(())
    }

    pub fn assume_global<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.assumptions.set_global(predicate);
    }

    pub fn assume_suite<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.assumptions.set_suite(predicate);
    }

    pub fn assume_test<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.assumptions.set_test(predicate);
    }

    pub fn assumptions(&self) -> &Assumptions<T> {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions<T> {
        &mut self.assumptions
    }

    /// Run the assumptions without writing anything.
    pub fn check_soft(&mut self, testcase: &T) -> bool {
        self.assumptions.check(testcase)
    }

    /// Check `testcase` against every scope and, if accepted, write it to the
    /// current test's stream.
    pub fn emit(&mut self, testcase: &T) -> TestgenResult<()>
    where
        T: fmt::Display,
    {
        self.ensure_running()?;
        let record = self.manager.active()?;
        let file = record.file_name().to_string();
        if let Err(scope) = self.assumptions.check_scoped(testcase) {
            return Err(self.halt(file, scope));
        }
        let record = self.manager.active()?;
        write_display(record.sink_mut(), testcase).map_err(|e| TestgenError::io(file, e))
    }

    fn halt(&mut self, file: String, scope: Scope) -> TestgenError {
        tracing::error!(file = %file, %scope, "assumption failed");
        self.halted = Some(file.clone());
        TestgenError::AssumptionFailed { file, scope }
    }

    /// Whether an assumption failure stopped generation.
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Lay out `items` (see [`crate::output`]) into the current test. Schemas
    /// wrapped in [`Gen`](crate::output::Gen) draw from the current test's engine.
    pub fn print(&mut self, items: &[&dyn Printable]) -> TestgenResult<()> {
        self.ensure_running()?;
        let record = self.manager.active()?;
        let file = record.file_name().to_string();
        let (sink, generator) = record.parts_mut();
        dump_output(sink, &mut *generator.borrow_mut(), items).map_err(|e| TestgenError::io(file, e))
    }

    /// Handle to the current test's engine.
    pub fn generator(&self) -> TestgenResult<GeneratorHandle> {
        self.manager.generator()
    }

    pub fn current_index(&self) -> TestIndex {
        self.manager.current_index()
    }

    pub fn file_name(&self) -> String {
        self.manager.file_name()
    }

    pub fn set_main_seed(&mut self, seed: u64) {
        self.manager.set_main_seed(seed);
    }

    pub fn set_test_seed(&mut self, seed: u64) -> TestgenResult<()> {
        self.ensure_running()?;
        self.manager.set_test_seed(seed)
    }

    pub fn manager(&self) -> &Manager<F> {
        &self.manager
    }

    /// Files created so far, in creation order.
    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.manager.manifest()
    }

    /// Flush every stream opened so far.
    pub fn flush_all(&mut self) -> TestgenResult<()> {
        self.manager.flush()
    }
}

fn write_display<W: io::Write + ?Sized>(out: &mut W, value: &dyn fmt::Display) -> io::Result<()> {
    write!(out, "{}", value)
}

impl<F: SinkFactory, T: Testcase> RngUtilities for Testing<F, T> {
    fn with_rng<U>(&mut self, f: impl FnOnce(&mut Xoshiro256pp) -> U) -> TestgenResult<U> {
        self.ensure_running()?;
        let generator = self.manager.generator()?;
        let mut rng = generator.borrow_mut();
        Ok(f(&mut *rng))
    }
}

/// Raw writes go to the current test's stream.
impl<F: SinkFactory, T: Testcase> io::Write for Testing<F, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_running().map_err(io::Error::other)?;
        match self.manager.stream() {
            Ok(sink) => sink.write(buf),
            Err(e) => Err(io::Error::new(io::ErrorKind::NotConnected, e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.manager.active() {
            Ok(record) => record.sink_mut().flush(),
            Err(_) => Ok(()),
        }
    }
}

use std::fmt;

/// Validity predicate over a testcase value.
pub type Predicate<T> = Box<dyn FnMut(&T) -> bool>;

/// Lifetime of an installed predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Cleared whenever the test index changes.
    Test,
    /// Cleared whenever the suite changes or the index is set explicitly.
    Suite,
    /// Kept for the whole run.
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Test => "test",
            Scope::Suite => "suite",
            Scope::Global => "global",
        })
    }
}

/// Three scoped predicates; an empty slot accepts everything.
pub struct Assumptions<T> {
    global: Option<Predicate<T>>,
    suite: Option<Predicate<T>>,
    test: Option<Predicate<T>>,
}

impl<T> Default for Assumptions<T> {
    fn default() -> Self {
        Self {
            global: None,
            suite: None,
            test: None,
        }
    }
}

impl<T> fmt::Debug for Assumptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assumptions")
            .field("global", &self.global.is_some())
            .field("suite", &self.suite.is_some())
            .field("test", &self.test.is_some())
            .finish()
    }
}

impl<T> Assumptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, scope: Scope) -> &mut Option<Predicate<T>> {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Suite => &mut self.suite,
            Scope::Test => &mut self.test,
        }
    }

    pub fn set<P>(&mut self, scope: Scope, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        *self.slot(scope) = Some(Box::new(predicate));
    }

    pub fn set_global<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.set(Scope::Global, predicate);
    }

    pub fn set_suite<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.set(Scope::Suite, predicate);
    }

    pub fn set_test<P>(&mut self, predicate: P)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.set(Scope::Test, predicate);
    }

    pub fn reset(&mut self, scope: Scope) {
        *self.slot(scope) = None;
    }

    pub fn reset_global(&mut self) {
        self.reset(Scope::Global);
    }

    pub fn reset_suite(&mut self) {
        self.reset(Scope::Suite);
    }

    pub fn reset_test(&mut self) {
        self.reset(Scope::Test);
    }

    /// Whether a predicate other than "always true" is installed for `scope`.
    pub fn is_set(&self, scope: Scope) -> bool {
        match scope {
            Scope::Global => self.global.is_some(),
            Scope::Suite => self.suite.is_some(),
            Scope::Test => self.test.is_some(),
        }
    }

    /// True iff the test, suite and global predicates all accept `testcase`.
    pub fn check(&mut self, testcase: &T) -> bool {
        self.check_scoped(testcase).is_ok()
    }

    /// Like [`check`](Self::check) but reports the first rejecting scope.
    /// Evaluation order is test, suite, global and stops at the first rejection.
    pub fn check_scoped(&mut self, testcase: &T) -> Result<(), Scope> {
        for scope in [Scope::Test, Scope::Suite, Scope::Global] {
            if let Some(pred) = self.slot(scope)
                && !pred(testcase)
            {
                return Err(scope);
            }
        }
        Ok(())
    }
}

/// Both predicates must hold; `b` is not evaluated when `a` rejects.
pub fn and<T, A, B>(mut a: A, mut b: B) -> impl FnMut(&T) -> bool
where
    A: FnMut(&T) -> bool,
    B: FnMut(&T) -> bool,
{
    move |tc: &T| a(tc) && b(tc)
}

/// Either predicate holds; `b` is not evaluated when `a` accepts.
pub fn or<T, A, B>(mut a: A, mut b: B) -> impl FnMut(&T) -> bool
where
    A: FnMut(&T) -> bool,
    B: FnMut(&T) -> bool,
{
    move |tc: &T| a(tc) || b(tc)
}

pub fn not<T, A>(mut a: A) -> impl FnMut(&T) -> bool
where
    A: FnMut(&T) -> bool,
{
    move |tc: &T| !a(tc)
}

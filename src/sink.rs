use core::fmt::Display;

/// A recorded assertion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    /// Caller supplied context, e.g. the name of the fixture under test.
    pub context: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>, context: Option<String>) -> Self {
        Failure {
            message: message.into(),
            context,
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\nMessages: {context}")?;
        }
        Ok(())
    }
}

/// Receives assertion failures.
pub trait FailureSink {
    fn fail(&mut self, failure: Failure);

    /// Whether a failure has been reported to this sink.
    fn failed(&self) -> bool;
}

/// Collects failures instead of raising them.
#[derive(Debug, Default)]
pub struct Recorder {
    failures: Vec<Failure>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    pub fn messages(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|failure| failure.message.as_str())
            .collect()
    }
}

impl FailureSink for Recorder {
    fn fail(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    fn failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Panics with the failure, for use inside `#[test]` functions.
#[derive(Debug, Default)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    fn fail(&mut self, failure: Failure) {
        panic!("{failure}");
    }

    fn failed(&self) -> bool {
        false
    }
}

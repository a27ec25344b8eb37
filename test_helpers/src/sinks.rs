//! In-memory sinks for the generation driver.
//!
//! # Examples
//!
//! ```
//! use config_yml_codegen::{Diagnostic, DiagnosticSink};
//! use config_yml_test_helpers::sinks::RecordingDiagnostics;
//!
//! let mut diagnostics = RecordingDiagnostics::default();
//! diagnostics.report(Diagnostic::error("app::Server", "boom"));
//! assert_eq!(diagnostics.errors().count(), 1);
//! ```

use std::collections::BTreeMap;
use std::io;

use config_yml_codegen::{Diagnostic, DiagnosticSink, OutputSink, Severity};

/// Keeps every reported diagnostic in order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    /// Diagnostics in the order they were reported.
    pub reported: Vec<Diagnostic>,
}

impl RecordingDiagnostics {
    /// Diagnostics with [`Severity::Note`].
    pub fn notes(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Note)
    }

    /// Diagnostics with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.reported
            .iter()
            .filter(move |diagnostic| diagnostic.severity == severity)
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported.push(diagnostic);
    }
}

/// Stores written artifacts keyed by file name.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    /// Written contents by file name.
    pub files: BTreeMap<String, String>,
}

impl OutputSink for MemoryOutput {
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        self.files.insert(file_name.to_owned(), contents.to_owned());
        Ok(())
    }
}

/// Rejects writes for the listed file names and stores everything else.
#[derive(Debug, Default)]
pub struct FailingOutput {
    /// File names whose writes fail.
    pub reject: Vec<String>,
    /// Writes that succeeded.
    pub inner: MemoryOutput,
}

impl FailingOutput {
    /// Creates a sink failing for every name in `reject`.
    #[must_use]
    pub fn rejecting<I, S>(reject: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reject: reject.into_iter().map(Into::into).collect(),
            inner: MemoryOutput::default(),
        }
    }
}

impl OutputSink for FailingOutput {
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        if self.reject.iter().any(|name| name == file_name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{file_name} is read-only"),
            ));
        }
        self.inner.write(file_name, contents)
    }
}

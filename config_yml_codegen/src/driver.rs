//! Generation driver.
//!
//! Runs validation and emission for a batch of candidates. A candidate that
//! fails for any reason is reported and skipped; the batch always runs to
//! completion. Sinks for diagnostics and generated files are supplied by the
//! caller, so the same driver serves the derive (one candidate, errors turned
//! into compile errors) and the cargo subcommand (many candidates, files on
//! disk).

use std::collections::HashMap;
use std::fmt;
use std::io;

use heck::ToSnakeCase;
use proc_macro2::{Ident, TokenStream};
use syn::DeriveInput;

use crate::emit::emit_codec;
use crate::error::GenerateError;
use crate::model::{ClassModel, Constructor};
use crate::validate::validate;

/// Header prepended to every rendered artifact.
pub const GENERATED_HEADER: &str =
    "// @generated by cargo-configyml from #[derive(ConfigYml)]. Do not edit.\n\n";

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Note,
    /// A class was skipped.
    Error,
}

/// A message produced while processing a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Message severity.
    pub severity: Severity,
    /// Qualified name of the class concerned, if any.
    pub class: Option<String>,
    /// Human-readable reason.
    pub message: String,
}

impl Diagnostic {
    /// Creates a note not tied to any class.
    #[must_use]
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            class: None,
            message: message.into(),
        }
    }

    /// Creates an error attributed to `class`.
    #[must_use]
    pub fn error(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            class: Some(class.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Note => "note",
            Severity::Error => "error",
        };
        match &self.class {
            Some(class) => write!(f, "{label}[{class}]: {}", self.message),
            None => write!(f, "{label}: {}", self.message),
        }
    }
}

/// Receives diagnostics produced by [`run_batch`].
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Receives rendered artifacts produced by [`run_batch`].
pub trait OutputSink {
    /// Stores `contents` under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the artifact cannot be stored.
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()>;
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        let class = diagnostic.class.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Note => tracing::info!(class, "{}", diagnostic.message),
            Severity::Error => tracing::error!(class, "{}", diagnostic.message),
        }
    }
}

/// One annotated item awaiting generation.
#[derive(Debug, Clone)]
pub struct Candidate {
    input: DeriveInput,
    module_path: Vec<String>,
    constructor: Option<Constructor>,
}

impl Candidate {
    /// Wraps an annotated item located at a crate root.
    #[must_use]
    pub const fn new(input: DeriveInput) -> Self {
        Self {
            input,
            module_path: Vec::new(),
            constructor: None,
        }
    }

    /// Wraps an item seen by the derive macro.
    ///
    /// rustc strips `#[derive(...)]` lists before handing the item to a
    /// derive, so `#[derive(Default)]` is never visible here. Unless the item
    /// names a constructor, the codec calls `Default::default()` and a
    /// missing impl is reported by rustc at that call.
    #[must_use]
    pub fn for_derive(input: DeriveInput) -> Self {
        Self::new(input).with_constructor(Constructor::Default)
    }

    /// Sets the module path enclosing the item.
    #[must_use]
    pub fn with_module_path(mut self, module_path: Vec<String>) -> Self {
        self.module_path = module_path;
        self
    }

    /// Records constructor evidence found outside the item.
    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// The annotated item.
    #[must_use]
    pub const fn input(&self) -> &DeriveInput {
        &self.input
    }

    /// Module path and item name, joined with `::`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        let mut segments = self.module_path.clone();
        segments.push(self.input.ident.to_string());
        segments.join("::")
    }
}

/// The generated codec of one class.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Qualified name of the class.
    pub class: String,
    /// Name of the generated codec type.
    pub name: Ident,
    /// Number of fields the codec covers.
    pub field_count: usize,
    /// Generated items.
    pub tokens: TokenStream,
}

impl Artifact {
    /// Source file name for the artifact, such as `server_serializator.rs`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name.to_string().to_snake_case())
    }

    /// Pretty-prints the artifact as a source file with a generated header.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Render`] when the tokens do not form a file.
    pub fn render(&self) -> Result<String, GenerateError> {
        let file: syn::File =
            syn::parse2(self.tokens.clone()).map_err(|source| GenerateError::Render {
                class: self.class.clone(),
                source,
            })?;
        Ok(format!("{GENERATED_HEADER}{}", prettyplease::unparse(&file)))
    }
}

/// Outcome of a batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Qualified names of classes whose artifact was written.
    pub generated: Vec<String>,
    /// Qualified names of classes that were skipped.
    pub failed: Vec<String>,
}

impl BatchReport {
    /// Returns `true` when no class failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Models, validates and emits the codec of one candidate.
///
/// # Errors
///
/// Returns the first [`GenerateError`] raised by modelling, validation or
/// emission.
pub fn generate(candidate: &Candidate) -> Result<Artifact, GenerateError> {
    let class = ClassModel::from_derive_input(
        &candidate.input,
        &candidate.module_path,
        candidate.constructor.clone(),
    )?;
    validate(&class)?;
    let tokens = emit_codec(&class)?;
    Ok(Artifact {
        name: class.serializator_ident(),
        field_count: class.fields.len(),
        class: class.qualified_name,
        tokens,
    })
}

/// Generates, renders and writes every candidate.
///
/// Each failure is reported to `diagnostics` as an error naming the class,
/// and the batch moves on to the next candidate. A class whose file name was
/// already written earlier in the batch fails with
/// [`GenerateError::OutputWriteFailure`] instead of overwriting it.
pub fn run_batch(
    candidates: &[Candidate],
    output: &mut dyn OutputSink,
    diagnostics: &mut dyn DiagnosticSink,
) -> BatchReport {
    diagnostics.report(Diagnostic::note(format!(
        "generating serializators for {} candidate(s)",
        candidates.len()
    )));
    let mut report = BatchReport::default();
    let mut issued = HashMap::new();
    for candidate in candidates {
        let class = candidate.qualified_name();
        match write_one(candidate, output, &mut issued) {
            Ok(artifact) => {
                tracing::info!(class = %artifact.class, codec = %artifact.name, "generated serializator");
                tracing::debug!(class = %artifact.class, fields = artifact.field_count, "fields covered");
                report.generated.push(artifact.class);
            }
            Err(error) => {
                diagnostics.report(Diagnostic::error(class.clone(), error.to_string()));
                report.failed.push(class);
            }
        }
    }
    report
}

/// Generates one artifact and writes it, refusing file names already in
/// `issued` (file name to owning class).
fn write_one(
    candidate: &Candidate,
    output: &mut dyn OutputSink,
    issued: &mut HashMap<String, String>,
) -> Result<Artifact, GenerateError> {
    let artifact = generate(candidate)?;
    let contents = artifact.render()?;
    let file_name = artifact.file_name();
    let write_failure = |source| GenerateError::OutputWriteFailure {
        class: artifact.class.clone(),
        source,
    };
    if let Some(owner) = issued.get(&file_name) {
        return Err(write_failure(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{file_name} was already generated for {owner}"),
        )));
    }
    output.write(&file_name, &contents).map_err(write_failure)?;
    issued.insert(file_name, artifact.class.clone());
    Ok(artifact)
}

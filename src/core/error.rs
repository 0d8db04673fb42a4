//! Error types for deploy-gate with contextual messages and exit codes
//!
//! Every failure in the gate or the extractor is surfaced as a `GateError`.
//! Nothing below `main` terminates the process: commands return errors and
//! `main` translates them into a diagnostic plus an exit code.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for deploy-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (missing variable, missing argument, bad config)
  User = 1,
  /// System error (I/O, unreadable or malformed manifest)
  System = 2,
  /// Validation failure (format, consistency, cardinality)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for deploy-gate
#[derive(Debug)]
pub enum GateError {
  /// Configuration errors
  Config(ConfigError),

  /// A release gate check failed
  Release(ReleaseError),

  /// Manifest value extraction failed
  Query(QueryError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  ///
  /// Gate and query errors keep their variant and exit code.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, context, help } => GateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      GateError::Io(err) => GateError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Config(_) => ExitCode::User,
      GateError::Release(e) => e.exit_code(),
      GateError::Query(e) => e.exit_code(),
      GateError::Io(_) => ExitCode::System,
      GateError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Config(e) => e.help_message(),
      GateError::Release(e) => e.help_message(),
      GateError::Query(e) => e.help_message(),
      GateError::Message { help, .. } => help.clone(),
      GateError::Io(_) => None,
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Release(e) => write!(f, "Skipping deployment: {}", e),
      GateError::Query(e) => write!(f, "{}", e),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<String> for GateError {
  fn from(msg: String) -> Self {
    GateError::message(msg)
  }
}

impl From<&str> for GateError {
  fn from(msg: &str) -> Self {
    GateError::message(msg)
  }
}

impl From<ConfigError> for GateError {
  fn from(err: ConfigError) -> Self {
    GateError::Config(err)
  }
}

impl From<ReleaseError> for GateError {
  fn from(err: ReleaseError) -> Self {
    GateError::Release(err)
  }
}

impl From<QueryError> for GateError {
  fn from(err: QueryError) -> Self {
    GateError::Query(err)
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be parsed
  Parse { path: PathBuf, reason: String },

  /// A field holds a value that cannot be used
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { path, .. } => Some(format!(
        "Fix the TOML syntax in {} or delete it to fall back to the defaults.",
        path.display()
      )),
      ConfigError::InvalidField { field, .. } => Some(format!("Check the `{}` entry in deploy-gate.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse config from {}: {}", path.display(), reason)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config value for {}: {}", field, reason)
      }
    }
  }
}

/// A failed release gate check
///
/// Displayed without the "Skipping deployment" prefix; `GateError` adds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
  /// No build tag in the environment
  NotATag,
  /// Build tag does not look like `v1.2.3-4`
  MalformedTag { tag: String },
  /// No artifact version declared
  MissingVersion,
  /// Artifact version does not look like `1.2.3-4`
  InvalidVersion { version: String },
  /// No SCM tag declared
  MissingScmTag,
  /// SCM tag and build tag disagree
  ScmTagMismatchesTag { scm_tag: String, tag: String },
  /// SCM tag and artifact version disagree
  ScmTagMismatchesVersion { scm_tag: String, version: String },
}

impl ReleaseError {
  /// Missing inputs are user errors, everything else is a failed validation
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::NotATag | ReleaseError::MissingVersion | ReleaseError::MissingScmTag => ExitCode::User,
      _ => ExitCode::Validation,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::MalformedTag { .. } => Some("Release tags look like v1.2.3-4 (single digits only).".to_string()),
      ReleaseError::InvalidVersion { .. } => {
        Some("Release versions look like 1.2.3-4 (single digits only).".to_string())
      }
      ReleaseError::ScmTagMismatchesVersion { version, .. } => {
        Some(format!("Set <scm><tag> in the POM to 'v{}'.", version))
      }
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::NotATag => write!(f, "Not building a tag"),
      ReleaseError::MalformedTag { tag } => {
        write!(f, "Tag '{}' is not a properly formatted release tag", tag)
      }
      ReleaseError::MissingVersion => write!(f, "Artifact version is not specified in the POM"),
      ReleaseError::InvalidVersion { version } => write!(f, "{} is not a valid release version", version),
      ReleaseError::MissingScmTag => write!(f, "SCM tag is not specified in the POM"),
      ReleaseError::ScmTagMismatchesTag { scm_tag, tag } => write!(
        f,
        "SCM tag '{}' in the POM does not match the '{}' tag being built",
        scm_tag, tag
      ),
      ReleaseError::ScmTagMismatchesVersion { scm_tag, version } => write!(
        f,
        "SCM tag '{}' in the POM does not match version '{}' in the POM",
        scm_tag, version
      ),
    }
  }
}

/// Manifest value extraction errors
#[derive(Debug)]
pub enum QueryError {
  /// No query argument supplied
  NoQuery,
  /// Query could not be parsed
  InvalidQuery { query: String, reason: String },
  /// Manifest could not be read
  ManifestUnreadable { path: PathBuf, source: io::Error },
  /// Manifest is not well-formed XML
  ManifestMalformed { path: PathBuf, reason: String },
  /// Query matched nothing
  NoMatch,
  /// Query matched more than one node
  MultipleMatches { count: usize },
}

impl QueryError {
  pub fn exit_code(&self) -> ExitCode {
    match self {
      QueryError::NoQuery | QueryError::InvalidQuery { .. } => ExitCode::User,
      QueryError::ManifestUnreadable { .. } | QueryError::ManifestMalformed { .. } => ExitCode::System,
      QueryError::NoMatch | QueryError::MultipleMatches { .. } => ExitCode::Validation,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      QueryError::NoQuery => Some("Usage: deploy-gate pom-value '/project/version'".to_string()),
      QueryError::ManifestUnreadable { path, .. } => Some(format!(
        "Run from the project root or pass --manifest (looked for {}).",
        path.display()
      )),
      QueryError::MultipleMatches { count } => Some(format!(
        "The query matched {} nodes; narrow it with a predicate such as [1] or [name='...'].",
        count
      )),
      _ => None,
    }
  }
}

impl fmt::Display for QueryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QueryError::NoQuery => write!(f, "No XPath query provided"),
      QueryError::InvalidQuery { query, reason } => write!(f, "Invalid XPath query '{}': {}", query, reason),
      QueryError::ManifestUnreadable { path, source } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), source)
      }
      QueryError::ManifestMalformed { path, reason } => {
        write!(f, "Manifest {} is not well-formed XML: {}", path.display(), reason)
      }
      QueryError::NoMatch => write!(f, "No match for the XPath query"),
      QueryError::MultipleMatches { .. } => write!(f, "More than one match for the XPath query"),
    }
  }
}

/// Result type alias for deploy-gate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn context(self, ctx: impl Into<String>) -> GateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

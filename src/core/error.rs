//! Error types for template-bootstrap with contextual messages and exit codes
//!
//! Every precondition failure carries a hint that tells the user how to get
//! unstuck. Everything else is an I/O or message error that aborts the run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for template-bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid args, existing destination, bad profile)
  User = 1,
  /// System error (I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for template-bootstrap
#[derive(Debug)]
pub enum BootstrapError {
  /// Checks that run before the destination is touched
  Precondition(PreconditionError),

  /// Profile loading and validation errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// I/O error with the operation that failed
  IoContext { source: io::Error, context: String },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl BootstrapError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    BootstrapError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    BootstrapError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// I/O errors keep their source so the exit code stays a system one.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      BootstrapError::Message { message, context, help } => BootstrapError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      BootstrapError::Io(source) => BootstrapError::IoContext { source, context: ctx_str },
      BootstrapError::IoContext { source, context } => BootstrapError::IoContext {
        source,
        context: format!("{}\n{}", ctx_str, context),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      BootstrapError::Precondition(_) => ExitCode::User,
      BootstrapError::Config(_) => ExitCode::User,
      BootstrapError::Io(_) | BootstrapError::IoContext { .. } => ExitCode::System,
      BootstrapError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      BootstrapError::Precondition(e) => e.help_message(),
      BootstrapError::Config(e) => e.help_message(),
      BootstrapError::Message { help, .. } => help.clone(),
      BootstrapError::Io(_) | BootstrapError::IoContext { .. } => None,
    }
  }
}

impl fmt::Display for BootstrapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BootstrapError::Precondition(e) => write!(f, "{}", e),
      BootstrapError::Config(e) => write!(f, "{}", e),
      BootstrapError::Io(e) => write!(f, "I/O error: {}", e),
      BootstrapError::IoContext { source, context } => write!(f, "I/O error: {}\n{}", source, context),
      BootstrapError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for BootstrapError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BootstrapError::Io(e) | BootstrapError::IoContext { source: e, .. } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for BootstrapError {
  fn from(err: io::Error) -> Self {
    BootstrapError::Io(err)
  }
}

impl From<PreconditionError> for BootstrapError {
  fn from(err: PreconditionError) -> Self {
    BootstrapError::Precondition(err)
  }
}

impl From<ConfigError> for BootstrapError {
  fn from(err: ConfigError) -> Self {
    BootstrapError::Config(err)
  }
}

impl From<serde_json::Error> for BootstrapError {
  fn from(err: serde_json::Error) -> Self {
    BootstrapError::message(format!("JSON error: {}", err))
  }
}

impl From<walkdir::Error> for BootstrapError {
  fn from(err: walkdir::Error) -> Self {
    let path = err.path().map(|p| p.display().to_string());
    match err.into_io_error() {
      Some(io_err) => {
        let wrapped = BootstrapError::Io(io_err);
        match path {
          Some(p) => wrapped.context(format!("While walking {}", p)),
          None => wrapped,
        }
      }
      None => BootstrapError::message("Directory walk failed: filesystem loop detected"),
    }
  }
}

/// Errors raised before any mutation of the destination tree
#[derive(Debug)]
pub enum PreconditionError {
  /// Output directory is already present
  DestinationExists { path: PathBuf },

  /// Output directory would be copied into itself
  DestinationInsideTemplate { destination: PathBuf, template: PathBuf },

  /// Template root missing or not a directory
  TemplateNotFound { path: PathBuf },

  /// Plugin base name failed validation
  InvalidBaseName { name: String, reason: String },

  /// Plugin id or package name is not a dotted identifier
  InvalidDottedName { field: String, value: String },
}

impl PreconditionError {
  fn help_message(&self) -> Option<String> {
    match self {
      PreconditionError::DestinationExists { .. } => {
        Some("Choose a new --output-dir, or delete the existing directory and retry.".to_string())
      }
      PreconditionError::DestinationInsideTemplate { .. } => {
        Some("Pick an --output-dir outside of the template directory.".to_string())
      }
      PreconditionError::TemplateNotFound { .. } => {
        Some("Run from the template checkout or pass --template <DIR>.".to_string())
      }
      PreconditionError::InvalidBaseName { .. } => {
        Some("Use a CamelCase name such as `HelloWorld` (letters, digits and `_` only).".to_string())
      }
      PreconditionError::InvalidDottedName { field, .. } => Some(format!(
        "--{} must look like `com.example.name` (no empty segments).",
        field
      )),
    }
  }
}

impl fmt::Display for PreconditionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PreconditionError::DestinationExists { path } => {
        write!(f, "Output directory {} already exists", path.display())
      }
      PreconditionError::DestinationInsideTemplate { destination, template } => write!(
        f,
        "Output directory {} is inside the template at {}",
        destination.display(),
        template.display()
      ),
      PreconditionError::TemplateNotFound { path } => {
        write!(f, "Template directory not found: {}", path.display())
      }
      PreconditionError::InvalidBaseName { name, reason } => {
        write!(f, "Invalid plugin name '{}': {}", name, reason)
      }
      PreconditionError::InvalidDottedName { field, value } => {
        write!(f, "Invalid {} '{}'", field, value)
      }
    }
  }
}

/// Profile-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Named profile is not built in
  UnknownProfile { name: String },

  /// Profile file could not be read or parsed
  InvalidProfileFile { path: PathBuf, reason: String },

  /// Profile field failed validation
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::UnknownProfile { .. } => {
        Some("List the built-in profiles with `template-bootstrap profiles`.".to_string())
      }
      ConfigError::InvalidProfileFile { .. } => {
        Some("Check the file against the output of `template-bootstrap profiles --json`.".to_string())
      }
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::UnknownProfile { name } => write!(f, "Unknown template profile '{}'", name),
      ConfigError::InvalidProfileFile { path, reason } => {
        write!(f, "Failed to load profile from {}: {}", path.display(), reason)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid profile field '{}': {}", field, reason)
      }
    }
  }
}

/// Result type alias for template-bootstrap
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> BootstrapResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> BootstrapResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<BootstrapError>,
{
  fn context(self, ctx: impl Into<String>) -> BootstrapResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> BootstrapResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &BootstrapError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

use colored::Colorize;
use std::fmt;
use std::process;

/// Exit codes for the CLI.
#[allow(dead_code)]
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
pub enum CliError {
    /// Configuration error from the reasoner (rules, frameworks)
    Reasoner(parajudica_reasoner::ReasonerError),
    /// Data file parse failure
    Turtle { file: String, source: parajudica_turtle::TurtleError },
    /// Query parse failure
    Query(parajudica_query::QueryError),
    /// Cache I/O failure
    Cache(parajudica_cache::CacheError),
    /// Bad file path or unreadable input
    Input(String),
    /// Argument / usage errors
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Reasoner(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Turtle { file, source } => {
                write!(f, "{} {file}: {source}", "error:".red().bold())
            }
            CliError::Query(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Cache(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Input(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Usage(msg) => write!(f, "{} {msg}", "error:".red().bold()),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<parajudica_reasoner::ReasonerError> for CliError {
    fn from(e: parajudica_reasoner::ReasonerError) -> Self {
        CliError::Reasoner(e)
    }
}

impl From<parajudica_query::QueryError> for CliError {
    fn from(e: parajudica_query::QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<parajudica_cache::CacheError> for CliError {
    fn from(e: parajudica_cache::CacheError) -> Self {
        CliError::Cache(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<parajudica_core::Error> for CliError {
    fn from(e: parajudica_core::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

/// Print error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    let code = match &err {
        CliError::Usage(_) => EXIT_USAGE,
        _ => EXIT_ERROR,
    };
    process::exit(code)
}

pub type CliResult<T> = std::result::Result<T, CliError>;

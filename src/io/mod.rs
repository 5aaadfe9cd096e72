//! The TetGen-style ASCII formats.
//!
//! A `.node` file starts with `<points> <dimension> <attributes> <markers>` and
//! an `.ele` file with `<tetrahedra> <nodes per tetrahedron> <attributes>`;
//! every further line is one record led by its index. Blank lines and
//! everything after a `#` are ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::header::HeaderErr;
use crate::core::shared::{ConfigType, SizeErr};

pub mod ele;
pub mod node;
pub mod text;

#[derive(Debug, Clone)]
pub struct Config {
    /// Fail when the number of records differs from the header's count
    /// instead of logging a warning.
    pub strict_record_count: bool,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            strict_record_count: false,
        }
    }
}

impl Config {
    pub fn strict() -> Self {
        Self {
            strict_record_count: true,
        }
    }
}

/// Where in which file an error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub line: Option<usize>,
}

impl Location {
    pub(crate) fn line(path: &Path, line: usize) -> Self {
        Self { path: path.to_path_buf(), line: Some(line) }
    }

    pub(crate) fn file(path: &Path) -> Self {
        Self { path: path.to_path_buf(), line: None }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("{} does not exist", path.display())]
    FileNotFound { path: PathBuf },
    #[error("{at}: {reason}")]
    InvalidHeaderField {
        at: Location,
        #[source]
        reason: HeaderErr,
    },
    #[error("{at}: node references are one-based integers, found {token:?}")]
    InvalidNodeReference { at: Location, token: String },
    #[error("unable to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{at}: header must contain {expected} integers")]
    MalformedHeader { at: Location, expected: usize },
    #[error("{at}: record must contain {expected} numbers")]
    MalformedRecord { at: Location, expected: usize },
    #[error("{} has no header line", path.display())]
    MissingHeader { path: PathBuf },
    #[error("{} declares {declared} records but holds {found}", path.display())]
    RecordCountMismatch {
        path: PathBuf,
        declared: u32,
        found: usize,
    },
    #[error("{at}: {reason}")]
    SizeMismatch {
        at: Location,
        #[source]
        reason: SizeErr,
    },
}

impl Err {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Err::Io { path: path.to_path_buf(), source }
    }
}

/// Applies the record-count policy of `cfg` once a file has been read.
pub(crate) fn check_record_count(path: &Path, declared: u32, found: usize, cfg: &Config) -> Result<(), Err> {
    if found == declared as usize {
        return Ok(());
    }
    if cfg.strict_record_count {
        return Err(Err::RecordCountMismatch { path: path.to_path_buf(), declared, found });
    }
    tracing::warn!(
        path = %path.display(),
        declared,
        found,
        "record count differs from header"
    );
    Ok(())
}

use std::fmt;
use std::io;
use thiserror::Error;

/// A failure reported by a [`FieldSource`](crate::FieldSource).
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// `line` is where the tokenizer started reading the record, which may be
    /// before the record itself if blank or comment lines precede it.
    #[error("line {line} has {found} fields, but the first record has {expected}")]
    UnequalLengths {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// An error returned while streaming records out of a [`Reader`](crate::Reader).
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read header row: {0}")]
    Header(#[source] ReadError),
    #[error("input ended before a header row")]
    MissingHeader,
    #[error("cannot read row {row}: {source}")]
    Read {
        row: u64,
        #[source]
        source: ReadError,
    },
}

/// An error returned by the strict field getters of a [`Record`](crate::Record).
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no column named {0:?}")]
    MissingColumn(String),
    #[error("column {column:?} (index {index}) is missing from the row")]
    MissingField { column: String, index: usize },
    #[error("cannot parse column {column:?}: {source}")]
    Parse {
        column: String,
        #[source]
        source: ParseError,
    },
}

pub struct ParseError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl ParseError {
    pub(crate) fn invalid_bool(value: &str) -> Self {
        Self {
            inner: format!("invalid boolean literal {:?}", value).into(),
        }
    }

    pub(crate) fn out_of_range(value: &str) -> Self {
        Self {
            inner: format!("{:?} is out of range", value).into(),
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.inner)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl From<std::num::ParseFloatError> for ParseError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self {
            inner: Box::new(error),
        }
    }
}

impl From<std::num::ParseIntError> for ParseError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self {
            inner: Box::new(error),
        }
    }
}

impl From<chrono::format::ParseError> for ParseError {
    fn from(error: chrono::format::ParseError) -> Self {
        Self {
            inner: Box::new(error),
        }
    }
}

impl From<std::convert::Infallible> for ParseError {
    fn from(error: std::convert::Infallible) -> Self {
        match error {}
    }
}

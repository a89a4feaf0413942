//! Suppliers of raw rows.

mod csv;

pub use self::csv::CsvSource;

use crate::error::ReadError;

/// A supplier of rows, one ordered sequence of raw fields per call.
pub trait FieldSource {
    /// Reads the next row.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be read.
    fn read_fields(&mut self) -> Result<Option<Vec<String>>, ReadError>;
}

impl<S: FieldSource + ?Sized> FieldSource for Box<S> {
    fn read_fields(&mut self) -> Result<Option<Vec<String>>, ReadError> {
        (**self).read_fields()
    }
}

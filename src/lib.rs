//! A forward-only CSV reader whose records are addressed by column name.
//!
//! ```
//! let data = "name,age\nColorado Leon,26\n";
//! let mut reader = named_csv::Reader::from_reader(data.as_bytes());
//! for record in reader.records()? {
//!     let record = record?;
//!     assert_eq!(record.get_string("name"), "Colorado Leon");
//!     assert_eq!(record.get_int("age"), 26);
//!     assert_eq!(record.get_int("missing"), 0);
//! }
//! # Ok::<(), named_csv::Error>(())
//! ```

mod error;
pub mod header;
mod options;
pub mod parse;
mod reader;
pub mod record;
pub mod source;

pub use error::{Error, FieldError, ParseError, ReadError};
pub use header::Headers;
pub use options::ReaderOptions;
pub use parse::FromField;
pub use reader::{Reader, RecordReceiver, Records};
pub use record::Record;
pub use source::{CsvSource, FieldSource};

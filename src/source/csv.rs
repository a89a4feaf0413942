use super::FieldSource;
use crate::error::ReadError;
use crate::options::ReaderOptions;
use csv_core::ReadRecordResult;
use std::io::BufRead;

/// A [`FieldSource`] that tokenizes CSV from a buffered byte stream.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// failing the row.
pub struct CsvSource<R> {
    input: R,
    reader: csv_core::Reader,
    flexible: bool,
    num_fields: Option<usize>,
    fields: Vec<u8>,
    ends: Vec<usize>,
}

impl<R: BufRead> CsvSource<R> {
    /// Creates a source reading RFC 4180 CSV from `input`.
    #[must_use]
    pub fn new(input: R) -> Self {
        Self::with_options(input, &ReaderOptions::default())
    }

    /// Creates a source reading CSV in the dialect described by `options`.
    ///
    /// `options.headers` is not used here; see
    /// [`Reader::from_reader_with_options`](crate::Reader::from_reader_with_options).
    #[must_use]
    pub fn with_options(input: R, options: &ReaderOptions) -> Self {
        Self {
            input,
            reader: options.core_reader(),
            flexible: options.flexible,
            num_fields: None,
            fields: vec![0; 1024],
            ends: vec![0; 64],
        }
    }

    /// Returns the line number the tokenizer is currently at.
    ///
    /// Between records this is the line the next read starts from, which
    /// precedes the record itself when blank or comment lines are skipped.
    #[must_use]
    pub fn line(&self) -> u64 {
        self.reader.line()
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.input
    }

    /// Reads one record into `self.fields` and `self.ends`, and returns the
    /// number of fields, or `None` at the end of input.
    fn read_record(&mut self) -> Result<Option<usize>, ReadError> {
        let (mut outlen, mut endlen) = (0, 0);
        loop {
            let (res, nin, nout, nend) = {
                let buf = self.input.fill_buf()?;
                self.reader.read_record(
                    buf,
                    &mut self.fields[outlen..],
                    &mut self.ends[endlen..],
                )
            };
            self.input.consume(nin);
            outlen += nout;
            endlen += nend;
            match res {
                ReadRecordResult::InputEmpty => continue,
                ReadRecordResult::OutputFull => grow(&mut self.fields),
                ReadRecordResult::OutputEndsFull => grow(&mut self.ends),
                ReadRecordResult::Record => return Ok(Some(endlen)),
                ReadRecordResult::End => return Ok(None),
            }
        }
    }
}

impl<R: BufRead> FieldSource for CsvSource<R> {
    fn read_fields(&mut self) -> Result<Option<Vec<String>>, ReadError> {
        let line = self.reader.line();
        let len = match self.read_record()? {
            Some(len) => len,
            None => return Ok(None),
        };

        if !self.flexible {
            match self.num_fields {
                None => self.num_fields = Some(len),
                Some(expected) if expected != len => {
                    return Err(ReadError::UnequalLengths {
                        line,
                        expected,
                        found: len,
                    })
                }
                Some(_) => {}
            }
        }

        let mut start = 0;
        let mut row = Vec::with_capacity(len);
        for &end in &self.ends[..len] {
            row.push(String::from_utf8_lossy(&self.fields[start..end]).into_owned());
            start = end;
        }
        Ok(Some(row))
    }
}

fn grow<T: Clone + Default>(buf: &mut Vec<T>) {
    let len = std::cmp::max(4, buf.len().saturating_mul(2));
    buf.resize(len, T::default());
}

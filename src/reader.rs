//! Streaming of named records out of a [`FieldSource`].

use crate::error::Error;
use crate::header::Headers;
use crate::options::ReaderOptions;
use crate::record::Record;
use crate::source::{CsvSource, FieldSource};
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Uninitialized,
    Streaming,
    Drained,
    Failed,
}

/// A single-pass reader of records addressed by column name.
pub struct Reader<S> {
    source: S,
    headers: Option<Arc<Headers>>,
    cursor: u64,
    state: State,
}

impl<R: Read> Reader<CsvSource<BufReader<R>>> {
    /// Creates a reader of RFC 4180 CSV from `rdr`.
    #[must_use]
    pub fn from_reader(rdr: R) -> Self {
        Self::new(CsvSource::new(BufReader::new(rdr)))
    }

    /// Creates a reader of CSV in the dialect described by `options`.
    ///
    /// If `options.headers` is set, the first row of `rdr` is data.
    #[must_use]
    pub fn from_reader_with_options(rdr: R, options: &ReaderOptions) -> Self {
        let reader = Self::new(CsvSource::with_options(BufReader::new(rdr), options));
        match &options.headers {
            Some(names) => reader.with_headers(names.iter().cloned()),
            None => reader,
        }
    }
}

impl<S: FieldSource> Reader<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            headers: None,
            cursor: 0,
            state: State::Uninitialized,
        }
    }

    /// Uses `names` as the column names instead of the first row of input.
    ///
    /// This has no effect once records have been requested.
    #[must_use]
    pub fn with_headers<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if self.state == State::Uninitialized {
            let names: Vec<String> = names.into_iter().map(Into::into).collect();
            debug!(columns = names.len(), "using configured headers");
            self.headers = Some(Arc::new(Headers::new(names)));
        } else {
            warn!("headers configured after streaming started; ignored");
        }
        self
    }

    /// Returns the column names, reading the first row of input if they were
    /// not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read.
    pub fn headers(&mut self) -> Result<&Headers, Error> {
        Ok(&**self.resolve_headers()?)
    }

    /// Returns an iterator over the remaining records.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read.
    pub fn records(&mut self) -> Result<Records<'_, S>, Error> {
        let headers = Arc::clone(self.resolve_headers()?);
        if self.state == State::Uninitialized {
            self.state = State::Streaming;
        }
        Ok(Records {
            reader: self,
            headers,
        })
    }

    /// Returns the number of records produced so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.source
    }

    fn resolve_headers(&mut self) -> Result<&Arc<Headers>, Error> {
        let headers = match self.headers.take() {
            Some(headers) => headers,
            None => match self.source.read_fields() {
                Ok(Some(names)) => {
                    debug!(columns = names.len(), "read headers from first row");
                    Arc::new(Headers::new(names))
                }
                Ok(None) => {
                    self.state = State::Drained;
                    self.headers = Some(Arc::new(Headers::default()));
                    return Err(Error::MissingHeader);
                }
                Err(e) => {
                    warn!(error = %e, "cannot read headers");
                    self.state = State::Failed;
                    self.headers = Some(Arc::new(Headers::default()));
                    return Err(Error::Header(e));
                }
            },
        };
        Ok(&*self.headers.insert(headers))
    }

    fn next_record(&mut self, headers: &Arc<Headers>) -> Option<Result<Record, Error>> {
        if self.state != State::Streaming {
            return None;
        }
        match self.source.read_fields() {
            Ok(Some(fields)) => {
                let record = Record::new(self.cursor, fields, Arc::clone(headers));
                self.cursor += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                debug!(rows = self.cursor, "input drained");
                self.state = State::Drained;
                None
            }
            Err(source) => {
                warn!(row = self.cursor, error = %source, "stopped reading");
                self.state = State::Failed;
                Some(Err(Error::Read {
                    row: self.cursor,
                    source,
                }))
            }
        }
    }
}

impl<S> Reader<S>
where
    S: FieldSource + Send + 'static,
{
    /// Moves the reader onto a new thread that hands records over one at a
    /// time.
    ///
    /// The thread blocks until the previous record has been received, and
    /// exits once the input ends, a read fails, or the receiver is dropped.
    #[must_use]
    pub fn spawn(mut self) -> RecordReceiver {
        let (tx, rx) = mpsc::sync_channel(0);
        let handle = thread::spawn(move || self.produce(&tx));
        RecordReceiver {
            rx,
            handle: Some(handle),
        }
    }

    fn produce(&mut self, tx: &SyncSender<Result<Record, Error>>) {
        let records = match self.records() {
            Ok(records) => records,
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        };
        for record in records {
            if tx.send(record).is_err() {
                debug!("receiver dropped; producer stopping");
                return;
            }
        }
    }
}

/// An iterator over the records of a [`Reader`].
///
/// A read failure is returned once as `Err`, after which the iterator is
/// exhausted.
pub struct Records<'r, S> {
    reader: &'r mut Reader<S>,
    headers: Arc<Headers>,
}

impl<'r, S> Records<'r, S> {
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl<'r, S: FieldSource> Iterator for Records<'r, S> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record(&self.headers)
    }
}

impl<'r, S: FieldSource> FusedIterator for Records<'r, S> {}

/// The receiving end of a reader started with [`Reader::spawn`].
pub struct RecordReceiver {
    rx: Receiver<Result<Record, Error>>,
    handle: Option<JoinHandle<()>>,
}

impl Iterator for RecordReceiver {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rx.recv() {
            Ok(item) => Some(item),
            Err(_) => {
                if let Some(handle) = self.handle.take() {
                    if handle.join().is_err() {
                        warn!("record producer panicked");
                    }
                }
                None
            }
        }
    }
}

impl FusedIterator for RecordReceiver {}

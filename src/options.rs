use serde::Deserialize;

/// Dialect and header configuration for a CSV [`Reader`](crate::Reader).
///
/// All fields have defaults, so a partial configuration such as
/// `{"delimiter": 59}` deserializes into an otherwise standard dialect.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReaderOptions {
    pub delimiter: u8,
    pub quote: u8,
    pub escape: Option<u8>,
    pub double_quote: bool,
    pub comment: Option<u8>,
    /// Accepts records whose field count differs from the first record.
    pub flexible: bool,
    /// Column names to use instead of the first row of the input.
    pub headers: Option<Vec<String>>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: None,
            double_quote: true,
            comment: None,
            flexible: false,
            headers: None,
        }
    }
}

impl ReaderOptions {
    pub(crate) fn core_reader(&self) -> csv_core::Reader {
        csv_core::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.double_quote)
            .comment(self.comment)
            .build()
    }
}

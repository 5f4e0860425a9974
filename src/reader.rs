use std::str;
use std::sync::Arc;

use quoted_core::{Processor, Signals};

use crate::error::{Error, Result};
use crate::record::{Headers, Row};

/// Builds a reader with various configuration knobs.
///
/// This builder can be used to tweak the signals used to split rows,
/// whether the first row is a header row and whether rows may have
/// differing numbers of fields.
#[derive(Debug)]
pub struct ReaderBuilder {
    signals: Signals,
    has_headers: bool,
    flexible: bool,
    full: bool,
}

impl Default for ReaderBuilder {
    fn default() -> ReaderBuilder {
        ReaderBuilder {
            signals: Signals::csv().clone(),
            has_headers: true,
            flexible: false,
            full: false,
        }
    }
}

impl ReaderBuilder {
    /// Create a new builder for configuring a reader.
    ///
    /// To convert a builder into a reader, call one of the methods starting
    /// with `from_`.
    ///
    /// # Example
    ///
    /// ```
    /// use quoted::ReaderBuilder;
    ///
    /// let data = "\
    /// city,country,pop
    /// Boston,United States,4628910
    /// ";
    /// let mut rdr = ReaderBuilder::new().from_str(data);
    /// let row = rdr.rows().next().unwrap().unwrap();
    /// assert_eq!(row, vec!["Boston", "United States", "4628910"]);
    /// assert_eq!(row.parse_named::<u64>("pop").unwrap(), 4628910);
    /// ```
    pub fn new() -> ReaderBuilder {
        ReaderBuilder::default()
    }

    /// Build a reader from this configuration that reads from the given
    /// characters.
    pub fn from_chars<I>(&self, input: I) -> Reader<I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        Reader::new(self, input.into_iter())
    }

    /// Build a reader from this configuration that reads the given string.
    pub fn from_str<'s>(&self, s: &'s str) -> Reader<str::Chars<'s>> {
        self.from_chars(s.chars())
    }

    /// The signals used to split rows.
    ///
    /// The default is `Signals::csv()`.
    pub fn signals(&mut self, signals: &Signals) -> &mut ReaderBuilder {
        self.signals = signals.clone();
        self
    }

    /// Whether to treat the first row as a special header row.
    ///
    /// When enabled (the default), the first row is not returned by
    /// `read_row` or the `rows` iterators. Instead, it is available from
    /// `headers`, and every row read is attached to it such that fields
    /// can be looked up by column name.
    pub fn has_headers(&mut self, yes: bool) -> &mut ReaderBuilder {
        self.has_headers = yes;
        self
    }

    /// Whether the number of fields in rows is allowed to change or not.
    ///
    /// When disabled (the default), reading a row whose number of fields
    /// differs from the first row (including the header row) returns an
    /// error.
    pub fn flexible(&mut self, yes: bool) -> &mut ReaderBuilder {
        self.flexible = yes;
        self
    }

    /// Always split rows with the general flavor, even when the signals
    /// permit a faster one.
    ///
    /// This is only useful for testing. Rows are identical either way.
    #[doc(hidden)]
    pub fn full(&mut self, yes: bool) -> &mut ReaderBuilder {
        self.full = yes;
        self
    }
}

/// A reader of rows.
///
/// A reader pulls characters from its input lazily, and never more than
/// needed to complete the row being read. Any iterator of characters may be
/// used as input.
///
/// By default, the first row is treated as a header row and every row must
/// have the same number of fields. See `ReaderBuilder` to change that.
#[derive(Debug)]
pub struct Reader<I> {
    processor: Processor,
    input: I,
    state: ReaderState,
}

#[derive(Debug)]
struct ReaderState {
    has_headers: bool,
    flexible: bool,
    /// Set once the header row (if any) has been read.
    headers: Option<HeaderState>,
    /// The number of fields in the first row read, headers included.
    first_field_count: Option<u64>,
    /// The index of the next row, headers included.
    row: u64,
    eof: bool,
}

#[derive(Debug)]
enum HeaderState {
    /// No header row is expected, or the input was empty.
    None,
    Some(Arc<Headers>),
}

impl<'s> Reader<str::Chars<'s>> {
    /// Create a reader of the given string with a default configuration.
    pub fn from_str(s: &'s str) -> Reader<str::Chars<'s>> {
        ReaderBuilder::new().from_str(s)
    }
}

impl<I: Iterator<Item = char>> Reader<I> {
    fn new(builder: &ReaderBuilder, input: I) -> Reader<I> {
        let processor = if builder.full {
            Processor::full(&builder.signals)
        } else {
            Processor::new(&builder.signals)
        };
        Reader {
            processor,
            input,
            state: ReaderState {
                has_headers: builder.has_headers,
                flexible: builder.flexible,
                headers: None,
                first_field_count: None,
                row: 0,
                eof: false,
            },
        }
    }

    /// Create a reader of the given characters with a default
    /// configuration.
    pub fn from_chars<T>(input: T) -> Reader<I>
    where
        T: IntoIterator<Item = char, IntoIter = I>,
    {
        ReaderBuilder::new().from_chars(input)
    }

    /// Returns the header row, reading it first if necessary.
    ///
    /// If this reader was configured without headers, or the input is
    /// empty, then this returns `None`.
    pub fn headers(&mut self) -> Result<Option<&Headers>> {
        self.read_headers()?;
        match self.state.headers {
            Some(HeaderState::Some(ref headers)) => Ok(Some(&**headers)),
            _ => Ok(None),
        }
    }

    /// Read a single row into the given row, replacing its fields.
    ///
    /// This returns `false` once the input is exhausted. If the row has
    /// the wrong number of fields, then it is still read into `row` and an
    /// `UnequalLengths` error is returned. Reading may continue after such
    /// an error.
    pub fn read_row(&mut self, row: &mut Row) -> Result<bool> {
        self.read_headers()?;
        let fields = match self.read_fields() {
            None => {
                row.clear();
                return Ok(false);
            }
            Some(fields) => fields,
        };
        let result = self.check_length(fields.len());
        row.set_fields(fields);
        row.set_headers(match self.state.headers {
            Some(HeaderState::Some(ref headers)) => Some(Arc::clone(headers)),
            _ => None,
        });
        result.map(|()| true)
    }

    /// Returns a borrowed iterator over all rows.
    ///
    /// The header row, if any, is never yielded.
    pub fn rows(&mut self) -> RowsIter<'_, I> {
        RowsIter { rdr: self }
    }

    /// Returns an owned iterator over all rows.
    pub fn into_rows(self) -> RowsIntoIter<I> {
        RowsIntoIter { rdr: self }
    }

    /// Returns true if and only if the input has been exhausted.
    pub fn is_done(&self) -> bool {
        self.state.eof
    }

    fn read_headers(&mut self) -> Result<()> {
        if self.state.headers.is_some() {
            return Ok(());
        }
        if !self.state.has_headers {
            self.state.headers = Some(HeaderState::None);
            return Ok(());
        }
        match self.read_fields() {
            None => {
                self.state.headers = Some(HeaderState::None);
                Ok(())
            }
            Some(names) => {
                let result = self.check_length(names.len());
                let headers = Arc::new(Headers::new(names));
                self.state.headers = Some(HeaderState::Some(headers));
                result
            }
        }
    }

    fn read_fields(&mut self) -> Option<Vec<String>> {
        if self.state.eof {
            return None;
        }
        match self.processor.read_row(&mut self.input) {
            None => {
                self.state.eof = true;
                None
            }
            Some(fields) => Some(fields),
        }
    }

    fn check_length(&mut self, len: usize) -> Result<()> {
        let row = self.state.row;
        self.state.row += 1;
        if self.state.flexible {
            return Ok(());
        }
        let len = len as u64;
        match self.state.first_field_count {
            None => {
                self.state.first_field_count = Some(len);
                Ok(())
            }
            Some(expected_len) if expected_len != len => {
                Err(Error::UnequalLengths { expected_len, row, len })
            }
            Some(_) => Ok(()),
        }
    }
}

/// A borrowed iterator over the rows of a reader.
///
/// The lifetime parameter `'r` refers to the lifetime of the underlying
/// reader.
#[derive(Debug)]
pub struct RowsIter<'r, I> {
    rdr: &'r mut Reader<I>,
}

impl<'r, I: Iterator<Item = char>> RowsIter<'r, I> {
    /// Return a reference to the underlying reader.
    pub fn reader(&self) -> &Reader<I> {
        &self.rdr
    }
}

impl<'r, I: Iterator<Item = char>> Iterator for RowsIter<'r, I> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        next_row(self.rdr)
    }
}

/// An owned iterator over the rows of a reader.
#[derive(Debug)]
pub struct RowsIntoIter<I> {
    rdr: Reader<I>,
}

impl<I: Iterator<Item = char>> RowsIntoIter<I> {
    /// Drop this iterator and return the underlying reader.
    pub fn into_reader(self) -> Reader<I> {
        self.rdr
    }
}

impl<I: Iterator<Item = char>> Iterator for RowsIntoIter<I> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        next_row(&mut self.rdr)
    }
}

fn next_row<I: Iterator<Item = char>>(
    rdr: &mut Reader<I>,
) -> Option<Result<Row>> {
    let mut row = Row::new();
    match rdr.read_row(&mut row) {
        Err(err) => Some(Err(err)),
        Ok(true) => Some(Ok(row)),
        Ok(false) => None,
    }
}

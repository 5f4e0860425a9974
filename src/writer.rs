use std::fs::File;
use std::io;
use std::path::Path;

use quoted_core::{AsField, QuoteStyle, Signals};

use crate::error::{Error, Result};
use crate::record::Row;

/// Builds a writer with various configuration knobs.
#[derive(Debug)]
pub struct WriterBuilder {
    signals: Signals,
    style: QuoteStyle,
    flexible: bool,
}

impl Default for WriterBuilder {
    fn default() -> WriterBuilder {
        WriterBuilder {
            signals: Signals::csv().clone(),
            style: QuoteStyle::default(),
            flexible: false,
        }
    }
}

impl WriterBuilder {
    /// Create a new builder for configuring a writer.
    ///
    /// # Example
    ///
    /// ```
    /// use quoted::{QuoteStyle, WriterBuilder};
    ///
    /// # fn example() -> Result<(), quoted::Error> {
    /// let mut wtr = WriterBuilder::new()
    ///     .quote_style(QuoteStyle::Always)
    ///     .from_writer(vec![])?;
    /// wtr.write_record(&["a", "b"])?;
    ///
    /// let data = String::from_utf8(wtr.into_inner()?).unwrap();
    /// assert_eq!(data, "\"a\",\"b\"\n");
    /// # Ok(()) }
    /// # example().unwrap();
    /// ```
    pub fn new() -> WriterBuilder {
        WriterBuilder::default()
    }

    /// Build a writer from this configuration that writes to `wtr`.
    ///
    /// This fails if quotes are forced, but the signals have no quote.
    pub fn from_writer<W: io::Write>(&self, wtr: W) -> Result<Writer<W>> {
        let mut b = quoted_core::WriterBuilder::new(&self.signals);
        b.quote_style(self.style);
        Ok(Writer {
            wtr,
            joiner: b.build()?,
            buf: String::new(),
            state: WriterState {
                flexible: self.flexible,
                first_field_count: None,
                rows: 0,
            },
        })
    }

    /// Build a writer from this configuration that writes to the file at
    /// the given path. The file is truncated if it already exists.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Writer<File>> {
        self.from_writer(File::create(path)?)
    }

    /// The signals used to join rows.
    ///
    /// The default is `Signals::csv()`.
    pub fn signals(&mut self, signals: &Signals) -> &mut WriterBuilder {
        self.signals = signals.clone();
        self
    }

    /// The quoting style to use when writing.
    ///
    /// By default, this is set to `QuoteStyle::Necessary`.
    pub fn quote_style(&mut self, style: QuoteStyle) -> &mut WriterBuilder {
        self.style = style;
        self
    }

    /// Whether the number of fields in rows is allowed to change or not.
    ///
    /// When disabled (the default), writing a row whose number of fields
    /// differs from the first row returns an error, and nothing is
    /// written.
    pub fn flexible(&mut self, yes: bool) -> &mut WriterBuilder {
        self.flexible = yes;
        self
    }
}

/// A writer of rows.
///
/// Every row written is followed by the primary row separator. If the
/// signals have no row separator, then only a single row may be written.
///
/// A row consisting of a single empty field is written as just a row
/// separator, which reads back as the same row. A row with no fields at
/// all is written the same way.
#[derive(Debug)]
pub struct Writer<W: io::Write> {
    wtr: W,
    joiner: quoted_core::Writer,
    buf: String,
    state: WriterState,
}

#[derive(Debug)]
struct WriterState {
    flexible: bool,
    first_field_count: Option<u64>,
    rows: u64,
}

impl<W: io::Write> Writer<W> {
    /// Create a writer with a default configuration that writes to `wtr`.
    pub fn from_writer(wtr: W) -> Writer<W> {
        Writer {
            wtr,
            joiner: quoted_core::Writer::new(Signals::csv()),
            buf: String::new(),
            state: WriterState {
                flexible: false,
                first_field_count: None,
                rows: 0,
            },
        }
    }

    /// Write a single row.
    ///
    /// Fields may be any string type, or an `Option` of one, where `None`
    /// is written as an empty field.
    ///
    /// If the row can't be joined, or has the wrong number of fields, then
    /// nothing is written.
    pub fn write_record<I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        let separator = self.joiner.signals().row_separator();
        if separator.is_none() && self.state.rows > 0 {
            return Err(Error::Signal(quoted_core::Error::MissingRowSeparator));
        }
        self.buf.clear();
        let mut len = 0;
        let fields = fields.into_iter().inspect(|_| len += 1);
        self.joiner.join_into(fields, &mut self.buf)?;
        self.state.check_length(len)?;
        if let Some(separator) = separator {
            self.buf.push_str(separator);
        }
        self.wtr.write_all(self.buf.as_bytes())?;
        self.state.rows += 1;
        Ok(())
    }

    /// Write a single `Row`.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.write_record(row)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.wtr.flush()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.wtr)
    }

    /// Return a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.wtr
    }
}

impl WriterState {
    fn check_length(&mut self, len: u64) -> Result<()> {
        if self.flexible {
            return Ok(());
        }
        match self.first_field_count {
            None => {
                self.first_field_count = Some(len);
                Ok(())
            }
            Some(expected_len) if expected_len != len => {
                Err(Error::UnequalLengths { expected_len, row: self.rows, len })
            }
            Some(_) => Ok(()),
        }
    }
}

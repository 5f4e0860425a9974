use std::error;
use std::fmt;
use std::io;
use std::result;

/// A type alias for `Result<T, quoted::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when reading, writing or converting rows.
///
/// Note that when reading rows from an in-memory source with the `flexible`
/// option enabled, no error can occur at all.
#[derive(Debug)]
pub enum Error {
    /// An error from the signal configuration, or from splitting or joining
    /// with it.
    Signal(quoted_core::Error),
    /// An I/O error that occurred while writing rows.
    Io(io::Error),
    /// This error occurs when two rows with an unequal number of fields
    /// are found. This error only occurs when the `flexible` option is
    /// disabled.
    UnequalLengths {
        /// The expected number of fields in a row. This is the number of
        /// fields in the first row.
        expected_len: u64,
        /// The index of the first row with an unequal number of fields,
        /// starting at `0`. A header row counts as a row.
        row: u64,
        /// The number of fields in the bad row.
        len: u64,
    },
    /// A field could not be converted to the requested type.
    Convert {
        /// The index of the field.
        field: usize,
        /// The contents of the field.
        value: String,
        /// A description of why the conversion failed.
        message: String,
    },
    /// A field was looked up by a column name that isn't in the headers,
    /// or a row without headers was looked up by name.
    UnknownColumn(String),
    /// A fixed width column was given a width of zero.
    InvalidWidth {
        /// The index of the column.
        index: usize,
    },
    /// A field is wider than its fixed width column.
    FieldTooWide {
        /// The index of the column.
        index: usize,
        /// The width of the column, in characters.
        width: usize,
        /// The width of the field, in characters.
        len: usize,
    },
    /// More fields were given than there are fixed width columns.
    TooManyFields {
        /// The number of columns.
        expected: usize,
        /// The number of fields given.
        len: usize,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<quoted_core::Error> for Error {
    fn from(err: quoted_core::Error) -> Error {
        Error::Signal(err)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Signal(ref err) => Some(err),
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Signal(ref err) => err.fmt(f),
            Error::Io(ref err) => err.fmt(f),
            Error::UnequalLengths { expected_len, row, len } => write!(
                f,
                "row error: row {}: found row with {} fields, but the \
                 first row has {} fields",
                row, len, expected_len
            ),
            Error::Convert { field, ref value, ref message } => write!(
                f,
                "conversion error: field {} ({:?}): {}",
                field, value, message
            ),
            Error::UnknownColumn(ref name) => {
                write!(f, "row error: no column named {:?}", name)
            }
            Error::InvalidWidth { index } => write!(
                f,
                "fixed width error: column {} has a width of zero",
                index
            ),
            Error::FieldTooWide { index, width, len } => write!(
                f,
                "fixed width error: field {} has {} characters, but its \
                 column is only {} wide",
                index, len, width
            ),
            Error::TooManyFields { expected, len } => write!(
                f,
                "fixed width error: found {} fields, but there are only {} \
                 columns",
                len, expected
            ),
        }
    }
}

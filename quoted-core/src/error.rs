use std::error;
use std::fmt;
use std::result;

use crate::signals::SignalClass;

/// A type alias for `Result<T, quoted_core::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when configuring signals, splitting rows or
/// joining fields.
///
/// Every error in this crate is a caller mistake: either the signal
/// configuration is ambiguous, or a particular row or field cannot be
/// represented with the configured signals. None of them are transient.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An empty string was given where a signal is required.
    EmptySignal {
        /// The class of signal that was empty.
        class: SignalClass,
    },
    /// Signals were built without a primary delimiter.
    MissingDelimiter,
    /// Two signals of different classes (or two incompatible alternates of
    /// the same class) contain one another, which makes one of them
    /// impossible to tell apart from a prefix of the other.
    Overlap {
        /// The signal being added.
        first: String,
        /// The class of the signal being added.
        first_class: SignalClass,
        /// The already configured signal it collides with.
        second: String,
        /// The class of the already configured signal.
        second_class: SignalClass,
    },
    /// A row separator was found outside of quotes while splitting input
    /// that must contain exactly one row.
    RowSeparatorNotAllowed,
    /// Rows were joined, but no row separator is configured.
    MissingRowSeparator,
    /// A field contains structural text and must be quoted or escaped, but
    /// neither a quote nor an escape signal is configured.
    Unserializable {
        /// The index of the offending field within its row.
        field: usize,
    },
    /// Quoting was forced, but no quote signal is configured.
    MissingQuote,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptySignal { class } => {
                write!(f, "signal error: {} must not be empty", class)
            }
            Error::MissingDelimiter => {
                write!(f, "signal error: a primary delimiter is required")
            }
            Error::Overlap {
                ref first,
                first_class,
                ref second,
                second_class,
            } => write!(
                f,
                "signal error: {} {:?} overlaps with {} {:?}",
                first_class, first, second_class, second
            ),
            Error::RowSeparatorNotAllowed => write!(
                f,
                "split error: row separator not allowed outside quotes \
                 for this call"
            ),
            Error::MissingRowSeparator => write!(
                f,
                "join error: joining rows requires a row separator"
            ),
            Error::Unserializable { field } => write!(
                f,
                "join error: field {} must be quoted or escaped, but \
                 neither a quote nor an escape signal is configured",
                field
            ),
            Error::MissingQuote => write!(
                f,
                "join error: quoting was forced, but no quote signal \
                 is configured"
            ),
        }
    }
}

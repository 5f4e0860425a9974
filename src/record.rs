use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;
use std::ops;
use std::slice;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};

/// The names of the columns of a sequence of rows.
///
/// Headers are shared between every row read with them, so looking up a
/// field by name doesn't require cloning the names for each row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Headers {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Headers {
    /// Create headers from the given column names.
    ///
    /// If a name occurs more than once, then looking it up finds the first
    /// column with that name.
    pub fn new<I, T>(names: I) -> Headers
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(i);
        }
        Headers { names, positions }
    }

    /// Return the name of column `i`.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(|s| s.as_str())
    }

    /// Return the index of the first column with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).cloned()
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if and only if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns an iterator over all column names.
    pub fn iter(&self) -> RowIter {
        RowIter(self.names.iter())
    }
}

impl From<Row> for Headers {
    fn from(row: Row) -> Headers {
        Headers::new(row.fields)
    }
}

impl<'a> IntoIterator for &'a Headers {
    type IntoIter = RowIter<'a>;
    type Item = &'a str;

    fn into_iter(self) -> RowIter<'a> {
        self.iter()
    }
}

/// A single row of fields.
///
/// A row may carry the headers of the input it was read from, in which case
/// its fields can also be looked up by column name.
///
/// Equality only compares fields, never headers.
#[derive(Clone, Default)]
pub struct Row {
    fields: Vec<String>,
    headers: Option<Arc<Headers>>,
}

impl Row {
    /// Create a new empty `Row`.
    pub fn new() -> Row {
        Row::default()
    }

    /// Create a new empty `Row` with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Row {
        Row { fields: Vec::with_capacity(capacity), headers: None }
    }

    /// Return the field at index `i`.
    ///
    /// If no field at index `i` exists, then this returns `None`.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.fields.get(i).map(|s| s.as_str())
    }

    /// Return the field in the column with the given name.
    ///
    /// If this row has no headers, the name is unknown, or this row is too
    /// short to have that column, then this returns `None`.
    pub fn get_named(&self, name: &str) -> Option<&str> {
        self.position(name).ok().and_then(|i| self.get(i))
    }

    /// Parse the field at index `i` with `FromStr`.
    ///
    /// # Example
    ///
    /// ```
    /// use quoted::Row;
    ///
    /// let row = Row::from(vec!["42", "x"]);
    /// assert_eq!(row.parse::<u8>(0).unwrap(), 42);
    /// assert!(row.parse::<u8>(1).is_err());
    /// ```
    pub fn parse<T>(&self, i: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = match self.get(i) {
            None => {
                return Err(Error::Convert {
                    field: i,
                    value: String::new(),
                    message: format!(
                        "row has {} fields, so field {} does not exist",
                        self.len(),
                        i
                    ),
                })
            }
            Some(value) => value,
        };
        value.parse::<T>().map_err(|err| Error::Convert {
            field: i,
            value: value.to_string(),
            message: err.to_string(),
        })
    }

    /// Parse the field in the column with the given name with `FromStr`.
    ///
    /// If this row has no headers or the name is unknown, then an
    /// `UnknownColumn` error is returned.
    pub fn parse_named<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.parse(self.position(name)?)
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.headers
            .as_ref()
            .and_then(|h| h.position(name))
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Return the headers attached to this row, if any.
    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref().map(|h| &**h)
    }

    /// Attach headers to this row, replacing any existing ones.
    pub fn set_headers(&mut self, headers: Option<Arc<Headers>>) {
        self.headers = headers;
    }

    /// Returns true if and only if this row has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of fields in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Truncate this row to the given number of fields.
    pub fn truncate(&mut self, n: usize) {
        self.fields.truncate(n);
    }

    /// Clear this row so that it has zero fields.
    ///
    /// Headers are kept.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Add a new field to this row.
    pub fn push_field(&mut self, field: &str) {
        self.fields.push(field.to_string());
    }

    /// Add an integer as a new field to this row.
    pub fn push_integer<I: itoa::Integer>(&mut self, n: I) {
        let mut buf = itoa::Buffer::new();
        self.push_field(buf.format(n));
    }

    /// Add a floating point number as a new field to this row.
    ///
    /// Finite numbers are written in the shortest form that parses back to
    /// the same number. Otherwise, `NaN`, `inf` or `-inf` is written.
    pub fn push_float<F: ryu::Float>(&mut self, n: F) {
        let mut buf = ryu::Buffer::new();
        self.push_field(buf.format(n));
    }

    /// Returns an iterator over all fields in this row.
    pub fn iter(&self) -> RowIter {
        RowIter(self.fields.iter())
    }

    /// Consume this row and return its fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Replace the fields of this row, keeping its headers.
    pub(crate) fn set_fields(&mut self, fields: Vec<String>) {
        self.fields = fields;
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Row({:?})", self.fields)
    }
}

impl Eq for Row {}

impl PartialEq for Row {
    fn eq(&self, other: &Row) -> bool {
        self.fields == other.fields
    }
}

impl<T: AsRef<str>> PartialEq<[T]> for Row {
    fn eq(&self, other: &[T]) -> bool {
        self.iter().eq(other.iter().map(|f| f.as_ref()))
    }
}

impl<'a, T: AsRef<str>> PartialEq<[T]> for &'a Row {
    fn eq(&self, other: &[T]) -> bool {
        (**self).eq(other)
    }
}

impl<T: AsRef<str>> PartialEq<Vec<T>> for Row {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.eq(other.as_slice())
    }
}

impl<'a, T: AsRef<str>> PartialEq<Vec<T>> for &'a Row {
    fn eq(&self, other: &Vec<T>) -> bool {
        (**self).eq(other.as_slice())
    }
}

impl ops::Index<usize> for Row {
    type Output = str;

    fn index(&self, i: usize) -> &str {
        &self.fields[i]
    }
}

impl<T: Into<String>> From<Vec<T>> for Row {
    fn from(fields: Vec<T>) -> Row {
        fields.into_iter().collect()
    }
}

impl<'a, T: AsRef<str>> From<&'a [T]> for Row {
    fn from(fields: &'a [T]) -> Row {
        fields.iter().map(|f| f.as_ref()).collect()
    }
}

impl<T: Into<String>> FromIterator<T> for Row {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Row {
        Row { fields: iter.into_iter().map(Into::into).collect(), headers: None }
    }
}

impl<T: Into<String>> Extend<T> for Row {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.fields.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a Row {
    type IntoIter = RowIter<'a>;
    type Item = &'a str;

    fn into_iter(self) -> RowIter<'a> {
        self.iter()
    }
}

/// An iterator over the fields of a row or the names of headers.
#[derive(Clone, Debug)]
pub struct RowIter<'a>(slice::Iter<'a, String>);

impl<'a> Iterator for RowIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.0.next().map(|s| s.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> DoubleEndedIterator for RowIter<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        self.0.next_back().map(|s| s.as_str())
    }
}

impl<'a> ExactSizeIterator for RowIter<'a> {}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{Serialize, SerializeSeq, Serializer};

    use super::{Headers, Row};

    impl Serialize for Row {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            let mut seq = s.serialize_seq(Some(self.len()))?;
            for field in self {
                seq.serialize_element(field)?;
            }
            seq.end()
        }
    }

    impl Serialize for Headers {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            let mut seq = s.serialize_seq(Some(self.len()))?;
            for name in self {
                seq.serialize_element(name)?;
            }
            seq.end()
        }
    }
}

/*!
Splitting and joining of rows whose columns have fixed widths.

Widths are measured in characters. Columns are padded on the right with a
fill character, which is trimmed again when splitting. This has nothing to
do with signals: no quoting or escaping is ever involved.
*/

use quoted_core::AsField;

use crate::error::{Error, Result};

/// The widths of the columns of a fixed width row.
///
/// Every width is at least `1`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Widths(Vec<usize>);

impl Widths {
    /// Create column widths, in characters.
    ///
    /// This fails if any width is zero.
    pub fn new(widths: &[usize]) -> Result<Widths> {
        if let Some(index) = widths.iter().position(|&w| w == 0) {
            return Err(Error::InvalidWidth { index });
        }
        Ok(Widths(widths.to_vec()))
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if and only if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the sum of all widths.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Returns the widths as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Split a fixed width row into one field per column.
///
/// Trailing `fill` characters are trimmed from each field. If the row is
/// too short, then the missing columns are empty. Characters past the last
/// column are ignored.
///
/// # Example
///
/// ```
/// use quoted::fixed::{split_fixed, Widths};
///
/// let widths = Widths::new(&[5, 3]).unwrap();
/// assert_eq!(split_fixed("ab   cd ", &widths, ' '), vec!["ab", "cd"]);
/// ```
pub fn split_fixed(row: &str, widths: &Widths, fill: char) -> Vec<String> {
    let mut chars = row.chars();
    widths
        .as_slice()
        .iter()
        .map(|&width| {
            let field: String = chars.by_ref().take(width).collect();
            field.trim_end_matches(fill).to_string()
        })
        .collect()
}

/// Join fields into a fixed width row, padding each on the right with
/// `fill`.
///
/// Missing trailing fields are written as empty columns. This fails if a
/// field is wider than its column, or if there are more fields than
/// columns.
pub fn join_fixed<I>(fields: I, widths: &Widths, fill: char) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsField,
{
    let mut out = String::with_capacity(widths.total());
    let mut fields = fields.into_iter();
    for (index, &width) in widths.as_slice().iter().enumerate() {
        let len = match fields.next() {
            None => 0,
            Some(field) => {
                let field = field.as_field();
                let len = field.chars().count();
                if len > width {
                    return Err(Error::FieldTooWide { index, width, len });
                }
                out.push_str(field);
                len
            }
        };
        out.extend(std::iter::repeat(fill).take(width - len));
    }
    let extra = fields.count();
    if extra > 0 {
        return Err(Error::TooManyFields {
            expected: widths.len(),
            len: widths.len() + extra,
        });
    }
    Ok(out)
}

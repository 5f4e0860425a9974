use std::borrow::Cow;

use memchr::memmem;

use crate::error::{Error, Result};
use crate::signals::Signals;

/// The quoting style to use when joining fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuoteStyle {
    /// This puts quotes around every field. Always.
    ///
    /// This requires a quote signal.
    Always,
    /// This puts quotes around fields only when necessary.
    ///
    /// They are necessary when fields contain a quote, delimiter or row
    /// separator. If no quote is configured, then those signals are escaped
    /// instead.
    ///
    /// This is the default.
    Necessary,
    /// This *never* writes quotes.
    ///
    /// Fields that need protecting are escaped. If no escape is configured,
    /// then joining such a field is an error.
    Never,
}

impl Default for QuoteStyle {
    fn default() -> QuoteStyle {
        QuoteStyle::Necessary
    }
}

/// A value that can be joined as a field.
///
/// This is implemented for the usual string types, and for `Option`s of
/// them, where `None` is joined as an empty field.
pub trait AsField {
    /// The contents of this field.
    fn as_field(&self) -> &str;
}

impl AsField for str {
    fn as_field(&self) -> &str {
        self
    }
}

impl AsField for String {
    fn as_field(&self) -> &str {
        self
    }
}

impl<'a> AsField for Cow<'a, str> {
    fn as_field(&self) -> &str {
        self
    }
}

impl<'a, T: AsField + ?Sized> AsField for &'a T {
    fn as_field(&self) -> &str {
        (**self).as_field()
    }
}

impl<T: AsField> AsField for Option<T> {
    fn as_field(&self) -> &str {
        match *self {
            None => "",
            Some(ref field) => field.as_field(),
        }
    }
}

/// A builder for configuring how fields are joined.
#[derive(Clone, Debug)]
pub struct WriterBuilder {
    signals: Signals,
    style: QuoteStyle,
}

impl WriterBuilder {
    /// Create a new builder for joining fields with the given signals.
    pub fn new(signals: &Signals) -> WriterBuilder {
        WriterBuilder { signals: signals.clone(), style: QuoteStyle::default() }
    }

    /// Build a writer from this configuration.
    ///
    /// This fails if quotes are forced but no quote signal is configured.
    pub fn build(&self) -> Result<Writer> {
        if self.style == QuoteStyle::Always && self.signals.quote().is_none() {
            return Err(Error::MissingQuote);
        }
        Ok(Writer::with_style(&self.signals, self.style))
    }

    /// The quoting style to use when joining.
    ///
    /// By default, this is set to `QuoteStyle::Necessary`, which will only
    /// use quotes when they are necessary to preserve the integrity of data.
    pub fn quote_style(&mut self, style: QuoteStyle) -> &mut WriterBuilder {
        self.style = style;
        self
    }
}

/// Joins fields into rows.
///
/// A writer holds no state between calls, so a single writer can be shared
/// freely.
///
/// Each field is joined as follows:
///
/// 1. If an escape is configured, every escape in the field is doubled.
/// 2. If a quote is configured and the field needs protecting (or quotes
///    are forced), every quote inside it is escaped (or doubled when there
///    is no escape) and the field is surrounded by quotes.
/// 3. Otherwise, if the field needs protecting, every delimiter, row
///    separator and quote in it is escaped.
///
/// A field needs protecting when it contains a delimiter, a row separator
/// or the quote. Fields also need protecting when they end with a proper
/// prefix of a multi-character delimiter or row separator, since that
/// prefix could combine with the delimiter that follows.
#[derive(Clone, Debug)]
pub struct Writer {
    signals: Signals,
    style: QuoteStyle,
    /// Every delimiter, row separator and the quote, longest first.
    structural: Vec<String>,
    finders: Vec<memmem::Finder<'static>>,
    /// Every delimiter and row separator.
    separators: Vec<String>,
    /// The quote, if any.
    quotes: Vec<String>,
}

impl Writer {
    /// Create a writer with the default configuration.
    pub fn new(signals: &Signals) -> Writer {
        Writer::with_style(signals, QuoteStyle::default())
    }

    fn with_style(signals: &Signals, style: QuoteStyle) -> Writer {
        let mut structural: Vec<&str> = vec![];
        structural.extend(signals.delimiters().iter().map(|s| s.as_str()));
        structural.extend(signals.row_separators().iter().map(|s| s.as_str()));
        structural.extend(signals.quote());
        // Longest first, so that escaping prefers `\r\n` over `\r`.
        structural.sort_by(|a, b| b.len().cmp(&a.len()));
        let finders = structural
            .iter()
            .map(|s| memmem::Finder::new(s.as_bytes()).into_owned())
            .collect();
        let separators = signals
            .delimiters()
            .iter()
            .chain(signals.row_separators())
            .cloned()
            .collect();
        Writer {
            signals: signals.clone(),
            style,
            structural: structural.iter().map(|s| s.to_string()).collect(),
            finders,
            separators,
            quotes: signals.quote().into_iter().map(String::from).collect(),
        }
    }

    /// The signals used by this writer.
    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    /// Join the given fields into a single row, without a row separator.
    pub fn join<I>(&self, fields: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        let mut out = String::new();
        self.join_into(fields, &mut out)?;
        Ok(out)
    }

    /// Join the given fields and append them to `out`.
    ///
    /// If an error occurs, then `out` may contain some of the fields.
    pub fn join_into<I>(&self, fields: I, out: &mut String) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                out.push_str(self.signals.delimiter());
            }
            self.push_field(i, field.as_field(), out)?;
        }
        Ok(())
    }

    /// Join the given rows, separating them with the primary row
    /// separator.
    ///
    /// This fails if no row separator is configured.
    pub fn join_rows<R, I>(&self, rows: R) -> Result<String>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: AsField,
    {
        let separator = match self.signals.row_separator() {
            None => return Err(Error::MissingRowSeparator),
            Some(separator) => separator,
        };
        let mut out = String::new();
        for (i, row) in rows.into_iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.join_into(row, &mut out)?;
        }
        Ok(out)
    }

    fn push_field(&self, i: usize, field: &str, out: &mut String) -> Result<()> {
        let escape = self.signals.escape();
        let quote = match self.style {
            QuoteStyle::Never => None,
            _ => self.signals.quote(),
        };
        let escaped: Cow<str> = match escape {
            Some(e) if field.contains(e) => {
                Cow::Owned(field.replace(e, self.signals.escaped_escape()))
            }
            _ => Cow::Borrowed(field),
        };
        let needs = self.needs_protection(field)
            || self.needs_protection(&escaped);

        if let Some(q) = quote {
            if needs || self.style == QuoteStyle::Always {
                out.push_str(q);
                match escape {
                    // An escape covers one character, so multi-character
                    // quotes are escaped one character at a time.
                    Some(e) => {
                        push_escaped(&escaped, e, &self.quotes, &self.quotes, out)
                    }
                    None if escaped.contains(q) => out.push_str(
                        &escaped.replace(q, self.signals.escaped_quote()),
                    ),
                    None => out.push_str(&escaped),
                }
                out.push_str(q);
                return Ok(());
            }
        }
        if !needs {
            out.push_str(&escaped);
            return Ok(());
        }
        match escape {
            None => Err(Error::Unserializable { field: i }),
            Some(e) => {
                push_escaped(
                    &escaped,
                    e,
                    &self.structural,
                    &self.separators,
                    out,
                );
                Ok(())
            }
        }
    }

    fn needs_protection(&self, field: &str) -> bool {
        self.finders.iter().any(|f| f.find(field.as_bytes()).is_some())
            || field
                .char_indices()
                .any(|(i, _)| is_partial(&field[i..], &self.separators))
    }
}

/// Escape every character of every occurrence of `signals` in `field`,
/// along with a trailing proper prefix of any of `partials`.
///
/// `signals` must be sorted longest first.
fn push_escaped(
    field: &str,
    escape: &str,
    signals: &[String],
    partials: &[String],
    out: &mut String,
) {
    let mut rest = field;
    'outer: while let Some(c) = rest.chars().next() {
        for sig in signals {
            if rest.starts_with(sig.as_str()) {
                push_each_escaped(sig, escape, out);
                rest = &rest[sig.len()..];
                continue 'outer;
            }
        }
        if is_partial(rest, partials) {
            push_each_escaped(rest, escape, out);
            return;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
}

fn push_each_escaped(s: &str, escape: &str, out: &mut String) {
    for c in s.chars() {
        out.push_str(escape);
        out.push(c);
    }
}

/// Returns true if `tail` is a proper prefix of any of `signals`.
fn is_partial(tail: &str, signals: &[String]) -> bool {
    signals.iter().any(|s| s.len() > tail.len() && s.starts_with(tail))
}

/// Join the given fields into a single row, quoting only where necessary.
///
/// # Example
///
/// ```
/// use quoted_core::{join, Signals};
///
/// let row = join(&["a,a", "b", "c"], Signals::csv()).unwrap();
/// assert_eq!(row, "\"a,a\",b,c");
/// ```
pub fn join<I>(fields: I, signals: &Signals) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsField,
{
    Writer::new(signals).join(fields)
}

/// Join the given rows, separated by the primary row separator, quoting
/// only where necessary.
pub fn join_rows<R, I>(rows: R, signals: &Signals) -> Result<String>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator,
    I::Item: AsField,
{
    Writer::new(signals).join_rows(rows)
}

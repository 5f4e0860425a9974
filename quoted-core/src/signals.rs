use std::convert::TryFrom;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// The row separators that are interchangeable in newline tolerant mode.
const NEWLINES: [&str; 3] = ["\n", "\r\n", "\r"];

/// The class of a signal.
///
/// Signals of different classes must never contain one another.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SignalClass {
    /// Separates fields within a row.
    Delimiter,
    /// Separates rows.
    RowSeparator,
    /// Surrounds a field whose contents should be taken literally.
    Quote,
    /// Causes the character following it to be taken literally.
    Escape,
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            SignalClass::Delimiter => "delimiter",
            SignalClass::RowSeparator => "row separator",
            SignalClass::Quote => "quote",
            SignalClass::Escape => "escape",
        };
        f.write_str(name)
    }
}

/// An immutable, validated set of signals.
///
/// A set of signals describes how rows are split into fields and how
/// fields are joined back into rows:
///
/// * One or more *delimiters* separate fields. The first one is the
///   *primary* delimiter, which is used when joining. The rest are
///   *alternates* that are only recognized when splitting.
/// * Zero or more *row separators*, with the same primary/alternate
///   distinction. Without a row separator, input is always a single row.
/// * An optional *quote*. Between quotes, delimiters and row separators are
///   taken literally, and a doubled quote stands for one literal quote.
/// * An optional *escape*. The character following an escape is always
///   taken literally, whatever it is.
///
/// Every signal may be any non-empty string, not just a single character.
/// Signals are validated when built such that no signal contains a signal
/// of a different class.
///
/// Use `SignalsBuilder` to create a set of signals, or start from one of
/// the presets: `Signals::csv`, `Signals::tsv` or `Signals::ascii`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SignalsConfig", into = "SignalsConfig")
)]
pub struct Signals {
    delimiters: Vec<String>,
    row_separators: Vec<String>,
    quote: String,
    escape: String,
    escaped_delimiter: String,
    escaped_row_separator: String,
    escaped_quote: String,
    escaped_escape: String,
}

impl Signals {
    /// Comma separated values: `,` delimits fields, `"` quotes them and any
    /// of `\n`, `\r\n` or `\r` separates rows. Rows are joined with `\n`.
    pub fn csv() -> &'static Signals {
        static CSV: OnceLock<Signals> = OnceLock::new();
        CSV.get_or_init(|| Signals::new(&[","], &NEWLINES, "\"", ""))
    }

    /// Tab separated values: `\t` delimits fields, `\` escapes and any of
    /// `\n`, `\r\n` or `\r` separates rows. There is no quote.
    pub fn tsv() -> &'static Signals {
        static TSV: OnceLock<Signals> = OnceLock::new();
        TSV.get_or_init(|| Signals::new(&["\t"], &NEWLINES, "", "\\"))
    }

    /// ASCII delimited text: the unit separator (`\x1F`) delimits fields
    /// and the record separator (`\x1E`) separates rows.
    pub fn ascii() -> &'static Signals {
        static ASCII: OnceLock<Signals> = OnceLock::new();
        ASCII.get_or_init(|| Signals::new(&["\x1F"], &["\x1E"], "", ""))
    }

    /// Build signals from parts that are already known to be valid.
    fn new<D, R>(
        delimiters: &[D],
        row_separators: &[R],
        quote: &str,
        escape: &str,
    ) -> Signals
    where
        D: AsRef<str>,
        R: AsRef<str>,
    {
        let delimiters: Vec<String> =
            delimiters.iter().map(|s| s.as_ref().to_string()).collect();
        let row_separators: Vec<String> =
            row_separators.iter().map(|s| s.as_ref().to_string()).collect();
        let primary_row = row_separators.first().map_or("", |s| s.as_str());
        let escaped_delimiter = format!("{}{}", escape, delimiters[0]);
        let escaped_row_separator = format!("{}{}", escape, primary_row);
        let escaped_quote = if escape.is_empty() {
            format!("{}{}", quote, quote)
        } else {
            format!("{}{}", escape, quote)
        };
        let escaped_escape = format!("{}{}", escape, escape);
        Signals {
            delimiters,
            row_separators,
            quote: quote.to_string(),
            escape: escape.to_string(),
            escaped_delimiter,
            escaped_row_separator,
            escaped_quote,
            escaped_escape,
        }
    }

    /// Return a builder initialized with these signals.
    ///
    /// This is useful for tweaking a preset.
    pub fn to_builder(&self) -> SignalsBuilder {
        SignalsBuilder {
            delimiter: Some(self.delimiters[0].clone()),
            alternate_delimiters: self.delimiters[1..].to_vec(),
            row_separator: self.row_separators.first().cloned(),
            alternate_row_separators: self
                .row_separators
                .iter()
                .skip(1)
                .cloned()
                .collect(),
            quote: self.quote.clone(),
            escape: self.escape.clone(),
        }
    }

    /// The primary delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiters[0]
    }

    /// All delimiters, primary first.
    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    /// The primary row separator, if one is configured.
    pub fn row_separator(&self) -> Option<&str> {
        self.row_separators.first().map(|s| s.as_str())
    }

    /// All row separators, primary first.
    pub fn row_separators(&self) -> &[String] {
        &self.row_separators
    }

    /// The quote, if quoting is enabled.
    pub fn quote(&self) -> Option<&str> {
        non_empty(&self.quote)
    }

    /// The escape, if escaping is enabled.
    pub fn escape(&self) -> Option<&str> {
        non_empty(&self.escape)
    }

    /// The escape followed by the primary delimiter.
    pub fn escaped_delimiter(&self) -> &str {
        &self.escaped_delimiter
    }

    /// The escape followed by the primary row separator.
    pub fn escaped_row_separator(&self) -> &str {
        &self.escaped_row_separator
    }

    /// The text standing for one literal quote inside a quoted field.
    ///
    /// This is the escape followed by the quote when an escape is
    /// configured, and a doubled quote otherwise.
    pub fn escaped_quote(&self) -> &str {
        &self.escaped_quote
    }

    /// The escape, doubled.
    pub fn escaped_escape(&self) -> &str {
        &self.escaped_escape
    }

    /// Returns true if and only if every signal is exactly one character:
    /// one delimiter, at most one row separator and at most one character
    /// each for the quote and the escape.
    pub fn is_simple(&self) -> bool {
        self.has_simple_fields()
            && self.row_separators.len() <= 1
            && self.row_separators.iter().all(|s| is_one_char(s))
    }

    /// Returns true if and only if the row separators are exactly `\n`,
    /// `\r\n` and `\r`, in any order.
    pub fn is_newrow_tolerant(&self) -> bool {
        self.row_separators.len() == NEWLINES.len()
            && NEWLINES
                .iter()
                .all(|nl| self.row_separators.iter().any(|s| s == nl))
    }

    /// Returns true if and only if these signals are newline tolerant and
    /// every other signal is exactly one character.
    pub fn is_newrow_tolerant_simple(&self) -> bool {
        self.has_simple_fields() && self.is_newrow_tolerant()
    }

    fn has_simple_fields(&self) -> bool {
        self.delimiters.len() == 1
            && is_one_char(&self.delimiters[0])
            && self.quote.chars().count() <= 1
            && self.escape.chars().count() <= 1
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn is_one_char(s: &str) -> bool {
    let mut it = s.chars();
    it.next().is_some() && it.next().is_none()
}

/// Builds a validated set of signals.
///
/// Every mutating method checks that the resulting configuration is still
/// unambiguous. If it isn't, then the change is rolled back and an error is
/// returned, so a builder is never left in an invalid state.
///
/// # Example
///
/// ```
/// use quoted_core::SignalsBuilder;
///
/// # fn example() -> quoted_core::Result<()> {
/// let signals = SignalsBuilder::new()
///     .delimiter("::")?
///     .quote("'")?
///     .newline_tolerant()?
///     .build()?;
/// assert_eq!(signals.delimiter(), "::");
/// assert!(SignalsBuilder::new().delimiter("AB")?.quote("A").is_err());
/// # Ok(()) }
/// # example().unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct SignalsBuilder {
    delimiter: Option<String>,
    alternate_delimiters: Vec<String>,
    row_separator: Option<String>,
    alternate_row_separators: Vec<String>,
    quote: String,
    escape: String,
}

impl SignalsBuilder {
    /// Create a new builder with no signals.
    pub fn new() -> SignalsBuilder {
        SignalsBuilder::default()
    }

    /// Build the signals.
    ///
    /// This fails if no primary delimiter was set.
    pub fn build(&self) -> Result<Signals> {
        let delimiter = match self.delimiter {
            None => return Err(Error::MissingDelimiter),
            Some(ref d) => d,
        };
        self.validate()?;
        let mut delimiters = vec![delimiter.as_str()];
        delimiters.extend(self.alternate_delimiters.iter().map(|s| s.as_str()));
        let rows: Vec<&str> = self
            .row_separator
            .iter()
            .chain(self.alternate_row_separators.iter())
            .map(|s| s.as_str())
            .collect();
        Ok(Signals::new(&delimiters, &rows, &self.quote, &self.escape))
    }

    /// Set the primary delimiter, which is used for splitting and joining.
    pub fn delimiter(&mut self, delimiter: &str) -> Result<&mut SignalsBuilder> {
        require(delimiter, SignalClass::Delimiter)?;
        self.apply(|b| {
            b.alternate_delimiters.retain(|s| s != delimiter);
            b.delimiter = Some(delimiter.to_string());
        })
    }

    /// Add an alternate delimiter, which is only recognized when splitting.
    pub fn alternate_delimiter(
        &mut self,
        delimiter: &str,
    ) -> Result<&mut SignalsBuilder> {
        require(delimiter, SignalClass::Delimiter)?;
        self.apply(|b| {
            if b.delimiter.as_deref() != Some(delimiter)
                && !b.alternate_delimiters.iter().any(|s| s == delimiter)
            {
                b.alternate_delimiters.push(delimiter.to_string());
            }
        })
    }

    /// Set the primary row separator, which is used for splitting and
    /// joining.
    pub fn row_separator(
        &mut self,
        separator: &str,
    ) -> Result<&mut SignalsBuilder> {
        require(separator, SignalClass::RowSeparator)?;
        self.apply(|b| {
            b.alternate_row_separators.retain(|s| s != separator);
            b.row_separator = Some(separator.to_string());
        })
    }

    /// Add an alternate row separator, which is only recognized when
    /// splitting.
    pub fn alternate_row_separator(
        &mut self,
        separator: &str,
    ) -> Result<&mut SignalsBuilder> {
        require(separator, SignalClass::RowSeparator)?;
        self.apply(|b| b.push_alternate_row_separator(separator))
    }

    /// Accept any of `\n`, `\r\n` or `\r` as a row separator.
    ///
    /// If no primary row separator was set, then `\n` becomes the primary
    /// row separator. This fails if any other row separator is configured.
    pub fn newline_tolerant(&mut self) -> Result<&mut SignalsBuilder> {
        self.apply(|b| {
            if b.row_separator.is_none() {
                b.row_separator = Some(NEWLINES[0].to_string());
            }
            for nl in &NEWLINES {
                b.push_alternate_row_separator(nl);
            }
        })
    }

    /// Set the quote. An empty quote disables quoting.
    pub fn quote(&mut self, quote: &str) -> Result<&mut SignalsBuilder> {
        self.apply(|b| b.quote = quote.to_string())
    }

    /// Set the escape. An empty escape disables escaping.
    pub fn escape(&mut self, escape: &str) -> Result<&mut SignalsBuilder> {
        self.apply(|b| b.escape = escape.to_string())
    }

    fn push_alternate_row_separator(&mut self, separator: &str) {
        if self.row_separator.as_deref() != Some(separator)
            && !self.alternate_row_separators.iter().any(|s| s == separator)
        {
            self.alternate_row_separators.push(separator.to_string());
        }
    }

    /// Apply a change to this builder, rolling it back if the result is
    /// invalid.
    fn apply<F>(&mut self, change: F) -> Result<&mut SignalsBuilder>
    where
        F: FnOnce(&mut SignalsBuilder),
    {
        let saved = self.clone();
        change(self);
        if let Err(err) = self.validate() {
            *self = saved;
            return Err(err);
        }
        Ok(self)
    }

    /// Returns every configured signal along with its class.
    fn signals(&self) -> Vec<(&str, SignalClass)> {
        let mut all = vec![];
        all.extend(
            self.delimiter
                .iter()
                .chain(&self.alternate_delimiters)
                .map(|s| (s.as_str(), SignalClass::Delimiter)),
        );
        all.extend(
            self.row_separator
                .iter()
                .chain(&self.alternate_row_separators)
                .map(|s| (s.as_str(), SignalClass::RowSeparator)),
        );
        if !self.quote.is_empty() {
            all.push((self.quote.as_str(), SignalClass::Quote));
        }
        if !self.escape.is_empty() {
            all.push((self.escape.as_str(), SignalClass::Escape));
        }
        all
    }

    /// Check that no signal can be mistaken for part of another.
    ///
    /// Signals of different classes may not contain one another, and the
    /// end of one may not be the start of another, like `<q>` and `>x`.
    /// Alternates of the same class may only extend one another at the
    /// front, like `\n` within `\r\n`. The only exception is `\r` within
    /// `\r\n`, which is allowed when the row separators are exactly `\n`,
    /// `\r\n` and `\r`.
    fn validate(&self) -> Result<()> {
        let all = self.signals();
        let trio = self.has_newline_trio();
        for (j, &(second, second_class)) in all.iter().enumerate() {
            for &(first, first_class) in &all[..j] {
                let compatible = if first_class == second_class {
                    same_class_compatible(first, second, trio)
                } else {
                    !first.contains(second)
                        && !second.contains(first)
                        && !edges_overlap(first, second)
                        && !edges_overlap(second, first)
                };
                if !compatible {
                    return Err(Error::Overlap {
                        first: second.to_string(),
                        first_class: second_class,
                        second: first.to_string(),
                        second_class: first_class,
                    });
                }
            }
        }
        Ok(())
    }

    fn has_newline_trio(&self) -> bool {
        let rows: Vec<&str> = self
            .row_separator
            .iter()
            .chain(&self.alternate_row_separators)
            .map(|s| s.as_str())
            .collect();
        rows.len() == NEWLINES.len()
            && NEWLINES.iter().all(|nl| rows.contains(nl))
    }
}

/// Returns true if two signals of the same class can be told apart.
///
/// A shorter alternate at the front of a longer one would always be
/// matched first, so only the newline trio may do that.
fn same_class_compatible(a: &str, b: &str, trio: bool) -> bool {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if !long.contains(short) {
        return true;
    }
    if trio && NEWLINES.contains(&long) && NEWLINES.contains(&short) {
        return true;
    }
    long.ends_with(short) && !long.starts_with(short)
}

/// Returns true if a proper suffix of `a` is a proper prefix of `b`.
fn edges_overlap(a: &str, b: &str) -> bool {
    b.char_indices()
        .skip(1)
        .any(|(i, _)| i < a.len() && a.ends_with(&b[..i]))
}

fn require(signal: &str, class: SignalClass) -> Result<()> {
    if signal.is_empty() {
        Err(Error::EmptySignal { class })
    } else {
        Ok(())
    }
}

/// The serialized form of `Signals`.
///
/// Deserialization goes through `SignalsBuilder`, so invalid signals are
/// rejected.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize)]
struct SignalsConfig {
    delimiters: Vec<String>,
    #[serde(default)]
    row_separators: Vec<String>,
    #[serde(default)]
    quote: String,
    #[serde(default)]
    escape: String,
}

#[cfg(feature = "serde")]
impl From<Signals> for SignalsConfig {
    fn from(signals: Signals) -> SignalsConfig {
        SignalsConfig {
            delimiters: signals.delimiters,
            row_separators: signals.row_separators,
            quote: signals.quote,
            escape: signals.escape,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SignalsConfig> for Signals {
    type Error = Error;

    fn try_from(config: SignalsConfig) -> Result<Signals> {
        let mut builder = SignalsBuilder::new();
        for (i, d) in config.delimiters.iter().enumerate() {
            if i == 0 {
                builder.delimiter(d)?;
            } else {
                builder.alternate_delimiter(d)?;
            }
        }
        for r in &config.row_separators {
            require(r, SignalClass::RowSeparator)?;
        }
        // Row separators are added together, since the newline trio is only
        // valid once it is complete.
        builder.apply(|b| {
            let mut rows = config.row_separators.iter();
            b.row_separator = rows.next().cloned();
            for r in rows {
                b.push_alternate_row_separator(r);
            }
        })?;
        builder.quote(&config.quote)?.escape(&config.escape)?.build()
    }
}

impl<'a> TryFrom<&'a SignalsBuilder> for Signals {
    type Error = Error;

    fn try_from(builder: &'a SignalsBuilder) -> Result<Signals> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::{SignalClass, Signals, SignalsBuilder};

    fn overlaps(res: Result<&mut SignalsBuilder, Error>) -> bool {
        match res {
            Err(Error::Overlap { .. }) => true,
            _ => false,
        }
    }

    #[test]
    fn presets_are_valid() {
        for preset in &[Signals::csv(), Signals::tsv(), Signals::ascii()] {
            let rebuilt = preset.to_builder().build().unwrap();
            assert_eq!(**preset, rebuilt);
        }
    }

    #[test]
    fn csv_preset() {
        let csv = Signals::csv();
        assert_eq!(csv.delimiter(), ",");
        assert_eq!(csv.quote(), Some("\""));
        assert_eq!(csv.escape(), None);
        assert_eq!(csv.row_separator(), Some("\n"));
        assert!(csv.is_newrow_tolerant_simple());
        assert!(!csv.is_simple());
    }

    #[test]
    fn primary_delimiter_required() {
        assert_eq!(SignalsBuilder::new().build(), Err(Error::MissingDelimiter));
        let mut b = SignalsBuilder::new();
        b.quote("'").unwrap();
        assert_eq!(b.build(), Err(Error::MissingDelimiter));
    }

    #[test]
    fn empty_delimiter() {
        assert_eq!(
            SignalsBuilder::new().delimiter("").unwrap_err(),
            Error::EmptySignal { class: SignalClass::Delimiter }
        );
        assert_eq!(
            SignalsBuilder::new().alternate_row_separator("").unwrap_err(),
            Error::EmptySignal { class: SignalClass::RowSeparator }
        );
    }

    #[test]
    fn delimiter_contains_quote() {
        let mut b = SignalsBuilder::new();
        b.delimiter("AB").unwrap();
        assert!(overlaps(b.quote("A")));
        let mut b = SignalsBuilder::new();
        b.quote("A").unwrap();
        assert!(overlaps(b.delimiter("AB")));
    }

    #[test]
    fn quote_contains_escape() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap().quote("''").unwrap();
        assert!(overlaps(b.escape("'")));
    }

    #[test]
    fn identical_signals_of_different_classes() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap();
        assert!(overlaps(b.row_separator(",")));
        assert!(overlaps(b.escape(",")));
    }

    #[test]
    fn newline_trio_allowed() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap();
        b.row_separator("\r").unwrap();
        b.alternate_row_separator("\n").unwrap();
        b.alternate_row_separator("\r\n").unwrap();
        let signals = b.build().unwrap();
        assert!(signals.is_newrow_tolerant());
        assert_eq!(signals.row_separator(), Some("\r"));
    }

    #[test]
    fn same_class_middle_overlap_rejected() {
        let mut b = SignalsBuilder::new();
        b.delimiter("abc").unwrap();
        assert!(overlaps(b.alternate_delimiter("b")));
        assert!(b.alternate_delimiter("c").is_ok());
    }

    #[test]
    fn same_class_front_overlap_rejected() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",;").unwrap();
        assert!(overlaps(b.alternate_delimiter(",")));
        assert!(b.alternate_delimiter(";").is_ok());

        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap().row_separator("\r\n").unwrap();
        assert!(overlaps(b.alternate_row_separator("\r")));
        assert!(b.alternate_row_separator("\n").is_ok());
        assert_eq!(b.build().unwrap().row_separators(), &["\r\n", "\n"]);
    }

    #[test]
    fn newline_trio_must_be_complete() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap().row_separator("\r").unwrap();
        assert!(overlaps(b.alternate_row_separator("\r\n")));

        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap().row_separator("||").unwrap();
        assert!(overlaps(b.newline_tolerant()));
        assert_eq!(b.build().unwrap().row_separators(), &["||"]);
    }

    #[test]
    fn edge_overlap_rejected() {
        let mut b = SignalsBuilder::new();
        b.delimiter(">x").unwrap();
        assert!(overlaps(b.quote("<q>")));
        assert!(b.quote("<q").is_ok());

        let mut b = SignalsBuilder::new();
        b.delimiter("::").unwrap().quote("<q>").unwrap();
        assert!(overlaps(b.escape("~<")));
        assert!(overlaps(b.row_separator(":|")));
        assert!(b.escape("~~").is_ok());
        assert!(b.row_separator("||").is_ok());
    }

    #[test]
    fn rollback_on_error() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap().quote("'").unwrap();
        assert!(overlaps(b.quote(",")));
        let signals = b.build().unwrap();
        assert_eq!(signals.quote(), Some("'"));
    }

    #[test]
    fn duplicate_alternates_ignored() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap();
        b.alternate_delimiter(";").unwrap();
        b.alternate_delimiter(";").unwrap();
        b.alternate_delimiter(",").unwrap();
        assert_eq!(b.build().unwrap().delimiters(), &[",", ";"]);
    }

    #[test]
    fn primary_replaces_alternate() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap().alternate_delimiter(";").unwrap();
        b.delimiter(";").unwrap();
        assert_eq!(b.build().unwrap().delimiters(), &[";"]);
    }

    #[test]
    fn escaped_forms() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap();
        b.row_separator("\n").unwrap();
        b.quote("\"").unwrap();
        let s = b.build().unwrap();
        assert_eq!(s.escaped_quote(), "\"\"");
        assert_eq!(s.escaped_delimiter(), ",");

        b.escape("\\").unwrap();
        let s = b.build().unwrap();
        assert_eq!(s.escaped_quote(), "\\\"");
        assert_eq!(s.escaped_delimiter(), "\\,");
        assert_eq!(s.escaped_row_separator(), "\\\n");
        assert_eq!(s.escaped_escape(), "\\\\");
    }

    #[test]
    fn classification() {
        let mut b = SignalsBuilder::new();
        b.delimiter(",").unwrap();
        assert!(b.build().unwrap().is_simple());
        b.row_separator("\n").unwrap().quote("'").unwrap();
        b.escape("\\").unwrap();
        assert!(b.build().unwrap().is_simple());
        b.alternate_delimiter(";").unwrap();
        assert!(!b.build().unwrap().is_simple());

        let mut b = SignalsBuilder::new();
        b.delimiter("||").unwrap();
        assert!(!b.build().unwrap().is_simple());
        b.newline_tolerant().unwrap();
        assert!(!b.build().unwrap().is_newrow_tolerant_simple());
        assert!(b.build().unwrap().is_newrow_tolerant());

        assert!(!Signals::tsv().is_simple());
        assert!(Signals::tsv().is_newrow_tolerant_simple());
        assert!(Signals::ascii().is_simple());
    }

    #[test]
    fn multi_byte_simple() {
        let mut b = SignalsBuilder::new();
        b.delimiter("¦").unwrap().quote("«").unwrap();
        assert!(b.build().unwrap().is_simple());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates() {
        use serde::de::value::{Error as DeError, MapDeserializer};
        use serde::Deserialize;

        fn from_pairs(
            pairs: Vec<(&str, Vec<&str>)>,
        ) -> Result<Signals, DeError> {
            let de = MapDeserializer::<_, DeError>::new(pairs.into_iter());
            Signals::deserialize(de)
        }

        let ok = from_pairs(vec![("delimiters", vec![",", ";"])]).unwrap();
        assert_eq!(ok.delimiters(), &[",", ";"]);
        assert!(from_pairs(vec![("delimiters", vec![])]).is_err());
        assert!(from_pairs(vec![("delimiters", vec!["ABC", "B"])]).is_err());

        let trio = from_pairs(vec![
            ("delimiters", vec![","]),
            ("row_separators", vec!["\r", "\r\n", "\n"]),
        ])
        .unwrap();
        assert!(trio.is_newrow_tolerant());
        assert_eq!(trio.row_separator(), Some("\r"));
    }
}

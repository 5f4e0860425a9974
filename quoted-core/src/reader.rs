use std::mem;

use crate::error::{Error, Result};
use crate::signals::Signals;
use crate::tracker::SignalTracker;

/// The implementation a `Processor` uses to split rows.
///
/// All flavors produce exactly the same rows for the same input. The
/// simpler flavors exist purely for throughput: they compare characters
/// directly instead of tracking partial matches of multi-character
/// signals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flavor {
    /// Handles signals of any length, including alternates.
    Full,
    /// Every signal is a single character.
    Simple,
    /// Every signal is a single character, and any of `\n`, `\r\n` or `\r`
    /// separates rows.
    NewRowTolerantSimple,
}

impl Flavor {
    /// Choose the fastest flavor that can handle the given signals.
    pub fn select(signals: &Signals) -> Flavor {
        if signals.is_newrow_tolerant_simple() {
            Flavor::NewRowTolerantSimple
        } else if signals.is_simple() {
            Flavor::Simple
        } else {
            Flavor::Full
        }
    }
}

/// A pull based splitter of rows.
///
/// A processor consumes characters and produces rows of fields. It never
/// needs more than one character of lookahead, so any iterator of
/// characters works as input, including ones whose length isn't known.
///
/// The rules, applied to each character in order of precedence:
///
/// 1. A character following an escape is always taken literally.
/// 2. A delimiter outside of quotes ends the current field.
/// 3. Two consecutive quotes stand for one literal quote.
/// 4. A quote is removed and toggles whether we are inside quotes.
/// 5. A row separator outside of quotes ends the current row.
/// 6. An escape is removed and makes the next character literal.
///
/// Fields are never trimmed. Empty input produces no rows at all, while
/// input consisting of just a row separator produces a single row with one
/// empty field.
///
/// A processor holds the state of one traversal. It can be reused for
/// another input once the previous one has been consumed (`process` resets
/// it), but it cannot split two inputs at the same time.
#[derive(Clone, Debug)]
pub struct Processor {
    kind: Kind,
    state: State,
}

#[derive(Clone, Debug)]
enum Kind {
    Full(Full),
    Simple(Simple),
    NewRowTolerantSimple(Tolerant),
}

impl Processor {
    /// Create a processor with the fastest flavor able to handle the given
    /// signals.
    pub fn new(signals: &Signals) -> Processor {
        let kind = match Flavor::select(signals) {
            Flavor::Full => Kind::Full(Full::new(signals)),
            Flavor::Simple => Kind::Simple(Simple::new(signals)),
            Flavor::NewRowTolerantSimple => {
                Kind::NewRowTolerantSimple(Tolerant(Simple::new(signals)))
            }
        };
        Processor { kind, state: State::new(signals) }
    }

    /// Create a processor that always uses the `Full` flavor.
    ///
    /// This is intended for testing that the specialized flavors agree
    /// with the general one. There's otherwise no good reason to avoid the
    /// faster flavors.
    #[doc(hidden)]
    pub fn full(signals: &Signals) -> Processor {
        Processor {
            kind: Kind::Full(Full::new(signals)),
            state: State::new(signals),
        }
    }

    /// The flavor used by this processor.
    pub fn flavor(&self) -> Flavor {
        match self.kind {
            Kind::Full(_) => Flavor::Full,
            Kind::Simple(_) => Flavor::Simple,
            Kind::NewRowTolerantSimple(_) => Flavor::NewRowTolerantSimple,
        }
    }

    /// Reset this processor such that it behaves as if it had never been
    /// used.
    pub fn reset(&mut self) {
        self.state.reset();
        match self.kind {
            Kind::Full(ref mut k) => k.reset(),
            Kind::Simple(ref mut k) => k.reset(),
            Kind::NewRowTolerantSimple(ref mut k) => k.reset(),
        }
    }

    /// Reset this processor and lazily split the given input into rows.
    ///
    /// Each row is produced as soon as enough input has been consumed to
    /// know that it is complete.
    pub fn process<I>(&mut self, input: I) -> Rows<'_, I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        self.reset();
        Rows { processor: self, input: input.into_iter() }
    }

    /// Consume characters from `input` until one complete row has been
    /// read, and return it.
    ///
    /// When `input` is exhausted, any partially read row is returned.
    /// After that, `None` is returned.
    ///
    /// Unlike `process`, this does not reset the processor, so a caller may
    /// feed one logical input in multiple pieces.
    pub fn read_row<I>(&mut self, input: &mut I) -> Option<Vec<String>>
    where
        I: Iterator<Item = char>,
    {
        match self.kind {
            Kind::Full(ref mut k) => read_row(k, &mut self.state, input),
            Kind::Simple(ref mut k) => read_row(k, &mut self.state, input),
            Kind::NewRowTolerantSimple(ref mut k) => {
                read_row(k, &mut self.state, input)
            }
        }
    }

    /// Returns true if and only if the most recently read row was ended by
    /// a row separator, as opposed to the end of input.
    pub fn ended_by_separator(&self) -> bool {
        self.state.terminated
    }
}

/// A lazy iterator over the rows of an input.
///
/// This is created by `Processor::process`.
#[derive(Debug)]
pub struct Rows<'p, I> {
    processor: &'p mut Processor,
    input: I,
}

impl<'p, I> Rows<'p, I> {
    /// Returns true if and only if the most recently produced row was ended
    /// by a row separator, as opposed to the end of input.
    pub fn ended_by_separator(&self) -> bool {
        self.processor.ended_by_separator()
    }
}

impl<'p, I: Iterator<Item = char>> Iterator for Rows<'p, I> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        self.processor.read_row(&mut self.input)
    }
}

/// A lazy iterator over the rows of an input that owns its processor.
///
/// This is created by `split`.
#[derive(Debug)]
pub struct IntoRows<I> {
    processor: Processor,
    input: I,
}

impl<I> IntoRows<I> {
    /// Returns true if and only if the most recently produced row was ended
    /// by a row separator, as opposed to the end of input.
    pub fn ended_by_separator(&self) -> bool {
        self.processor.ended_by_separator()
    }
}

impl<I: Iterator<Item = char>> Iterator for IntoRows<I> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        self.processor.read_row(&mut self.input)
    }
}

/// Lazily split the given input into rows.
///
/// # Example
///
/// ```
/// use quoted_core::{split, Signals};
///
/// let rows: Vec<Vec<String>> =
///     split("a,b,c\r\nd,\"e,f\"".chars(), Signals::csv()).collect();
/// assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e,f"]]);
/// ```
pub fn split<I>(input: I, signals: &Signals) -> IntoRows<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    IntoRows { processor: Processor::new(signals), input: input.into_iter() }
}

/// Split input that must consist of exactly one row.
///
/// If a row separator is found outside of quotes (even at the very end of
/// the input), then an error is returned. Empty input is a row with no
/// fields.
pub fn split_row<I>(input: I, signals: &Signals) -> Result<Vec<String>>
where
    I: IntoIterator<Item = char>,
{
    let mut rows = split(input, signals);
    let row = match rows.next() {
        None => return Ok(vec![]),
        Some(row) => row,
    };
    if rows.ended_by_separator() {
        return Err(Error::RowSeparatorNotAllowed);
    }
    Ok(row)
}

fn read_row<T, I>(
    tokenizer: &mut T,
    state: &mut State,
    input: &mut I,
) -> Option<Vec<String>>
where
    T: Tokenize,
    I: Iterator<Item = char>,
{
    for c in input {
        if tokenizer.step(state, c) {
            return Some(state.end_row(true));
        }
    }
    if state.dirty {
        Some(state.end_row(false))
    } else {
        None
    }
}

/// The interface shared by every flavor.
trait Tokenize {
    /// Consume one character, returning true if it ended a row.
    ///
    /// When a row is ended, its last field has not been flushed yet.
    fn step(&mut self, state: &mut State, c: char) -> bool;

    /// Forget any partial matches.
    fn reset(&mut self);
}

/// State shared by every flavor, for one traversal.
#[derive(Clone, Debug)]
struct State {
    /// The field being read.
    buf: String,
    /// The completed fields of the row being read.
    fields: Vec<String>,
    in_quotes: bool,
    /// The number of doubled quotes in the current field.
    doubled: usize,
    /// Whether the previous character was an escape.
    escaped: bool,
    /// Whether the previous character was a `\r` that ended a row. Unlike
    /// the rest of the state, this survives the end of a row.
    after_cr: bool,
    /// Whether any input has been consumed for the current row.
    dirty: bool,
    /// Whether the last row was ended by a row separator.
    terminated: bool,
    quote_len: usize,
}

impl State {
    fn new(signals: &Signals) -> State {
        State {
            buf: String::new(),
            fields: vec![],
            in_quotes: false,
            doubled: 0,
            escaped: false,
            after_cr: false,
            dirty: false,
            terminated: false,
            quote_len: signals.quote().map_or(0, |q| q.len()),
        }
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.fields.clear();
        self.in_quotes = false;
        self.doubled = 0;
        self.escaped = false;
        self.after_cr = false;
        self.dirty = false;
        self.terminated = false;
    }

    /// Remove the last `len` bytes from the field being read.
    fn unpush(&mut self, len: usize) {
        let end = self.buf.len() - len;
        self.buf.truncate(end);
    }

    fn end_field(&mut self) {
        // A field made up entirely of doubled quotes (`""`, `""""`, ...)
        // never looks quoted by the time it ends, so the last doubled quote
        // leaves one quote too many in the buffer.
        if self.doubled > 0 && self.buf.len() == self.quote_len * self.doubled
        {
            self.unpush(self.quote_len);
        }
        self.fields.push(mem::replace(&mut self.buf, String::new()));
        self.in_quotes = false;
        self.doubled = 0;
        self.escaped = false;
    }

    fn end_row(&mut self, terminated: bool) -> Vec<String> {
        self.end_field();
        self.dirty = false;
        self.terminated = terminated;
        mem::replace(&mut self.fields, vec![])
    }
}

/// The general flavor, which tracks signals of any length.
#[derive(Clone, Debug)]
struct Full {
    delimiters: SignalTracker,
    quote: SignalTracker,
    /// Tracks a quote immediately followed by another quote.
    quote_quote: SignalTracker,
    rows: SignalTracker,
    escape: SignalTracker,
    /// When set, `\n`, `\r` and `\r\n` are handled specially and `rows` is
    /// unused.
    tolerant: bool,
}

impl Full {
    fn new(signals: &Signals) -> Full {
        let quote = signals.quote().unwrap_or("");
        let quote_quote =
            if quote.is_empty() { String::new() } else { quote.repeat(2) };
        Full {
            delimiters: SignalTracker::new(signals.delimiters()),
            quote: SignalTracker::new(&[quote]),
            quote_quote: SignalTracker::new(&[quote_quote]),
            rows: SignalTracker::new(signals.row_separators()),
            escape: SignalTracker::new(&[signals.escape().unwrap_or("")]),
            tolerant: signals.is_newrow_tolerant(),
        }
    }
}

impl Tokenize for Full {
    fn step(&mut self, st: &mut State, c: char) -> bool {
        let after_cr = mem::replace(&mut st.after_cr, false);
        if st.escaped {
            st.buf.push(c);
            st.escaped = false;
            st.dirty = true;
            return false;
        }
        // No signal may contain `\n` in tolerant mode, so the `\n` of a
        // `\r\n` can be dropped before any tracker sees it.
        if self.tolerant && after_cr && c == '\n' {
            self.reset();
            return false;
        }
        st.dirty = true;
        st.buf.push(c);

        let delimited = self.delimiters.push(c);
        let (doubled, quoted) = if self.quote.is_empty() {
            (false, false)
        } else {
            (self.quote_quote.push(c), self.quote.push(c))
        };
        let separated =
            !self.tolerant && !self.rows.is_empty() && self.rows.push(c);
        let escaped = !self.escape.is_empty() && self.escape.push(c);

        if delimited {
            if st.in_quotes {
                self.delimiters.reset();
            } else {
                st.unpush(self.delimiters.triggered().unwrap_or(0));
                st.end_field();
                self.reset();
            }
            return false;
        }
        if doubled {
            // The second quote stays in the buffer as literal content.
            st.doubled += 1;
            st.in_quotes = !st.in_quotes;
            self.quote_quote.reset();
            self.quote.reset();
            return false;
        }
        if quoted {
            st.unpush(self.quote.triggered().unwrap_or(0));
            st.in_quotes = !st.in_quotes;
            // The quote-quote tracker keeps its partial match, since this
            // quote may be the first half of a doubled quote.
            self.delimiters.reset();
            self.quote.reset();
            self.rows.reset();
            self.escape.reset();
            return false;
        }
        if self.tolerant && (c == '\r' || c == '\n') {
            if st.in_quotes {
                return false;
            }
            st.buf.pop();
            st.after_cr = c == '\r';
            self.reset();
            return true;
        }
        if separated {
            if st.in_quotes {
                self.rows.reset();
                return false;
            }
            st.unpush(self.rows.triggered().unwrap_or(0));
            self.reset();
            return true;
        }
        if escaped {
            st.unpush(self.escape.triggered().unwrap_or(0));
            st.escaped = true;
            self.reset();
        }
        false
    }

    fn reset(&mut self) {
        self.delimiters.reset();
        self.quote.reset();
        self.quote_quote.reset();
        self.rows.reset();
        self.escape.reset();
    }
}

/// The flavor for signals that are all one character long.
#[derive(Clone, Debug)]
struct Simple {
    delimiter: char,
    row: Option<char>,
    quote: Option<char>,
    escape: Option<char>,
    /// Whether the previous character was a quote that may be the first
    /// half of a doubled quote.
    prev_quote: bool,
}

impl Simple {
    fn new(signals: &Signals) -> Simple {
        fn first(s: Option<&str>) -> Option<char> {
            s.and_then(|s| s.chars().next())
        }
        Simple {
            delimiter: first(Some(signals.delimiter())).unwrap_or('\0'),
            row: first(signals.row_separator()),
            quote: first(signals.quote()),
            escape: first(signals.escape()),
            prev_quote: false,
        }
    }

    /// Handle everything except row separators. Returns true if `c` was
    /// consumed.
    #[inline(always)]
    fn step_field(&mut self, st: &mut State, c: char) -> bool {
        if st.escaped {
            st.buf.push(c);
            st.escaped = false;
            st.dirty = true;
            self.prev_quote = false;
            return true;
        }
        st.dirty = true;
        if c == self.delimiter {
            if st.in_quotes {
                st.buf.push(c);
            } else {
                st.end_field();
            }
            self.prev_quote = false;
            return true;
        }
        if Some(c) == self.quote {
            if self.prev_quote {
                st.buf.push(c);
                st.doubled += 1;
                self.prev_quote = false;
            } else {
                self.prev_quote = true;
            }
            st.in_quotes = !st.in_quotes;
            return true;
        }
        self.prev_quote = false;
        if Some(c) == self.escape {
            st.escaped = true;
            return true;
        }
        false
    }
}

impl Tokenize for Simple {
    fn step(&mut self, st: &mut State, c: char) -> bool {
        if self.step_field(st, c) {
            return false;
        }
        if Some(c) == self.row && !st.in_quotes {
            return true;
        }
        st.buf.push(c);
        false
    }

    fn reset(&mut self) {
        self.prev_quote = false;
    }
}

/// The flavor for one character signals where any of `\n`, `\r\n` or `\r`
/// separates rows.
#[derive(Clone, Debug)]
struct Tolerant(Simple);

impl Tokenize for Tolerant {
    fn step(&mut self, st: &mut State, c: char) -> bool {
        let after_cr = mem::replace(&mut st.after_cr, false);
        if after_cr && c == '\n' && !st.escaped {
            self.0.prev_quote = false;
            return false;
        }
        if self.0.step_field(st, c) {
            return false;
        }
        if (c == '\r' || c == '\n') && !st.in_quotes {
            st.after_cr = c == '\r';
            return true;
        }
        st.buf.push(c);
        false
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use crate::error::Error;
    use crate::signals::{Signals, SignalsBuilder};

    use super::{split, split_row, Flavor, Processor};

    macro_rules! rows {
        ($([$($field:expr),*]),*) => {{
            #[allow(unused_mut)]
            let mut rows: Vec<Vec<String>> = vec![];
            $(
                rows.push(vec![$($field.to_string()),*]);
            )*
            rows
        }}
    }

    macro_rules! splits_to {
        ($name:ident, $data:expr, $expected:expr) => {
            splits_to!($name, $data, $expected, Signals::csv());
        };
        ($name:ident, $data:expr, $expected:expr, $signals:expr) => {
            #[test]
            fn $name() {
                let signals: Signals = $signals.clone();
                let expected: Vec<Vec<String>> = $expected;

                let mut selected = Processor::new(&signals);
                let got: Vec<Vec<String>> =
                    selected.process($data.chars()).collect();
                assert_eq!(expected, got, "{:?}", selected.flavor());

                let mut full = Processor::full(&signals);
                let got: Vec<Vec<String>> =
                    full.process($data.chars()).collect();
                assert_eq!(expected, got, "forced full");
            }
        };
    }

    fn signals(
        delimiters: &[&str],
        rows: &[&str],
        quote: &str,
        escape: &str,
    ) -> Signals {
        let mut b = SignalsBuilder::new();
        for (i, d) in delimiters.iter().enumerate() {
            if i == 0 {
                b.delimiter(d).unwrap();
            } else {
                b.alternate_delimiter(d).unwrap();
            }
        }
        for (i, r) in rows.iter().enumerate() {
            if i == 0 {
                b.row_separator(r).unwrap();
            } else {
                b.alternate_row_separator(r).unwrap();
            }
        }
        b.quote(quote).unwrap().escape(escape).unwrap();
        b.build().unwrap()
    }

    fn commas() -> Signals {
        signals(&[","], &[], "", "")
    }

    fn single_quotes() -> Signals {
        signals(&[","], &[], "'", "")
    }

    fn escapes() -> Signals {
        signals(&[","], &["\n"], "'", "\\")
    }

    fn tolerant_escapes() -> Signals {
        signals(&[","], &["\n", "\r\n", "\r"], "\"", "\\")
    }

    fn wide() -> Signals {
        signals(&["::"], &["||"], "<q>", "~~")
    }

    fn wide_tolerant() -> Signals {
        signals(&["::"], &["\n", "\r\n", "\r"], "\"", "")
    }

    fn alternates() -> Signals {
        signals(&[",", ";"], &["\n"], "\"", "")
    }

    fn crlf_only() -> Signals {
        signals(&[","], &["\r\n"], "\"", "")
    }

    fn extended_alternates() -> Signals {
        signals(&[",;", ";"], &["\r\n", "\n"], "\"", "")
    }

    splits_to!(empty, "", rows![]);
    splits_to!(one_field, "a", rows![["a"]]);
    splits_to!(many_fields, "a,b,c", rows![["a", "b", "c"]]);
    splits_to!(trailing_delimiter, "a,b,", rows![["a", "b", ""]]);
    splits_to!(leading_delimiter, ",a", rows![["", "a"]]);
    splits_to!(only_delimiter, ",", rows![["", ""]]);
    splits_to!(spaces_kept, " a , b ", rows![[" a ", " b "]]);
    splits_to!(one_row_lf, "a,b\n", rows![["a", "b"]]);
    splits_to!(one_row_crlf, "a,b\r\n", rows![["a", "b"]]);
    splits_to!(one_row_cr, "a,b\r", rows![["a", "b"]]);
    splits_to!(
        two_rows_crlf,
        "a,b,c\r\nd,e,f",
        rows![["a", "b", "c"], ["d", "e", "f"]]
    );
    splits_to!(
        mixed_newlines,
        "a\nb\rc\r\nd",
        rows![["a"], ["b"], ["c"], ["d"]]
    );
    splits_to!(lf_then_cr, "a\n\rb", rows![["a"], [""], ["b"]]);
    splits_to!(empty_line, "a\n\nb", rows![["a"], [""], ["b"]]);
    splits_to!(empty_line_crlf, "a\r\n\r\nb", rows![["a"], [""], ["b"]]);
    splits_to!(only_crlf, "\r\n", rows![[""]]);
    splits_to!(only_lf_twice, "\n\n", rows![[""], [""]]);

    splits_to!(quote_empty, "\"\"", rows![[""]]);
    splits_to!(quote_empty_lf, "\"\"\n", rows![[""]]);
    splits_to!(quote_one, "\"\"\"\"", rows![["\""]]);
    splits_to!(quote_two, "\"\"\"\"\"\"", rows![["\"\""]]);
    splits_to!(quote_delimiter, "\"a,a\",b,c", rows![["a,a", "b", "c"]]);
    splits_to!(quote_inner, "\"a\"\"b\"", rows![["a\"b"]]);
    splits_to!(quote_leading, "\"\"\"a\"", rows![["\"a"]]);
    splits_to!(quote_trailing, "\"a\"\"\"", rows![["a\""]]);
    splits_to!(quote_lf, "\"a\nb\",c", rows![["a\nb", "c"]]);
    splits_to!(quote_crlf, "\"a\r\nb\"\r\nc", rows![["a\r\nb"], ["c"]]);
    splits_to!(quote_outer_space, "\"a\" ,b", rows![["a ", "b"]]);
    splits_to!(quote_unclosed, "\"a,b", rows![["a,b"]]);
    splits_to!(quote_lone, "\"", rows![[""]]);
    splits_to!(
        quote_empty_fields,
        "\"\",\"\",\"\"",
        rows![["", "", ""]]
    );

    splits_to!(
        single_quote_delimiter,
        "'a,a',b,c",
        rows![["a,a", "b", "c"]],
        single_quotes()
    );
    splits_to!(
        single_quote_doubled,
        "a''a,b,c",
        rows![["a'a", "b", "c"]],
        single_quotes()
    );
    splits_to!(
        single_quote_one,
        "''''",
        rows![["'"]],
        single_quotes()
    );

    splits_to!(no_row_separator, "a\nb,c", rows![["a\nb", "c"]], commas());
    splits_to!(no_quote, "\"a,b\"", rows![["\"a", "b\""]], commas());

    splits_to!(
        escape_delimiter,
        "a\\,b,c",
        rows![["a,b", "c"]],
        escapes()
    );
    splits_to!(escape_quote, "\\'a", rows![["'a"]], escapes());
    splits_to!(escape_escape, "a\\\\b", rows![["a\\b"]], escapes());
    splits_to!(escape_row, "a\\\nb", rows![["a\nb"]], escapes());
    splits_to!(escape_in_quotes, "'a\\'b'", rows![["a'b"]], escapes());
    splits_to!(escape_at_end, "a\\", rows![["a"]], escapes());
    splits_to!(escape_ordinary, "\\a\\b", rows![["ab"]], escapes());
    splits_to!(
        escape_then_doubled_quote,
        "\\'''",
        rows![["''"]],
        escapes()
    );
    splits_to!(
        escape_cr,
        "a\\\r\nb",
        rows![["a\r"], ["b"]],
        tolerant_escapes()
    );
    splits_to!(
        escape_lf_after_cr,
        "a\r\\\nb",
        rows![["a"], ["\nb"]],
        tolerant_escapes()
    );

    splits_to!(
        wide_signals,
        "a::b||c::d",
        rows![["a", "b"], ["c", "d"]],
        wide()
    );
    splits_to!(
        wide_partial_delimiter,
        "a:b::c",
        rows![["a:b", "c"]],
        wide()
    );
    splits_to!(
        wide_extra_colon,
        "a:::b",
        rows![["a", ":b"]],
        wide()
    );
    splits_to!(
        wide_quote,
        "<q>a::b||<q>::c",
        rows![["a::b||", "c"]],
        wide()
    );
    splits_to!(
        wide_quote_doubled,
        "<q>a<q><q>b<q>",
        rows![["a<q>b"]],
        wide()
    );
    splits_to!(
        wide_quote_only_doubled,
        "<q><q><q><q>",
        rows![["<q>"]],
        wide()
    );
    splits_to!(wide_escape, "a~~::b", rows![["a::b"]], wide());
    splits_to!(wide_partial_escape, "a~b", rows![["a~b"]], wide());
    splits_to!(
        wide_tolerant_rows,
        "a::b\r\nc::d\re\nf",
        rows![["a", "b"], ["c", "d"], ["e"], ["f"]],
        wide_tolerant()
    );

    splits_to!(
        alternate_delimiters,
        "a,b;c\nd;e",
        rows![["a", "b", "c"], ["d", "e"]],
        alternates()
    );
    splits_to!(
        crlf_only_rows,
        "a\r\nb\rc\nd",
        rows![["a"], ["b\rc\nd"]],
        crlf_only()
    );
    splits_to!(
        crlf_only_quoted,
        "\"a\r\nb\"\r\nc",
        rows![["a\r\nb"], ["c"]],
        crlf_only()
    );

    splits_to!(
        longest_alternate,
        "a,;b;c\r\nd\ne",
        rows![["a", "b", "c"], ["d"], ["e"]],
        extended_alternates()
    );
    splits_to!(
        longest_alternate_prefix,
        "a,b,;c\rd",
        rows![["a,b", "c\rd"]],
        extended_alternates()
    );
    splits_to!(
        longest_alternate_quoted,
        "\"a,\",;\"b;\"\r\n\"c\r\",;d",
        rows![["a,", "b;"], ["c\r", "d"]],
        extended_alternates()
    );

    #[test]
    fn flavor_selection() {
        assert_eq!(
            Flavor::select(Signals::csv()),
            Flavor::NewRowTolerantSimple
        );
        assert_eq!(Flavor::select(&escapes()), Flavor::Simple);
        assert_eq!(Flavor::select(&commas()), Flavor::Simple);
        assert_eq!(Flavor::select(&wide()), Flavor::Full);
        assert_eq!(Flavor::select(&wide_tolerant()), Flavor::Full);
        assert_eq!(Flavor::select(&alternates()), Flavor::Full);
        assert_eq!(Flavor::select(&crlf_only()), Flavor::Full);
        assert_eq!(Flavor::select(&extended_alternates()), Flavor::Full);
        assert_eq!(Processor::full(&commas()).flavor(), Flavor::Full);
    }

    #[test]
    fn lazy_rows() {
        let mut consumed = 0;
        let input = "a,b\nc,d\ne".chars().inspect(|_| consumed += 1);
        let mut rows = split(input, Signals::csv());
        assert_eq!(rows.next(), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(rows.ended_by_separator());
        drop(rows);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn read_row_in_pieces() {
        let mut p = Processor::new(Signals::csv());
        let mut first = "\"a,".chars();
        assert_eq!(p.read_row(&mut first), Some(vec!["a,".to_string()]));
        assert!(!p.ended_by_separator());

        // Without a reset, the quote is still open.
        let mut p = Processor::new(Signals::csv());
        let mut first = "\"a,".chars();
        let mut second = "b\",c\n".chars();
        let mut input = first.by_ref().chain(second.by_ref());
        assert_eq!(
            p.read_row(&mut input),
            Some(vec!["a,b".to_string(), "c".to_string()])
        );
        assert!(p.ended_by_separator());
    }

    #[test]
    fn crlf_split_across_rows() {
        let mut p = Processor::new(Signals::csv());
        let mut input = "a\r".chars();
        assert_eq!(p.read_row(&mut input), Some(vec!["a".to_string()]));
        let mut input = "\nb".chars();
        assert_eq!(p.read_row(&mut input), Some(vec!["b".to_string()]));
        assert_eq!(p.read_row(&mut input), None);
    }

    #[test]
    fn process_resets() {
        let mut p = Processor::new(Signals::csv());
        let row = p.read_row(&mut "a\r".chars());
        assert_eq!(row, Some(vec!["a".to_string()]));
        // Without a reset, this `\n` would complete the `\r\n` above.
        let rows: Vec<Vec<String>> = p.process("\nb".chars()).collect();
        assert_eq!(rows, vec![vec![""], vec!["b"]]);
    }

    #[test]
    fn single_row() {
        let row = split_row("a,b,c".chars(), Signals::csv()).unwrap();
        assert_eq!(row, vec!["a", "b", "c"]);
        let row = split_row("\"a\nb\",c".chars(), Signals::csv()).unwrap();
        assert_eq!(row, vec!["a\nb", "c"]);
        assert_eq!(split_row("".chars(), Signals::csv()).unwrap().len(), 0);
    }

    #[test]
    fn single_row_rejects_separator() {
        for input in &["a\nb", "a,b\r\n", "\n"] {
            assert_eq!(
                split_row(input.chars(), Signals::csv()),
                Err(Error::RowSeparatorNotAllowed),
                "{:?}",
                input
            );
        }
    }

    /// Map arbitrary bytes onto a small alphabet dense with signals.
    fn alphabet(bytes: &[u8]) -> String {
        const CHARS: &[char] = &['a', ',', '"', '\'', '\\', '\r', '\n', ';'];
        bytes.iter().map(|&b| CHARS[b as usize % CHARS.len()]).collect()
    }

    fn flavors_agree(signals: &Signals, input: &str) -> bool {
        let mut selected = Processor::new(signals);
        let mut full = Processor::full(signals);
        let a: Vec<Vec<String>> = selected.process(input.chars()).collect();
        let b: Vec<Vec<String>> = full.process(input.chars()).collect();
        a == b
    }

    #[test]
    fn prop_flavors_agree() {
        fn prop(bytes: Vec<u8>) -> TestResult {
            let input = alphabet(&bytes);
            let all = vec![
                Signals::csv().clone(),
                Signals::tsv().clone(),
                commas(),
                single_quotes(),
                escapes(),
                tolerant_escapes(),
                signals(&[";"], &["\r"], "\"", "'"),
            ];
            for s in &all {
                assert_ne!(Flavor::select(s), Flavor::Full);
                if !flavors_agree(s, &input) {
                    return TestResult::failed();
                }
            }
            TestResult::passed()
        }
        quickcheck(prop as fn(Vec<u8>) -> TestResult);
    }
}

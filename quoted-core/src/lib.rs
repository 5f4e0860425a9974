/*!
`quoted-core` provides splitting and joining of rows of fields, where the
signals that structure the text are configurable.

A *signal* is a non-empty string with a structural role: a **delimiter**
separates fields, a **row separator** separates rows, a **quote** surrounds
a field so that it may contain other signals, and an **escape** makes the
character after it literal. Signals may be any number of characters long,
and delimiters and row separators may have alternates that are accepted
when splitting, but never produced when joining.

# Overview

`Signals` is built with `SignalsBuilder`, which refuses configurations that
would be ambiguous. A few common configurations are available as presets:
`Signals::csv`, `Signals::tsv` and `Signals::ascii`.

`Processor` lazily splits a stream of characters into rows, one row at a
time. It picks the fastest flavor that can handle its signals, and never
requires more than one character of lookahead. `split` and `split_row` are
convenience wrappers around it.

`Writer` joins fields into text that splits back into the same fields.
`join` and `join_rows` are convenience wrappers around it.

# Example

```
use quoted_core::{join, split, Signals};

let signals = Signals::csv();
let line = join(&["a", "b,c", "d\"e"], signals).unwrap();
assert_eq!(line, "a,\"b,c\",\"d\"\"e\"");

let rows: Vec<Vec<String>> = split(line.chars(), signals).collect();
assert_eq!(rows, vec![vec!["a", "b,c", "d\"e"]]);
```
*/

pub use crate::error::{Error, Result};
pub use crate::reader::{split, split_row, Flavor, IntoRows, Processor, Rows};
pub use crate::signals::{SignalClass, Signals, SignalsBuilder};
pub use crate::tracker::SignalTracker;
pub use crate::writer::{
    join, join_rows, AsField, QuoteStyle, Writer, WriterBuilder,
};

mod error;
mod reader;
mod signals;
mod tracker;
mod writer;

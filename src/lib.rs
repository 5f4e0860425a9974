/*!
The `quoted` crate reads and writes rows of fields separated by
configurable *signals*: delimiters, row separators, quotes and escapes of
any length.

It is a convenience layer over
[`quoted-core`](https://docs.rs/quoted-core), which does all of the
splitting and joining. This crate adds readers and writers with header
rows and record length checking, a `Row` type with indexed, named and
typed field access, and fixed width rows.

# Example

This example reads rows with a header row, and writes them back out with
different signals.

```
use quoted::{ReaderBuilder, Signals, WriterBuilder};

# fn example() -> Result<(), quoted::Error> {
let data = "\
name,note
Alice,\"likes \"\"tabs\"\"\"
Bob,\"a\tb\"
";
let mut rdr = ReaderBuilder::new().from_str(data);
let mut wtr = WriterBuilder::new().signals(Signals::tsv()).from_writer(vec![])?;
for row in rdr.rows() {
    let row = row?;
    assert!(row.get_named("note").is_some());
    wtr.write_row(&row)?;
}
let tsv = String::from_utf8(wtr.into_inner()?).unwrap();
assert_eq!(tsv, "Alice\tlikes \"tabs\"\nBob\ta\\\tb\n");
# Ok(()) }
# example().unwrap();
```

# Signals

Signals are configured with `SignalsBuilder`, which rejects any
configuration where one signal could be mistaken for part of another. The
presets `Signals::csv()`, `Signals::tsv()` and `Signals::ascii()` cover the
common cases.
*/

pub use quoted_core::{
    AsField, Flavor, QuoteStyle, SignalClass, Signals, SignalsBuilder,
};

pub use crate::error::{Error, Result};
pub use crate::reader::{Reader, ReaderBuilder, RowsIntoIter, RowsIter};
pub use crate::record::{Headers, Row, RowIter};
pub use crate::writer::{Writer, WriterBuilder};

mod error;
pub mod fixed;
mod reader;
mod record;
mod writer;

// src/csv.rs
//
// CSV/TSV for coin rows, on top of the `csv` crate. Header names come from
// `CoinRecord`'s serde field names, i.e. the schema names in schema order.

use std::io::{self, Write};

use ::csv::{ReaderBuilder, WriterBuilder};

use crate::config::options::ExportOptions;
use crate::data::CoinRecord;
use crate::error::ExportError;

/* ---------------- Writing ---------------- */

/// Stream rows to any writer.
pub fn write_records<'a, W, I>(
    w: W,
    records: I,
    delimiter: u8,
    include_headers: bool,
) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a CoinRecord>,
{
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(include_headers)
        .from_writer(w);

    let mut rows = 0usize;
    for record in records {
        wtr.serialize(record)?;
        rows += 1;
    }
    // Header-only output when asked for headers but there are no rows.
    if rows == 0 && include_headers {
        wtr.write_record(crate::data::Column::ALL.iter().map(|c| c.name()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Build the full export text (used by Copy and by stdout output).
pub fn to_export_string<'a, I>(export: &ExportOptions, records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a CoinRecord>,
{
    let mut buf = Vec::new();
    write_records(&mut buf, records, export.format.delimiter(), export.include_headers)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/* ---------------- Parsing ---------------- */

/// Parse export text back into rows. Without a header line, fields are
/// read positionally in schema order.
pub fn parse_records(
    text: &str,
    delimiter: u8,
    has_headers: bool,
) -> Result<Vec<CoinRecord>, ExportError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .from_reader(text.as_bytes());

    rdr.deserialize()
        .map(|r| r.map_err(ExportError::from))
        .collect()
}

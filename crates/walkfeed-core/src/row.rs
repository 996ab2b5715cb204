//! Text format of the streamed body.
//!
//! The body is a header line followed by one line per tick:
//!
//! ```text
//! #epoch,value,min,max,date
//! 1760875200000,52.1934,50.9021,53.0042,2025-10-19T12:00:00.000412345Z
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::walk::Sample;

/// First line of every streamed body.
pub const HEADER_LINE: &str = "#epoch,value,min,max,date\n";

/// Digits after the decimal point of the numeric columns.
pub const DECIMALS: usize = 4;

const FIELD_COUNT: usize = 5;

/// Render one data row, newline included.
pub fn format_row(at: DateTime<Utc>, sample: &Sample) -> String {
    format!(
        "{},{:.prec$},{:.prec$},{:.prec$},{}\n",
        at.timestamp_millis(),
        sample.value,
        sample.min,
        sample.max,
        rfc3339_nano(at),
        prec = DECIMALS,
    )
}

/// RFC3339 with up to nanosecond precision; trailing zeros of the fraction
/// are dropped, and so is the fraction itself on a whole second.
pub fn rfc3339_nano(at: DateTime<Utc>) -> String {
    let full = at.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some(stamp) = full.strip_suffix('Z') else {
        return full;
    };
    let trimmed = stamp.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}Z")
}

/// A data row read back from a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub epoch_millis: i64,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid epoch {0:?}")]
    Epoch(String),

    #[error("invalid {field} {value:?}")]
    Number { field: &'static str, value: String },

    #[error("{field} {value:?} is not rendered with 4 decimals")]
    Precision { field: &'static str, value: String },

    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}

/// Parse a data row. Accepts the line with or without its trailing newline.
pub fn parse_row(line: &str) -> Result<Row, RowError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(RowError::FieldCount(fields.len()));
    }

    let epoch_millis = fields[0]
        .parse::<i64>()
        .map_err(|_| RowError::Epoch(fields[0].to_string()))?;

    Ok(Row {
        epoch_millis,
        value: parse_fixed("value", fields[1])?,
        min: parse_fixed("min", fields[2])?,
        max: parse_fixed("max", fields[3])?,
        date: DateTime::parse_from_rfc3339(fields[4])?,
    })
}

fn parse_fixed(field: &'static str, raw: &str) -> Result<f64, RowError> {
    let decimals = raw.split_once('.').map(|(_, frac)| frac.len());
    if decimals != Some(DECIMALS) {
        return Err(RowError::Precision {
            field,
            value: raw.to_string(),
        });
    }
    raw.parse::<f64>().map_err(|_| RowError::Number {
        field,
        value: raw.to_string(),
    })
}

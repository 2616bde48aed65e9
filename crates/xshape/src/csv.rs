//! CSV field splitting and record chunking
//!
//! The customer import treats its input as a flat token stream: fields
//! are split on both `,` and `\n`, then chunked into fixed-size records.
//! No quoting or escaping is honored.

use crate::error::{Error, ErrorKind, Result};

/// Split input into fields on `,` and `\n`
///
/// A trailing `\r` left on a field by CRLF input is stripped. A final
/// newline would otherwise produce one empty trailing field; that field
/// is dropped.
pub fn fields(input: &str) -> Vec<String> {
    let mut out: Vec<String> = input
        .split([',', '\n'])
        .map(|field| field.strip_suffix('\r').unwrap_or(field).to_string())
        .collect();

    if input.ends_with('\n') {
        out.pop();
    }

    out
}

/// Chunk fields into records of exactly `size` fields
///
/// A short final chunk is a `TruncatedRecord` error rather than a
/// silently dropped or padded record.
pub fn records(fields: &[String], size: usize) -> Result<Vec<&[String]>> {
    if size == 0 {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(fields.len() / size);
    for chunk in fields.chunks(size) {
        if chunk.len() != size {
            return Err(Error::unspanned(ErrorKind::TruncatedRecord {
                expected: size,
                found: chunk.len(),
            }));
        }
        out.push(chunk);
    }
    Ok(out)
}

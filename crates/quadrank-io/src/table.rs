//! Line-oriented table access shared by every reader and writer.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use quadrank_core::errors::{InputError, QuadrankError, QuadrankResult};

/// One data row with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> QuadrankError {
    InputError::Io {
        path: path.display().to_string(),
        source,
    }
    .into()
}

pub(crate) fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> QuadrankError {
    InputError::MalformedRow {
        path: path.display().to_string(),
        line,
        reason: reason.into(),
    }
    .into()
}

/// Read every data row of a table with `header.len()` columns.
///
/// The last column takes the remainder of the line, so free text may
/// contain commas there.
pub fn read_rows(path: &Path, header: &[&str]) -> QuadrankResult<Vec<Row>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let header_line = header.join(",");
    let mut rows = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| io_error(path, e))?;
        let number = index + 1;
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if number == 1 && trimmed.trim() == header_line {
            continue;
        }

        let fields: Vec<String> = trimmed
            .splitn(header.len(), ',')
            .map(|f| f.trim().to_string())
            .collect();
        if fields.len() != header.len() {
            return Err(malformed(
                path,
                number,
                format!("expected {} columns ({header_line}), got {}", header.len(), fields.len()),
            ));
        }
        if fields[0].is_empty() {
            return Err(malformed(path, number, format!("empty {}", header[0])));
        }
        rows.push(Row {
            line: number,
            fields,
        });
    }
    Ok(rows)
}

/// Split a whitespace-separated list column.
pub fn split_list(field: &str) -> Vec<&str> {
    field.split_whitespace().collect()
}

/// Write `header` then every row produced by `rows`.
pub fn write_rows<I>(path: &Path, header: &[&str], rows: I) -> QuadrankResult<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", header.join(",")).map_err(|e| io_error(path, e))?;

    let mut written = 0;
    for row in rows {
        writeln!(out, "{}", row.join(",")).map_err(|e| io_error(path, e))?;
        written += 1;
    }
    out.flush().map_err(|e| io_error(path, e))?;
    Ok(written)
}

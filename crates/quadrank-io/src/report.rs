//! Pretty-printed JSON reports (alpha search, run report, MAP report).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use quadrank_core::errors::{InputError, QuadrankResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::table::io_error;

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> QuadrankResult<()> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value).map_err(|e| io_error(path, e.into()))?;
    writeln!(out).map_err(|e| io_error(path, e))?;
    out.flush().map_err(|e| io_error(path, e))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> QuadrankResult<T> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        InputError::MalformedRow {
            path: path.display().to_string(),
            line: e.line(),
            reason: e.to_string(),
        }
        .into()
    })
}

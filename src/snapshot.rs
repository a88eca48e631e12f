// src/snapshot.rs
//
// JSON snapshots of the listing API, so a CSV can be rebuilt without
// refetching every page.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::error::ExportError;
use crate::types::RawCourse;

/// Read the course records of a snapshot. Accepts either a bare array or a
/// listing page object with a `results` array.
pub fn load_snapshot(path: &Path) -> Result<Vec<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ExportError::NotFound(path.to_path_buf()).into())
        }
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let data: Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing JSON from {}", path.display()))?;

    let records = match data {
        Value::Array(records) => records,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(records)) => records,
            _ => bail!(ExportError::DataShape(format!(
                "{} holds an object without a results array",
                path.display()
            ))),
        },
        _ => bail!(ExportError::DataShape(format!(
            "{} is neither an array nor a listing page",
            path.display()
        ))),
    };
    info!(path = %path.display(), records = records.len(), "loaded snapshot");
    Ok(records)
}

/// Write records as pretty-printed UTF-8 JSON with a four-space indent.
pub fn save_snapshot<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut ser)
        .with_context(|| format!("writing JSON to {}", path.display()))?;
    writer.flush()?;
    info!(path = %path.display(), records = records.len(), "saved snapshot");
    Ok(())
}

/// Decode raw records into courses, naming the offending record on failure.
pub fn parse_courses(records: Vec<Value>) -> Result<Vec<RawCourse>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            serde_json::from_value::<RawCourse>(record).map_err(|e| {
                anyhow::Error::from(ExportError::DataShape(format!("course record {i}: {e}")))
            })
        })
        .collect()
}

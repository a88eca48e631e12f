// src/export.rs

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::path::Path;
use tracing::{info, instrument};

use crate::config::{Config, DataSource};
use crate::fetch::ApiClient;
use crate::mapping::{load_keyword_map, load_topic_subject_map, KeywordMap, TopicSubjectMap};
use crate::process::transform;
use crate::snapshot::{load_snapshot, parse_courses, save_snapshot};
use crate::types::{OerRow, RawCourse, OER_COLUMNS};

/// Build the OER CSV from the chosen source. Mappings are loaded once,
/// then course data is acquired, every course transformed, and the CSV
/// written in one go. Any bad record aborts the run before the output
/// file is touched. Returns the number of rows written.
#[instrument(level = "info", skip(config))]
pub fn create_csv(
    config: &Config,
    source: DataSource,
    input_path: &Path,
    output_path: &Path,
) -> Result<usize> {
    let topic_map = load_topic_subject_map(&config.topic_mapping_path())?;
    let keyword_map = load_keyword_map(&config.keyword_mapping_path())?;

    let records = match source {
        DataSource::Api => ApiClient::new(config)?.fetch_all()?,
        DataSource::Json => load_snapshot(input_path)?,
    };
    let courses = parse_courses(records)?;

    let rows = transform_data(&courses, &topic_map, &keyword_map)?;
    write_csv(output_path, &rows)?;
    info!(path = %output_path.display(), rows = rows.len(), "CSV file successfully created");
    Ok(rows.len())
}

/// Fetch every course from the API and save the raw records as a JSON
/// snapshot for later `DataSource::Json` runs.
#[instrument(level = "info", skip(config))]
pub fn create_json(config: &Config, output_path: &Path) -> Result<usize> {
    let records = ApiClient::new(config)?.fetch_all()?;
    save_snapshot(output_path, &records)?;
    Ok(records.len())
}

/// Transform all courses, failing on the first one that cannot be mapped.
pub fn transform_data(
    courses: &[RawCourse],
    topic_map: &TopicSubjectMap,
    keyword_map: &KeywordMap,
) -> Result<Vec<OerRow>> {
    courses
        .iter()
        .map(|course| {
            transform(course, topic_map, keyword_map)
                .with_context(|| format!("transforming course {:?}", course.title))
        })
        .collect()
}

/// Write the header and all rows, CRLF-terminated, quoting only where needed.
pub fn write_csv(path: &Path, rows: &[OerRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(OER_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

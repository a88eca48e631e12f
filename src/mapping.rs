// src/mapping.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::ExportError;
use crate::process::normalize_course_url;

pub const TOPIC_MAPPING_FILE: &str = "ocw_topic_to_oer_subject.csv";
pub const KEYWORD_MAPPING_FILE: &str = "fm_keywords_export.csv";

/// OCW topic -> OER subject(s), `|`-joined exactly as in the mapping file.
pub type TopicSubjectMap = HashMap<String, String>;

/// Normalized course URL -> raw FM export keyword string.
pub type KeywordMap = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct TopicRow {
    #[serde(rename = "OCW Topic")]
    topic: String,
    #[serde(rename = "OER Subject")]
    subject: String,
}

#[derive(Debug, Deserialize)]
struct KeywordRow {
    #[serde(rename = "zze_courseURL", default)]
    course_url: String,
    #[serde(rename = "zzd_keywords", default)]
    keywords: String,
}

/// Directory holding the reference CSVs that ship with the crate.
pub fn bundled_mapping_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mapping_files")
}

fn open_reference(path: &Path) -> Result<csv::Reader<File>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ExportError::NotFound(path.to_path_buf()).into())
        }
        Err(e) => return Err(e).with_context(|| format!("opening {}", path.display())),
    };
    Ok(ReaderBuilder::new().flexible(true).from_reader(file))
}

/// Load the OCW topic -> OER subject table. Subject values are stored
/// verbatim; splitting happens at lookup time.
pub fn load_topic_subject_map(path: &Path) -> Result<TopicSubjectMap> {
    let mut rdr = open_reference(path)?;
    let mut map = TopicSubjectMap::new();
    for (i, row) in rdr.deserialize::<TopicRow>().enumerate() {
        let row = row.with_context(|| format!("{}: bad row {}", path.display(), i + 1))?;
        map.insert(row.topic, row.subject);
    }
    debug!(path = %path.display(), topics = map.len(), "loaded topic mapping");
    Ok(map)
}

/// Load the FM export keyword table keyed by normalized course URL.
/// Rows without a course URL are skipped.
pub fn load_keyword_map(path: &Path) -> Result<KeywordMap> {
    let mut rdr = open_reference(path)?;
    let mut map = KeywordMap::new();
    for (i, row) in rdr.deserialize::<KeywordRow>().enumerate() {
        let row = row.with_context(|| format!("{}: bad row {}", path.display(), i + 1))?;
        if row.course_url.is_empty() {
            continue;
        }
        let url = normalize_course_url(&row.course_url)
            .with_context(|| format!("{}: row {}", path.display(), i + 1))?;
        map.insert(url, row.keywords);
    }
    debug!(path = %path.display(), courses = map.len(), "loaded keyword mapping");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        Ok(tmp)
    }

    #[test]
    fn topic_subjects_are_kept_verbatim() -> Result<()> {
        let tmp = csv_file(
            "OCW Topic,OER Subject\n\
             Algebra,Mathematics\n\
             Biophysics,Physics|Life Science\n",
        )?;
        let map = load_topic_subject_map(tmp.path())?;
        assert_eq!(map.len(), 2);
        assert_eq!(map["Biophysics"], "Physics|Life Science");
        Ok(())
    }

    #[test]
    fn keyword_urls_are_normalized_and_blank_rows_skipped() -> Result<()> {
        let tmp = csv_file(
            "zza_title,zze_courseURL,zzd_keywords\n\
             Linear Algebra,ocw.mit.edu/courses/mathematics/18-06-linear-algebra-spring-2010,\"matrices, vectors\"\n\
             Orphan,,ignored\n",
        )?;
        let map = load_keyword_map(tmp.path())?;
        assert_eq!(map.len(), 1);
        assert_eq!(
            map["ocw.mit.edu/courses/18-06-linear-algebra-spring-2010"],
            "matrices, vectors"
        );
        Ok(())
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_topic_subject_map(Path::new("/nonexistent/mapping.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExportError>(),
            Some(ExportError::NotFound(_))
        ));
    }

    #[test]
    fn bundled_files_load() -> Result<()> {
        let dir = bundled_mapping_dir();
        assert!(!load_topic_subject_map(&dir.join(TOPIC_MAPPING_FILE))?.is_empty());
        assert!(!load_keyword_map(&dir.join(KEYWORD_MAPPING_FILE))?.is_empty());
        Ok(())
    }
}

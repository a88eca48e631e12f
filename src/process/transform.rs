// src/process/transform.rs

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::{normalize_keywords, text_cleanup};
use crate::error::ExportError;
use crate::mapping::{KeywordMap, TopicSubjectMap};
use crate::types::{Instructor, Level, OerRow, RawCourse, Topic};

/* ─────────────────────────── constants ─────────────────────────── */

const MATERIAL_TYPE: &str = "Full Course";
const MEDIA_FORMATS: &str = "Text/HTML";
const LANGUAGE: &str = "en";
const COU_TITLE: &str = "Creative Commons Attribution Non Commercial Share Alike 4.0";
const COU_URL: &str = "https://creativecommons.org/licenses/by-nc-sa/4.0/";
const PRIMARY_USER: &str = "student|teacher";
const PROVIDER: &str = "MIT";
const PROVIDER_SET: &str = "MIT OpenCourseWare";

/// OCW course level -> OER sublevels.
const LEVEL_SUBLEVELS: &[(&str, &[&str])] = &[
    (
        "Undergraduate",
        &["Community College/Lower Division", "College/Upper Division"],
    ),
    ("Graduate", &["Graduate/Professional"]),
    (
        "High School",
        &["High School", "Community College/Lower Division"],
    ),
    ("Non-Credit", &["Career/Technical Education"]),
];

/// Semester name -> (month, day) the term roughly starts on.
const SEMESTER_START: &[(&str, (u32, u32))] = &[
    ("Fall", (9, 1)),
    ("Spring", (2, 1)),
    ("Summer", (6, 1)),
    ("January IAP", (1, 1)),
];

/* ─────────────────────────── transform ─────────────────────────── */

/// Map one course onto the OER template. The first run supplies every
/// run-level field; a course with no runs, or with a level outside the
/// known set, is rejected.
pub fn transform(
    course: &RawCourse,
    topic_map: &TopicSubjectMap,
    keyword_map: &KeywordMap,
) -> Result<OerRow> {
    let run = course.runs.first().ok_or_else(|| {
        ExportError::DataShape(format!("course {:?} has no runs", course.title))
    })?;
    let authors = author_names(&run.instructors);

    Ok(OerRow {
        cr_title: course.title.clone(),
        cr_url: run.url.clone(),
        cr_material_type: MATERIAL_TYPE.to_string(),
        cr_media_formats: MEDIA_FORMATS.to_string(),
        cr_sublevel: sublevels(&run.level)?,
        cr_abstract: text_cleanup(&run.description),
        cr_language: LANGUAGE.to_string(),
        cr_cou_title: COU_TITLE.to_string(),
        cr_primary_user: PRIMARY_USER.to_string(),
        cr_subject: subjects(topic_map, &course.topics),
        cr_keywords: keywords(keyword_map, &course.topics, &run.url),
        cr_create_date: create_date(run.semester.as_deref(), run.year),
        cr_author_name: authors.clone(),
        cr_provider: PROVIDER.to_string(),
        cr_provider_set: PROVIDER_SET.to_string(),
        cr_cou_url: COU_URL.to_string(),
        cr_cou_copyright_holder: authors,
        cr_educational_use: educational_use(&course.course_features),
        cr_accessibility: accessibility(&course.course_features),
    })
}

/// Union of the sublevels of every level, sorted and `|`-joined.
pub fn sublevels(levels: &[Level]) -> Result<String> {
    let mut out = BTreeSet::new();
    for level in levels {
        let (_, sublevels) = LEVEL_SUBLEVELS
            .iter()
            .find(|(name, _)| *name == level.name)
            .ok_or_else(|| ExportError::DataShape(format!("unknown course level {:?}", level.name)))?;
        out.extend(sublevels.iter().copied());
    }
    Ok(join(out))
}

/// Distinct OER subjects of all mapped topics, sorted and `|`-joined.
/// Topics missing from the mapping contribute nothing.
pub fn subjects(topic_map: &TopicSubjectMap, topics: &[Topic]) -> String {
    let subjects: BTreeSet<&str> = topics
        .iter()
        .filter_map(|topic| topic_map.get(&topic.name))
        .flat_map(|joined| joined.split('|'))
        .collect();
    join(subjects)
}

/// FM export keywords for the course if it has any, otherwise its topic
/// names as they come.
pub fn keywords(keyword_map: &KeywordMap, topics: &[Topic], course_url: &str) -> String {
    match keyword_map.get(course_url).filter(|k| !k.is_empty()) {
        Some(raw) => normalize_keywords(raw),
        None => join(topics.iter().map(|t| t.name.as_str())),
    }
}

/// Ballpark start date of a course run, `YYYY-MM-DD`. Unknown semesters
/// fall back to January 1st; without a year there is no date.
pub fn create_date(semester: Option<&str>, year: Option<i32>) -> String {
    let Some(year) = year else {
        return String::new();
    };
    let (month, day) = semester
        .and_then(|s| SEMESTER_START.iter().find(|(name, _)| *name == s))
        .map(|(_, start)| *start)
        .unwrap_or((1, 1));
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => format!("{year}-{month:02}-{day:02}"),
    }
}

/// `Last, First` per instructor, in input order.
pub fn author_names(instructors: &[Instructor]) -> String {
    join(
        instructors
            .iter()
            .map(|i| format!("{}, {}", i.last_name, i.first_name)),
    )
}

pub fn educational_use(features: &[String]) -> String {
    let mut tags = vec!["Curriculum/Instruction"];
    if features.iter().any(|f| f.contains("Assignment")) {
        tags.push("Assessment");
    }
    if features.iter().any(|f| f == "Instructor Insights") {
        tags.push("Professional Development");
    }
    tags.join("|")
}

// Each tag group is already pipe-joined; the groups are joined again.
pub fn accessibility(features: &[String]) -> String {
    let mut tags = vec!["Visual|Textual"];
    if features.iter().any(|f| f.contains("Video")) {
        tags.push("Auditory|Caption|Transcript");
    }
    tags.join("|")
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push('|');
        }
        out.push_str(item.as_ref());
    }
    out
}

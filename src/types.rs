// src/types.rs

use serde::{Deserialize, Deserializer, Serialize};

/// The listing API sends `null` for empty lists and missing descriptions.
/// The key itself must still be present.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A required key whose value may be `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// One course record as returned by the OCW listing endpoint. Every field
/// the exporter reads is required, so a truncated record fails to parse
/// instead of producing an empty row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCourse {
    pub title: String,
    pub runs: Vec<CourseRun>,
    #[serde(deserialize_with = "null_as_default")]
    pub topics: Vec<Topic>,
    #[serde(rename = "course_feature", deserialize_with = "null_as_default")]
    pub course_features: Vec<String>,
}

/// A single offering of a course. Only the first run is exported.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseRun {
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: Vec<Level>,
    #[serde(deserialize_with = "nullable")]
    pub semester: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub year: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub instructors: Vec<Instructor>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Level {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Topic {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Instructor {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
}

/// Column order of the OER template. `OerRow` serializes in this order.
pub const OER_COLUMNS: [&str; 19] = [
    "CR_TITLE",
    "CR_URL",
    "CR_MATERIAL_TYPE",
    "CR_MEDIA_FORMATS",
    "CR_SUBLEVEL",
    "CR_ABSTRACT",
    "CR_LANGUAGE",
    "CR_COU_TITLE",
    "CR_PRIMARY_USER",
    "CR_SUBJECT",
    "CR_KEYWORDS",
    "CR_CREATE_DATE",
    "CR_AUTHOR_NAME",
    "CR_PROVIDER",
    "CR_PROVIDER_SET",
    "CR_COU_URL",
    "CR_COU_COPYRIGHT_HOLDER",
    "CR_EDUCATIONAL_USE",
    "CR_ACCESSIBILITY",
];

/// One row of the OER CSV template. Multi-valued fields are `|`-joined and
/// an empty string stands for "no value".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OerRow {
    pub cr_title: String,
    pub cr_url: String,
    pub cr_material_type: String,
    pub cr_media_formats: String,
    pub cr_sublevel: String,
    pub cr_abstract: String,
    pub cr_language: String,
    pub cr_cou_title: String,
    pub cr_primary_user: String,
    pub cr_subject: String,
    pub cr_keywords: String,
    pub cr_create_date: String,
    pub cr_author_name: String,
    pub cr_provider: String,
    pub cr_provider_set: String,
    pub cr_cou_url: String,
    pub cr_cou_copyright_holder: String,
    pub cr_educational_use: String,
    pub cr_accessibility: String,
}

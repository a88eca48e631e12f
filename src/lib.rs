//! Export MIT OpenCourseWare course metadata into the OER CSV template.
//!
//! Course records come either from the paginated OCW listing API or from a
//! JSON snapshot of it. Each record is mapped onto one template row, with
//! subjects and keywords merged in from two bundled reference tables.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod mapping;
pub mod process;
pub mod snapshot;
pub mod types;

pub use config::{Config, DataSource};
pub use error::ExportError;
pub use export::{create_csv, create_json};
pub use types::{OerRow, RawCourse};

// src/process/mod.rs

pub mod keywords;
pub mod text;
pub mod transform;
pub mod url;

pub use keywords::normalize_keywords;
pub use text::text_cleanup;
pub use transform::transform;
pub use url::normalize_course_url;

// src/process/url.rs

use anyhow::Result;

use crate::error::ExportError;

const COURSES_SEGMENT: &str = "/courses/";

/// Rewrite a legacy FM export course URL into the listing API's form by
/// dropping the department segment:
///
/// `ocw.mit.edu/courses/mathematics/18-06-linear-algebra-spring-2010`
/// becomes `ocw.mit.edu/courses/18-06-linear-algebra-spring-2010`.
///
/// URLs without `/courses/` pass through untouched. A `/courses/` URL must
/// carry a department segment; one that does not is rejected.
pub fn normalize_course_url(url: &str) -> Result<String> {
    let Some((base, course_path)) = url.split_once(COURSES_SEGMENT) else {
        return Ok(url.to_string());
    };
    let (_department, course_metadata) = course_path.split_once('/').ok_or_else(|| {
        ExportError::DataShape(format!("course URL {url:?} has no department segment"))
    })?;
    Ok(format!("{base}{COURSES_SEGMENT}{course_metadata}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_department_segment() {
        assert_eq!(
            normalize_course_url("ocw.mit.edu/courses/mathematics/18-06-linear-algebra-spring-2010")
                .unwrap(),
            "ocw.mit.edu/courses/18-06-linear-algebra-spring-2010"
        );
        assert_eq!(
            normalize_course_url(
                "https://ocw.mit.edu/courses/physics/8-01sc-classical-mechanics-fall-2016/"
            )
            .unwrap(),
            "https://ocw.mit.edu/courses/8-01sc-classical-mechanics-fall-2016/"
        );
    }

    #[test]
    fn splits_on_first_courses_segment_only() {
        assert_eq!(
            normalize_course_url("ocw.mit.edu/courses/eecs/6-00/courses/x").unwrap(),
            "ocw.mit.edu/courses/6-00/courses/x"
        );
    }

    #[test]
    fn other_urls_pass_through() {
        assert_eq!(
            normalize_course_url("ocw.mit.edu/resources/res-18-001").unwrap(),
            "ocw.mit.edu/resources/res-18-001"
        );
        assert_eq!(normalize_course_url("").unwrap(), "");
    }

    #[test]
    fn missing_department_is_an_error() {
        let err = normalize_course_url("ocw.mit.edu/courses/18-06").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExportError>(),
            Some(ExportError::DataShape(_))
        ));
    }
}

use anyhow::Result;
use ocw_oer_export::{create_csv, Config, DataSource};
use std::{fs, path::PathBuf};
use tempfile::tempdir;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn csv_from_json_matches_expected() -> Result<()> {
    let out_dir = tempdir()?;
    let output = out_dir.path().join("test_output.csv");
    let config = Config {
        mapping_dir: fixtures(),
        ..Config::default()
    };

    let rows = create_csv(
        &config,
        DataSource::Json,
        &fixtures().join("sample_courses.json"),
        &output,
    )?;
    assert_eq!(rows, 3);

    let generated = fs::read(&output)?;
    let expected = fs::read(fixtures().join("expected_courses.csv"))?;
    assert_eq!(
        String::from_utf8_lossy(&generated),
        String::from_utf8_lossy(&expected),
        "generated CSV does not match tests/fixtures/expected_courses.csv"
    );
    assert_eq!(generated, expected);
    Ok(())
}

#[test]
fn csv_is_readable_with_fixed_columns() -> Result<()> {
    let out_dir = tempdir()?;
    let output = out_dir.path().join("out.csv");
    let config = Config {
        mapping_dir: fixtures(),
        ..Config::default()
    };
    create_csv(
        &config,
        DataSource::Json,
        &fixtures().join("sample_courses.json"),
        &output,
    )?;

    let mut rdr = csv::Reader::from_path(&output)?;
    let headers = rdr.headers()?.clone();
    assert_eq!(headers.len(), 19);
    assert_eq!(&headers[0], "CR_TITLE");
    assert_eq!(&headers[18], "CR_ACCESSIBILITY");

    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(records.len(), 3);
    // no keyword entry for 6.033, so its topics stand in
    assert_eq!(
        &records[1][10],
        "Computer Science|Systems Engineering|Unmapped Topic"
    );
    assert!(records.iter().all(|r| &r[6] == "en"));
    Ok(())
}

//! Configured session tables: overrides, additions, and validation failures.

use chrono::NaiveDate;
use std::io::Write;
use tj_config::{load_layered_yaml, load_layered_yaml_from_strings};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn override_changes_window_and_keeps_dst_shift() {
    let yaml = r#"
sessions:
  London:
    winter_start_hour: 7
    winter_end_hour: 16
"#;
    let table = load_layered_yaml_from_strings(&[yaml])
        .unwrap()
        .session_table()
        .unwrap();

    let winter = table.time_range("London", d(2024, 1, 15)).unwrap();
    assert_eq!(winter.start.to_rfc3339(), "2024-01-15T07:00:00+00:00");
    assert_eq!(winter.end.to_rfc3339(), "2024-01-15T16:00:00+00:00");

    let summer = table.time_range("London", d(2024, 6, 15)).unwrap();
    assert_eq!(summer.start.to_rfc3339(), "2024-06-15T06:00:00+00:00");
}

#[test]
fn new_session_and_alias_can_be_added() {
    let yaml = r#"
sessions:
  Frankfurt:
    region: EU
    winter_start_hour: 7
    winter_end_hour: 8
aliases:
  fra: ["Frankfurt"]
"#;
    let table = load_layered_yaml_from_strings(&[yaml])
        .unwrap()
        .session_table()
        .unwrap();

    assert_eq!(table.normalize("FRA"), "Frankfurt");
    let w = table.time_range("fra", d(2024, 6, 17)).unwrap();
    assert_eq!(w.start.to_rfc3339(), "2024-06-17T06:00:00+00:00");
    assert_eq!(w.end.to_rfc3339(), "2024-06-17T07:00:00+00:00");

    // Defaults are still there.
    assert_eq!(table.normalize("tokyo"), "Asia");
}

#[test]
fn alias_to_missing_session_is_rejected() {
    let yaml = r#"
aliases:
  chicago: ["CME"]
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let err = loaded.session_table().unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("invalid session table"), "{chain}");
    assert!(chain.contains("unknown session 'CME'"), "{chain}");
}

#[test]
fn hour_out_of_range_is_rejected() {
    let yaml = r#"
sessions:
  NY PM:
    winter_end_hour: 24
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    assert!(loaded.session_table().is_err());
}

#[test]
fn unknown_region_fails_to_load() {
    let yaml = r#"
sessions:
  Mumbai:
    region: APAC
    winter_start_hour: 3
    winter_end_hour: 10
"#;
    assert!(load_layered_yaml_from_strings(&[yaml]).is_err());
}

#[test]
fn invalid_yaml_fails_to_load() {
    assert!(load_layered_yaml_from_strings(&["sessions: [unclosed"]).is_err());
}

#[test]
fn layered_files_merge_in_order() {
    let mut base = tempfile::NamedTempFile::new().unwrap();
    writeln!(base, "sessions:\n  London:\n    winter_start_hour: 6").unwrap();
    let mut overlay = tempfile::NamedTempFile::new().unwrap();
    writeln!(overlay, "sessions:\n  London:\n    winter_start_hour: 9").unwrap();

    let base_path = base.path().to_string_lossy().to_string();
    let overlay_path = overlay.path().to_string_lossy().to_string();
    let loaded = load_layered_yaml(&[base_path.as_str(), overlay_path.as_str()]).unwrap();

    assert_eq!(loaded.config.sessions["London"].winter_start_hour, 9);
}

#[test]
fn missing_file_names_the_path() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

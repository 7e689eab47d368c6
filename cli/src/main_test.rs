#![allow(clippy::float_cmp)]

use super::*;

fn run_args(dir: &Path, args: &[&str]) -> Result<String, CliError> {
    let store = dir.join("templates");
    let mut argv = vec!["designer", "--store-dir", store.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn doc_output(dir: &Path, args: &[&str]) -> TemplateDocument {
    TemplateDocument::from_json(&run_args(dir, args).unwrap()).unwrap()
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn assignment_splits_on_first_equals() {
    assert_eq!(parse_assignment("recipientName=Ada Lovelace").unwrap(), ("recipientName".into(), "Ada Lovelace".into()));
    assert_eq!(parse_assignment("customMessage=a=b").unwrap(), ("customMessage".into(), "a=b".into()));
    assert!(parse_assignment("novalue").is_err());
    assert!(parse_assignment("=x").is_err());
}

#[test]
fn date_requires_iso_format() {
    assert_eq!(parse_date("2026-10-14").unwrap(), NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
    assert!(parse_date("14/10/2026").is_err());
}

#[test]
fn positive_accepts_only_finite_values_above_zero() {
    assert_eq!(parse_positive("0.5").unwrap(), 0.5);
    assert!(parse_positive("0").is_err());
    assert!(parse_positive("-1").is_err());
    assert!(parse_positive("inf").is_err());
    assert!(parse_positive("NaN").is_err());
    assert!(parse_positive("big").is_err());
}

#[test]
fn zoom_flags_reject_non_positive_values() {
    assert!(Cli::try_parse_from(["designer", "--min-scale", "0", "list"]).is_err());
    assert!(Cli::try_parse_from(["designer", "--max-zoom", "-2", "list"]).is_err());
}

#[test]
fn store_dir_defaults_to_templates() {
    let cli = Cli::try_parse_from(["designer", "list"]).unwrap();
    if std::env::var_os("DESIGNER_STORE_DIR").is_none() {
        assert_eq!(cli.store_dir, PathBuf::from("templates"));
    }
    assert!(matches!(cli.command, Command::List));
}

#[test]
fn zoom_flags_map_onto_config() {
    let cli = Cli::try_parse_from(["designer", "--max-zoom", "3", "--min-scale", "0.5", "list"]).unwrap();
    let config = editor_config(&cli);
    assert_eq!(config.max_zoom, 3.0);
    assert_eq!(config.min_scale, 0.5);
    assert_eq!(config.nudge_step, EditorConfig::default().nudge_step);
}

// =============================================================
// Rows
// =============================================================

#[test]
fn rows_convert_values_to_text() {
    let rows = parse_rows(r#"[{"recipientName": "Ada", "score": 97, "note": null}]"#).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["recipientName"], "Ada");
    assert_eq!(rows[0]["score"], "97");
    assert_eq!(rows[0]["note"], "");
}

#[test]
fn rows_must_be_array_of_objects() {
    assert!(matches!(parse_rows(r#"{"a": 1}"#), Err(CliError::InvalidRows)));
    assert!(matches!(parse_rows("[1, 2]"), Err(CliError::InvalidRows)));
    assert!(matches!(parse_rows("[oops"), Err(CliError::Json(_))));
}

// =============================================================
// Commands
// =============================================================

#[test]
fn new_starter_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let created = doc_output(dir.path(), &["new", "award", "--starter"]);
    assert_eq!(created.elements.len(), 7);
    let shown = doc_output(dir.path(), &["show", "award"]);
    assert_eq!(shown, created);
}

#[test]
fn new_with_size_relayouts_starter() {
    let dir = tempfile::tempdir().unwrap();
    let doc = doc_output(dir.path(), &["new", "wide", "--starter", "--width", "1200", "--height", "850"]);
    assert_eq!(doc.page_size(), Size::new(1200.0, 850.0));
    let recipient = doc.element("recipient").unwrap();
    assert_eq!(recipient.position.x, 300.0);
    assert_eq!(recipient.position.width, 600.0);
}

#[test]
fn new_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award"]).unwrap();
    let err = run_args(dir.path(), &["new", "award"]).unwrap_err();
    assert!(matches!(err, CliError::Store(StoreError::AlreadyExists(_))));
}

#[test]
fn show_missing_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_args(dir.path(), &["show", "ghost"]).unwrap_err();
    assert!(err.to_string().contains("E_NOT_FOUND"), "{err}");
}

#[test]
fn add_preset_persists() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award"]).unwrap();
    let doc = doc_output(dir.path(), &["add", "award", "--kind", "text", "--preset", "certificate-title"]);
    assert_eq!(doc.elements.len(), 1);
    assert_eq!(doc.elements[0].content, "CERTIFICATE OF ACHIEVEMENT");
    assert_eq!(doc_output(dir.path(), &["show", "award"]), doc);
}

#[test]
fn add_unknown_kind_falls_back_to_text() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award"]).unwrap();
    let doc = doc_output(dir.path(), &["add", "award", "--kind", "hologram"]);
    assert_eq!(doc.elements[0].kind, ElementKind::Text);
    assert_eq!(doc.elements[0].content, "New Text");
}

#[test]
fn set_property_clamps_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award", "--starter"]).unwrap();
    let doc = doc_output(dir.path(), &["set", "award", "title", "x", "-50"]);
    assert_eq!(doc.element("title").unwrap().position.x, 0.0);
    let doc = doc_output(dir.path(), &["set", "award", "title", "rotation", "-90"]);
    assert_eq!(doc.element("title").unwrap().style.rotation, Some(270.0));
}

#[test]
fn set_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award", "--starter"]).unwrap();
    assert!(matches!(
        run_args(dir.path(), &["set", "award", "title", "kerning", "2"]),
        Err(CliError::UnknownProperty(_))
    ));
    assert!(matches!(run_args(dir.path(), &["set", "award", "nope", "x", "2"]), Err(CliError::UnknownElement(_))));
    assert!(matches!(
        run_args(dir.path(), &["set", "award", "title", "x", "left"]),
        Err(CliError::InvalidValue { .. })
    ));
}

#[test]
fn set_rejects_property_not_on_kind() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award"]).unwrap();
    let doc = doc_output(dir.path(), &["add", "award", "--kind", "shape"]);
    let id = doc.elements[0].id.clone();
    let err = run_args(dir.path(), &["set", "award", &id, "fontSize", "20"]).unwrap_err();
    assert!(matches!(err, CliError::NotEditable { .. }));
}

#[test]
fn remove_deletes_element() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award", "--starter"]).unwrap();
    let doc = doc_output(dir.path(), &["remove", "award", "signature"]);
    assert!(doc.element("signature").is_none());
    assert_eq!(doc.elements.len(), 6);
    assert!(matches!(run_args(dir.path(), &["remove", "award", "signature"]), Err(CliError::UnknownElement(_))));
}

#[test]
fn resize_command_relayouts() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award", "--starter"]).unwrap();
    let doc = doc_output(dir.path(), &["resize", "award", "--width", "1200", "--height", "850"]);
    assert_eq!(doc.element("recipient").unwrap().position.y, 323.0);
}

#[test]
fn stepwise_resizes_match_one_resize_across_saves() {
    let dir = tempfile::tempdir().unwrap();
    for key in ["stepped", "jumped"] {
        run_args(dir.path(), &["new", key]).unwrap();
        run_args(dir.path(), &["add", key, "--kind", "shape"]).unwrap();
    }
    for width in (81..=100).map(|w| (w * 10).to_string()) {
        run_args(dir.path(), &["resize", "stepped", "--width", &width, "--height", "600"]).unwrap();
    }
    let stepped = doc_output(dir.path(), &["show", "stepped"]);
    let jumped = doc_output(dir.path(), &["resize", "jumped", "--width", "1000", "--height", "600"]);
    assert_eq!(stepped.elements[0].position, jumped.elements[0].position);
}

#[test]
fn fit_uses_configured_limits() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award"]).unwrap();
    let out = run_args(dir.path(), &["fit", "award", "--viewport-width", "400", "--viewport-height", "600"]).unwrap();
    let fit: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(fit["scale"], 0.5);
    assert_eq!(fit["offsetY"], 150.0);

    let out = run_args(
        dir.path(),
        &["--min-scale", "0.75", "fit", "award", "--viewport-width", "400", "--viewport-height", "600"],
    )
    .unwrap();
    let fit: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(fit["scale"], 0.75);
}

#[test]
fn preview_substitutes_without_touching_store() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award", "--starter"]).unwrap();
    let doc = doc_output(dir.path(), &["preview", "award", "--set", "recipientName=Ada", "--date", "2026-10-14"]);
    assert_eq!(doc.element("recipient").unwrap().content, "Ada");
    assert_eq!(doc.element("date").unwrap().content, "October 14, 2026");
    let stored = doc_output(dir.path(), &["show", "award"]);
    assert_eq!(stored.element("recipient").unwrap().content, "{{recipientName}}");
}

#[test]
fn issue_writes_one_file_per_row() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "award", "--starter"]).unwrap();
    let rows = dir.path().join("rows.json");
    fs::write(&rows, r#"[{"recipientName": "Ada"}, {"recipientName": "Grace"}]"#).unwrap();
    let out_dir = dir.path().join("issued");

    let out = run_args(
        dir.path(),
        &["issue", "award", "--rows", rows.to_str().unwrap(), "--out", out_dir.to_str().unwrap(), "--date", "2026-10-14"],
    )
    .unwrap();
    let written: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(written.len(), 2);

    let second = TemplateDocument::from_json(&fs::read_to_string(out_dir.join("award-002.json")).unwrap()).unwrap();
    assert_eq!(second.element("recipient").unwrap().content, "Grace");
}

#[test]
fn list_and_presets() {
    let dir = tempfile::tempdir().unwrap();
    run_args(dir.path(), &["new", "b"]).unwrap();
    run_args(dir.path(), &["new", "a"]).unwrap();
    let keys: Vec<String> = serde_json::from_str(&run_args(dir.path(), &["list"]).unwrap()).unwrap();
    assert_eq!(keys, vec!["a", "b"]);

    let presets: Vec<Value> = serde_json::from_str(&run_args(dir.path(), &["presets"]).unwrap()).unwrap();
    assert_eq!(presets.len(), Preset::ALL.len());
    assert_eq!(presets[0]["key"], "certificate-title");
}

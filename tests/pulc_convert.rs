use std::fs;
use std::path::Path;

use labelport::convert::{ConvertOptions, Converter, PULC_RESULT_FILE};
use labelport::schema::label_config::read_label_config;
use labelport::{LabelConfig, LabelportError};

fn write_records(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).expect("create records dir");
    for (name, contents) in files {
        fs::write(dir.join(name), contents).expect("write record file");
    }
}

#[test]
fn single_record_produces_one_line_without_trailing_newline() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("records");
    let output = temp.path().join("out");
    write_records(
        &input,
        &[(
            "r.json",
            r#"{"input": {"image": "a.jpg"}, "output": {"choice": ["cat", "dog"]}}"#,
        )],
    );

    Converter::new(LabelConfig::default())
        .convert(&input, &output, "PULC", true, &ConvertOptions::default())
        .expect("convert");

    let contents = fs::read_to_string(output.join(PULC_RESULT_FILE)).unwrap();
    assert_eq!(contents, "a.jpg\tcat,dog");
}

#[test]
fn directory_and_file_sources_agree() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let dir_output = temp.path().join("from_dir");
    let file_output = temp.path().join("from_file");
    let converter = Converter::new(LabelConfig::default());
    let options = ConvertOptions::default();

    converter
        .convert(
            Path::new("tests/fixtures/records"),
            &dir_output,
            "PULC",
            true,
            &options,
        )
        .expect("convert directory");
    converter
        .convert(
            Path::new("tests/fixtures/records.json"),
            &file_output,
            "PULC",
            false,
            &options,
        )
        .expect("convert file");

    let from_dir = fs::read_to_string(dir_output.join(PULC_RESULT_FILE)).unwrap();
    let from_file = fs::read_to_string(file_output.join(PULC_RESULT_FILE)).unwrap();
    assert_eq!(from_dir, from_file);
    assert_eq!(from_dir.lines().count(), 2);
}

#[test]
fn directory_ignores_non_json_files() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("records");
    let output = temp.path().join("out");
    write_records(
        &input,
        &[
            ("b.json", r#"{"input": {"image": "b.jpg"}, "output": {"choice": "dog"}}"#),
            ("a.JSON", r#"{"input": {"image": "a.jpg"}, "output": {"choice": "cat"}}"#),
            ("notes.txt", "not a record"),
        ],
    );

    Converter::new(LabelConfig::default())
        .convert(&input, &output, "PULC", true, &ConvertOptions::default())
        .expect("convert");

    let contents = fs::read_to_string(output.join(PULC_RESULT_FILE)).unwrap();
    assert_eq!(contents, "a.jpg\tcat\nb.jpg\tdog");
}

#[test]
fn empty_record_list_writes_empty_file() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("records.json");
    let output = temp.path().join("out");
    fs::write(&input, "[]").unwrap();

    Converter::new(LabelConfig::default())
        .convert(&input, &output, "PULC", false, &ConvertOptions::default())
        .expect("convert");

    assert_eq!(fs::read_to_string(output.join(PULC_RESULT_FILE)).unwrap(), "");
}

#[test]
fn empty_directory_writes_empty_file() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("records");
    let output = temp.path().join("out");
    fs::create_dir_all(&input).unwrap();

    Converter::new(LabelConfig::default())
        .convert(&input, &output, "PULC", true, &ConvertOptions::default())
        .expect("convert");

    assert_eq!(fs::read_to_string(output.join(PULC_RESULT_FILE)).unwrap(), "");
}

#[test]
fn unknown_output_tags_drop_every_task_result() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("out");
    let schema = read_label_config(Path::new("tests/fixtures/image_classification.xml"))
        .expect("parse config");
    let wanted = vec!["nonexistent".to_string()];

    let err = Converter::new(LabelConfig::new(schema, Some(wanted.as_slice())))
        .convert(
            Path::new("tests/fixtures/tasks.json"),
            &output,
            "PULC",
            false,
            &ConvertOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        LabelportError::MissingRecordField { index: 0, ref field } if field == "output.choice"
    ));
    assert!(!output.join(PULC_RESULT_FILE).exists());
}

#[test]
fn task_export_is_expanded_against_the_schema() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("out");
    let schema = read_label_config(Path::new("tests/fixtures/image_classification.xml"))
        .expect("parse config");

    Converter::new(LabelConfig::new(schema, None))
        .convert(
            Path::new("tests/fixtures/tasks.json"),
            &output,
            "PULC",
            false,
            &ConvertOptions::default(),
        )
        .expect("convert");

    let contents = fs::read_to_string(output.join(PULC_RESULT_FILE)).unwrap();
    assert_eq!(contents, "images/c.jpg\tdog");
}

#[test]
fn invalid_format_leaves_output_untouched() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("out");

    let err = Converter::new(LabelConfig::default())
        .convert(
            Path::new("tests/fixtures/records"),
            &output,
            "not_a_real_format",
            true,
            &ConvertOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, LabelportError::InvalidFormat(ref name) if name == "not_a_real_format"));
    assert!(!output.exists());
}

#[test]
fn malformed_record_file_is_reported_with_its_path() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let input = temp.path().join("records");
    write_records(&input, &[("bad.json", "{ not json")]);

    let err = Converter::new(LabelConfig::default())
        .convert(
            &input,
            &temp.path().join("out"),
            "PULC",
            true,
            &ConvertOptions::default(),
        )
        .unwrap_err();

    match err {
        LabelportError::RecordJsonParse { path, .. } => assert!(path.ends_with("bad.json")),
        other => panic!("unexpected error: {other}"),
    }
}

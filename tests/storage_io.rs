use serde_json::Value;
use spark_charts::storage::{LoadError, load_rows, save_description_json};
use spark_charts::{SparkLineChart, SparkLineConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_rows_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.csv");
    fs::write(&path, "t, a, b\nJan, 3,\nFeb, , 7.5\n").unwrap();

    let rows = load_rows(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("t"), Some(&Value::from("Jan")));
    assert_eq!(rows[0].get("a"), Some(&Value::from(3)));
    assert!(!rows[0].contains_key("b"));
    assert_eq!(rows[1].get("b"), Some(&Value::from(7.5)));
}

#[test]
fn loads_rows_from_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.JSON");
    fs::write(&path, r#"[{"t": 1, "a": 3}, {"t": 2, "b": null}]"#).unwrap();

    let rows = load_rows(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("b"), Some(&Value::Null));
}

#[test]
fn rejects_non_array_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.json");
    fs::write(&path, r#"{"t": 1}"#).unwrap();
    assert!(matches!(load_rows(&path), Err(LoadError::NotRows(_))));

    fs::write(&path, "[1, 2]").unwrap();
    assert!(matches!(load_rows(&path), Err(LoadError::NotRows("a number"))));
}

#[test]
fn rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.txt");
    fs::write(&path, "t,a\n1,2\n").unwrap();
    let err = load_rows(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == "txt"));
    assert!(err.to_string().contains("unsupported"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_rows(dir.path().join("absent.csv")),
        Err(LoadError::Io(_))
    ));
}

#[test]
fn saves_description_as_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("desc.json");
    let desc = SparkLineChart::with_id("saved", SparkLineConfig::default()).describe();
    save_description_json(&desc, &path).unwrap();

    let v: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["instance_id"], "saved");
    assert_eq!(v["kind"], "line");
    assert_eq!(v["container"]["class_name"], "h-12 w-28");
}

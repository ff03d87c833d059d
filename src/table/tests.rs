use super::*;

#[test]
fn test_value_parse_narrowest_type() {
    assert_eq!(Value::parse("7"), Value::Int(7));
    assert_eq!(Value::parse("-3"), Value::Int(-3));
    assert_eq!(Value::parse("7.5"), Value::Float(7.5));
    assert_eq!(Value::parse("cat"), Value::Text("cat".to_string()));
    assert_eq!(Value::parse(""), Value::Text(String::new()));
}

#[test]
fn test_value_as_f64() {
    assert_eq!(Value::Int(3).as_f64(), Some(3.0));
    assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
    assert_eq!(Value::Text("3.5".to_string()).as_f64(), Some(3.5));
    assert_eq!(Value::Text("dog".to_string()).as_f64(), None);
}

#[test]
fn test_value_class_label_canonical() {
    assert_eq!(Value::Int(-1).class_label(), "-1");
    assert_eq!(Value::Float(-1.0).class_label(), "-1");
    assert_eq!(Value::Text("cat".to_string()).class_label(), "cat");
}

#[test]
fn test_id_key_int_and_text() {
    assert_eq!(Value::Int(4).id_key(), IdKey::Int(4));
    assert_eq!(
        Value::Text("a7".to_string()).id_key(),
        IdKey::Text("a7".to_string())
    );
    assert_eq!(Value::Float(1.5).id_key(), IdKey::Text("1.5".to_string()));
}

#[test]
fn test_id_key_integral_float_matches_int() {
    // Ids that went through a float dtype must key the same as integers.
    assert_eq!(Value::Float(1.0).id_key(), IdKey::Int(1));
    assert_eq!(Value::Float(-3.0).id_key(), Value::Int(-3).id_key());
    // Fractional and out-of-range floats stay text-keyed.
    assert_eq!(Value::Float(0.5).id_key(), IdKey::Text("0.5".to_string()));
    assert!(matches!(Value::Float(1e300).id_key(), IdKey::Text(_)));
}

#[test]
fn test_from_csv_reader_basic() {
    let data = "id,target\n1,cat\n2,dog\n";
    let table = Table::from_csv_reader(data.as_bytes()).expect("should parse");

    assert_eq!(table.headers(), &["id".to_string(), "target".to_string()]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "id"), Some(&Value::Int(1)));
    assert_eq!(table.cell(1, "target"), Some(&Value::Text("dog".to_string())));
}

#[test]
fn test_from_csv_reader_trims_whitespace() {
    let data = "id, target\n 1 , cat \n";
    let table = Table::from_csv_reader(data.as_bytes()).expect("should parse");

    assert!(table.has_column("target"));
    assert_eq!(table.cell(0, "id"), Some(&Value::Int(1)));
    assert_eq!(table.cell(0, "target"), Some(&Value::Text("cat".to_string())));
}

#[test]
fn test_from_csv_reader_ragged_rows_padded() {
    let data = "id,target\n1\n2,dog,extra\n";
    let table = Table::from_csv_reader(data.as_bytes()).expect("should parse");

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "target"), Some(&Value::Text(String::new())));
    assert_eq!(table.cell(1, "target"), Some(&Value::Text("dog".to_string())));
}

#[test]
fn test_column_lookup() {
    let data = "id,target\n1,2\n";
    let table = Table::from_csv_reader(data.as_bytes()).expect("should parse");

    assert_eq!(table.column_index("id"), Some(0));
    assert_eq!(table.column_index("target"), Some(1));
    assert_eq!(table.column_index("prediction"), None);
    assert!(!table.has_column("prediction"));
}

#[test]
fn test_from_csv_path_missing_file() {
    let err = Table::from_csv_path("/nonexistent/labels.csv").unwrap_err();
    assert!(matches!(err, TableError::Io { .. }));
}

#[test]
fn test_empty_table() {
    let data = "id,target\n";
    let table = Table::from_csv_reader(data.as_bytes()).expect("should parse");
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
}

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::Builder;

use wine_stats::render::table::render_csv;
use wine_stats::{load_file, FieldValue, StatsConfig, StatsError, StatsReport};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn json_records_with_mixed_types() {
    let file = write_temp(
        ".json",
        r#"[
            {"Alcohol": 1, "Flavanoids": 3.0, "Ash": 2, "Hue": 1, "Magnesium": 4},
            {"Alcohol": 1, "Flavanoids": "5", "Ash": "x", "Hue": 2, "Magnesium": 4},
            {"Alcohol": 2, "Flavanoids": "bad", "Ash": 3, "Hue": 2, "Magnesium": 3}
        ]"#,
    );
    let dataset = load_file(file.path()).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(
        dataset.columns,
        vec!["Alcohol", "Ash", "Flavanoids", "Hue", "Magnesium"]
    );

    let report = StatsReport::build(&dataset.records, &StatsConfig::default());
    assert_eq!(report.keys, vec!["1", "2"]);

    let flav = &report.measures[0].stats;
    assert_eq!(flav.counts, vec![2, 0]);
    assert_eq!(flav.mean[0], 4.0);
    assert_eq!(flav.median[0], 4.0);
    assert_eq!(flav.mode[0], 3.0);
    assert!(flav.mean[1].is_nan());

    let gamma = &report.measures[1].stats;
    assert_eq!(gamma.counts, vec![2, 1]);
    assert_eq!(gamma.mean, vec![0.25, 2.0]);
    assert_eq!(gamma.mode, vec![0.0, 2.0]);
}

#[test]
fn csv_classes_sort_as_strings() {
    let file = write_temp(
        ".csv",
        "Alcohol,Flavanoids,Ash,Hue,Magnesium\n\
         2,1.0,1,1,1\n\
         10,2.0,1,1,1\n\
         1,3.0,1,1,1\n\
         1,12abc,1,1,1\n",
    );
    let dataset = load_file(file.path()).unwrap();
    let report = StatsReport::build(&dataset.records, &StatsConfig::default());
    assert_eq!(report.keys, vec!["1", "10", "2"]);
    assert_eq!(report.measures[0].stats.mean, vec![7.5, 2.0, 1.0]);

    let csv = render_csv(&report, 2).unwrap();
    assert_eq!(
        csv.lines().take(2).collect::<Vec<_>>(),
        vec![
            "Measure,Class 1,Class 10,Class 2",
            "Flavanoids Mean,7.50,2.00,1.00"
        ]
    );
}

#[test]
fn headerless_csv_uses_wine_layout() {
    let file = write_temp(
        ".csv",
        "1,14.23,2.43,15.6,127,2.8,3.06,.28,2.29,5.64,1.04,3.92,1065\n\
         2,12.37,2.1,18.4,100,1.9,0.57,.3,1.2,3.2,0.9,2.0,520\n",
    );
    let dataset = load_file(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].number("Flavanoids"), Some(3.06));
    assert_eq!(dataset.records[1].number("Hue"), Some(0.9));
}

#[test]
fn custom_config_drives_report() {
    let file = write_temp(
        ".csv",
        "Class,Hue\nb,1\na,2\na,4\na,4\n",
    );
    let config = StatsConfig::from_toml(
        "group_by = \"Class\"\n\n[[measures]]\nkind = \"field\"\nlabel = \"Hue\"\nfield = \"Hue\"\n",
    )
    .unwrap();
    let dataset = load_file(file.path()).unwrap();
    let report = StatsReport::build(&dataset.records, &config);
    assert_eq!(report.group_by, "Class");
    assert_eq!(report.keys, vec!["a", "b"]);
    assert_eq!(report.measures.len(), 1);
    assert_eq!(report.measures[0].stats.median, vec![4.0, 1.0]);
    assert_eq!(report.measures[0].stats.mode, vec![4.0, 1.0]);
}

#[test]
fn empty_json_array_gives_empty_report() {
    let file = write_temp(".json", "[]");
    let dataset = load_file(file.path()).unwrap();
    let report = StatsReport::build(&dataset.records, &StatsConfig::default());
    assert!(report.keys.is_empty());
    assert!(report.measures.iter().all(|m| m.stats.is_empty()));
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = write_temp(".parquet", "");
    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, StatsError::UnsupportedFormat(ref ext) if ext == "parquet"));
}

#[test]
fn json_with_bad_elements_still_loads() {
    let file = write_temp(
        ".json",
        r#"[{"Alcohol": 1, "Flavanoids": 2.0}, {"Alcohol": 1, "Flavanoids": [3]}, null]"#,
    );
    let dataset = load_file(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);

    let report = StatsReport::build(&dataset.records, &StatsConfig::default());
    assert_eq!(report.keys, vec!["1"]);
    assert_eq!(report.measures[0].stats.counts, vec![1]);
    assert_eq!(report.measures[0].stats.mean, vec![2.0]);
}

#[test]
fn excel_cells_map_to_field_values() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wine_sample.xlsx");
    let dataset = load_file(&path).unwrap();
    assert_eq!(
        dataset.columns,
        vec!["Alcohol", "Flavanoids", "Ash", "Hue", "Magnesium"]
    );
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.records[0].get("Alcohol"), Some(&FieldValue::Number(1.0)));
    assert_eq!(dataset.records[1].get("Flavanoids"), Some(&FieldValue::Null));
    assert_eq!(dataset.records[2].get("Flavanoids"), Some(&FieldValue::from("5")));

    let report = StatsReport::build(&dataset.records, &StatsConfig::default());
    // Numeric class cells key the same way as CSV text
    assert_eq!(report.keys, vec!["1", "2"]);
    let flav = &report.measures[0].stats;
    assert_eq!(flav.counts, vec![1, 1]);
    assert_eq!(flav.mean, vec![3.0, 5.0]);
    let gamma = &report.measures[1].stats;
    assert_eq!(gamma.mean, vec![0.75, 2.0]);
    assert_eq!(gamma.mode, vec![0.5, 2.0]);
}

//! Dataset loading from files on disk.

use codedesk_common::{
    load_csv, load_dataset, load_workbook, CandidateIndex, DatasetError, DetailColumn, NamePolicy,
    Schema,
};
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const KNOWLEDGE_BASE: &str = "\
Access Code,Setting item name,Sub Code,Meaning of sub code
PR-401,Print Quality Mode,0,Standard
PR-401,Print Quality Mode,1,High
 AB-100 , Color Mode ,0,Auto
,Orphan Row,0,Ignored
DX-010,Duplex Printing,0,Off
";

#[test]
fn test_load_default_schema() {
    let file = write_dataset(KNOWLEDGE_BASE);
    let records = load_csv(file.path(), &Schema::default(), b',').unwrap();

    // Row with an empty code is skipped
    assert_eq!(records.len(), 4);
    assert_eq!(records[2].code, "AB-100");
    assert_eq!(records[2].name, "Color Mode");
    assert_eq!(records[0].details, vec!["0", "Standard"]);

    let index = CandidateIndex::build(records, NamePolicy::FirstWins).unwrap();
    assert_eq!(index.unique_codes(), &["PR-401", "AB-100", "DX-010"]);
    assert_eq!(index.group("PR-401").len(), 2);

    let stats = index.stats();
    assert_eq!(stats.rows, 4);
    assert_eq!(stats.unique_codes, 3);
    assert!(stats.divergent_codes.is_empty());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    match load_csv(&path, &Schema::default(), b',') {
        Err(DatasetError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_columns_listed_in_schema_order() {
    let file = write_dataset("Setting item name,Sub Code\nPrint Quality Mode,0\n");
    match load_csv(file.path(), &Schema::default(), b',') {
        Err(DatasetError::MissingColumns(columns)) => {
            assert_eq!(columns, vec!["Access Code", "Meaning of sub code"]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn test_tab_separated_custom_schema() {
    let file = write_dataset("Code\tTitle\tDescription\nK-1\tKeyboard Layout\tUS\n");
    let schema = Schema {
        code_column: "Code".to_string(),
        name_column: "Title".to_string(),
        details: vec![DetailColumn::new("Description", "Description")],
        ..Schema::default()
    };

    let records = load_csv(file.path(), &schema, b'\t').unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Keyboard Layout");
    assert_eq!(records[0].details, vec!["US"]);
}

#[test]
fn test_divergent_names() {
    let file = write_dataset(
        "Access Code,Setting item name,Sub Code,Meaning of sub code\n\
         PR-401,Print Quality Mode,0,Standard\n\
         PR-401,Print Quality,1,High\n",
    );
    let records = load_csv(file.path(), &Schema::default(), b',').unwrap();

    let lenient = CandidateIndex::build(records.clone(), NamePolicy::FirstWins).unwrap();
    assert_eq!(lenient.name_of("PR-401"), "Print Quality Mode");
    assert_eq!(lenient.stats().divergent_codes, vec!["PR-401"]);

    match CandidateIndex::build(records, NamePolicy::Strict) {
        Err(DatasetError::DivergentName { code, first, other }) => {
            assert_eq!(code, "PR-401");
            assert_eq!(first, "Print Quality Mode");
            assert_eq!(other, "Print Quality");
        }
        other => panic!("expected DivergentName, got {:?}", other.map(|i| i.len())),
    }
}

/// Write `rows` to the first sheet of a new workbook; numeric cells stay numbers
fn write_workbook(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell.parse::<f64>() {
                Ok(number) => sheet.write_number(r as u32, c as u16, number).unwrap(),
                Err(_) => sheet.write_string(r as u32, c as u16, *cell).unwrap(),
            };
        }
    }
    workbook.save(path).unwrap();
}

const HEADER: &[&str] = &["Access Code", "Setting item name", "Sub Code", "Meaning of sub code"];

#[test]
fn test_load_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knowledge_base_file.xlsx");
    write_workbook(
        &path,
        &[
            HEADER,
            &["PR-401", "Print Quality Mode", "0", "Standard"],
            &["PR-401", "Print Quality Mode", "1", "High"],
            &["", "Orphan Row", "0", "Ignored"],
            &["08-123", " 印刷モード ", "2", "Draft"],
        ],
    );

    let records = load_dataset(&path, &Schema::default(), b',').unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].code, "PR-401");
    // Numeric cells come back without a fractional part
    assert_eq!(records[1].details, vec!["1", "High"]);
    assert_eq!(records[2].name, "印刷モード");

    let index = CandidateIndex::build(records, NamePolicy::FirstWins).unwrap();
    assert_eq!(index.unique_codes(), &["PR-401", "08-123"]);
}

#[test]
fn test_workbook_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.xlsx");
    write_workbook(&path, &[&["Access Code", "Sub Code"], &["PR-401", "0"]]);

    match load_workbook(&path, &Schema::default()) {
        Err(DatasetError::MissingColumns(columns)) => {
            assert_eq!(columns, vec!["Setting item name", "Meaning of sub code"]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn test_corrupt_workbook_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.xlsx");
    std::fs::write(&path, "Access Code,Setting item name\n").unwrap();

    let err = load_dataset(&path, &Schema::default(), b',').unwrap_err();
    assert_eq!(err.kind(), "unreadable");
}

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use sheet_refinery::config::ExportConfig;
use sheet_refinery::database::{Column, ColumnType, Table, Value};
use sheet_refinery::export::{generate_sql, to_json, Dialect, JsonOrient};
use sheet_refinery::pipeline::{convert, output_stem, write_outputs, Selection};
use sheet_refinery::spreadsheet::{Criteria, Spreadsheet};
use sheet_refinery::transform::clean;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn people() -> Table {
    Table::new(vec![
        Column::new("Name", ColumnType::Text, vec!["Alice".into(), "Bob".into()]),
        Column::new("Age", ColumnType::Text, vec!["NA".into(), "30".into()]),
    ])
    .unwrap()
}

/// Workbook with a `People` sheet (mixed `Age` column, one blank row) and a
/// typed `Scores` sheet.
fn workbook_bytes() -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();

    let people = workbook.add_worksheet();
    people.set_name("People")?;
    people.write_string(0, 0, "Name")?;
    people.write_string(0, 1, "Age")?;
    people.write_string(1, 0, "Alice")?;
    people.write_string(1, 1, "NA")?;
    people.write_string(2, 0, "Bob")?;
    people.write_number(2, 1, 30.0)?;
    // row 3 left blank
    people.write_string(4, 0, "Carol")?;
    people.write_string(4, 1, " null ")?;
    people.write_string(5, 0, "Dave")?;
    people.write_number(5, 1, 41.0)?;

    let scores = workbook.add_worksheet();
    scores.set_name("Scores")?;
    scores.write_string(0, 0, "Player Name")?;
    scores.write_string(0, 1, "Score")?;
    scores.write_string(0, 2, "Active")?;
    scores.write_string(1, 0, "O'Neil")?;
    scores.write_number(1, 1, 9.5)?;
    scores.write_boolean(1, 2, true)?;
    scores.write_string(2, 0, "Kim")?;
    scores.write_number(2, 1, 7.0)?;
    scores.write_boolean(2, 2, false)?;

    workbook.save_to_buffer()
}

#[test]
fn clean_and_export_people() {
    let cleaned = clean(&people(), ["Age"]);
    assert_eq!(cleaned.row_count(), 1);

    let script = generate_sql(&cleaned, "People", Dialect::Mysql);
    assert_eq!(
        script.create,
        "CREATE TABLE IF NOT EXISTS people (\n    name VARCHAR(255),\n    age VARCHAR(255)\n);\n"
    );
    assert_eq!(
        script.inserts,
        "INSERT INTO people (name, age) VALUES ('Bob', '30');"
    );

    let compact = to_json(&cleaned, JsonOrient::Records, 0).unwrap();
    assert_eq!(compact, r#"[{"Name":"Bob","Age":"30"}]"#);
    let pretty = to_json(&cleaned, JsonOrient::Records, 2).unwrap();
    assert_eq!(
        pretty,
        "[\n  {\n    \"Name\": \"Bob\",\n    \"Age\": \"30\"\n  }\n]"
    );
}

#[test]
fn empty_selection_changes_nothing() {
    let table = people();
    assert_eq!(clean(&table, Vec::<String>::new()), table);
    assert_eq!(clean(&table, ["Salary"]), table);
}

#[test]
fn load_sheet_from_memory() -> TestResult {
    let mut workbook = Spreadsheet::from_bytes("people.xlsx", workbook_bytes()?)?;
    assert_eq!(workbook.sheet_names(), vec!["People", "Scores"]);

    let (sheet, table) = workbook.load(&Criteria::default())?;
    assert_eq!(sheet, "People");
    assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["Name", "Age"]);
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column("Age").unwrap().kind, ColumnType::Text);
    assert_eq!(
        table.column("Age").unwrap().values,
        vec![
            Value::from("NA"),
            Value::Integer(30),
            Value::from(" null "),
            Value::Integer(41),
        ]
    );
    Ok(())
}

#[test]
fn convert_people_sheet() -> TestResult {
    let mut workbook = Spreadsheet::from_bytes("people.xlsx", workbook_bytes()?)?;
    let (_, table) = workbook.load(&Criteria::for_sheet("Peo*"))?;

    let config = ExportConfig {
        table_name: "People List".to_owned(),
        dialect: Dialect::Postgresql,
        indent: 0,
        ..ExportConfig::default()
    };
    let conversion = convert(&table, &Selection::All, &config)?;
    assert_eq!(conversion.report.original_rows, 4);
    assert_eq!(conversion.report.retained_rows, 2);
    assert_eq!(conversion.report.retention_rate, 50.0);
    assert_eq!(
        conversion.json,
        r#"[{"Name":"Bob","Age":"30"},{"Name":"Dave","Age":"41"}]"#
    );
    assert_eq!(
        conversion.sql.full(),
        "CREATE TABLE IF NOT EXISTS people_list (\n    name TEXT,\n    age TEXT\n);\n\n\
         INSERT INTO people_list (name, age) VALUES ('Bob', '30');\n\
         INSERT INTO people_list (name, age) VALUES ('Dave', '41');"
    );
    Ok(())
}

#[test]
fn typed_sheet_keeps_types() -> TestResult {
    let mut workbook = Spreadsheet::from_bytes("scores.xlsx", workbook_bytes()?)?;
    let (sheet, table) = workbook.load(&Criteria::for_sheet("Scores"))?;
    assert_eq!(sheet, "Scores");

    let conversion = convert(&table, &Selection::Nothing, &ExportConfig::default())?;
    assert_eq!(
        conversion.sql.create,
        "CREATE TABLE IF NOT EXISTS my_table (\n    player_name VARCHAR(255),\n    score DOUBLE,\n    active BOOLEAN\n);\n"
    );
    assert_eq!(
        conversion.sql.inserts,
        "INSERT INTO my_table (player_name, score, active) VALUES ('O''Neil', 9.5, TRUE);\n\
         INSERT INTO my_table (player_name, score, active) VALUES ('Kim', 7.0, FALSE);"
    );

    let values = to_json(&conversion.cleaned, JsonOrient::Values, 0)?;
    assert_eq!(values, r#"[["O'Neil",9.5,true],["Kim",7.0,false]]"#);
    Ok(())
}

#[test]
fn convert_file_on_disk() -> TestResult {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("people.xlsx");
    std::fs::write(&source, workbook_bytes()?)?;

    let mut workbook = Spreadsheet::open(&source)?;
    let sheet_names = workbook.sheet_names();
    let (sheet, table) = workbook.load(&Criteria::default())?;
    let config = ExportConfig {
        output_dir: dir.path().join("out"),
        ..ExportConfig::default()
    };
    let conversion = convert(&table, &Selection::Columns(vec!["Age".to_owned()]), &config)?;

    let stem = output_stem("people.xlsx", &sheet, sheet_names.len());
    assert_eq!(stem, "people_People");
    let files = write_outputs(&config.output_dir, &stem, &conversion)?;
    assert!(files.json.ends_with("out/people_People_cleaned.json"));
    assert!(files.sql.ends_with("out/people_People.sql"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&files.json)?)?;
    assert_eq!(
        json,
        serde_json::json!([
            {"Name": "Bob", "Age": "30"},
            {"Name": "Dave", "Age": "41"}
        ])
    );
    let sql = std::fs::read_to_string(&files.sql)?;
    assert_eq!(sql.lines().filter(|line| line.starts_with("INSERT")).count(), 2);
    Ok(())
}

use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sheetdate_core::{
    DateError, DateSystem, LocatorOptions, NormalizeOptions, Pipeline, PipelineOptions,
    SerialZone,
};
use sheetdate_sheet::{Book, CellValue, FileLoadOptions, Sheet};
use std::fs;
use tempfile::tempdir;

fn t(s: &str) -> CellValue {
    CellValue::text(s)
}

fn options() -> PipelineOptions {
    PipelineOptions::default().with_normalize(
        NormalizeOptions::default()
            .with_zone(SerialZone::Utc)
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
    )
}

fn pipeline() -> Pipeline {
    Pipeline::new(options()).unwrap()
}

fn single_sheet_book(name: &str, rows: Vec<Vec<CellValue>>) -> Book {
    let mut book = Book::new();
    book.add_sheet(name, Sheet::from_data(rows)).unwrap();
    book
}

// ===== End-to-End Scenarios =====

#[test]
fn test_user_details_scenario() {
    let book = single_sheet_book(
        "User Details",
        vec![
            vec![t("Report")],
            vec![t("Name"), t("Hire Date")],
            vec![t("Alice"), CellValue::Number(44197.0)],
            vec![t("Bob"), t("March 3, 2020")],
        ],
    );

    let processed = pipeline().run(&book).unwrap();

    assert_eq!(processed.sheet_name, "User Details");
    assert_eq!(processed.location.row_index, 1);
    assert_eq!(processed.table.headers, vec![t("Name"), t("Hire Date")]);
    assert_eq!(
        processed.table.rows,
        vec![
            vec![t("Alice"), t("01/01/2021")],
            vec![t("Bob"), t("03/03/2020")],
        ]
    );
    assert_eq!(processed.stats.converted(), 2);
}

#[test]
fn test_sheet_selected_among_many() {
    let mut book = Book::new();
    book.add_sheet("Summary", Sheet::from_data(vec![vec!["Date"], vec!["x"]]))
        .unwrap();
    book.add_sheet(
        "USER DETAILS",
        Sheet::from_data(vec![vec!["Joined Date"], vec!["2019-11-30"]]),
    )
    .unwrap();

    let processed = pipeline().run(&book).unwrap();
    assert_eq!(processed.sheet_name, "USER DETAILS");
    assert_eq!(processed.table.rows, vec![vec![t("11/30/2019")]]);
}

#[test]
fn test_missing_sheet() {
    let book = single_sheet_book("Sheet1", vec![vec![t("Date")]]);

    let err = pipeline().run(&book).unwrap_err();
    assert!(matches!(err, DateError::SheetNotFound { .. }));
    assert!(err.to_string().contains("Sheet1"));
}

#[test]
fn test_missing_header() {
    let book = single_sheet_book(
        "user details",
        vec![vec![t("Name"), t("Email")], vec![t("Alice"), t("a@x")]],
    );

    let err = pipeline().run(&book).unwrap_err();
    assert!(matches!(err, DateError::HeaderNotFound { .. }));
}

#[test]
fn test_empty_sheet_has_no_header() {
    let book = single_sheet_book("user details", vec![]);
    assert!(matches!(
        pipeline().run(&book),
        Err(DateError::HeaderNotFound { .. })
    ));
}

// ===== Invariants =====

#[test]
fn test_every_row_matches_header_width() {
    let book = single_sheet_book(
        "user details",
        vec![
            vec![t("Name"), t("Start Date"), t("End Date")],
            vec![t("A")],
            vec![t("B"), t("01-02-2020"), t("01-03-2020"), t("spill")],
            vec![],
            vec![CellValue::Empty, CellValue::Empty, CellValue::Number(44197.0)],
        ],
    );

    let processed = pipeline().run(&book).unwrap();
    let width = processed.table.width();

    assert_eq!(width, 3);
    assert!(processed.table.rows.iter().all(|row| row.len() == width));
    assert_eq!(
        processed.table.rows[3],
        vec![t(""), t(""), t("01/01/2021")]
    );
}

#[test]
fn test_running_twice_is_stable() {
    let rows = vec![
        vec![t("Name"), t("Date")],
        vec![t("A"), t("Tuesday, January 5, 2021")],
        vec![t("B"), CellValue::Number(43831.5)],
        vec![t("C"), t("whenever")],
    ];
    let p = pipeline();

    let first = p.run(&single_sheet_book("user details", rows)).unwrap();

    let mut again = vec![first.table.headers.clone()];
    again.extend(first.table.rows.iter().cloned());
    let second = p.run(&single_sheet_book("user details", again)).unwrap();

    assert_eq!(first.table, second.table);
    assert_eq!(
        first.table.rows,
        vec![
            vec![t("A"), t("01/05/2021")],
            vec![t("B"), t("01/01/2020")],
            vec![t("C"), t("whenever")],
        ]
    );
}

#[test]
fn test_1904_system() {
    let book = single_sheet_book(
        "user details",
        vec![vec![t("Date")], vec![CellValue::Number(0.0)]],
    );
    let options = options().with_normalize(
        NormalizeOptions::default()
            .with_zone(SerialZone::Utc)
            .with_date_system(DateSystem::Excel1904),
    );

    let processed = Pipeline::new(options).unwrap().run(&book).unwrap();
    assert_eq!(processed.table.rows, vec![vec![t("01/01/1904")]]);
}

// ===== File Inputs =====

#[test]
fn test_xlsx_file_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("User Details").unwrap();
    sheet.write_string(0, 0, "Staff list").unwrap();
    sheet.write_string(2, 0, "Name").unwrap();
    sheet.write_string(2, 1, "Hire Date").unwrap();
    sheet.write_string(2, 2, "Dept").unwrap();
    sheet.write_string(3, 0, "Alice").unwrap();
    sheet.write_number(3, 1, 44197.0).unwrap();
    sheet.write_string(3, 2, "Ops").unwrap();
    sheet.write_string(4, 0, "Bob").unwrap();
    sheet.write_string(4, 1, "2020-03-03").unwrap();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let hired = ExcelDateTime::from_ymd(2022, 7, 4).unwrap();
    sheet.write_string(5, 0, "Cy").unwrap();
    sheet
        .write_datetime_with_format(5, 1, &hired, &date_format)
        .unwrap();
    workbook.save(&path).unwrap();

    let book = Book::from_path(&path, &FileLoadOptions::default()).unwrap();
    let processed = pipeline().run(&book).unwrap();

    assert_eq!(processed.location.row_index, 2);
    assert_eq!(
        processed.table.headers,
        vec![t("Name"), t("Hire Date"), t("Dept")]
    );
    assert_eq!(
        processed.table.rows,
        vec![
            vec![t("Alice"), t("01/01/2021"), t("Ops")],
            vec![t("Bob"), t("03/03/2020"), t("")],
            vec![t("Cy"), t("07/04/2022"), t("")],
        ]
    );
}

#[test]
fn test_csv_file_named_user_details() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user details.csv");
    fs::write(
        &path,
        "Name,Birth date,Note\nAlice,12/25/1990,hi\nBob,25-12-1990\n",
    )
    .unwrap();

    let book = Book::from_path(&path, &FileLoadOptions::default()).unwrap();
    let processed = pipeline().run(&book).unwrap();

    assert_eq!(
        processed.table.rows,
        vec![
            vec![t("Alice"), t("12/25/1990"), t("hi")],
            vec![t("Bob"), t("12/25/1990"), t("")],
        ]
    );
}

#[test]
fn test_custom_keyword_over_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(&path, "Who,Joined\nAnn,2021-02-03\n").unwrap();

    let book = Book::from_path(&path, &FileLoadOptions::default()).unwrap();
    let options = options()
        .with_sheet_name("people")
        .with_locator(LocatorOptions::default().with_keyword("joined"));

    let processed = Pipeline::new(options).unwrap().run(&book).unwrap();
    assert_eq!(processed.table.rows, vec![vec![t("Ann"), t("02/03/2021")]]);
}

#[test]
fn test_processed_serializes() {
    let book = single_sheet_book(
        "user details",
        vec![vec![t("Name"), t("Date")], vec![t("A"), CellValue::Number(44197.0)]],
    );

    let processed = pipeline().run(&book).unwrap();
    let json = serde_json::to_value(&processed).unwrap();

    assert_eq!(json["sheet_name"], "user details");
    assert_eq!(json["location"]["row_index"], 0);
    assert_eq!(json["location"]["date_columns"], serde_json::json!([1]));
    assert_eq!(json["table"]["rows"][0][1], "01/01/2021");
    assert_eq!(json["stats"]["serial"], 1);
}

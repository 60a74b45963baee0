use chrono::NaiveDate;
use tourbook_core::{Entry, EntryValidationError};

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap()
}

fn full_entry() -> Entry {
    Entry::builder()
        .start_date(day(2023, 1, 15))
        .location("Lisbon")
        .guide("Ana")
        .first_name("Maria")
        .last_name("Silva")
        .build()
}

#[test]
fn display_orders_guide_location_names_then_date() {
    assert_eq!(
        full_entry().to_string(),
        "Ana | Lisbon | Maria | Silva | 2023-01-15"
    );
}

#[test]
fn accessors_return_built_values() {
    let entry = full_entry();
    assert_eq!(entry.start_date(), Some(day(2023, 1, 15)));
    assert_eq!(entry.location(), "Lisbon");
    assert_eq!(entry.guide(), "Ana");
    assert_eq!(entry.first_name(), "Maria");
    assert_eq!(entry.last_name(), "Silva");
}

#[test]
fn setter_order_does_not_matter() {
    let reordered = Entry::builder()
        .last_name("Silva")
        .first_name("Maria")
        .guide("Ana")
        .location("Lisbon")
        .start_date(day(2023, 1, 15))
        .build();
    assert_eq!(reordered, full_entry());
}

#[test]
fn duplicate_setter_keeps_last_value() {
    let entry = Entry::builder()
        .guide("Ana")
        .guide("Bo")
        .start_date(day(2020, 5, 1))
        .start_date(day(2021, 6, 2))
        .build();
    assert_eq!(entry.guide(), "Bo");
    assert_eq!(entry.start_date(), Some(day(2021, 6, 2)));
}

#[test]
fn build_accepts_incomplete_builder() {
    let entry = Entry::builder().guide("Ana").build();
    assert_eq!(entry.start_date(), None);
    assert_eq!(entry.location(), "");
    assert_eq!(entry.to_string(), "Ana |  |  |  | ");
}

#[test]
fn try_build_reports_first_missing_field() {
    let err = Entry::builder().guide("Ana").try_build().unwrap_err();
    assert_eq!(err, EntryValidationError::MissingField("start_date"));

    let err = Entry::builder()
        .start_date(day(2023, 1, 15))
        .location("Lisbon")
        .guide("Ana")
        .first_name("Maria")
        .try_build()
        .unwrap_err();
    assert_eq!(err, EntryValidationError::MissingField("last_name"));
    assert!(err.to_string().contains("last_name"));
}

#[test]
fn try_build_accepts_complete_builder() {
    let entry = Entry::builder()
        .start_date(day(2023, 1, 15))
        .location("Lisbon")
        .guide("Ana")
        .first_name("Maria")
        .last_name("Silva")
        .try_build()
        .unwrap();
    assert_eq!(entry, full_entry());
}

#[test]
fn entry_serializes_with_iso_date() {
    let json = serde_json::to_value(full_entry()).unwrap();
    assert_eq!(json["start_date"], "2023-01-15");
    assert_eq!(json["location"], "Lisbon");
    assert_eq!(json["guide"], "Ana");
    assert_eq!(json["first_name"], "Maria");
    assert_eq!(json["last_name"], "Silva");
}

//! Fixed reservation query shape.
//!
//! # Invariants
//! - Three tables joined implicitly, narrowed by two equality predicates
//!   and a strict less-than filter on the reservation start day.
//! - Column order matches the `*_INDEX` constants used for row mapping.
//! - Executed SQL binds the cutoff; only the logged text embeds it.

use chrono::NaiveDate;

pub const QUERY_FIELD_NAMES: [&str; 5] = [
    "guides.First",
    "locations.location",
    "reservation.First",
    "reservation.Last",
    "reservation.StartDay",
];
pub const QUERY_TABLE_NAMES: [&str; 3] = ["guides", "locations", "reservation"];
pub const QUERY_FILTERS: [&str; 3] = [
    "reservation.guide=guides.idguides",
    "reservation.location=locations.idlocations",
    "reservation.StartDay < ",
];

pub const GUIDE_INDEX: usize = 0;
pub const LOCATION_INDEX: usize = 1;
pub const FIRST_NAME_INDEX: usize = 2;
pub const LAST_NAME_INDEX: usize = 3;
pub const DAY_INDEX: usize = 4;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQL with a `?` placeholder for the cutoff date.
pub fn parameterized_query() -> String {
    format!("{}?", query_prefix())
}

/// Human-readable SQL with the cutoff embedded as a quoted ISO literal.
///
/// Only used for logging; never sent to the database.
pub fn query_text(cutoff: NaiveDate) -> String {
    format!("{}'{}'", query_prefix(), cutoff.format(DATE_FORMAT))
}

fn query_prefix() -> String {
    format!(
        "SELECT {} FROM {} WHERE {}",
        QUERY_FIELD_NAMES.join(","),
        QUERY_TABLE_NAMES.join(","),
        QUERY_FILTERS.join(" AND ")
    )
}

#[cfg(test)]
mod tests {
    use super::{parameterized_query, query_text};
    use chrono::NaiveDate;

    #[test]
    fn parameterized_query_ends_with_single_placeholder() {
        let sql = parameterized_query();
        assert!(sql.ends_with("reservation.StartDay < ?"));
        assert_eq!(sql.matches('?').count(), 1);
        assert!(!sql.contains('\''));
    }

    #[test]
    fn query_text_matches_parameterized_shape() {
        let cutoff = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let text = query_text(cutoff);
        assert_eq!(text.replace("'2024-06-01'", "?"), parameterized_query());
    }
}

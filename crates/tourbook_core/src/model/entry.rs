//! Reservation entry model.
//!
//! # Responsibility
//! - Define the immutable record produced for every reservation row.
//! - Provide the only construction path via `EntryBuilder`.
//!
//! # Invariants
//! - An `Entry` never changes after `build()`/`try_build()`.
//! - Duplicate setter calls on the builder keep the last value.

use chrono::NaiveDate;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One tour reservation: who guides, where, for whom, starting when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    start_date: Option<NaiveDate>,
    location: String,
    guide: String,
    first_name: String,
    last_name: String,
}

impl Entry {
    /// Starts an empty builder.
    pub fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    /// `None` only when the builder was finalized without a start date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn guide(&self) -> &str {
        &self.guide
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | ",
            self.guide, self.location, self.first_name, self.last_name
        )?;
        match self.start_date {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => Ok(()),
        }
    }
}

/// Validation failures raised by `EntryBuilder::try_build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    MissingField(&'static str),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "entry field `{field}` was never set"),
        }
    }
}

impl Error for EntryValidationError {}

/// Collects entry fields before producing an immutable `Entry`.
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    start_date: Option<NaiveDate>,
    location: Option<String>,
    guide: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl EntryBuilder {
    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn guide(mut self, guide: impl Into<String>) -> Self {
        self.guide = Some(guide.into());
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Finalizes without checking which fields were set.
    ///
    /// Unset text fields become empty strings; an unset date stays `None`.
    pub fn build(self) -> Entry {
        Entry {
            start_date: self.start_date,
            location: self.location.unwrap_or_default(),
            guide: self.guide.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
        }
    }

    /// Finalizes only when all five fields were set.
    ///
    /// # Errors
    /// - Returns `MissingField` naming the first unset field.
    pub fn try_build(self) -> Result<Entry, EntryValidationError> {
        if self.start_date.is_none() {
            return Err(EntryValidationError::MissingField("start_date"));
        }
        if self.location.is_none() {
            return Err(EntryValidationError::MissingField("location"));
        }
        if self.guide.is_none() {
            return Err(EntryValidationError::MissingField("guide"));
        }
        if self.first_name.is_none() {
            return Err(EntryValidationError::MissingField("first_name"));
        }
        if self.last_name.is_none() {
            return Err(EntryValidationError::MissingField("last_name"));
        }
        Ok(self.build())
    }
}

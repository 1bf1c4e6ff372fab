//! Data types for the SIGAA scraper
//!
//! This module contains the core data structures shared between the
//! decoders, the HTML parsers and the entity assembly layer. All types
//! implement Serialize and Deserialize; the schedule types serialize
//! with camelCase keys to match the NGSI payloads the portal data feeds.

use serde::{Deserialize, Serialize};

/// One decoded weekly meeting of a course section.
///
/// Produced by [`crate::parser::expand_schedule`], one entry per
/// (block, day digit) combination in the raw scheduling code.
/// `start_period`/`end_period` are either both set to `YYYY-MM-DD`
/// dates or both empty when the segment carried no valid date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Weekday name, or `"Unknown"` for an unrecognized day digit
    pub day: String,
    /// Wall-clock start, `HH:MM`
    pub start_time: String,
    /// Wall-clock end, `HH:MM`
    pub end_time: String,
    /// First day the weekly pattern is in effect, `YYYY-MM-DD` or empty
    pub start_period: String,
    /// Last day the weekly pattern is in effect, `YYYY-MM-DD` or empty
    pub end_period: String,
}

/// A validity date range found in a raw scheduling string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    /// Range start, `YYYY-MM-DD`
    pub start_date: String,
    /// Range end, `YYYY-MM-DD`
    pub end_date: String,
}

/// One course-section row scraped from the portal's result table.
///
/// Fields hold the raw cell text; the `schedule_text` and
/// `instructor_raw` cells are decoded later by [`crate::parser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSection {
    /// Full name of the academic unit the search was scoped to
    pub academic_unit: String,
    /// Course code from the section's header row (e.g., "PPGA001")
    pub course_code: String,
    /// Course name from the section's header row
    pub course_name: String,
    /// Course level from the section's header row (e.g., "MESTRADO")
    pub course_level: String,
    /// Internal section id extracted from the detail-panel link, if any
    pub section_id: Option<String>,
    /// Academic period (e.g., "2025.1")
    pub period: String,
    /// Section group label (e.g., "Turma 01")
    pub class_group: String,
    /// Raw instructor cell, including workload markers such as "(60h)"
    pub instructor_raw: String,
    /// Section type cell
    pub section_type: String,
    /// Teaching modality cell
    pub modality: String,
    /// Section status cell
    pub status: String,
    /// Raw scheduling code cell (e.g., "7M2345 (09/05/2025 - 31/05/2025)")
    pub schedule_text: String,
    /// Room/location cell
    pub location: String,
    /// Syllabus/content cell
    pub content: String,
    /// Enrolled students, when the enrollment cell matched `<n>/<m>`
    pub enrollments: Option<u32>,
    /// Section capacity, when the enrollment cell matched `<n>/<m>`
    pub capacity: Option<u32>,
}

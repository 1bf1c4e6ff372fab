//! Parsers for SIGAA pages and fields
//!
//! This module contains the decoders for the portal's loosely
//! structured text fields and the HTML parsers for its pages:
//! - `schedule`: decode scheduling codes and validity date ranges
//! - `instructor`: decode instructor-name lists and workload hours
//! - `sections`: parse the section-search results table
//! - `forms`: JSF view-state and form plumbing

pub mod forms;
pub mod instructor;
pub mod schedule;
pub mod sections;

// Re-export main parsing functions
pub use forms::{extract_login_error, extract_view_state, find_bond_link, find_unit_option};
pub use instructor::{parse_instructors, parse_workload, remove_workload};
pub use schedule::{expand_schedule, extract_periods, slot_time, weekday_name};
pub use sections::parse_course_sections;

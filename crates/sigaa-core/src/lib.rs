//! SIGAA Scraper Core Library
//!
//! This crate provides the core scraping functionality for SIGAA, the
//! academic management portal of UFRN (Universidade Federal do Rio
//! Grande do Norte).
//!
//! # Features
//! - Decode compact scheduling codes such as `7M2345 6T2345 (09/05/2025 - 31/05/2025)`
//!   into structured weekday/time/period entries
//! - Parse instructor lists and workload hours from raw instructor cells
//! - Scrape course-section tables for a chosen academic unit
//! - Assemble NGSI-v2 course-instance entities from scraped rows
//! - Rate-limited, cookie-aware HTTP client for the portal session

pub mod client;
pub mod entity;
pub mod error;
pub mod parser;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, Credentials, RateLimiter, SigaaClient};
pub use entity::{build_course_instance, AcademicUnit, CourseInstance, ACADEMIC_UNITS};
pub use error::{Result, SigaaError};
pub use parser::{expand_schedule, extract_periods, parse_instructors, parse_workload};
pub use scraper::SigaaScraper;
pub use types::{CourseSection, PeriodRange, ScheduleEntry};

//! Course-section table parser for SIGAA
//!
//! Parses HTML from the section-search results page. The portal renders
//! one table (`#lista-turmas`) where header rows (class `destaque`)
//! introduce a course and the zebra rows below them (`linhaPar` /
//! `linhaImpar`) hold that course's sections.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, SigaaError};
use crate::types::CourseSection;

/// Course identification carried from a header row down to its rows.
struct CourseHeader {
    code: String,
    name: String,
    level: String,
}

/// Parse the section-search results table into course sections.
///
/// Rows that precede any course header, or that have fewer cells than
/// the table layout requires, are skipped.
///
/// # Arguments
/// * `html` - Raw HTML content of the results page
/// * `unit_name` - Academic unit the search was scoped to, copied into
///   every section
///
/// # Returns
/// * `Ok(Vec<CourseSection>)` with the parsed sections
/// * `Err(SigaaError)` if a selector cannot be built
pub fn parse_course_sections(html: &str, unit_name: &str) -> Result<Vec<CourseSection>> {
    let document = Html::parse_document(html);

    let row_selector = Selector::parse("table#lista-turmas tr")
        .map_err(|e| SigaaError::ParseError(format!("invalid selector: {:?}", e)))?;
    let cell_selector = Selector::parse("td")
        .map_err(|e| SigaaError::ParseError(format!("invalid selector: {:?}", e)))?;
    let link_selector = Selector::parse("a")
        .map_err(|e| SigaaError::ParseError(format!("invalid selector: {:?}", e)))?;

    let mut sections = Vec::new();
    let mut current: Option<CourseHeader> = None;

    for row in document.select(&row_selector) {
        if row.value().classes().any(|c| c == "destaque") {
            current = parse_course_header(&row);
        } else if row
            .value()
            .classes()
            .any(|c| c == "linhaPar" || c == "linhaImpar")
        {
            if let Some(header) = &current {
                match parse_section_row(&row, header, unit_name, &cell_selector, &link_selector) {
                    Some(section) => sections.push(section),
                    None => tracing::debug!("skipping malformed section row"),
                }
            }
        }
    }

    Ok(sections)
}

/// Parse a `CODE - NAME (LEVEL)` header row.
fn parse_course_header(row: &ElementRef) -> Option<CourseHeader> {
    let text = row.text().collect::<String>().trim().to_string();
    let re = regex_lite::Regex::new(r"(?i)^([A-Z0-9]+)\s*-\s*(.+?)\s*\((.+)\)").ok()?;
    let caps = re.captures(&text)?;

    Some(CourseHeader {
        code: caps.get(1)?.as_str().to_string(),
        name: caps.get(2)?.as_str().trim_end().to_string(),
        level: caps.get(3)?.as_str().replacen(')', "", 1),
    })
}

/// Parse one zebra row into a section, `None` when the row is short.
fn parse_section_row(
    row: &ElementRef,
    header: &CourseHeader,
    unit_name: &str,
    cell_selector: &Selector,
    link_selector: &Selector,
) -> Option<CourseSection> {
    let cells: Vec<ElementRef> = row.select(cell_selector).collect();
    if cells.len() < 11 {
        return None;
    }

    let cell_text =
        |index: usize| cells[index].text().collect::<String>().trim().to_string();

    // The group cell links to the section detail panel; its onclick
    // carries the internal section id.
    let link = cells[1].select(link_selector).next();
    let section_id = link
        .and_then(|a| a.value().attr("onclick"))
        .and_then(extract_section_id);
    let class_group = link
        .map(|a| a.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let (enrollments, capacity) = parse_enrollment(&cell_text(9));

    Some(CourseSection {
        academic_unit: unit_name.to_string(),
        course_code: header.code.clone(),
        course_name: header.name.clone(),
        course_level: header.level.clone(),
        section_id,
        period: cell_text(0),
        class_group,
        instructor_raw: cell_text(2),
        section_type: cell_text(3),
        modality: cell_text(4),
        status: cell_text(5),
        schedule_text: cell_text(6),
        location: cell_text(7),
        content: cell_text(8),
        enrollments,
        capacity,
    })
}

/// Extract the section id from a `PainelTurma.show(<id>)` onclick.
fn extract_section_id(onclick: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"PainelTurma\.show\((\d+)\)").ok()?;
    Some(re.captures(onclick)?.get(1)?.as_str().to_string())
}

/// Parse an `<enrolled>/<capacity>` cell.
fn parse_enrollment(text: &str) -> (Option<u32>, Option<u32>) {
    if let Ok(re) = regex_lite::Regex::new(r"(\d+)/(\d+)") {
        if let Some(caps) = re.captures(text) {
            let enrolled = caps.get(1).and_then(|m| m.as_str().parse().ok());
            let capacity = caps.get(2).and_then(|m| m.as_str().parse().ok());
            return (enrolled, capacity);
        }
    }
    (None, None)
}

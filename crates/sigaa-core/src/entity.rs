//! NGSI course-instance entity assembly
//!
//! Wraps scraped course sections into NGSI-v2 entities: every field
//! becomes a typed-attribute envelope (`{"type": ..., "value": ...}`)
//! and the raw schedule/instructor cells are decoded into structured
//! values on the way in. The entities feed a FIWARE context broker
//! downstream.

use serde::{Deserialize, Serialize};

use crate::parser::{expand_schedule, extract_periods, parse_instructors, parse_workload};
use crate::types::{CourseSection, PeriodRange, ScheduleEntry};

/// An academic unit the scraper knows how to locate on campus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcademicUnit {
    /// Full unit name as rendered in the portal's unit select
    pub name: &'static str,
    /// Short name used in entity file names
    pub short_name: &'static str,
    /// Campus longitude
    pub longitude: f64,
    /// Campus latitude
    pub latitude: f64,
}

/// The graduate programs covered by the scraper, with the coordinates
/// of their home buildings.
pub const ACADEMIC_UNITS: [AcademicUnit; 4] = [
    AcademicUnit {
        name: "PROGRAMA DE PÓS-GRADUAÇÃO EM ADMINISTRAÇÃO",
        short_name: "PPGA",
        longitude: -35.19753457434268,
        latitude: -5.838500531710352,
    },
    AcademicUnit {
        name: "PROGRAMA DE PÓS-GRADUAÇÃO EM TECNOLOGIA DA INFORMAÇÃO",
        short_name: "PPGTI",
        longitude: -35.20545452790071,
        latitude: -5.832295943261201,
    },
    AcademicUnit {
        name: "PROGRAMA DE PÓS-GRADUAÇÃO EM CIÊNCIA, TECNOLOGIA E INOVAÇÃO",
        short_name: "PPGCTI",
        longitude: -35.1993544215201,
        latitude: -5.841514491832527,
    },
    AcademicUnit {
        name: "PROGRAMA DE PÓS-GRADUAÇÃO EM MATEMÁTICA APLICADA E ESTATÍSTICA",
        short_name: "PPGMAE",
        longitude: -35.20039259969485,
        latitude: -5.8411645284666065,
    },
];

/// Find a configured academic unit by full name.
pub fn find_academic_unit(name: &str) -> Option<&'static AcademicUnit> {
    ACADEMIC_UNITS.iter().find(|unit| unit.name == name)
}

/// NGSI typed-attribute envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute<T> {
    /// NGSI type discriminator ("Text", "Number", "StructuredValue", ...)
    #[serde(rename = "type")]
    pub attribute_type: String,
    /// Attribute payload
    pub value: T,
}

impl Attribute<String> {
    /// A `Text` attribute.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            attribute_type: "Text".to_string(),
            value: value.into(),
        }
    }

    /// A `Relationship` attribute pointing at another entity.
    pub fn relationship(target: impl Into<String>) -> Self {
        Self {
            attribute_type: "Relationship".to_string(),
            value: target.into(),
        }
    }
}

impl Attribute<Option<String>> {
    /// A `Text` attribute whose value may be null.
    pub fn optional_text(value: Option<String>) -> Self {
        Self {
            attribute_type: "Text".to_string(),
            value,
        }
    }
}

impl Attribute<Option<u32>> {
    /// A `Number` attribute whose value may be null.
    pub fn number(value: Option<u32>) -> Self {
        Self {
            attribute_type: "Number".to_string(),
            value,
        }
    }
}

impl<T> Attribute<T> {
    /// A `StructuredValue` attribute wrapping a decoded structure.
    pub fn structured(value: T) -> Self {
        Self {
            attribute_type: "StructuredValue".to_string(),
            value,
        }
    }
}

/// One instructor reference inside the instructors attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorRef {
    /// Instructor name as scraped
    pub name: String,
}

/// Workload attribute with its NGSI unit-code metadata (HUR = hours).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadAttribute {
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub value: u32,
    pub metadata: WorkloadMetadata,
}

/// Metadata object of the workload attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadMetadata {
    pub unit_code: Attribute<String>,
}

impl WorkloadAttribute {
    /// A workload of `value` hours.
    pub fn hours(value: u32) -> Self {
        Self {
            attribute_type: "Number".to_string(),
            value,
            metadata: WorkloadMetadata {
                unit_code: Attribute {
                    attribute_type: "Text".to_string(),
                    value: "HUR".to_string(),
                },
            },
        }
    }
}

/// GeoJSON location attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAttribute {
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub value: GeoPoint,
}

/// GeoJSON point payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub point_type: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl GeoAttribute {
    /// A `geo:json` point at the given coordinates.
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            attribute_type: "geo:json".to_string(),
            value: GeoPoint {
                point_type: "Point".to_string(),
                coordinates: [longitude, latitude],
            },
        }
    }
}

/// NGSI course-instance entity, one per scraped section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub ref_organization: Attribute<String>,
    pub academic_unit: Attribute<String>,
    pub course_code: Attribute<String>,
    pub course_name: Attribute<String>,
    pub course_level: Attribute<String>,
    pub section_id: Attribute<Option<String>>,
    pub period: Attribute<String>,
    pub class_group: Attribute<String>,
    pub course_type: Attribute<String>,
    pub modality: Attribute<String>,
    pub status: Attribute<String>,
    pub schedule_text: Attribute<String>,
    pub location_text: Attribute<String>,
    pub content: Attribute<String>,
    pub enrollments: Attribute<Option<u32>>,
    pub capacity: Attribute<Option<u32>>,
    pub class_schedule: Attribute<Vec<ScheduleEntry>>,
    pub class_period: Attribute<Vec<PeriodRange>>,
    pub instructors: Attribute<Vec<InstructorRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<WorkloadAttribute>,
    pub location: GeoAttribute,
}

/// Assemble a scraped section into a course-instance entity.
///
/// Decodes the raw schedule and instructor cells on the way in; the
/// workload attribute is omitted entirely when the instructor cell
/// carries no trailing hour marker.
pub fn build_course_instance(section: &CourseSection, unit: &AcademicUnit) -> CourseInstance {
    let instructors = parse_instructors(&section.instructor_raw)
        .into_iter()
        .map(|name| InstructorRef { name })
        .collect();

    CourseInstance {
        id: format!(
            "CourseInstance:UFRN:{}:{}",
            section.course_code, section.period
        ),
        entity_type: "CourseInstance".to_string(),
        ref_organization: Attribute::relationship("Organization-UFRN"),
        academic_unit: Attribute::text(&section.academic_unit),
        course_code: Attribute::text(&section.course_code),
        course_name: Attribute::text(&section.course_name),
        course_level: Attribute::text(&section.course_level),
        section_id: Attribute::optional_text(section.section_id.clone()),
        period: Attribute::text(&section.period),
        class_group: Attribute::text(&section.class_group),
        course_type: Attribute::text(&section.section_type),
        modality: Attribute::text(&section.modality),
        status: Attribute::text(&section.status),
        schedule_text: Attribute::text(clean_schedule_text(&section.schedule_text)),
        location_text: Attribute::text(&section.location),
        content: Attribute::text(&section.content),
        enrollments: Attribute::number(section.enrollments),
        capacity: Attribute::number(section.capacity),
        class_schedule: Attribute::structured(expand_schedule(&section.schedule_text)),
        class_period: Attribute::structured(extract_periods(&section.schedule_text)),
        instructors: Attribute::structured(instructors),
        workload: parse_workload(&section.instructor_raw).map(WorkloadAttribute::hours),
        location: GeoAttribute::point(unit.longitude, unit.latitude),
    }
}

/// Strip characters outside `[\w\s.,:;-]` from a raw schedule cell
/// before embedding it as plain text.
fn clean_schedule_text(raw: &str) -> String {
    match regex_lite::Regex::new(r"[^\w\s.,:;-]") {
        Ok(re) => re.replace_all(raw, "").into_owned(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_section() -> CourseSection {
        CourseSection {
            academic_unit: "PROGRAMA DE PÓS-GRADUAÇÃO EM ADMINISTRAÇÃO".to_string(),
            course_code: "PPGA001".to_string(),
            course_name: "TEORIA DAS ORGANIZAÇÕES".to_string(),
            course_level: "MESTRADO".to_string(),
            section_id: Some("57123456".to_string()),
            period: "2025.1".to_string(),
            class_group: "Turma 01".to_string(),
            instructor_raw: "JANAYNNA DE MOURA FERRAZ (50h)".to_string(),
            section_type: "REGULAR".to_string(),
            modality: "Presencial".to_string(),
            status: "ABERTA".to_string(),
            schedule_text: "7M2345 6T2345 (09/05/2025 - 31/05/2025)".to_string(),
            location: "Sala 12".to_string(),
            content: "Ementa".to_string(),
            enrollments: Some(18),
            capacity: Some(25),
        }
    }

    fn test_unit() -> &'static AcademicUnit {
        find_academic_unit("PROGRAMA DE PÓS-GRADUAÇÃO EM ADMINISTRAÇÃO").unwrap()
    }

    #[test]
    fn test_entity_id_and_type() {
        let entity = build_course_instance(&test_section(), test_unit());
        assert_eq!(entity.id, "CourseInstance:UFRN:PPGA001:2025.1");
        assert_eq!(entity.entity_type, "CourseInstance");
    }

    #[test]
    fn test_entity_attribute_envelopes() {
        let entity = build_course_instance(&test_section(), test_unit());
        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(json["courseCode"]["type"], "Text");
        assert_eq!(json["courseCode"]["value"], "PPGA001");
        assert_eq!(json["refOrganization"]["type"], "Relationship");
        assert_eq!(json["refOrganization"]["value"], "Organization-UFRN");
        assert_eq!(json["enrollments"]["type"], "Number");
        assert_eq!(json["enrollments"]["value"], 18);
        assert_eq!(json["sectionId"]["value"], "57123456");
        assert_eq!(json["classSchedule"]["type"], "StructuredValue");
        assert_eq!(json["classPeriod"]["type"], "StructuredValue");
        assert_eq!(json["instructors"]["type"], "StructuredValue");
    }

    #[test]
    fn test_entity_decodes_schedule_and_periods() {
        let entity = build_course_instance(&test_section(), test_unit());

        let schedule = &entity.class_schedule.value;
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].day, "Saturday");
        assert_eq!(schedule[1].day, "Friday");

        let periods = &entity.class_period.value;
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].start_date, "2025-05-09");
        assert_eq!(periods[0].end_date, "2025-05-31");
    }

    #[test]
    fn test_entity_instructors_and_workload() {
        let entity = build_course_instance(&test_section(), test_unit());

        assert_eq!(entity.instructors.value.len(), 1);
        assert_eq!(entity.instructors.value[0].name, "JANAYNNA DE MOURA FERRAZ");

        let workload = entity.workload.expect("workload present");
        assert_eq!(workload.value, 50);
        let json = serde_json::to_value(&workload).unwrap();
        assert_eq!(json["metadata"]["unitCode"]["value"], "HUR");
    }

    #[test]
    fn test_entity_workload_omitted_when_absent() {
        let mut section = test_section();
        section.instructor_raw = "GUSTAVO GIRAO BARRETO DA SILVA".to_string();

        let entity = build_course_instance(&section, test_unit());
        assert!(entity.workload.is_none());

        let json = serde_json::to_value(&entity).unwrap();
        assert!(json.get("workload").is_none());
    }

    #[test]
    fn test_entity_null_number_values() {
        let mut section = test_section();
        section.enrollments = None;
        section.capacity = None;
        section.section_id = None;

        let entity = build_course_instance(&section, test_unit());
        let json = serde_json::to_value(&entity).unwrap();
        assert!(json["enrollments"]["value"].is_null());
        assert!(json["capacity"]["value"].is_null());
        assert!(json["sectionId"]["value"].is_null());
    }

    #[test]
    fn test_entity_location() {
        let entity = build_course_instance(&test_section(), test_unit());
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["location"]["type"], "geo:json");
        assert_eq!(json["location"]["value"]["type"], "Point");
        assert_eq!(
            json["location"]["value"]["coordinates"][0],
            -35.19753457434268
        );
    }

    #[test]
    fn test_clean_schedule_text() {
        assert_eq!(
            clean_schedule_text("7M2345 (09/05/2025 - 31/05/2025)"),
            "7M2345 09052025 - 31052025"
        );
        assert_eq!(clean_schedule_text("6M456"), "6M456");
    }

    #[test]
    fn test_find_academic_unit() {
        assert!(find_academic_unit("PROGRAMA DE PÓS-GRADUAÇÃO EM ADMINISTRAÇÃO").is_some());
        assert!(find_academic_unit("UNIDADE INEXISTENTE").is_none());
    }
}

//! Instructor-cell decoders for SIGAA
//!
//! The portal's instructor cell mixes a name list with an optional
//! workload marker, e.g. `"ANTONIO BATISTA e MIGUEL ANEZ (15h)"`. Names
//! are separated by commas, periods, or the Portuguese conjunction "e".
//! Like the schedule decoder, these functions never fail; unparseable
//! input just yields `None` or an empty list.

/// Extract the workload hours from a trailing `(<digits>h)` marker.
///
/// Only a marker anchored at the end of the string counts; an embedded
/// one is ignored.
///
/// # Examples
/// ```
/// use sigaa_core::parser::parse_workload;
///
/// assert_eq!(parse_workload("JANAYNNA DE MOURA FERRAZ (50h)"), Some(50));
/// assert_eq!(parse_workload("GUSTAVO GIRAO BARRETO DA SILVA"), None);
/// ```
pub fn parse_workload(raw: &str) -> Option<u32> {
    let re = regex_lite::Regex::new(r"(?i)\((\d+)\s*h\)\s*$").ok()?;
    let caps = re.captures(raw)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Strip a trailing workload marker, leaving the name list.
pub fn remove_workload(raw: &str) -> String {
    match regex_lite::Regex::new(r"(?i)\s*\(\d+\s*h\)\s*$") {
        Ok(re) => re.replace(raw, "").trim().to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// Split a raw instructor cell into its ordered list of names.
///
/// Every `(<digits>h)` occurrence is removed first (not just a trailing
/// one), then the remainder splits on commas, periods, or a standalone
/// "e" surrounded by whitespace. Order and duplicates are preserved.
///
/// # Examples
/// ```
/// use sigaa_core::parser::parse_instructors;
///
/// let names = parse_instructors("ANTONIO BATISTA e MIGUEL ANEZ (15h)");
/// assert_eq!(names, vec!["ANTONIO BATISTA", "MIGUEL ANEZ"]);
/// ```
pub fn parse_instructors(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = match regex_lite::Regex::new(r"(?i)\s*\(\d+\s*h\)\s*") {
        Ok(re) => re.replace_all(raw, " ").into_owned(),
        Err(_) => raw.to_string(),
    };

    match regex_lite::Regex::new(r"\s*(?:,|\.|\se\s)\s*") {
        Ok(re) => re
            .split(&cleaned)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workload_trailing() {
        assert_eq!(
            parse_workload("ANTONIO BATISTA DA SILVA OLIVEIRA e MIGUEL EDUARDO MORENO ANEZ (15h)"),
            Some(15)
        );
        assert_eq!(parse_workload("JANAYNNA DE MOURA FERRAZ (50h)"), Some(50));
        assert_eq!(parse_workload("GUSTAVO GIRAO BARRETO DA SILVA (30h)"), Some(30));
    }

    #[test]
    fn test_parse_workload_absent() {
        assert_eq!(parse_workload("GUSTAVO GIRAO BARRETO DA SILVA"), None);
        assert_eq!(parse_workload(""), None);
    }

    #[test]
    fn test_parse_workload_embedded_does_not_count() {
        assert_eq!(
            parse_workload("ANTONIO BATISTA (15h) e MIGUEL ANEZ"),
            None
        );
    }

    #[test]
    fn test_parse_workload_case_and_spacing() {
        assert_eq!(parse_workload("FULANO DE TAL (45H)"), Some(45));
        assert_eq!(parse_workload("FULANO DE TAL (45 h)"), Some(45));
        assert_eq!(parse_workload("FULANO DE TAL (45h)  "), Some(45));
    }

    #[test]
    fn test_remove_workload() {
        assert_eq!(
            remove_workload("JANAYNNA DE MOURA FERRAZ (50h)"),
            "JANAYNNA DE MOURA FERRAZ"
        );
        assert_eq!(
            remove_workload("GUSTAVO GIRAO BARRETO DA SILVA"),
            "GUSTAVO GIRAO BARRETO DA SILVA"
        );
    }

    #[test]
    fn test_parse_instructors_conjunction_and_trailing_workload() {
        let names = parse_instructors(
            "ANTONIO BATISTA DA SILVA OLIVEIRA e MIGUEL EDUARDO MORENO ANEZ (15h)",
        );
        assert_eq!(
            names,
            vec![
                "ANTONIO BATISTA DA SILVA OLIVEIRA",
                "MIGUEL EDUARDO MORENO ANEZ",
            ]
        );
    }

    #[test]
    fn test_parse_instructors_embedded_workload() {
        let names = parse_instructors(
            "ANTONIO BATISTA DA SILVA OLIVEIRA (15h) e MIGUEL EDUARDO MORENO ANEZ",
        );
        assert_eq!(
            names,
            vec![
                "ANTONIO BATISTA DA SILVA OLIVEIRA",
                "MIGUEL EDUARDO MORENO ANEZ",
            ]
        );
    }

    #[test]
    fn test_parse_instructors_single() {
        assert_eq!(
            parse_instructors("JANAYNNA DE MOURA FERRAZ (50h)"),
            vec!["JANAYNNA DE MOURA FERRAZ"]
        );
        assert_eq!(
            parse_instructors("GUSTAVO GIRAO BARRETO DA SILVA (30h)"),
            vec!["GUSTAVO GIRAO BARRETO DA SILVA"]
        );
    }

    #[test]
    fn test_parse_instructors_comma_and_period_separators() {
        assert_eq!(
            parse_instructors("MARIA SILVA, JOAO SOUZA. PEDRO LIMA"),
            vec!["MARIA SILVA", "JOAO SOUZA", "PEDRO LIMA"]
        );
    }

    #[test]
    fn test_parse_instructors_does_not_split_inside_words() {
        // "DE" and names containing the letter e must survive intact.
        assert_eq!(
            parse_instructors("BERNADETE DE LOURDES"),
            vec!["BERNADETE DE LOURDES"]
        );
    }

    #[test]
    fn test_parse_instructors_empty() {
        assert!(parse_instructors("").is_empty());
        assert!(parse_instructors("   ").is_empty());
        assert!(parse_instructors("(30h)").is_empty());
    }
}

//! Live run against the real portal: log in, scrape one academic unit
//! and print its sections with decoded schedules.
//!
//! Needs SIGAA_USERNAME, SIGAA_PASSWORD and SIGAA_MATRICULA set.

use sigaa_core::{expand_schedule, Credentials, SigaaScraper, ACADEMIC_UNITS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::from_env()?;
    let scraper = SigaaScraper::new(credentials)?;

    println!("Logging in...");
    scraper.login().await?;

    let unit = &ACADEMIC_UNITS[0];
    println!("Scraping {} ({})\n", unit.name, unit.short_name);

    let sections = scraper.fetch_sections(unit.name).await?;
    println!("Found {} sections:", sections.len());

    for section in &sections {
        println!(
            "  {} {} - {} [{}]",
            section.period, section.course_code, section.course_name, section.class_group
        );
        for entry in expand_schedule(&section.schedule_text) {
            println!(
                "      {} {}-{} [{} .. {}]",
                entry.day, entry.start_time, entry.end_time, entry.start_period, entry.end_period
            );
        }
    }

    Ok(())
}

//! Command-line scraper for SIGAA course sections.
//!
//! Logs in with the credentials from the environment (or a `.env`
//! file), scrapes every configured academic unit and writes one NGSI
//! entity JSON file per course section.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sigaa_core::{CourseInstance, Credentials, SigaaScraper, ACADEMIC_UNITS};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "sigaa-scraper",
    about = "Scrape SIGAA course sections into NGSI course-instance entities",
    version
)]
struct Cli {
    /// Directory where entity JSON files are written
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Only scrape academic units whose name contains this substring
    #[arg(long)]
    unit: Option<String>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // The portal requires all three credentials; bail out before any
    // network traffic when one is missing.
    let credentials = Credentials::from_env()?;

    let scraper = SigaaScraper::new(credentials)?;
    scraper.login().await.context("login to SIGAA failed")?;

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;

    let units = ACADEMIC_UNITS.iter().filter(|unit| {
        cli.unit
            .as_deref()
            .map(|needle| unit.name.contains(needle))
            .unwrap_or(true)
    });

    let mut written = 0usize;
    for unit in units {
        tracing::info!("scraping academic unit: {}", unit.name);
        let instances = scraper
            .fetch_course_instances(unit)
            .await
            .with_context(|| format!("scraping {}", unit.short_name))?;

        for instance in &instances {
            let file_name = entity_file_name(unit.short_name, instance);
            let path = cli.output_dir.join(&file_name);
            let json = serde_json::to_string_pretty(instance)?;
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            written += 1;
        }
        tracing::info!("wrote {} entities for {}", instances.len(), unit.short_name);
    }

    tracing::info!("done, {} entity files in {}", written, cli.output_dir.display());
    Ok(())
}

/// File name for one entity: unit short name, course code, and the
/// academic period with dots and whitespace collapsed to dashes.
fn entity_file_name(unit_short_name: &str, instance: &CourseInstance) -> String {
    let period = instance
        .period
        .value
        .replace('.', "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    format!(
        "course-instance-ufrn-{}-{}-{}.json",
        unit_short_name, instance.course_code.value, period
    )
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();
}

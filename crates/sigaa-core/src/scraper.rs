//! Main SIGAA scraper API
//!
//! This module provides the high-level API for scraping course sections
//! from the portal. It combines the session client with the page
//! parsers: log in once, then fetch the section-search results for each
//! academic unit of interest.

use crate::client::{Credentials, SigaaClient};
use crate::entity::{build_course_instance, AcademicUnit, CourseInstance};
use crate::error::{Result, SigaaError};
use crate::parser::{
    extract_login_error, extract_view_state, find_bond_link, find_unit_option,
    parse_course_sections,
};
use crate::types::CourseSection;

/// Login form landing page; fetching it starts the JSF session.
const LOGIN_PAGE_PATH: &str = "/sigaa/verTelaLogin.do";

/// Login form action.
const LOGIN_PATH: &str = "/sigaa/logar.do?dispatch=logOn";

/// Section-search form under "Ensino > Consultas Gerais > Consultar Turma".
const SECTION_SEARCH_PATH: &str = "/sigaa/ensino/consulta/busca_turma.jsf";

/// High-level scraper for SIGAA course sections
///
/// All operations are asynchronous. [`SigaaScraper::login`] must
/// succeed before the search methods are used; credentials are
/// validated at construction time, before any network traffic.
///
/// # Example
/// ```no_run
/// use sigaa_core::{Credentials, SigaaScraper};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Credentials::from_env()?;
///     let scraper = SigaaScraper::new(credentials)?;
///     scraper.login().await?;
///
///     let sections = scraper
///         .fetch_sections("PROGRAMA DE PÓS-GRADUAÇÃO EM ADMINISTRAÇÃO")
///         .await?;
///     println!("Found {} sections", sections.len());
///
///     Ok(())
/// }
/// ```
pub struct SigaaScraper {
    client: SigaaClient,
    credentials: Credentials,
}

impl SigaaScraper {
    /// Create a new scraper with default client configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = SigaaClient::new()?;
        Ok(Self {
            client,
            credentials,
        })
    }

    /// Create a new scraper with a custom client.
    ///
    /// This is useful for testing or when you need custom client
    /// configuration.
    pub fn with_client(client: SigaaClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Log in to the portal and select the configured bond.
    ///
    /// # Errors
    /// - `SigaaError::LoginFailed` if the portal rejects the form
    /// - `SigaaError::HttpError` on network failures
    pub async fn login(&self) -> Result<()> {
        self.client.get(LOGIN_PAGE_PATH).await?;

        let form = vec![
            ("user.login".to_string(), self.credentials.username.clone()),
            ("user.senha".to_string(), self.credentials.password.clone()),
        ];
        let body = self.client.post_form(LOGIN_PATH, &form).await?;

        if let Some(message) = extract_login_error(&body) {
            return Err(SigaaError::LoginFailed(message));
        }

        // Accounts with more than one active bond land on a selection
        // page; follow the link matching the configured registration.
        if let Some(href) = find_bond_link(&body, &self.credentials.registration) {
            self.client.get(&href).await?;
        }

        tracing::info!("logged in to SIGAA as {}", self.credentials.username);
        Ok(())
    }

    /// Fetch every course section of an academic unit.
    ///
    /// Loads the section-search form, replays it with the unit filter
    /// checked, and parses the results table.
    ///
    /// # Errors
    /// - `SigaaError::ElementNotFound` when the form's view state or
    ///   the unit's select option cannot be located
    /// - `SigaaError::HttpError` on network failures
    pub async fn fetch_sections(&self, unit_name: &str) -> Result<Vec<CourseSection>> {
        let search_page = self.client.get(SECTION_SEARCH_PATH).await?;

        let view_state = extract_view_state(&search_page)
            .ok_or_else(|| SigaaError::ElementNotFound("javax.faces.ViewState".to_string()))?;
        let unit_value = find_unit_option(&search_page, unit_name).ok_or_else(|| {
            SigaaError::ElementNotFound(format!("academic unit option: {}", unit_name))
        })?;

        let form = vec![
            ("form".to_string(), "form".to_string()),
            ("form:selectUnidade".to_string(), unit_value),
            ("form:checkUnidade".to_string(), "on".to_string()),
            ("form:buttonBuscar".to_string(), "Buscar".to_string()),
            ("javax.faces.ViewState".to_string(), view_state),
        ];
        let results = self.client.post_form(SECTION_SEARCH_PATH, &form).await?;

        let sections = parse_course_sections(&results, unit_name)?;
        tracing::info!("parsed {} sections for {}", sections.len(), unit_name);
        Ok(sections)
    }

    /// Fetch an academic unit's sections and assemble them into NGSI
    /// course-instance entities.
    ///
    /// # Errors
    /// Same conditions as [`SigaaScraper::fetch_sections`].
    pub async fn fetch_course_instances(
        &self,
        unit: &AcademicUnit,
    ) -> Result<Vec<CourseInstance>> {
        let sections = self.fetch_sections(unit.name).await?;
        Ok(sections
            .iter()
            .map(|section| build_course_instance(section, unit))
            .collect())
    }
}

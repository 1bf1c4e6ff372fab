//! HTTP session client for SIGAA
//!
//! The portal tracks an authenticated JSF session through cookies, so
//! the client keeps a cookie store and replays the portal's forms over
//! plain HTTP. Requests are rate limited and retried with exponential
//! backoff to stay polite towards the university's servers.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, SigaaError};

/// Base URL for the SIGAA portal
const SIGAA_BASE_URL: &str = "https://sigaa.ufrn.br";

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header for Brazilian Portuguese content
const DEFAULT_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en;q=0.8";

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart so a
/// full scrape of every academic unit does not hammer the portal.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use sigaa_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request, waiting if the minimum
    /// interval since the last one has not elapsed yet.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// The three inputs the portal requires before any scraping can start.
///
/// Construction fails fast with [`SigaaError::MissingCredentials`] when
/// any field is blank; this is the one hard-stop failure in the system.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Portal login name
    pub username: String,
    /// Portal password
    pub password: String,
    /// Registration number (matrícula) selecting the bond to act under
    pub registration: String,
}

impl Credentials {
    /// Create credentials, rejecting blank fields.
    ///
    /// # Errors
    /// Returns `SigaaError::MissingCredentials` naming the first blank
    /// field.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        registration: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            username: username.into(),
            password: password.into(),
            registration: registration.into(),
        };

        if credentials.username.trim().is_empty() {
            return Err(SigaaError::MissingCredentials("SIGAA_USERNAME"));
        }
        if credentials.password.trim().is_empty() {
            return Err(SigaaError::MissingCredentials("SIGAA_PASSWORD"));
        }
        if credentials.registration.trim().is_empty() {
            return Err(SigaaError::MissingCredentials("SIGAA_MATRICULA"));
        }

        Ok(credentials)
    }

    /// Read credentials from `SIGAA_USERNAME`, `SIGAA_PASSWORD` and
    /// `SIGAA_MATRICULA`.
    ///
    /// # Errors
    /// Returns `SigaaError::MissingCredentials` naming the first unset
    /// or blank variable.
    pub fn from_env() -> Result<Self> {
        let username =
            std::env::var("SIGAA_USERNAME").map_err(|_| SigaaError::MissingCredentials("SIGAA_USERNAME"))?;
        let password =
            std::env::var("SIGAA_PASSWORD").map_err(|_| SigaaError::MissingCredentials("SIGAA_PASSWORD"))?;
        let registration =
            std::env::var("SIGAA_MATRICULA").map_err(|_| SigaaError::MissingCredentials("SIGAA_MATRICULA"))?;

        Self::new(username, password, registration)
    }
}

/// Configuration for the SIGAA HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the portal (overridable for tests)
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: SIGAA_BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the SIGAA portal
///
/// This client automatically:
/// - Persists session cookies across requests (the JSF login state)
/// - Limits request rate to avoid server overload
/// - Retries GETs on transient errors (429, 5xx) with exponential backoff
/// - Sets browser-like headers for Brazilian Portuguese content
pub struct SigaaClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
    /// Portal base URL
    base_url: String,
}

impl SigaaClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    DEFAULT_ACCEPT_LANGUAGE.parse().unwrap(),
                );
                headers
            })
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = RateLimiter::new(config.requests_per_second);

        Ok(Self {
            client,
            rate_limiter,
            base_url: config.base_url,
        })
    }

    /// The portal base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch HTML content from a portal path
    ///
    /// This method handles rate limiting and retries automatically.
    ///
    /// # Arguments
    /// * `path` - Relative path on the portal (e.g., "/sigaa/verTelaLogin.do")
    ///
    /// # Errors
    /// - `SigaaError::HttpError` - Network or HTTP error after all retries
    /// - `SigaaError::RateLimited` - Server returned 429 after all retries
    pub async fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", path);
        self.fetch_with_retry(&url, 0).await
    }

    /// Post a form to a portal path and return the response HTML.
    ///
    /// JSF form posts mutate server-side view state, so they are sent
    /// once and not retried.
    ///
    /// # Errors
    /// - `SigaaError::HttpError` - Network or HTTP error
    /// - `SigaaError::RateLimited` - Server returned 429
    pub async fn post_form(&self, path: &str, form: &[(String, String)]) -> Result<String> {
        self.rate_limiter.acquire().await;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", path);

        let response = self.client.post(&url).form(form).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SigaaError::RateLimited);
        }

        Err(SigaaError::HttpError(
            response.error_for_status().unwrap_err(),
        ))
    }

    /// Internal method to fetch with retry logic
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            // Wait for rate limiter before making request
            self.rate_limiter.acquire().await;

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            // Handle 429 - Rate Limited
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt < MAX_RETRIES {
                    let delay = self.calculate_backoff_delay(attempt);
                    sleep(delay).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                return Err(SigaaError::RateLimited);
            }

            // Handle 5xx - Server errors
            if status.is_server_error() {
                if attempt < MAX_RETRIES {
                    let delay = self.calculate_backoff_delay(attempt);
                    sleep(delay).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                return Err(SigaaError::HttpError(
                    response.error_for_status().unwrap_err(),
                ));
            }

            // Other errors - convert to HttpError
            Err(SigaaError::HttpError(
                response.error_for_status().unwrap_err(),
            ))
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: 1s, 2s, 4s, ...
        let delay_ms = BASE_RETRY_DELAY_MS * 2u64.pow(attempt);
        Duration::from_millis(delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_different_rates() {
        let limiter = RateLimiter::new(1.0);
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));

        let limiter = RateLimiter::new(4.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, SIGAA_BASE_URL);
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        let client = SigaaClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_credentials_valid() {
        let credentials = Credentials::new("user", "secret", "20250001");
        assert!(credentials.is_ok());
    }

    #[test]
    fn test_credentials_fail_fast_on_blank_fields() {
        match Credentials::new("", "secret", "20250001") {
            Err(SigaaError::MissingCredentials(field)) => assert_eq!(field, "SIGAA_USERNAME"),
            _ => panic!("Expected MissingCredentials error"),
        }
        match Credentials::new("user", "  ", "20250001") {
            Err(SigaaError::MissingCredentials(field)) => assert_eq!(field, "SIGAA_PASSWORD"),
            _ => panic!("Expected MissingCredentials error"),
        }
        match Credentials::new("user", "secret", "") {
            Err(SigaaError::MissingCredentials(field)) => assert_eq!(field, "SIGAA_MATRICULA"),
            _ => panic!("Expected MissingCredentials error"),
        }
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = SigaaClient::new().unwrap();

        assert_eq!(client.calculate_backoff_delay(0), Duration::from_millis(1000));
        assert_eq!(client.calculate_backoff_delay(1), Duration::from_millis(2000));
        assert_eq!(client.calculate_backoff_delay(2), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0); // 10 requests per second = 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least 100ms
        assert!(elapsed >= Duration::from_millis(100));
    }
}

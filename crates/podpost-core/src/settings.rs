use crate::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Episode-creation page of the podcast console
pub const DEFAULT_CONSOLE_URL: &str = "https://podcasters.spotify.com/pod/dashboard/episode/new";

/// Fixed delays and bounds used by the publish workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    /// Pause after attaching audio; the console gives no ready signal
    pub upload_grace_period: Duration,
    /// Pause before typing the title so a field refresh can't eat the input
    pub field_settle_delay: Duration,
    /// Bound on save confirmation and artwork processing
    pub upload_timeout: Duration,
    /// Bound on every other element wait, `None` waits indefinitely
    pub element_timeout: Option<Duration>,
    /// Page turns allowed per direction when searching the year grid
    pub max_page_turns: u32,
    /// Bound on a single navigation settle
    pub navigation_timeout: Duration,
    /// Interval between readiness checks
    pub poll_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            upload_grace_period: Duration::from_secs(25),
            field_settle_delay: Duration::from_secs(2),
            upload_timeout: Duration::from_secs(5 * 60),
            element_timeout: None,
            max_page_turns: 50,
            navigation_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl Timings {
    /// No fixed delays, short bounds
    pub fn immediate() -> Self {
        Self {
            upload_grace_period: Duration::ZERO,
            field_settle_delay: Duration::ZERO,
            upload_timeout: Duration::from_millis(50),
            element_timeout: None,
            max_page_turns: 50,
            navigation_timeout: Duration::from_millis(50),
            poll_interval: Duration::from_millis(1),
        }
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }
}

/// Account and behaviour switches for one publish run
#[derive(Clone)]
pub struct PublishSettings {
    pub email: String,
    pub password: String,
    pub console_url: String,
    pub save_as_draft: bool,
    pub timings: Timings,
}

impl PublishSettings {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            save_as_draft: false,
            timings: Timings::default(),
        }
    }

    pub fn with_console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = url.into();
        self
    }

    pub fn with_save_as_draft(mut self, save_as_draft: bool) -> Self {
        self.save_as_draft = save_as_draft;
        self
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Reject settings the console cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::Config("Account email is empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::Config("Account password is empty".to_string()));
        }
        url::Url::parse(&self.console_url)
            .map_err(|e| Error::Config(format!("Invalid console URL '{}': {}", self.console_url, e)))?;
        if self.timings.max_page_turns == 0 {
            return Err(Error::Config("Page turn limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for PublishSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishSettings")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("console_url", &self.console_url)
            .field("save_as_draft", &self.save_as_draft)
            .field("timings", &self.timings)
            .finish()
    }
}

//! Seam between the publish workflow and whatever drives the browser.
//!
//! The workflow only speaks in [`Locator`]s and element states; the
//! concrete backend decides how selectors are resolved and how waits poll.

use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// How an element is found in the rendered document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn selector(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::XPath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::XPath(s) => write!(f, "xpath `{}`", s),
        }
    }
}

/// Condition a wait is satisfied by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Present in the document
    Attached,
    /// Present, rendered and not hidden
    Visible,
    /// Absent or not visible
    Hidden,
}

/// One exclusively-owned browser page
#[async_trait]
pub trait UiBackend: Send {
    /// Open a URL in the page
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Let any in-flight navigation or re-render settle
    async fn wait_for_navigation(&mut self) -> Result<()>;

    /// Wait until the element reaches `state`.
    ///
    /// `None` waits indefinitely. A bounded wait that expires returns
    /// [`crate::Error::WaitTimeout`].
    async fn wait_for(
        &mut self,
        locator: &Locator,
        state: ElementState,
        timeout: Option<Duration>,
    ) -> Result<()>;

    async fn click(&mut self, locator: &Locator) -> Result<()>;

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()>;

    /// Set the file of an `<input type=file>` element
    async fn attach_file(&mut self, locator: &Locator, path: &Path) -> Result<()>;

    /// Read an attribute of the first matching element
    async fn attribute(&mut self, locator: &Locator, name: &str) -> Result<Option<String>>;

    /// Release the session. Called exactly once per run.
    async fn close(&mut self) -> Result<()>;
}

/// Acquires a fresh browser session for a run
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Session: UiBackend;

    async fn launch(&self) -> Result<Self::Session>;
}

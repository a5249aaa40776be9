use crate::keystrokes::{Keystroke, keystrokes};
use crate::{Error, script};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, Page};
use podpost_core::{ElementState, Locator, UiBackend};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// One Chrome page driven over the DevTools protocol
pub struct CdpBackend {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
    poll_interval: Duration,
}

impl CdpBackend {
    pub(crate) fn new(
        browser: Browser,
        page: Page,
        handler_task: JoinHandle<()>,
        navigation_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            browser,
            page,
            handler_task,
            navigation_timeout,
            poll_interval,
        }
    }
}

async fn find(page: &Page, locator: &Locator) -> podpost_core::Result<Element> {
    let found = match locator {
        Locator::Css(selector) => page.find_element(selector.as_str()).await,
        Locator::XPath(selector) => page.find_xpath(selector.as_str()).await,
    };
    found.map_err(|e| podpost_core::Error::ElementNotFound(format!("{} ({})", locator, e)))
}

/// Evaluate a boolean readiness check; a page mid-navigation counts as not ready
async fn check(page: &Page, script: &str) -> bool {
    match page.evaluate(script).await {
        Ok(result) => result.into_value::<bool>().unwrap_or(false),
        Err(e) => {
            tracing::debug!("Readiness check failed (retrying): {}", e);
            false
        }
    }
}

#[async_trait]
impl UiBackend for CdpBackend {
    async fn goto(&mut self, url: &str) -> podpost_core::Result<()> {
        tracing::debug!("Opening {}", url);
        self.page.goto(url).await.map_err(Error::from)?;
        Ok(())
    }

    async fn wait_for_navigation(&mut self) -> podpost_core::Result<()> {
        match tokio::time::timeout(self.navigation_timeout, self.page.wait_for_navigation()).await {
            Ok(result) => {
                result.map_err(Error::from)?;
            }
            Err(_) => tracing::debug!(
                "No navigation settled within {}ms, continuing",
                self.navigation_timeout.as_millis()
            ),
        }
        Ok(())
    }

    async fn wait_for(
        &mut self,
        locator: &Locator,
        state: ElementState,
        timeout: Option<Duration>,
    ) -> podpost_core::Result<()> {
        tracing::debug!("Waiting for {} to be {:?}", locator, state);

        let script = script::state_check(locator, state)?;
        let started = Instant::now();

        loop {
            if check(&self.page, &script).await {
                return Ok(());
            }

            if let Some(timeout) = timeout {
                if started.elapsed() >= timeout {
                    return Err(podpost_core::Error::WaitTimeout {
                        locator: locator.to_string(),
                        timeout,
                    });
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn click(&mut self, locator: &Locator) -> podpost_core::Result<()> {
        let element = find(&self.page, locator).await?;
        element.click().await.map_err(Error::from)?;
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> podpost_core::Result<()> {
        let element = find(&self.page, locator).await?;
        element.click().await.map_err(Error::from)?;

        for stroke in keystrokes(text) {
            match stroke {
                Keystroke::Key(key) => {
                    element.press_key(key).await.map_err(Error::from)?;
                }
                Keystroke::Insert(run) => {
                    self.page
                        .execute(InsertTextParams::new(run))
                        .await
                        .map_err(Error::from)?;
                }
            }
        }
        Ok(())
    }

    async fn attach_file(&mut self, locator: &Locator, path: &Path) -> podpost_core::Result<()> {
        let absolute = std::fs::canonicalize(path)?;
        tracing::debug!("Attaching {} to {}", absolute.display(), locator);

        let element = find(&self.page, locator).await?;
        let params = SetFileInputFilesParams::builder()
            .files(vec![absolute.display().to_string()])
            .backend_node_id(element.backend_node_id.clone())
            .build()
            .map_err(Error::Cdp)?;

        self.page.execute(params).await.map_err(Error::from)?;
        Ok(())
    }

    async fn attribute(
        &mut self,
        locator: &Locator,
        name: &str,
    ) -> podpost_core::Result<Option<String>> {
        let element = find(&self.page, locator).await?;
        let value = element.attribute(name).await.map_err(Error::from)?;
        Ok(value)
    }

    async fn close(&mut self) -> podpost_core::Result<()> {
        tracing::debug!("Closing browser");

        let closed = self.browser.close().await.map_err(Error::from);
        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                tracing::debug!("Browser process did not exit cleanly: {}", e);
            }
        }
        self.handler_task.abort();

        closed?;
        Ok(())
    }
}

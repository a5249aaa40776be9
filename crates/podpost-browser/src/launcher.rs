use crate::{CdpBackend, Error, ProfileManager, Result};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use podpost_core::{BrowserLauncher, Timings};
use std::path::PathBuf;
use std::time::Duration;

/// How Chrome is started for a publish run
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub chrome_path: PathBuf,
    pub headless: bool,
    pub window_size: (u32, u32),
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
}

impl LaunchOptions {
    pub fn new(chrome_path: PathBuf, headless: bool, timings: &Timings) -> Self {
        Self {
            chrome_path,
            headless,
            window_size: (1600, 789),
            navigation_timeout: timings.navigation_timeout,
            poll_interval: timings.poll_interval,
        }
    }

    /// Extra Chrome command-line arguments
    fn build_args(&self) -> Vec<String> {
        vec![
            "--no-sandbox".to_string(),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
        ]
    }

    fn browser_config(&self, profile: &ProfileManager) -> Result<BrowserConfig> {
        let (width, height) = self.window_size;
        let mut builder = BrowserConfig::builder()
            .chrome_executable(&self.chrome_path)
            .user_data_dir(profile.path())
            .window_size(width, height)
            .args(self.build_args());

        if !self.headless {
            builder = builder.with_head();
        }

        builder.build().map_err(Error::Browser)
    }
}

/// Starts Chrome and hands out a page for the workflow
pub struct ChromeLauncher {
    options: LaunchOptions,
    profile: ProfileManager,
}

impl ChromeLauncher {
    pub fn new(options: LaunchOptions, profile: ProfileManager) -> Self {
        Self { options, profile }
    }

    async fn start(&self) -> Result<CdpBackend> {
        let config = self.options.browser_config(&self.profile)?;

        tracing::info!(
            "Starting Chrome ({}) with profile {}",
            if self.options.headless { "headless" } else { "visible" },
            self.profile.path().display()
        );
        let (browser, mut handler) = Browser::launch(config).await?;

        // Must be polled for any CDP command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(e.into());
            }
        };

        Ok(CdpBackend::new(
            browser,
            page,
            handler_task,
            self.options.navigation_timeout,
            self.options.poll_interval,
        ))
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    type Session = CdpBackend;

    async fn launch(&self) -> podpost_core::Result<CdpBackend> {
        Ok(self.start().await?)
    }
}

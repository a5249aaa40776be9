use crate::date_picker::DatePicker;
use crate::selectors::console;
use podpost_core::{
    BrowserLauncher, ElementState, EpisodeInput, Error, Locator, PublishDisposition,
    PublishSettings, Result, Stage, Timings, UiBackend,
};
use std::time::Duration;

/// Stages a run will execute and how it will end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    pub stages: Vec<Stage>,
    pub disposition: PublishDisposition,
}

impl PublishPlan {
    pub fn for_episode(episode: &EpisodeInput, save_as_draft: bool) -> Self {
        let stages = Stage::ALL
            .into_iter()
            .filter(|stage| match stage {
                Stage::SetPublishDate => episode.upload_date.is_some(),
                Stage::UploadArtwork => episode.artwork_file_path.is_some(),
                _ => true,
            })
            .collect();

        Self {
            stages,
            disposition: PublishDisposition::resolve(save_as_draft, episode.upload_date.is_some()),
        }
    }

    pub fn includes(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }
}

/// Publishes one episode through the podcast console
pub struct Publisher<L> {
    launcher: L,
    settings: PublishSettings,
}

impl<L: BrowserLauncher> Publisher<L> {
    pub fn new(launcher: L, settings: PublishSettings) -> Self {
        Self { launcher, settings }
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    pub fn plan(&self, episode: &EpisodeInput) -> PublishPlan {
        PublishPlan::for_episode(episode, self.settings.save_as_draft)
    }

    /// Run every stage against a fresh browser session.
    ///
    /// The session is closed exactly once whether or not the run succeeds.
    /// Any failure comes back as [`Error::Workflow`] naming the stage.
    pub async fn run(&self, episode: &EpisodeInput) -> Result<()> {
        let plan = self.plan(episode);

        tracing::info!("Launching browser");
        let mut session = self.launcher.launch().await.map_err(at(Stage::Launch))?;

        let outcome = self.drive(&mut session, episode, &plan).await;

        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        match &outcome {
            Ok(()) => tracing::info!("Episode '{}' submitted ({})", episode.title, plan.disposition),
            Err(e) => tracing::debug!("Run aborted: {}", e),
        }

        outcome
    }

    async fn drive<B: UiBackend>(
        &self,
        backend: &mut B,
        episode: &EpisodeInput,
        plan: &PublishPlan,
    ) -> Result<()> {
        let mut steps = Steps {
            backend,
            settings: &self.settings,
            episode,
        };

        for &stage in &plan.stages {
            tracing::info!("-- {}", stage);
            steps.run(stage, plan.disposition).await.map_err(at(stage))?;
        }

        Ok(())
    }
}

fn at(stage: Stage) -> impl FnOnce(Error) -> Error {
    move |err| Error::at_stage(stage, err)
}

/// Per-stage UI interactions against one session
struct Steps<'a, B: UiBackend> {
    backend: &'a mut B,
    settings: &'a PublishSettings,
    episode: &'a EpisodeInput,
}

impl<B: UiBackend> Steps<'_, B> {
    async fn run(&mut self, stage: Stage, disposition: PublishDisposition) -> Result<()> {
        match stage {
            Stage::Launch => self.open_console().await,
            Stage::Authenticate => self.authenticate().await,
            Stage::UploadAudio => self.upload_audio().await,
            Stage::ConfirmSave => self.confirm_save().await,
            Stage::SetTitle => self.set_title().await,
            Stage::SetDescription => self.set_description().await,
            Stage::SetPublishDate => self.set_publish_date().await,
            Stage::SetExplicitFlag => self.set_explicit_flag().await,
            Stage::UploadArtwork => self.upload_artwork().await,
            Stage::Submit => self.submit(disposition).await,
        }
    }

    async fn open_console(&mut self) -> Result<()> {
        self.backend.goto(&self.settings.console_url).await?;
        self.backend.wait_for_navigation().await
    }

    /// The page reports loaded before the login form is usable, so wait on
    /// the form itself.
    async fn authenticate(&mut self) -> Result<()> {
        self.wait_visible(&console::email_field())
            .await
            .map_err(|e| {
                Error::Authentication(format!("credential form never became interactive: {}", e))
            })?;

        self.backend
            .type_text(&console::email_field(), &self.settings.email)
            .await?;
        self.backend
            .type_text(&console::password_field(), &self.settings.password)
            .await?;
        self.backend.click(&console::login_button()).await?;
        self.backend.wait_for_navigation().await?;

        tracing::info!("Logged in");
        Ok(())
    }

    async fn upload_audio(&mut self) -> Result<()> {
        let input = console::audio_input();
        let timeout = self.timings().element_timeout;
        self.backend
            .wait_for(&input, ElementState::Attached, timeout)
            .await?;
        self.backend
            .attach_file(&input, &self.episode.audio_file_path)
            .await?;

        tracing::info!("Waiting for upload to finish");
        pause(self.timings().upload_grace_period).await;
        Ok(())
    }

    async fn confirm_save(&mut self) -> Result<()> {
        let save = console::enabled_save_button();
        self.wait_for_upload(&save, ElementState::Attached).await?;
        self.backend.click(&save).await?;
        self.backend.wait_for_navigation().await
    }

    async fn set_title(&mut self) -> Result<()> {
        let title = console::title_field();
        self.wait_visible(&title).await?;
        pause(self.timings().field_settle_delay).await;
        self.backend.type_text(&title, &self.episode.title).await
    }

    async fn set_description(&mut self) -> Result<()> {
        let field = console::description_field();
        self.wait_visible(&field).await?;
        self.backend
            .type_text(&field, &self.episode.final_description())
            .await
    }

    async fn set_publish_date(&mut self) -> Result<()> {
        let Some(date) = self.episode.upload_date else {
            return Ok(());
        };

        let open = console::publish_date_button();
        self.wait_visible(&open).await?;
        self.backend.click(&open).await?;
        self.backend.wait_for_navigation().await?;

        let max_page_turns = self.timings().max_page_turns;
        DatePicker::new(&mut *self.backend, max_page_turns)
            .select_date(&date)
            .await?;

        self.backend.click(&console::confirm_date_button()).await?;
        self.backend.wait_for_navigation().await?;

        tracing::info!("Publish date set to {}", date);
        Ok(())
    }

    async fn set_explicit_flag(&mut self) -> Result<()> {
        let label = console::explicit_label(self.episode.is_explicit);
        self.wait_visible(&label).await?;
        self.backend.click(&label).await
    }

    async fn upload_artwork(&mut self) -> Result<()> {
        let episode = self.episode;
        let Some(artwork) = &episode.artwork_file_path else {
            return Ok(());
        };

        let input = console::artwork_input();
        let timeout = self.timings().element_timeout;
        self.backend
            .wait_for(&input, ElementState::Attached, timeout)
            .await?;
        self.backend.attach_file(&input, artwork).await?;

        tracing::info!("Saving uploaded episode art");
        let save = console::artwork_save_button();
        self.backend
            .wait_for(&save, ElementState::Attached, timeout)
            .await?;
        self.backend.click(&save).await?;

        self.wait_for_upload(&console::image_uploader(), ElementState::Hidden)
            .await
    }

    async fn submit(&mut self, disposition: PublishDisposition) -> Result<()> {
        tracing::info!("{}", disposition.message());
        self.backend.click(&disposition.locator()).await?;
        self.backend.wait_for_navigation().await
    }

    async fn wait_visible(&mut self, locator: &Locator) -> Result<()> {
        let timeout = self.timings().element_timeout;
        self.backend
            .wait_for(locator, ElementState::Visible, timeout)
            .await
    }

    /// Wait bounded by the upload timeout, reported as an upload timeout
    async fn wait_for_upload(&mut self, locator: &Locator, state: ElementState) -> Result<()> {
        let timeout = self.timings().upload_timeout;
        match self.backend.wait_for(locator, state, Some(timeout)).await {
            Err(Error::WaitTimeout { .. }) => Err(Error::UploadTimeout { timeout }),
            other => other,
        }
    }

    fn timings(&self) -> &Timings {
        &self.settings.timings
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

//! The `publish` command.
//!
//! Every switch can also come from the environment, using the variable
//! names of the original deployment scripts (`ANCHOR_EMAIL`, `AUDIO_FILE`,
//! `SET_PUBLISH_DATE`, ...), so a CI job can run `podpost publish` with no
//! arguments at all.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{ArgAction, Args};
use podpost_browser::{ChromeFinder, ChromeLauncher, LaunchOptions, ProfileManager};
use podpost_core::settings::DEFAULT_CONSOLE_URL;
use podpost_core::{
    CalendarDate, EpisodeInput, EpisodeOptions, EpisodeReader, PublishSettings, Timings,
};
use podpost_workflow::{PublishPlan, Publisher};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Episode metadata JSON (title, description, url, uploadDate)
    #[arg(long, value_name = "FILE", env = "EPISODE_FILE", default_value = "episode.json")]
    pub episode: PathBuf,

    /// Audio file to upload
    #[arg(long, value_name = "FILE", env = "AUDIO_FILE")]
    pub audio_file: Option<PathBuf>,

    /// Upload episode artwork
    #[arg(long, env = "LOAD_THUMBNAIL")]
    pub load_artwork: bool,

    /// Artwork image used with --load-artwork
    #[arg(long, value_name = "FILE", env = "THUMBNAIL_FILE")]
    pub artwork_file: Option<PathBuf>,

    /// Console account email
    #[arg(long, env = "ANCHOR_EMAIL")]
    pub email: Option<String>,

    /// Console account password
    #[arg(long, env = "ANCHOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Save the episode as a draft instead of publishing
    #[arg(long, env = "SAVE_AS_DRAFT")]
    pub draft: bool,

    /// Schedule the episode on its upload date
    #[arg(long, env = "SET_PUBLISH_DATE")]
    pub set_publish_date: bool,

    /// Publish date (YYYY-MM-DD) overriding the metadata's upload date
    #[arg(long, value_name = "DATE", value_parser = parse_date, requires = "set_publish_date")]
    pub publish_date: Option<NaiveDate>,

    /// Mark the episode as explicit
    #[arg(long, env = "IS_EXPLICIT")]
    pub explicit: bool,

    /// Append the source URL to the description
    #[arg(long, env = "URL_IN_DESCRIPTION")]
    pub url_in_description: bool,

    /// Run Chrome without a window
    #[arg(long, env = "PUPETEER_HEADLESS", default_value_t = true, action = ArgAction::Set)]
    pub headless: bool,

    /// How long to wait for uploads to be confirmed, in milliseconds
    #[arg(long, value_name = "MS", env = "UPLOAD_TIMEOUT", default_value_t = 300_000)]
    pub upload_timeout: u64,

    /// Pause after attaching the audio, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 25)]
    pub upload_grace: u64,

    /// Give up on any other element after this many seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub element_timeout: Option<u64>,

    /// Episode-creation page of the console
    #[arg(long, env = "PODPOST_CONSOLE_URL", default_value = DEFAULT_CONSOLE_URL)]
    pub console_url: String,

    /// Path to the Chrome binary
    #[arg(long, value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Named persistent browser profile (default: temporary profile)
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Print what would be done without opening a browser
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

impl PublishArgs {
    fn timings(&self) -> Timings {
        Timings {
            upload_grace_period: Duration::from_secs(self.upload_grace),
            element_timeout: self.element_timeout.map(Duration::from_secs),
            ..Timings::default()
        }
        .with_upload_timeout(Duration::from_millis(self.upload_timeout))
    }

    fn artwork(&self) -> Result<Option<PathBuf>> {
        if !self.load_artwork {
            return Ok(None);
        }
        self.artwork_file
            .clone()
            .map(Some)
            .ok_or_else(|| anyhow!("--load-artwork needs --artwork-file (or THUMBNAIL_FILE)"))
    }

    fn episode_input(&self) -> Result<EpisodeInput> {
        let mut metadata = EpisodeReader::from_file(&self.episode)
            .with_context(|| format!("Could not load {}", self.episode.display()))?;
        EpisodeReader::validate(&metadata)?;

        if let Some(date) = self.publish_date {
            metadata.upload_date = Some(CalendarDate::from_naive(date));
        }
        if self.set_publish_date && metadata.upload_date.is_none() {
            bail!("--set-publish-date needs an uploadDate in the metadata or --publish-date");
        }

        let options = EpisodeOptions {
            append_url_to_description: self.url_in_description,
            set_publish_date: self.set_publish_date,
            is_explicit: self.explicit,
            audio_file_path: self
                .audio_file
                .clone()
                .ok_or_else(|| anyhow!("No audio file given (--audio-file or AUDIO_FILE)"))?,
            artwork_file_path: self.artwork()?,
        };

        Ok(EpisodeInput::from_metadata(metadata, options))
    }

    fn settings(&self) -> PublishSettings {
        PublishSettings::new(
            self.email.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
        .with_console_url(self.console_url.clone())
        .with_save_as_draft(self.draft)
        .with_timings(self.timings())
    }
}

pub fn execute(args: PublishArgs) -> Result<()> {
    let episode = args.episode_input()?;
    let settings = args.settings();
    let plan = PublishPlan::for_episode(&episode, settings.save_as_draft);

    print_plan(&episode, &plan);

    if args.dry_run {
        println!("Dry run - no browser started");
        return Ok(());
    }

    settings.validate()?;
    require_file(&episode.audio_file_path, "Audio file")?;
    if let Some(artwork) = &episode.artwork_file_path {
        require_file(artwork, "Artwork file")?;
    }

    println!("🔍 Locating Chrome...");
    let chrome_binary = ChromeFinder::new(args.chrome_path.clone()).find()?;
    println!("✅ Found Chrome at: {}", chrome_binary.display());

    let profile = match &args.profile {
        Some(name) => {
            let profile = ProfileManager::named(name)?;
            println!("📁 Using profile: {}", profile.path().display());
            profile
        }
        None => ProfileManager::temporary()?,
    };

    let options = LaunchOptions::new(chrome_binary, args.headless, &settings.timings);
    let publisher = Publisher::new(ChromeLauncher::new(options, profile), settings);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(publisher.run(&episode));
    runtime.shutdown_timeout(Duration::from_millis(100));

    result?;
    println!(
        "✅ Episode '{}' submitted ({})",
        episode.title, plan.disposition
    );
    Ok(())
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        bail!("{} not found: {}", what, path.display());
    }
    Ok(())
}

fn print_plan(episode: &EpisodeInput, plan: &PublishPlan) {
    use console::style;

    println!("{}", style(format!("Episode: {}", episode.title)).bold().cyan());
    println!("  Audio:       {}", episode.audio_file_path.display());
    if let Some(artwork) = &episode.artwork_file_path {
        println!("  Artwork:     {}", artwork.display());
    }
    if let Some(date) = &episode.upload_date {
        println!("  Publish on:  {}", date);
    }
    println!("  Explicit:    {}", if episode.is_explicit { "yes" } else { "no" });
    println!("  Disposition: {}", style(plan.disposition).green());
    println!("  Description:");
    for line in episode.final_description().lines() {
        println!("    {}", line);
    }
    println!();
    println!("Stages:");
    for (index, stage) in plan.stages.iter().enumerate() {
        println!("  {:>2}. {}", index + 1, stage);
    }
    println!();
}

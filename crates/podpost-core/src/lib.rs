pub mod backend;
pub mod disposition;
pub mod episode;
pub mod error;
pub mod settings;

pub use backend::{BrowserLauncher, ElementState, Locator, UiBackend};
pub use disposition::PublishDisposition;
pub use episode::{CalendarDate, EpisodeInput, EpisodeMetadata, EpisodeOptions, EpisodeReader, MonthName};
pub use error::{Error, Result, Stage};
pub use settings::{PublishSettings, Timings};

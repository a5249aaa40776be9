mod cdp_backend;
mod chrome_finder;
mod error;
mod keystrokes;
mod launcher;
mod profile;
mod script;

pub use cdp_backend::CdpBackend;
pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::{ChromeLauncher, LaunchOptions};
pub use profile::ProfileManager;

mod reader;
mod types;

pub use reader::EpisodeReader;
pub use types::{
    CalendarDate, EpisodeInput, EpisodeMetadata, EpisodeOptions, MonthName, compose_description,
    parse_day,
};

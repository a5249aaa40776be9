use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Month of a publish date, as rendered by the date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthRepr", into = "String")]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthName {
    const ALL: [MonthName; 12] = [
        MonthName::January,
        MonthName::February,
        MonthName::March,
        MonthName::April,
        MonthName::May,
        MonthName::June,
        MonthName::July,
        MonthName::August,
        MonthName::September,
        MonthName::October,
        MonthName::November,
        MonthName::December,
    ];

    /// Month from its 1-based number
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// 1-based month number
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Full English name, the text shown in the picker's month grid
    pub fn label(&self) -> &'static str {
        match self {
            MonthName::January => "January",
            MonthName::February => "February",
            MonthName::March => "March",
            MonthName::April => "April",
            MonthName::May => "May",
            MonthName::June => "June",
            MonthName::July => "July",
            MonthName::August => "August",
            MonthName::September => "September",
            MonthName::October => "October",
            MonthName::November => "November",
            MonthName::December => "December",
        }
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MonthName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::from_number(number).ok_or_else(|| format!("invalid month number: {}", s));
        }

        let lower = trimmed.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|month| {
                let label = month.label().to_lowercase();
                label == lower || (lower.len() == 3 && label.starts_with(&lower))
            })
            .ok_or_else(|| format!("invalid month name: {}", s))
    }
}

impl From<MonthName> for String {
    fn from(month: MonthName) -> Self {
        month.label().to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MonthRepr {
    Number(u32),
    Name(String),
}

impl TryFrom<MonthRepr> for MonthName {
    type Error = String;

    fn try_from(repr: MonthRepr) -> Result<Self, Self::Error> {
        match repr {
            MonthRepr::Number(n) => {
                MonthName::from_number(n).ok_or_else(|| format!("invalid month number: {}", n))
            }
            MonthRepr::Name(name) => name.parse(),
        }
    }
}

/// Target publish date. Day validity for the month is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: MonthName,
    #[serde(deserialize_with = "deserialize_day")]
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: MonthName, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn from_naive(date: chrono::NaiveDate) -> Self {
        // chrono months are always 1..=12
        let month = MonthName::from_number(date.month()).unwrap_or(MonthName::January);
        Self::new(date.year(), month, date.day())
    }

    /// Day as the picker's `data-value`, without zero padding
    pub fn day_cell_value(&self) -> String {
        self.day.to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month, self.year)
    }
}

/// Parse a day number, stripping any leading zero ("07" -> 7)
pub fn parse_day(text: &str) -> Result<u32, String> {
    let day = text
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid day '{}': {}", text, e))?;
    if !(1..=31).contains(&day) {
        return Err(format!("day out of range: {}", day));
    }
    Ok(day)
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DayRepr {
        Number(u32),
        Text(String),
    }

    match DayRepr::deserialize(deserializer)? {
        DayRepr::Number(n) => parse_day(&n.to_string()),
        DayRepr::Text(text) => parse_day(&text),
    }
    .map_err(serde::de::Error::custom)
}

/// Video metadata record an episode is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub upload_date: Option<CalendarDate>,
}

/// Loader-owned switches and file paths that complete an episode
#[derive(Debug, Clone, Default)]
pub struct EpisodeOptions {
    pub append_url_to_description: bool,
    pub set_publish_date: bool,
    pub is_explicit: bool,
    pub audio_file_path: PathBuf,
    pub artwork_file_path: Option<PathBuf>,
}

/// Everything a publish run needs to know about one episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeInput {
    pub title: String,
    pub description: String,
    pub source_url: Option<String>,
    pub append_url_to_description: bool,
    pub upload_date: Option<CalendarDate>,
    pub is_explicit: bool,
    pub audio_file_path: PathBuf,
    pub artwork_file_path: Option<PathBuf>,
}

impl EpisodeInput {
    pub fn from_metadata(metadata: EpisodeMetadata, options: EpisodeOptions) -> Self {
        let upload_date = if options.set_publish_date {
            metadata.upload_date
        } else {
            None
        };

        Self {
            title: metadata.title,
            description: metadata.description,
            source_url: metadata.url,
            append_url_to_description: options.append_url_to_description,
            upload_date,
            is_explicit: options.is_explicit,
            audio_file_path: options.audio_file_path,
            artwork_file_path: options.artwork_file_path,
        }
    }

    /// Description as it will be typed into the console
    pub fn final_description(&self) -> String {
        compose_description(
            &self.description,
            self.source_url.as_deref(),
            self.append_url_to_description,
        )
    }
}

/// Append the source URL on its own line when requested and present
pub fn compose_description(description: &str, url: Option<&str>, append_url: bool) -> String {
    match url {
        Some(url) if append_url => format!("{}\n{}", description, url),
        _ => description.to_string(),
    }
}

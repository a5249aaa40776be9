use crate::backend::Locator;
use std::fmt;

/// Terminal outcome of a publish run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishDisposition {
    Draft,
    Scheduled,
    PublishNow,
}

impl PublishDisposition {
    /// Draft wins over Scheduled, Scheduled wins over PublishNow
    pub fn resolve(save_as_draft: bool, publish_date_set: bool) -> Self {
        if save_as_draft {
            PublishDisposition::Draft
        } else if publish_date_set {
            PublishDisposition::Scheduled
        } else {
            PublishDisposition::PublishNow
        }
    }

    /// Control that submits the episode with this disposition
    pub fn locator(&self) -> Locator {
        match self {
            PublishDisposition::Draft => Locator::xpath(r#"//button[text()="Save as draft"]"#),
            PublishDisposition::Scheduled => {
                Locator::xpath(r#"//span[text()="Schedule episode"]/parent::button"#)
            }
            PublishDisposition::PublishNow => {
                Locator::xpath(r#"//span[text()="Publish now"]/parent::button"#)
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PublishDisposition::Draft => "Saving draft",
            PublishDisposition::Scheduled => "Scheduling",
            PublishDisposition::PublishNow => "Publishing",
        }
    }
}

impl fmt::Display for PublishDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishDisposition::Draft => "draft",
            PublishDisposition::Scheduled => "scheduled",
            PublishDisposition::PublishNow => "publish now",
        };
        f.write_str(name)
    }
}

//! Locators for the podcast console and its calendar widget.

use podpost_core::{CalendarDate, Locator, MonthName};

pub mod console {
    use super::Locator;

    pub fn email_field() -> Locator {
        Locator::css("#email")
    }

    pub fn password_field() -> Locator {
        Locator::css("#password")
    }

    pub fn login_button() -> Locator {
        Locator::css("button[type=submit]")
    }

    pub fn audio_input() -> Locator {
        Locator::css("input[type=file]")
    }

    /// Save control that is labelled "Save" and not disabled
    pub fn enabled_save_button() -> Locator {
        Locator::xpath(r#"//span[contains(text(),"Save")]/parent::button[not(boolean(@disabled))]"#)
    }

    pub fn title_field() -> Locator {
        Locator::css("#title")
    }

    pub fn description_field() -> Locator {
        Locator::css(r#"div[role="textbox"]"#)
    }

    pub fn publish_date_button() -> Locator {
        Locator::xpath(r#"//span[contains(text(),"Publish date:")]/following-sibling::button"#)
    }

    pub fn confirm_date_button() -> Locator {
        Locator::xpath(r#"//span[contains(text(),"Confirm")]/parent::button"#)
    }

    pub fn explicit_label(is_explicit: bool) -> Locator {
        Locator::css(format!(
            r#"label[for="podcastEpisodeIsExplicit-{}"]"#,
            is_explicit
        ))
    }

    pub fn artwork_input() -> Locator {
        Locator::css(r#"input[type=file][accept="image/*"]"#)
    }

    pub fn artwork_save_button() -> Locator {
        Locator::xpath(r#"//span[text()="Save"]/parent::button"#)
    }

    /// Shown while uploaded artwork is being processed
    pub fn image_uploader() -> Locator {
        Locator::xpath(r#"//div[@aria-label="image uploader"]"#)
    }
}

pub mod picker {
    use super::{CalendarDate, Locator, MonthName};

    /// Cycles granularity day -> month -> year
    pub fn switch_level() -> Locator {
        Locator::css(r#"th[class="rdtSwitch"]"#)
    }

    pub fn page_backward() -> Locator {
        Locator::css(r#"th[class="rdtPrev"]"#)
    }

    pub fn page_forward() -> Locator {
        Locator::css(r#"th[class="rdtNext"]"#)
    }

    /// Top-left cell, the lowest visible year
    pub fn first_cell() -> Locator {
        Locator::css("tbody > tr:first-child > td:first-child")
    }

    /// Bottom-right cell, the highest visible year
    pub fn last_cell() -> Locator {
        Locator::css("tbody > tr:last-child > td:last-child")
    }

    pub fn year_cell(year: i32) -> Locator {
        Locator::css(format!(r#"tbody > tr > td[data-value="{}"]"#, year))
    }

    pub fn month_cell(month: MonthName) -> Locator {
        Locator::xpath(format!(
            r#"//tbody/tr/td[contains(text(),"{}")]"#,
            month.label()
        ))
    }

    /// Day cell of the shown month. Cells carried over from the previous
    /// month are excluded unless they are also tagged as the new month.
    pub fn day_cell(date: &CalendarDate) -> Locator {
        Locator::css(format!(
            r#"tbody > tr > td[data-value="{}"][class*="rdtDay"]:not([class*="rdtOld"]:not([class*="rdtNew"]))"#,
            date.day_cell_value()
        ))
    }
}

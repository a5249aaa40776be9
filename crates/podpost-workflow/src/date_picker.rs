use crate::selectors::picker;
use podpost_core::{CalendarDate, Error, Locator, MonthName, Result, UiBackend};

/// Visible page of the year grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerViewport {
    pub lowest: i32,
    pub highest: i32,
}

impl PickerViewport {
    pub fn contains(&self, year: i32) -> bool {
        (self.lowest..=self.highest).contains(&year)
    }
}

/// Drives an open year -> month -> day calendar widget to a target date
pub struct DatePicker<'a, B: UiBackend + ?Sized> {
    backend: &'a mut B,
    max_page_turns: u32,
}

impl<'a, B: UiBackend + ?Sized> DatePicker<'a, B> {
    pub fn new(backend: &'a mut B, max_page_turns: u32) -> Self {
        Self {
            backend,
            max_page_turns,
        }
    }

    /// Select `target` in the already open picker, returning the year page
    /// the target was picked from
    pub async fn select_date(&mut self, target: &CalendarDate) -> Result<PickerViewport> {
        tracing::debug!("Selecting {} in date picker", target);

        self.reset_to_year_view().await?;
        let viewport = self.select_year(target.year).await?;
        self.select_month(target.month).await?;
        self.select_day(target).await?;
        Ok(viewport)
    }

    /// The widget opens on days; two switches always land on years
    async fn reset_to_year_view(&mut self) -> Result<()> {
        for _ in 0..2 {
            self.activate(&picker::switch_level()).await?;
        }
        Ok(())
    }

    async fn select_year(&mut self, year: i32) -> Result<PickerViewport> {
        let mut lowest = self.read_year(&picker::first_cell()).await?;
        let mut backward = 0;
        while lowest > year {
            self.turn_page(&picker::page_backward(), &mut backward, year)
                .await?;
            lowest = self.read_year(&picker::first_cell()).await?;
        }

        let mut highest = self.read_year(&picker::last_cell()).await?;
        let mut forward = 0;
        while highest < year {
            self.turn_page(&picker::page_forward(), &mut forward, year)
                .await?;
            highest = self.read_year(&picker::last_cell()).await?;
        }

        let viewport = self.viewport().await?;
        tracing::debug!(
            "Year grid shows {}..={} after {} page(s) back and {} forward",
            viewport.lowest,
            viewport.highest,
            backward,
            forward
        );
        if !viewport.contains(year) {
            return Err(Error::Navigation(format!(
                "year {} skipped by the grid ({}..={})",
                year, viewport.lowest, viewport.highest
            )));
        }

        self.activate(&picker::year_cell(year)).await?;
        Ok(viewport)
    }

    async fn viewport(&mut self) -> Result<PickerViewport> {
        Ok(PickerViewport {
            lowest: self.read_year(&picker::first_cell()).await?,
            highest: self.read_year(&picker::last_cell()).await?,
        })
    }

    async fn select_month(&mut self, month: MonthName) -> Result<()> {
        self.activate(&picker::month_cell(month)).await
    }

    async fn select_day(&mut self, target: &CalendarDate) -> Result<()> {
        self.activate(&picker::day_cell(target)).await
    }

    async fn turn_page(&mut self, control: &Locator, turns: &mut u32, year: i32) -> Result<()> {
        if *turns >= self.max_page_turns {
            return Err(Error::Navigation(format!(
                "year {} not reached after {} page turns",
                year, turns
            )));
        }
        *turns += 1;
        self.activate(control).await
    }

    /// Click a picker control and let the grid re-render
    async fn activate(&mut self, locator: &Locator) -> Result<()> {
        self.backend
            .click(locator)
            .await
            .map_err(|e| missing_control(locator, e))?;
        self.backend.wait_for_navigation().await
    }

    async fn read_year(&mut self, cell: &Locator) -> Result<i32> {
        let value = self
            .backend
            .attribute(cell, "data-value")
            .await
            .map_err(|e| missing_control(cell, e))?
            .ok_or_else(|| Error::Navigation(format!("{} has no data-value", cell)))?;

        value
            .trim()
            .parse()
            .map_err(|_| Error::Navigation(format!("{} holds '{}', not a year", cell, value)))
    }
}

fn missing_control(locator: &Locator, err: Error) -> Error {
    match err {
        Error::ElementNotFound(_) => {
            Error::Navigation(format!("picker control not found: {}", locator))
        }
        other => other,
    }
}

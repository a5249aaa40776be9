#![allow(dead_code)]

use async_trait::async_trait;
use podpost_core::{BrowserLauncher, ElementState, Error, Locator, Result, UiBackend};
use podpost_workflow::selectors::picker;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Years shown per page of the fake year grid
pub const PAGE_SPAN: i32 = 12;
/// Years a page turn moves the grid by
pub const PAGE_STEP: i32 = 10;

/// One rendered cell of the day grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub value: u32,
    pub classes: &'static str,
    /// Which month the cell belongs to, for assertions
    pub month: &'static str,
}

impl DayCell {
    pub fn new(value: u32, classes: &'static str, month: &'static str) -> Self {
        Self {
            value,
            classes,
            month,
        }
    }
}

/// Day grid of March 2023: February's tail, March, then April's head
pub fn march_2023_days() -> Vec<DayCell> {
    let mut cells: Vec<DayCell> = (26..=28)
        .map(|day| DayCell::new(day, "rdtDay rdtOld", "February"))
        .collect();
    cells.extend((1..=31).map(|day| DayCell::new(day, "rdtDay", "March")));
    cells.extend((1..=8).map(|day| DayCell::new(day, "rdtDay rdtNew", "April")));
    cells
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Goto(String),
    Navigation,
    Wait(Locator, ElementState),
    Click(Locator),
    Type(Locator, String),
    Attach(Locator, PathBuf),
    Close,
}

#[derive(Debug)]
struct State {
    actions: Vec<Action>,
    first_year: i32,
    page_step: i32,
    frozen_grid: bool,
    days: Vec<DayCell>,
    picked_day: Option<DayCell>,
    timeouts: HashSet<Locator>,
    missing: HashSet<Locator>,
    closes: usize,
}

/// In-memory console recording every interaction
#[derive(Debug, Clone)]
pub struct FakeConsole {
    state: Arc<Mutex<State>>,
}

impl FakeConsole {
    /// Year grid initially showing `first_year..first_year + PAGE_SPAN`
    pub fn new(first_year: i32) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                actions: Vec::new(),
                first_year,
                page_step: PAGE_STEP,
                frozen_grid: false,
                days: Vec::new(),
                picked_day: None,
                timeouts: HashSet::new(),
                missing: HashSet::new(),
                closes: 0,
            })),
        }
    }

    /// Waits on this locator never succeed
    pub fn never_ready(self, locator: Locator) -> Self {
        self.state.lock().unwrap().timeouts.insert(locator);
        self
    }

    /// This locator is absent from the page
    pub fn without(self, locator: Locator) -> Self {
        self.state.lock().unwrap().missing.insert(locator);
        self
    }

    /// Page turns leave the grid unchanged
    pub fn frozen(self) -> Self {
        self.state.lock().unwrap().frozen_grid = true;
        self
    }

    /// Page turns move the grid by `step` years
    pub fn with_page_step(self, step: i32) -> Self {
        self.state.lock().unwrap().page_step = step;
        self
    }

    /// Day clicks resolve against these cells in document order
    pub fn with_days(self, days: Vec<DayCell>) -> Self {
        self.state.lock().unwrap().days = days;
        self
    }

    pub fn picked_day(&self) -> Option<DayCell> {
        self.state.lock().unwrap().picked_day.clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn clicks(&self) -> Vec<Locator> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Click(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    pub fn click_count(&self, locator: &Locator) -> usize {
        self.clicks().iter().filter(|l| *l == locator).count()
    }

    pub fn typed_into(&self, locator: &Locator) -> Option<String> {
        self.actions().into_iter().find_map(|a| match a {
            Action::Type(l, text) if &l == locator => Some(text),
            _ => None,
        })
    }

    pub fn waited_on(&self, locator: &Locator) -> bool {
        self.actions()
            .iter()
            .any(|a| matches!(a, Action::Wait(l, _) if l == locator))
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    pub fn first_year(&self) -> i32 {
        self.state.lock().unwrap().first_year
    }

    fn record(&self, action: Action) {
        self.state.lock().unwrap().actions.push(action);
    }

    fn check_present(&self, locator: &Locator) -> Result<()> {
        if self.state.lock().unwrap().missing.contains(locator) {
            return Err(Error::ElementNotFound(locator.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UiBackend for FakeConsole {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.record(Action::Goto(url.to_string()));
        Ok(())
    }

    async fn wait_for_navigation(&mut self) -> Result<()> {
        self.record(Action::Navigation);
        Ok(())
    }

    async fn wait_for(
        &mut self,
        locator: &Locator,
        state: ElementState,
        timeout: Option<Duration>,
    ) -> Result<()> {
        self.record(Action::Wait(locator.clone(), state));
        if self.state.lock().unwrap().timeouts.contains(locator) {
            return Err(Error::WaitTimeout {
                locator: locator.to_string(),
                timeout: timeout.unwrap_or(Duration::ZERO),
            });
        }
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        self.check_present(locator)?;

        let mut state = self.state.lock().unwrap();
        let lowest = state.first_year;
        let highest = lowest + PAGE_SPAN - 1;

        if !state.frozen_grid {
            if *locator == picker::page_backward() {
                state.first_year -= state.page_step;
            } else if *locator == picker::page_forward() {
                state.first_year += state.page_step;
            }
        }

        if let Some(year) = year_of_cell(locator) {
            if !(lowest..=highest).contains(&year) {
                return Err(Error::ElementNotFound(locator.to_string()));
            }
        }

        if is_day_cell(locator) && !state.days.is_empty() {
            let picked = state
                .days
                .iter()
                .find(|cell| matches_day_cell(locator.selector(), cell))
                .cloned()
                .ok_or_else(|| Error::ElementNotFound(locator.to_string()))?;
            state.picked_day = Some(picked);
        }

        state.actions.push(Action::Click(locator.clone()));
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()> {
        self.check_present(locator)?;
        self.record(Action::Type(locator.clone(), text.to_string()));
        Ok(())
    }

    async fn attach_file(&mut self, locator: &Locator, path: &Path) -> Result<()> {
        self.check_present(locator)?;
        self.record(Action::Attach(locator.clone(), path.to_path_buf()));
        Ok(())
    }

    async fn attribute(&mut self, locator: &Locator, name: &str) -> Result<Option<String>> {
        self.check_present(locator)?;
        if name != "data-value" {
            return Ok(None);
        }

        let first_year = self.state.lock().unwrap().first_year;
        if *locator == picker::first_cell() {
            Ok(Some(first_year.to_string()))
        } else if *locator == picker::last_cell() {
            Ok(Some((first_year + PAGE_SPAN - 1).to_string()))
        } else {
            Ok(None)
        }
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.closes += 1;
        state.actions.push(Action::Close);
        Ok(())
    }
}

/// Year targeted by a year-cell locator, `None` for any other locator
fn year_of_cell(locator: &Locator) -> Option<i32> {
    let rest = locator
        .selector()
        .strip_prefix(r#"tbody > tr > td[data-value=""#)?;
    let (value, tail) = rest.split_once('"')?;
    if tail != "]" {
        return None;
    }
    value.parse().ok()
}

fn is_day_cell(locator: &Locator) -> bool {
    locator.selector().contains("rdtDay")
}

/// Evaluates a day-cell selector against a cell, covering the attribute
/// and `:not(...)` forms the picker locators use
fn matches_day_cell(selector: &str, cell: &DayCell) -> bool {
    let Some(compound) = selector.strip_prefix("tbody > tr > td") else {
        return false;
    };
    let (matched, rest) = compound_matches(compound, cell);
    assert!(rest.is_empty(), "unparsed selector tail: {}", rest);
    matched
}

/// Match a compound selector up to the end or an unopened `)`
fn compound_matches<'s>(mut input: &'s str, cell: &DayCell) -> (bool, &'s str) {
    let mut matched = true;
    loop {
        if let Some(rest) = input.strip_prefix(":not(") {
            let (inner, rest) = compound_matches(rest, cell);
            input = rest.strip_prefix(')').expect("unbalanced :not(");
            matched &= !inner;
        } else if let Some(rest) = input.strip_prefix('[') {
            let (condition, rest) = rest.split_once(']').expect("unterminated [");
            matched &= attribute_matches(condition, cell);
            input = rest;
        } else {
            return (matched, input);
        }
    }
}

fn attribute_matches(condition: &str, cell: &DayCell) -> bool {
    if let Some(value) = condition.strip_prefix("data-value=") {
        value.trim_matches('"') == cell.value.to_string()
    } else if let Some(class) = condition.strip_prefix("class*=") {
        cell.classes.contains(class.trim_matches('"'))
    } else {
        panic!("unsupported attribute condition [{}]", condition)
    }
}

/// Hands out the shared fake console as the run's session
pub struct FakeLauncher {
    console: FakeConsole,
    fail: bool,
}

impl FakeLauncher {
    pub fn new(console: FakeConsole) -> Self {
        Self {
            console,
            fail: false,
        }
    }

    pub fn failing(console: FakeConsole) -> Self {
        Self {
            console,
            fail: true,
        }
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Session = FakeConsole;

    async fn launch(&self) -> Result<FakeConsole> {
        if self.fail {
            return Err(Error::Backend("Chrome not found".to_string()));
        }
        Ok(self.console.clone())
    }
}

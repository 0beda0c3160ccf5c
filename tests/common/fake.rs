use std::collections::{HashMap, HashSet};

use auth_pages::browser::driver::Browser;
use auth_pages::error::PageError;

/// An interaction the page object performed, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Fill(String, String),
    Click(String),
    Check(String),
    Select(String, String),
}

/// A scripted change to the fake page's state.
#[derive(Debug, Clone)]
pub enum Effect {
    Show(String),
    Hide(String),
    SetTexts(String, Vec<String>),
}

pub fn show(selector: &str) -> Effect {
    Effect::Show(selector.to_string())
}

pub fn hide(selector: &str) -> Effect {
    Effect::Hide(selector.to_string())
}

pub fn set_texts(selector: &str, texts: &[&str]) -> Effect {
    Effect::SetTexts(
        selector.to_string(),
        texts.iter().map(|t| t.to_string()).collect(),
    )
}

/// Scripted `Browser` for unit tests.
///
/// State is a set of visible/present selectors plus per-selector text
/// lists. Effects can fire immediately when a selector is clicked, or
/// after the page object has issued N more queries, which is how the
/// target application's asynchronous UI updates are simulated for the
/// polling waits.
#[derive(Default)]
pub struct FakeBrowser {
    visible: HashSet<String>,
    present: HashSet<String>,
    texts: HashMap<String, Vec<String>>,
    click_effects: HashMap<String, Vec<Effect>>,
    click_delayed: HashMap<String, Vec<(usize, Effect)>>,
    delayed: Vec<(usize, Effect)>,
    failing: HashSet<String>,
    fail_queries: bool,
    pub actions: Vec<Action>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, selector: &str) {
        self.visible.insert(selector.to_string());
        self.present.insert(selector.to_string());
    }

    pub fn hide(&mut self, selector: &str) {
        self.visible.remove(selector);
    }

    /// Element exists in the DOM but is not visible.
    pub fn mark_present(&mut self, selector: &str) {
        self.present.insert(selector.to_string());
    }

    /// Set the visible texts for a selector (and make it visible).
    pub fn set_texts(&mut self, selector: &str, texts: &[&str]) {
        self.apply(set_texts(selector, texts));
    }

    /// Apply `effects` as soon as `selector` is clicked.
    pub fn on_click(&mut self, selector: &str, effects: Vec<Effect>) {
        self.click_effects
            .entry(selector.to_string())
            .or_default()
            .extend(effects);
    }

    /// After `selector` is clicked, apply `effects` once `queries` further
    /// element queries have been issued.
    pub fn on_click_delayed(&mut self, selector: &str, queries: usize, effects: Vec<Effect>) {
        let entry = self.click_delayed.entry(selector.to_string()).or_default();
        for effect in effects {
            entry.push((queries, effect));
        }
    }

    /// Apply `effect` once `queries` element queries have been issued.
    pub fn after_queries(&mut self, queries: usize, effect: Effect) {
        self.delayed.push((queries, effect));
    }

    /// Make fill/click/check/select against `selector` fail the way the
    /// driver does for a missing element.
    pub fn fail_interactions_with(&mut self, selector: &str) {
        self.failing.insert(selector.to_string());
    }

    /// Make every query return an error, as when the driver has died.
    pub fn fail_all_queries(&mut self) {
        self.fail_queries = true;
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Show(selector) => {
                self.visible.insert(selector.clone());
                self.present.insert(selector);
            }
            Effect::Hide(selector) => {
                self.visible.remove(&selector);
            }
            Effect::SetTexts(selector, texts) => {
                self.visible.insert(selector.clone());
                self.present.insert(selector.clone());
                self.texts.insert(selector, texts);
            }
        }
    }

    /// One query tick: fire delayed effects whose countdown has elapsed.
    fn tick(&mut self) {
        let mut due = Vec::new();
        let mut remaining = Vec::new();
        for (count, effect) in std::mem::take(&mut self.delayed) {
            if count <= 1 {
                due.push(effect);
            } else {
                remaining.push((count - 1, effect));
            }
        }
        self.delayed = remaining;
        for effect in due {
            self.apply(effect);
        }
    }

    fn interact(&mut self, command: &str, selector: &str) -> Result<(), PageError> {
        if self.failing.contains(selector) {
            return Err(PageError::DriverCommand {
                command: command.to_string(),
                error: format!("no element matches '{}'", selector),
            });
        }
        Ok(())
    }

    fn query_guard(&mut self, command: &str) -> Result<(), PageError> {
        self.tick();
        if self.fail_queries {
            return Err(PageError::DriverIo(format!(
                "driver died before '{}'",
                command
            )));
        }
        Ok(())
    }
}

impl Browser for FakeBrowser {
    fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        self.actions.push(Action::Navigate(url.to_string()));
        Ok(())
    }

    fn is_visible(&mut self, selector: &str) -> Result<bool, PageError> {
        self.query_guard("query_visible")?;
        Ok(self.visible.contains(selector))
    }

    fn is_present(&mut self, selector: &str) -> Result<bool, PageError> {
        self.query_guard("query_present")?;
        Ok(self.present.contains(selector))
    }

    fn texts(&mut self, selector: &str) -> Result<Vec<String>, PageError> {
        self.query_guard("query_texts")?;
        Ok(self.texts.get(selector).cloned().unwrap_or_default())
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), PageError> {
        self.interact("fill", selector)?;
        self.actions
            .push(Action::Fill(selector.to_string(), value.to_string()));
        Ok(())
    }

    fn click(&mut self, selector: &str) -> Result<(), PageError> {
        self.interact("click", selector)?;
        self.actions.push(Action::Click(selector.to_string()));

        if let Some(effects) = self.click_effects.remove(selector) {
            for effect in effects {
                self.apply(effect);
            }
        }
        if let Some(delayed) = self.click_delayed.remove(selector) {
            self.delayed.extend(delayed);
        }
        Ok(())
    }

    fn check(&mut self, selector: &str) -> Result<(), PageError> {
        self.interact("check", selector)?;
        self.actions.push(Action::Check(selector.to_string()));
        Ok(())
    }

    fn select_option(&mut self, selector: &str, value: &str) -> Result<(), PageError> {
        self.interact("select", selector)?;
        self.actions
            .push(Action::Select(selector.to_string(), value.to_string()));
        Ok(())
    }
}

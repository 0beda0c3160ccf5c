use crate::browser::driver::Browser;
use crate::browser::wait::{WaitConfig, wait_for};
use crate::error::PageError;

/// The enrolled-courses listing, the dashboard's stable landmark.
const MY_COURSES_SECTION: &str = "section.my-courses";

/// The student dashboard reached after authenticating or registering.
///
/// Only the readiness contract is modeled here; course interactions live
/// with the scenarios that need them.
pub struct DashboardPage<'b, B: Browser> {
    browser: &'b mut B,
    base_url: String,
    wait: WaitConfig,
}

impl<'b, B: Browser> DashboardPage<'b, B> {
    pub fn new(browser: &'b mut B, base_url: &str) -> Self {
        Self {
            browser,
            base_url: base_url.to_string(),
            wait: WaitConfig::default(),
        }
    }

    /// Override the wait budget used by `wait_for_page`.
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    pub fn url(&self) -> String {
        format!("{}/dashboard", self.base_url)
    }

    /// Whether the dashboard has rendered. Fails soft on driver errors.
    pub fn is_loaded(&mut self) -> bool {
        self.browser.is_visible(MY_COURSES_SECTION).unwrap_or(false)
    }

    /// Block until the dashboard has rendered or the wait budget expires.
    pub fn wait_for_page(&mut self) -> Result<(), PageError> {
        let wait = self.wait;
        wait_for(|| self.is_loaded(), wait, "Dashboard page to load")
    }

    /// Navigate to the dashboard and block until it has rendered.
    pub fn visit(&mut self) -> Result<(), PageError> {
        let url = self.url();
        self.browser.navigate(&url)?;
        self.wait_for_page()
    }
}

use tracing::debug;

use crate::browser::driver::Browser;
use crate::browser::wait::{WaitConfig, wait_for};
use crate::error::PageError;
use crate::pages::dashboard::DashboardPage;

const SUB_TITLE: &str = "span.title-sub";
const EMAIL_INPUT: &str = "input#email";
const PASSWORD_INPUT: &str = "input#password";
const USERNAME_INPUT: &str = "input#username";
const FULL_NAME_INPUT: &str = "input#name";
const TOS_CHECKBOX: &str = "input#tos-yes";
const HONOR_CODE_CHECKBOX: &str = "input#honorcode-yes";
const COUNTRY_SELECT: &str = "#country";
const SUBMIT_BUTTON: &str = "button#submit";

/// The legacy single-form registration page, reached while enrolling in a
/// specific course.
///
/// The course identifier is an external contract (currently
/// "org/number/run") and is embedded in the URL verbatim; this page
/// predates encoded enrollment parameters.
pub struct RegistrationPage<'b, B: Browser> {
    browser: &'b mut B,
    base_url: String,
    course_id: String,
    wait: WaitConfig,
}

impl<'b, B: Browser> RegistrationPage<'b, B> {
    pub fn new(browser: &'b mut B, base_url: &str, course_id: &str) -> Self {
        Self {
            browser,
            base_url: base_url.to_string(),
            course_id: course_id.to_string(),
            wait: WaitConfig::default(),
        }
    }

    /// Override the wait budget used by `wait_for_page` and `submit`.
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// URL for the registration page of a course.
    pub fn url(&self) -> String {
        format!(
            "{base}/register?course_id={course_id}&enrollment_action=enroll",
            base = self.base_url,
            course_id = self.course_id,
        )
    }

    /// Whether any visible sub-title mentions registration.
    /// Fails soft to false while the page is still rendering.
    pub fn is_loaded(&mut self) -> bool {
        self.browser
            .texts(SUB_TITLE)
            .unwrap_or_default()
            .iter()
            .any(|title| title.to_lowercase().contains("register"))
    }

    /// Block until the page has rendered or the wait budget expires.
    pub fn wait_for_page(&mut self) -> Result<(), PageError> {
        let wait = self.wait;
        wait_for(|| self.is_loaded(), wait, "Registration page to load")
    }

    /// Navigate to the page and block until it has rendered.
    pub fn visit(&mut self) -> Result<(), PageError> {
        let url = self.url();
        self.browser.navigate(&url)?;
        self.wait_for_page()
    }

    /// Fill in registration info.
    ///
    /// Marks the terms-of-service and honor-code checkboxes and selects
    /// the default country. No validation is performed; invalid input is
    /// the target application's concern.
    pub fn fill_registration_info(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
        full_name: &str,
    ) -> Result<(), PageError> {
        debug!(username, "filling registration form");
        self.browser.fill(EMAIL_INPUT, email)?;
        self.browser.fill(PASSWORD_INPUT, password)?;
        self.browser.fill(USERNAME_INPUT, username)?;
        self.browser.fill(FULL_NAME_INPUT, full_name)?;
        self.browser.check(TOS_CHECKBOX)?;
        self.browser.check(HONOR_CODE_CHECKBOX)?;
        self.browser.select_option(COUNTRY_SELECT, "US")?;
        Ok(())
    }

    /// Submit registration info to create an account.
    ///
    /// The next page is the dashboard; this blocks until it loads and
    /// returns its page object, or fails with the dashboard's wait-timeout
    /// error.
    pub fn submit(self) -> Result<DashboardPage<'b, B>, PageError> {
        let RegistrationPage {
            browser,
            base_url,
            wait,
            ..
        } = self;

        browser.click(SUBMIT_BUTTON)?;

        let mut dashboard = DashboardPage::new(browser, &base_url).with_wait(wait);
        dashboard.wait_for_page()?;
        Ok(dashboard)
    }
}

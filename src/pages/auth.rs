use tracing::debug;
use url::form_urlencoded;

use crate::browser::driver::Browser;
use crate::browser::wait::{WaitConfig, wait_for, wait_until};
use crate::error::PageError;
use crate::pages::page_model::{FormState, LoginFields, RegistrationFields};

const REGISTER_OPTION: &str = "#register-option";
const LOGIN_OPTION: &str = "#login-option";
const FORM_TOGGLE_UNCHECKED: &str = ".form-toggle:not(:checked)";

const REGISTER_EMAIL: &str = "#register-email";
const REGISTER_PASSWORD: &str = "#register-password";
const REGISTER_USERNAME: &str = "#register-username";
const REGISTER_FULL_NAME: &str = "#register-name";
const REGISTER_COUNTRY: &str = "#register-country";
const REGISTER_HONOR_CODE: &str = "#register-honor_code";
const REGISTER_BUTTON: &str = ".register-button";

const LOGIN_EMAIL: &str = "#login-email";
const LOGIN_PASSWORD: &str = "#login-password";
const LOGIN_REMEMBER: &str = "#login-remember";
const LOGIN_BUTTON: &str = ".login-button";

const FORGOT_PASSWORD_LINK: &str = "a.forgot-password";
const RESET_EMAIL: &str = "#password-reset-email";
const RESET_BUTTON: &str = "button.js-reset";
const RESET_MARKER: &str = ".js-reset";
const RESET_SUCCESS: &str = ".js-reset-success";

const ERROR_ITEMS: &str = ".submission-error li";
const SUCCESS_CONTAINER: &str = ".submission-success";
const SUCCESS_HEADING: &str = ".submission-success h4";

/// The combined login / registration / password-reset page, available from
/// either `/account/login` or `/account/register`.
///
/// Users can reach this page while attempting to enroll in a course, in
/// which case they are auto-enrolled once they authenticate. The page
/// toggles between its forms without a full reload, so every state
/// transition is observed by polling.
pub struct CombinedAuthPage<'b, B: Browser> {
    browser: &'b mut B,
    base_url: String,
    start_page: FormState,
    course_id: Option<String>,
    wait: WaitConfig,
}

impl<'b, B: Browser> CombinedAuthPage<'b, B> {
    /// `start_page` picks which form the URL lands on and must be either
    /// "register" or "login". The actual initial form is whatever the
    /// rendered page shows; it is not asserted here.
    pub fn new(
        browser: &'b mut B,
        base_url: &str,
        start_page: &str,
        course_id: Option<&str>,
    ) -> Result<Self, PageError> {
        let start_page = match start_page {
            "register" => FormState::Register,
            "login" => FormState::Login,
            other => return Err(PageError::InvalidStartPage(other.to_string())),
        };

        Ok(Self {
            browser,
            base_url: base_url.to_string(),
            start_page,
            course_id: course_id.map(|id| id.to_string()),
            wait: WaitConfig::default(),
        })
    }

    /// Override the wait budget used by all blocking operations.
    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// URL for the combined login/registration page.
    ///
    /// Enrollment parameters are appended, URL-encoded, only when a course
    /// identifier was supplied.
    pub fn url(&self) -> String {
        let mut url = format!("{}/account/{}", self.base_url, self.start_page.as_str());

        if let Some(course_id) = &self.course_id {
            let params = form_urlencoded::Serializer::new(String::new())
                .append_pair("course_id", course_id)
                .append_pair("enrollment_action", "enroll")
                .finish();
            url.push('?');
            url.push_str(&params);
        }

        url
    }

    /// Whether the combined page has loaded: both toggle controls exist
    /// and one of the forms is recognizable. Never raises.
    pub fn is_loaded(&mut self) -> bool {
        let register_option = self.browser.is_present(REGISTER_OPTION).unwrap_or(false);
        let login_option = self.browser.is_present(LOGIN_OPTION).unwrap_or(false);
        register_option && login_option && self.current_form() != FormState::None
    }

    /// Block until the page has rendered or the wait budget expires.
    pub fn wait_for_page(&mut self) -> Result<(), PageError> {
        let wait = self.wait;
        wait_for(|| self.is_loaded(), wait, "Combined auth page to load")
    }

    /// Navigate to the page and block until it has rendered.
    pub fn visit(&mut self) -> Result<(), PageError> {
        let url = self.url();
        self.browser.navigate(&url)?;
        self.wait_for_page()
    }

    /// The form currently visible to the user.
    ///
    /// Checked in fixed priority order: register, then login, then
    /// password-reset (submit control or its success indicator). Safe to
    /// call while the page is in a transient state; lookup failures count
    /// as not-visible.
    pub fn current_form(&mut self) -> FormState {
        if self.visible(REGISTER_BUTTON) {
            FormState::Register
        } else if self.visible(LOGIN_BUTTON) {
            FormState::Login
        } else if self.visible(RESET_MARKER) || self.visible(RESET_SUCCESS) {
            FormState::PasswordReset
        } else {
            FormState::None
        }
    }

    /// Toggle between the login and registration forms.
    pub fn toggle_form(&mut self) -> Result<(), PageError> {
        let old_form = self.current_form();
        debug!(from = %old_form, "toggling form");

        self.browser.click(FORM_TOGGLE_UNCHECKED)?;

        let wait = self.wait;
        wait_for(
            || self.current_form() != old_form,
            wait,
            "Finish toggling to the other form",
        )
    }

    /// Fill in and submit the registration form.
    ///
    /// Requires that the register form is visible. Does NOT wait for the
    /// next page to load; the caller should wait for the next page, or for
    /// errors if that's the expected behavior.
    pub fn register(&mut self, fields: &RegistrationFields) -> Result<(), PageError> {
        self.browser.fill(REGISTER_EMAIL, &fields.email)?;
        self.browser.fill(REGISTER_PASSWORD, &fields.password)?;
        self.browser.fill(REGISTER_USERNAME, &fields.username)?;
        self.browser.fill(REGISTER_FULL_NAME, &fields.full_name)?;

        if let Some(country) = &fields.country {
            self.browser.select_option(REGISTER_COUNTRY, country)?;
        }
        if fields.terms_of_service {
            self.browser.check(REGISTER_HONOR_CODE)?;
        }

        self.browser.click(REGISTER_BUTTON)
    }

    /// Fill in and submit the login form.
    ///
    /// Requires that the login form is visible. Non-blocking; same caller
    /// contract as `register`.
    pub fn login(&mut self, fields: &LoginFields) -> Result<(), PageError> {
        self.browser.fill(LOGIN_EMAIL, &fields.email)?;
        self.browser.fill(LOGIN_PASSWORD, &fields.password)?;

        if fields.remember_me {
            self.browser.check(LOGIN_REMEMBER)?;
        }

        self.browser.click(LOGIN_BUTTON)
    }

    /// Navigate to, fill in, and submit the password reset form.
    ///
    /// Requires that the login form is visible. There is no transition
    /// back from the reset form in this interface; the caller owns any
    /// further navigation.
    pub fn password_reset(&mut self, email: &str) -> Result<(), PageError> {
        let login_form = self.current_form();

        self.browser.click(FORGOT_PASSWORD_LINK)?;

        let wait = self.wait;
        wait_for(
            || self.current_form() != login_form,
            wait,
            "Finish toggling to the password reset form",
        )?;

        self.browser.fill(RESET_EMAIL, email)?;
        self.browser.click(RESET_BUTTON)
    }

    /// Errors currently displayed to the user, in document order.
    /// Empty when none are rendered. Never raises.
    pub fn errors(&mut self) -> Vec<String> {
        self.browser.texts(ERROR_ITEMS).unwrap_or_default()
    }

    /// Block until errors are visible, then return them.
    pub fn wait_for_errors(&mut self) -> Result<Vec<String>, PageError> {
        let wait = self.wait;
        wait_until(
            || {
                let errors = self.errors();
                if errors.is_empty() { None } else { Some(errors) }
            },
            wait,
            "Errors are visible",
        )
    }

    /// The success message displayed to the user, if any. Never raises.
    pub fn success(&mut self) -> Option<String> {
        if self.visible(SUCCESS_CONTAINER) {
            self.browser
                .texts(SUCCESS_HEADING)
                .unwrap_or_default()
                .into_iter()
                .next()
        } else {
            None
        }
    }

    /// Block until a success message is visible, then return it.
    pub fn wait_for_success(&mut self) -> Result<String, PageError> {
        let wait = self.wait;
        wait_until(|| self.success(), wait, "Success message is visible")
    }

    fn visible(&mut self, selector: &str) -> bool {
        self.browser.is_visible(selector).unwrap_or(false)
    }
}

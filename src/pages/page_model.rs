use std::fmt;

// ============================================================================
// Visible-form state of the combined login/registration page
// ============================================================================

/// Which form the combined page is currently showing.
///
/// Never stored; recomputed from the rendered page on each read. `None`
/// means no recognizable form was detected (page still loading, or the
/// target application is in a broken state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Login,
    Register,
    PasswordReset,
    None,
}

impl FormState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormState::Login => "login",
            FormState::Register => "register",
            FormState::PasswordReset => "password-reset",
            FormState::None => "none",
        }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Credential records
// ============================================================================

/// Input for the combined page's registration form.
///
/// Ephemeral: written into form fields and dropped, never persisted.
/// Field validity is the target application's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFields {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,

    /// Two-character country code; skipped when absent.
    pub country: Option<String>,

    /// When true, the honor code / terms of service box is checked.
    pub terms_of_service: bool,
}

/// Input for the combined page's login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFields {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl Default for LoginFields {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            remember_me: true,
        }
    }
}

impl LoginFields {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: true,
        }
    }
}

//! Page objects for an LMS's login and registration flows, driven through a
//! persistent browser session for end-to-end acceptance scenarios.
//!
//! Two UI surfaces are modeled: the legacy per-course registration page
//! (`RegistrationPage`) and the combined login/registration/password-reset
//! page (`CombinedAuthPage`). Both sit on the `Browser` trait and observe
//! asynchronous UI updates by polling (`browser::wait`).

pub mod browser;
pub mod cli;
pub mod error;
pub mod pages;

pub use browser::driver::Browser;
pub use browser::session::BrowserSession;
pub use browser::wait::{WaitConfig, wait_for, wait_until};
pub use error::PageError;
pub use pages::auth::CombinedAuthPage;
pub use pages::dashboard::DashboardPage;
pub use pages::page_model::{FormState, LoginFields, RegistrationFields};
pub use pages::register::RegistrationPage;

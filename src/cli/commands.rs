use crate::browser::session::BrowserSession;
use crate::browser::wait::wait_until;
use crate::cli::config::AppConfig;
use crate::error::PageError;
use crate::pages::auth::CombinedAuthPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::page_model::{LoginFields, RegistrationFields};
use crate::pages::register::RegistrationPage;

/// What the combined page showed after a submission.
enum Feedback {
    Success(String),
    Errors(Vec<String>),
}

// ============================================================================
// register subcommand (legacy per-course page)
// ============================================================================

pub fn cmd_register(
    config: &AppConfig,
    course_id: &str,
    email: &str,
    password: &str,
    username: &str,
    full_name: &str,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = BrowserSession::launch_with_script(&config.driver.script)?;
    let wait = config.wait.to_wait_config();

    let mut page = RegistrationPage::new(&mut session, &config.base_url, course_id).with_wait(wait);

    if verbose > 0 {
        eprintln!("Visiting {}", page.url());
    }

    page.visit()?;
    page.fill_registration_info(email, password, username, full_name)?;
    let dashboard = page.submit()?;

    println!("Account created; dashboard loaded at {}", dashboard.url());

    session.quit()?;
    Ok(())
}

// ============================================================================
// signup subcommand (combined page)
// ============================================================================

/// Register through the combined page. Returns whether the application
/// accepted the submission.
pub fn cmd_signup(
    config: &AppConfig,
    fields: &RegistrationFields,
    course_id: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut session = BrowserSession::launch_with_script(&config.driver.script)?;
    let wait = config.wait.to_wait_config();

    let mut page =
        CombinedAuthPage::new(&mut session, &config.base_url, "register", course_id)?
            .with_wait(wait);

    if verbose > 0 {
        eprintln!("Visiting {}", page.url());
    }

    page.visit()?;
    page.register(fields)?;

    let feedback = wait_until(
        || {
            if let Some(message) = page.success() {
                return Some(Feedback::Success(message));
            }
            let errors = page.errors();
            if errors.is_empty() {
                None
            } else {
                Some(Feedback::Errors(errors))
            }
        },
        wait,
        "Submission feedback is visible",
    )?;

    let accepted = report_feedback("Registration", feedback);
    session.quit()?;
    Ok(accepted)
}

// ============================================================================
// signin subcommand (combined page)
// ============================================================================

/// Sign in through the combined page. Returns whether the dashboard loaded.
pub fn cmd_signin(
    config: &AppConfig,
    fields: &LoginFields,
    course_id: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut session = BrowserSession::launch_with_script(&config.driver.script)?;
    let wait = config.wait.to_wait_config();

    {
        let mut page =
            CombinedAuthPage::new(&mut session, &config.base_url, "login", course_id)?
                .with_wait(wait);

        if verbose > 0 {
            eprintln!("Visiting {}", page.url());
        }

        page.visit()?;
        page.login(fields)?;
    }

    // A successful login navigates away; a rejected one re-renders the
    // form with errors.
    let mut dashboard = DashboardPage::new(&mut session, &config.base_url).with_wait(wait);
    match dashboard.wait_for_page() {
        Ok(()) => {
            println!("Signed in; dashboard loaded at {}", dashboard.url());
            session.quit()?;
            Ok(true)
        }
        Err(PageError::WaitTimeout { .. }) => {
            let mut page = CombinedAuthPage::new(&mut session, &config.base_url, "login", None)?;
            let errors = page.errors();
            if errors.is_empty() {
                eprintln!("Sign-in produced neither a dashboard nor errors");
            } else {
                eprintln!("Sign-in rejected:");
                for error in &errors {
                    eprintln!("  - {}", error);
                }
            }
            session.quit()?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// reset-password subcommand (combined page)
// ============================================================================

/// Request a password reset. Returns whether the success message appeared.
pub fn cmd_reset_password(
    config: &AppConfig,
    email: &str,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut session = BrowserSession::launch_with_script(&config.driver.script)?;
    let wait = config.wait.to_wait_config();

    let mut page =
        CombinedAuthPage::new(&mut session, &config.base_url, "login", None)?.with_wait(wait);

    if verbose > 0 {
        eprintln!("Visiting {}", page.url());
    }

    page.visit()?;
    page.password_reset(email)?;

    let accepted = match page.wait_for_success() {
        Ok(message) => {
            println!("Password reset requested: {}", message);
            true
        }
        Err(PageError::WaitTimeout { .. }) => {
            let errors = page.errors();
            if errors.is_empty() {
                eprintln!("Password reset produced no feedback");
            } else {
                eprintln!("Password reset rejected:");
                for error in &errors {
                    eprintln!("  - {}", error);
                }
            }
            false
        }
        Err(e) => return Err(e.into()),
    };

    session.quit()?;
    Ok(accepted)
}

fn report_feedback(flow: &str, feedback: Feedback) -> bool {
    match feedback {
        Feedback::Success(message) => {
            println!("{} succeeded: {}", flow, message);
            true
        }
        Feedback::Errors(errors) => {
            eprintln!("{} rejected:", flow);
            for error in &errors {
                eprintln!("  - {}", error);
            }
            false
        }
    }
}

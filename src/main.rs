use clap::Parser;

use auth_pages::cli::commands::{cmd_register, cmd_reset_password, cmd_signin, cmd_signup};
use auth_pages::cli::config::{Cli, Commands, load_config};
use auth_pages::pages::page_model::{LoginFields, RegistrationFields};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = load_config(cli.config.as_deref());
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let accepted = match cli.command {
        Commands::Register {
            course_id,
            email,
            password,
            username,
            full_name,
        } => {
            cmd_register(
                &config,
                &course_id,
                &email,
                &password,
                &username,
                &full_name,
                cli.verbose,
            )?;
            true
        }
        Commands::Signup {
            email,
            password,
            username,
            full_name,
            country,
            accept_terms,
            course_id,
        } => {
            let fields = RegistrationFields {
                email,
                password,
                username,
                full_name,
                country,
                terms_of_service: accept_terms,
            };
            cmd_signup(&config, &fields, course_id.as_deref(), cli.verbose)?
        }
        Commands::Signin {
            email,
            password,
            remember,
            course_id,
        } => {
            let fields = LoginFields {
                email,
                password,
                remember_me: remember,
            };
            cmd_signin(&config, &fields, course_id.as_deref(), cli.verbose)?
        }
        Commands::ResetPassword { email } => {
            cmd_reset_password(&config, &email, cli.verbose)?
        }
    };

    if !accepted {
        std::process::exit(1);
    }

    Ok(())
}

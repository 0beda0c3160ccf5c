use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::browser::session::DEFAULT_DRIVER_SCRIPT;
use crate::browser::wait::WaitConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "auth-pages",
    version,
    about = "Smoke flows for LMS login and registration pages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the target LMS (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to config file (default: auth-pages.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account through the legacy per-course registration page
    Register {
        /// Course to enroll in, e.g. "org/number/run"
        #[arg(long)]
        course_id: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        full_name: String,
    },

    /// Create an account through the combined auth page
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        full_name: String,

        /// Two-character country code
        #[arg(long)]
        country: Option<String>,

        /// Agree to the terms of service and honor code
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        accept_terms: bool,

        /// Enroll in this course after authenticating
        #[arg(long)]
        course_id: Option<String>,
    },

    /// Sign in through the combined auth page
    Signin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Check the "remember me" box
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        remember: bool,

        /// Enroll in this course after authenticating
        #[arg(long)]
        course_id: Option<String>,
    },

    /// Request a password reset through the combined auth page
    ResetPassword {
        #[arg(long)]
        email: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `auth-pages.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub driver: DriverConfig,

    #[serde(default)]
    pub wait: WaitSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            driver: DriverConfig::default(),
            wait: WaitSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Node.js driver script spawned by BrowserSession.
    #[serde(default = "default_driver_script")]
    pub script: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            script: default_driver_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitSettings {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WaitSettings {
    pub fn to_wait_config(&self) -> WaitConfig {
        WaitConfig::new(
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }
}

// Serde default helpers
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_driver_script() -> String {
    DEFAULT_DRIVER_SCRIPT.to_string()
}
fn default_timeout_ms() -> u64 {
    30_000
}
fn default_poll_interval_ms() -> u64 {
    100
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("auth-pages.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

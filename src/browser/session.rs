use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::browser::driver::Browser;
use crate::error::PageError;

/// Default driver script, relative to the working directory of the run.
pub const DEFAULT_DRIVER_SCRIPT: &str = "driver/browser_server.js";

/// Request sent to the driver script over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DriverRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Action {
        cmd: &'static str,
        action: &'static str,
        selector: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Query {
        cmd: &'static str,
        selector: String,
    },
    CurrentUrl {
        cmd: &'static str,
    },
    Quit {
        cmd: &'static str,
    },
}

impl DriverRequest {
    pub fn navigate(url: &str) -> Self {
        DriverRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn fill(selector: &str, value: &str) -> Self {
        DriverRequest::Action {
            cmd: "action",
            action: "fill",
            selector: selector.to_string(),
            value: Some(value.to_string()),
        }
    }

    pub fn click(selector: &str) -> Self {
        DriverRequest::Action {
            cmd: "action",
            action: "click",
            selector: selector.to_string(),
            value: None,
        }
    }

    pub fn check(selector: &str) -> Self {
        DriverRequest::Action {
            cmd: "action",
            action: "check",
            selector: selector.to_string(),
            value: None,
        }
    }

    pub fn select_option(selector: &str, value: &str) -> Self {
        DriverRequest::Action {
            cmd: "action",
            action: "select",
            selector: selector.to_string(),
            value: Some(value.to_string()),
        }
    }

    pub fn query_visible(selector: &str) -> Self {
        DriverRequest::Query {
            cmd: "query_visible",
            selector: selector.to_string(),
        }
    }

    pub fn query_present(selector: &str) -> Self {
        DriverRequest::Query {
            cmd: "query_present",
            selector: selector.to_string(),
        }
    }

    pub fn query_texts(selector: &str) -> Self {
        DriverRequest::Query {
            cmd: "query_texts",
            selector: selector.to_string(),
        }
    }

    pub fn current_url() -> Self {
        DriverRequest::CurrentUrl { cmd: "current_url" }
    }

    pub fn quit() -> Self {
        DriverRequest::Quit { cmd: "quit" }
    }

    /// Command name used in error reporting.
    fn name(&self) -> &'static str {
        match self {
            DriverRequest::Navigate { .. } => "navigate",
            DriverRequest::Action { action, .. } => action,
            DriverRequest::Query { cmd, .. } => cmd,
            DriverRequest::CurrentUrl { .. } => "current_url",
            DriverRequest::Quit { .. } => "quit",
        }
    }
}

/// Response read from the driver script over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub present: Option<bool>,
    #[serde(default)]
    pub texts: Option<Vec<String>>,
}

/// A persistent browser session backed by a Node.js driver process.
///
/// Launches a long-lived process that keeps a headless browser open.
/// Commands are sent as NDJSON over stdin, responses read from stdout,
/// one line each way per command.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    current_url: Option<String>,
}

impl BrowserSession {
    /// Launch a session using the default driver script path.
    pub fn launch() -> Result<Self, PageError> {
        Self::launch_with_script(DEFAULT_DRIVER_SCRIPT)
    }

    /// Launch a session by spawning `node {script}` and waiting for the
    /// ready signal.
    pub fn launch_with_script(script: &str) -> Result<Self, PageError> {
        let mut child = Command::new("node")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PageError::DriverSpawn {
                script: script.to_string(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PageError::DriverIo("failed to capture driver stdin".into()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PageError::DriverIo("failed to capture driver stdout".into()))?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| PageError::DriverIo(format!("failed to read ready signal: {}", e)))?;

        let response: DriverResponse =
            serde_json::from_str(line.trim()).map_err(|e| PageError::DriverJson {
                context: "driver ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(PageError::DriverCommand {
                command: "launch".into(),
                error: "did not receive ready signal from driver".into(),
            });
        }

        info!(script, "browser driver ready");

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            current_url: None,
        })
    }

    /// Send a request and read the response line.
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, PageError> {
        let json = serde_json::to_string(request).map_err(|e| PageError::DriverJson {
            context: "DriverRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .map_err(|e| PageError::DriverIo(format!("failed to write to driver stdin: {}", e)))?;

        self.stdin
            .flush()
            .map_err(|e| PageError::DriverIo(format!("failed to flush driver stdin: {}", e)))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| PageError::DriverIo(format!("failed to read from driver stdout: {}", e)))?;

        if line.trim().is_empty() {
            return Err(PageError::DriverIo(
                "empty response from driver (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| PageError::DriverJson {
            context: "driver response".into(),
            source: e,
        })
    }

    /// Send a request and verify the driver reported success.
    fn send_ok(&mut self, request: &DriverRequest) -> Result<DriverResponse, PageError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(PageError::DriverCommand {
                command: request.name().to_string(),
                error: response.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Ask the driver for the tab's current URL.
    pub fn current_url(&mut self) -> Result<String, PageError> {
        let response = self.send_ok(&DriverRequest::current_url())?;
        let url = response.url.ok_or_else(|| PageError::DriverCommand {
            command: "current_url".into(),
            error: "no url in response".into(),
        })?;
        self.current_url = Some(url.clone());
        Ok(url)
    }

    /// Last known URL (cached, no driver round-trip).
    pub fn last_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Quit the driver. Best-effort: a dead process is not an error.
    pub fn quit(&mut self) -> Result<(), PageError> {
        let _ = self.send(&DriverRequest::quit());
        let _ = self.child.wait();
        Ok(())
    }
}

impl Browser for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        debug!(url, "navigate");
        self.send_ok(&DriverRequest::navigate(url))?;
        self.current_url = Some(url.to_string());
        Ok(())
    }

    fn is_visible(&mut self, selector: &str) -> Result<bool, PageError> {
        let response = self.send_ok(&DriverRequest::query_visible(selector))?;
        Ok(response.visible.unwrap_or(false))
    }

    fn is_present(&mut self, selector: &str) -> Result<bool, PageError> {
        let response = self.send_ok(&DriverRequest::query_present(selector))?;
        Ok(response.present.unwrap_or(false))
    }

    fn texts(&mut self, selector: &str) -> Result<Vec<String>, PageError> {
        let response = self.send_ok(&DriverRequest::query_texts(selector))?;
        Ok(response.texts.unwrap_or_default())
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), PageError> {
        debug!(selector, "fill");
        self.send_ok(&DriverRequest::fill(selector, value))?;
        Ok(())
    }

    fn click(&mut self, selector: &str) -> Result<(), PageError> {
        debug!(selector, "click");
        self.send_ok(&DriverRequest::click(selector))?;
        Ok(())
    }

    fn check(&mut self, selector: &str) -> Result<(), PageError> {
        debug!(selector, "check");
        self.send_ok(&DriverRequest::check(selector))?;
        Ok(())
    }

    fn select_option(&mut self, selector: &str, value: &str) -> Result<(), PageError> {
        debug!(selector, value, "select option");
        self.send_ok(&DriverRequest::select_option(selector, value))?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = self.quit();
    }
}

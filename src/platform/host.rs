//! Read-only host queries for the runtime's platform-services interface

use std::path::Path;

use crate::platform::environment::ProcessEnvironment;

/// Outcome of presenting a message to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The message was shown, or written to the log on a headless host
    Presented,
}

/// Host queries backed by the captured process environment
#[derive(Debug, Clone, Copy)]
pub struct HostQuery<'a> {
    env: &'a ProcessEnvironment,
}

impl<'a> HostQuery<'a> {
    pub fn new(env: &'a ProcessEnvironment) -> Self {
        Self { env }
    }

    /// Presents a message box
    ///
    /// The target has no dialog surface, so the message is framed and written
    /// to the diagnostic stream. Always reports success.
    pub fn present_message(&self, title: &str, body: &str) -> MessageOutcome {
        tracing::debug!(title, "presenting message box");
        eprintln!("{}", format_message_box(title, body));
        MessageOutcome::Presented
    }

    /// Opens a URL in an external browser
    ///
    /// # Returns
    /// Always false: the target has no browser. Callers must read false as
    /// "not supported", not as a transient failure.
    pub fn open_external_link(&self, url: &str) -> bool {
        tracing::debug!(url, "external links are not supported");
        false
    }

    /// Path used to invoke the process, verbatim from the start-up arguments
    pub fn executable_path(&self) -> &'a str {
        self.env.executable()
    }

    /// Directory for user data, the working directory captured at start-up
    pub fn user_data_directory(&self) -> &'a Path {
        self.env.working_dir()
    }
}

fn format_message_box(title: &str, body: &str) -> String {
    format!("***** MSGBOX *****\n{title}\n{body}\n******************")
}

//! Labelled developer diagnostics on top of the `log` facade.
//!
//! Each service owns a `Logger` carrying an explicit label instead of
//! inspecting the call stack. Output is purely diagnostic: nothing in the page
//! branches on whether a line was written. In the browser the facade is wired
//! to the devtools console by `console_log`.

#[cfg(test)]
#[path = "logger_test.rs"]
mod logger_test;

use std::fmt::Display;

/// Log target shared by every page-shell logger.
pub const TARGET: &str = "page_shell";

/// Severity of a diagnostic line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    /// An operation finished as intended. Emitted at `info` severity.
    Success,
    Warn,
    Error,
}

impl Level {
    /// Map onto the `log` crate's severity.
    #[must_use]
    pub fn as_log(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info | Self::Success => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }

    /// Short marker printed in front of the message.
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Success => "ok",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A labelled handle onto the diagnostic log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Logger {
    label: &'static str,
    enabled: bool,
}

impl Logger {
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self { label, enabled: true }
    }

    /// A logger that swallows every call.
    #[must_use]
    pub const fn disabled(label: &'static str) -> Self {
        Self { label, enabled: false }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Same enablement, different label.
    #[must_use]
    pub fn with_label(&self, label: &'static str) -> Self {
        Self { label, enabled: self.enabled }
    }

    /// Render a line exactly as it is handed to the `log` facade.
    #[must_use]
    pub fn format(&self, level: Level, message: impl Display) -> String {
        format!("[{}] {}: {message}", self.label, level.badge())
    }

    pub fn emit(&self, level: Level, message: impl Display) {
        if !self.enabled {
            return;
        }
        log::log!(target: TARGET, level.as_log(), "{}", self.format(level, message));
    }

    pub fn debug(&self, message: impl Display) {
        self.emit(Level::Debug, message);
    }

    pub fn info(&self, message: impl Display) {
        self.emit(Level::Info, message);
    }

    pub fn success(&self, message: impl Display) {
        self.emit(Level::Success, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(Level::Warn, message);
    }

    pub fn error(&self, message: impl Display) {
        self.emit(Level::Error, message);
    }
}

/// Install the console logger and panic hook. Safe to call more than once.
#[cfg(feature = "csr")]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::debug!(target: TARGET, "console logger already installed: {err}");
    }
}

//! Page configuration: storage key, default color, timing, and the markup
//! contract's selectors.
//!
//! DESIGN
//! ======
//! Every field has a default that matches the markup in `index.html` and the
//! `App` component, so a page without a config block just works. A page may
//! override any subset through an inline JSON block:
//!
//! ```html
//! <script type="application/json" id="page-config">{"ack_delay_ms": 250}</script>
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::util::color::is_hex_color;

/// Element id of the optional inline JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

/// localStorage key holding the persisted background color.
pub const STORAGE_KEY: &str = "page-shell:background";

/// Background used when nothing valid is persisted.
pub const DEFAULT_COLOR: &str = "#111";

/// Delay between confirming a color change and the acknowledgment dialog.
pub const ACK_DELAY_MS: u32 = 400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("default color is not a hex color: {0}")]
    InvalidColor(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub storage_key: String,
    pub default_color: String,
    pub ack_delay_ms: u32,
    /// Singleton overlay root.
    pub overlay_selector: String,
    /// Slot inside the overlay that receives dialog content.
    pub content_selector: String,
    /// Dedicated close control inside the overlay.
    pub close_selector: String,
    pub trigger_selector: String,
    /// Region whose background the demo repaints.
    pub region_selector: String,
    pub alert_template: String,
    pub confirm_template: String,
    /// Class marking the overlay visible.
    pub open_class: String,
    /// Class on the document element that suspends background scrolling.
    pub scroll_lock_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            default_color: DEFAULT_COLOR.to_owned(),
            ack_delay_ms: ACK_DELAY_MS,
            overlay_selector: "[data-modal]".to_owned(),
            content_selector: ".modal__content".to_owned(),
            close_selector: ".modal__close".to_owned(),
            trigger_selector: "#change-color".to_owned(),
            region_selector: "#app".to_owned(),
            alert_template: "modal-alert".to_owned(),
            confirm_template: "modal-confirm".to_owned(),
            open_class: "modal--open".to_owned(),
            scroll_lock_class: "scroll-locked".to_owned(),
        }
    }
}

impl PageConfig {
    /// Parse a (possibly partial) JSON override. Missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON or unknown fields and
    /// `InvalidColor` when `default_color` is not `#rgb`/`#rrggbb`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if !is_hex_color(&config.default_color) {
            return Err(ConfigError::InvalidColor(config.default_color));
        }
        Ok(config)
    }

    #[must_use]
    pub fn ack_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.ack_delay_ms))
    }
}

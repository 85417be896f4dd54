//! Page enhancement configuration
//!
//! Every field has a default matching the stock page markup, so an empty
//! TOML table is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_slider::SliderSelectors;

/// Top-level configuration for [`PageEnhancer`](crate::PageEnhancer)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default)]
    pub slider: SliderSelectors,
    #[serde(default)]
    pub newsletter: NewsletterSelectors,
    #[serde(default)]
    pub footer: FooterSelectors,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Element ids of the newsletter form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsletterSelectors {
    #[serde(default = "default_form")]
    pub form: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_form() -> String {
    "newsletter".to_string()
}

fn default_email() -> String {
    "email".to_string()
}

fn default_status() -> String {
    "newsletter-status".to_string()
}

impl Default for NewsletterSelectors {
    fn default() -> Self {
        Self {
            form: default_form(),
            email: default_email(),
            status: default_status(),
        }
    }
}

/// Element id of the footer year
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FooterSelectors {
    #[serde(default = "default_year")]
    pub year: String,
}

fn default_year() -> String {
    "year".to_string()
}

impl Default for FooterSelectors {
    fn default() -> Self {
        Self {
            year: default_year(),
        }
    }
}

/// Rate limits and delays, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Minimum spacing of button refreshes while scrolling
    #[serde(default = "default_scroll_throttle_ms")]
    pub scroll_throttle_ms: u64,
    /// Quiet period after the last resize before refreshing
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    /// Simulated latency of the subscription endpoint
    #[serde(default = "default_subscribe_delay_ms")]
    pub subscribe_delay_ms: u64,
}

fn default_scroll_throttle_ms() -> u64 {
    100
}

fn default_resize_debounce_ms() -> u64 {
    200
}

fn default_subscribe_delay_ms() -> u64 {
    700
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: default_scroll_throttle_ms(),
            resize_debounce_ms: default_resize_debounce_ms(),
            subscribe_delay_ms: default_subscribe_delay_ms(),
        }
    }
}

impl TimingConfig {
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn subscribe_delay(&self) -> Duration {
        Duration::from_millis(self.subscribe_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_uses_defaults() {
        let config: PageConfig = toml::from_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.slider.container, "slider");
        assert_eq!(config.newsletter.status, "newsletter-status");
        assert_eq!(config.footer.year, "year");
        assert_eq!(config.timing.scroll_throttle(), Duration::from_millis(100));
        assert_eq!(config.timing.resize_debounce(), Duration::from_millis(200));
        assert_eq!(config.timing.subscribe_delay(), Duration::from_millis(700));
    }

    #[test]
    fn test_partial_override() {
        let config: PageConfig = toml::from_str(
            r#"
            [slider]
            container = "products"

            [timing]
            subscribe_delay_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.slider.container, "products");
        assert_eq!(config.slider.prev, "prevBtn");
        assert_eq!(config.timing.subscribe_delay_ms, 50);
        assert_eq!(config.timing.scroll_throttle_ms, 100);
    }
}

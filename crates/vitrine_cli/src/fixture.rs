//! Page fixtures
//!
//! A fixture is a TOML file describing a page layout plus a script of
//! interactions to replay against it:
//!
//! ```toml
//! [page]
//! window_width = 340
//!
//! [slider]
//! viewport_width = 300
//! card_count = 5
//! card_width = 100
//! margin_right = 20
//!
//! [newsletter]
//!
//! [[steps]]
//! action = "click"
//! target = "nextBtn"
//!
//! [[steps]]
//! action = "settle"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vitrine_core::{
    Button, Card, Document, ElementBox, NodeKind, ScrollStrip, Status, TextField, Video,
    DEFAULT_SMOOTH_SPEED,
};
use vitrine_page::PageConfig;

/// A page layout and the interactions to replay on it
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Fixture {
    #[serde(default)]
    pub page: PageSection,
    #[serde(default)]
    pub slider: Option<SliderSection>,
    #[serde(default)]
    pub newsletter: Option<NewsletterSection>,
    /// Element ids and timings handed to the enhancer
    #[serde(default)]
    pub config: PageConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Window and page-wide settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageSection {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default)]
    pub reduced_motion: bool,
    /// Calendar year reported by the host; the local year when absent
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default = "default_true")]
    pub footer: bool,
    /// Number of autoplaying background videos
    #[serde(default)]
    pub videos: usize,
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_true() -> bool {
    true
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            reduced_motion: false,
            year: None,
            footer: true,
            videos: 0,
        }
    }
}

/// The card strip and its buttons
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliderSection {
    pub viewport_width: f32,
    pub card_count: usize,
    pub card_width: f32,
    #[serde(default)]
    pub margin_left: f32,
    #[serde(default)]
    pub margin_right: f32,
    #[serde(default = "default_true")]
    pub buttons: bool,
    /// Fraction of the remaining distance covered per frame
    #[serde(default = "default_smooth_speed")]
    pub smooth_speed: f32,
}

fn default_smooth_speed() -> f32 {
    DEFAULT_SMOOTH_SPEED
}

/// The newsletter form
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewsletterSection {
    /// Initial value of the email field
    #[serde(default)]
    pub email: String,
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Press and release a key on the focused element
    Key { key: String },
    Click { target: String },
    Focus { target: String },
    /// Replace the value of a text field
    Type { target: String, value: String },
    Submit { target: String },
    /// Resize the window to `width` logical pixels
    Resize { width: f32 },
    MotionPreference { reduced: bool },
    /// Let time pass, rendering a frame every 16ms
    Wait { ms: u64 },
    /// Render a fixed number of frames
    Frames { count: usize },
    /// Render frames until nothing is animating or waiting
    Settle,
    /// Record the page state
    Snapshot,
}

impl Fixture {
    /// Load a fixture from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let fixture: Fixture = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(fixture)
    }

    /// Build the page described by the fixture
    pub fn build_document(&self) -> vitrine_core::Result<Document> {
        let mut doc = Document::new();
        let root = doc.root();
        let config = &self.config;

        if let Some(slider) = &self.slider {
            let strip = ScrollStrip::new(slider.viewport_width).with_speed(slider.smooth_speed);
            let strip = doc.insert_with_id(
                root,
                config.slider.container.clone(),
                NodeKind::ScrollStrip(strip),
            )?;
            for i in 0..slider.card_count {
                let bounds = ElementBox::new(slider.card_width)
                    .with_margins(slider.margin_left, slider.margin_right);
                doc.insert_with_id(strip, format!("card-{i}"), NodeKind::Card(Card::new(bounds)))?;
            }
            if slider.buttons {
                doc.insert_with_id(
                    root,
                    config.slider.prev.clone(),
                    NodeKind::Button(Button::new("Previous")),
                )?;
                doc.insert_with_id(
                    root,
                    config.slider.next.clone(),
                    NodeKind::Button(Button::new("Next")),
                )?;
            }
        }

        if let Some(newsletter) = &self.newsletter {
            let ids = &config.newsletter;
            let form = doc.insert_with_id(root, ids.form.clone(), NodeKind::Form)?;
            doc.insert_with_id(
                form,
                ids.email.clone(),
                NodeKind::TextField(TextField {
                    value: newsletter.email.clone(),
                }),
            )?;
            doc.insert_with_id(form, ids.status.clone(), NodeKind::Status(Status::default()))?;
        }

        for _ in 0..self.page.videos {
            doc.insert(root, NodeKind::Video(Video::autoplaying()))?;
        }

        if self.page.footer {
            doc.insert_with_id(root, config.footer.year.clone(), NodeKind::Text(String::new()))?;
        }

        Ok(doc)
    }
}

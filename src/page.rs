//! In-memory page: heading positions, viewport scroll, and which headings
//! currently carry the `active` class.
//!
//! Stands in for the browser DOM when driving the highlighter from tests and
//! from the `highlight` CLI command. It deserializes from a small JSON
//! description:
//!
//! ```json
//! { "scroll_y": 0, "headings": { "intro": 0, "install": 840 } }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::highlight::Document;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    #[serde(default)]
    scroll_y: f64,
    /// Heading id → absolute offset from the top of the document, in px.
    #[serde(default)]
    headings: BTreeMap<String, f64>,
    #[serde(skip)]
    active: BTreeSet<String>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heading(mut self, id: &str, offset_top: f64) -> Self {
        self.headings.insert(id.to_string(), offset_top);
        self
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Drop a heading from the page, as if the element had been removed.
    pub fn remove(&mut self, id: &str) {
        self.headings.remove(id);
        self.active.remove(id);
    }

    pub fn headings(&self) -> impl Iterator<Item = (&str, f64)> {
        self.headings.iter().map(|(id, &y)| (id.as_str(), y))
    }

    pub fn active_ids(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }
}

impl Document for StaticPage {
    fn offset_top(&self, id: &str) -> Option<f64> {
        self.headings.get(id).copied()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn set_active(&mut self, id: &str, active: bool) {
        if !self.headings.contains_key(id) {
            return;
        }
        if active {
            self.active.insert(id.to_string());
        } else {
            self.active.remove(id);
        }
    }

    fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }
}

//! Transient highlighting of the heading targeted by the URL hash.
//!
//! On page load and on every hash or history navigation, the heading whose id
//! equals the fragment gets the `active` class for a fixed duration, then
//! loses it again so a later visit can replay the effect. Per heading:
//!
//! ```text
//! NORMAL ──(hash match, not already at top)──▶ ACTIVE
//! ACTIVE ──(duration elapsed)──────────────────▶ NORMAL
//! ```
//!
//! ## Timing
//!
//! Measuring happens `settle_ms` after the request so the browser has
//! finished the hash jump; a heading already within `top_tolerance_px` of the
//! viewport top is left alone. An empty fragment or an id with no element
//! schedules nothing at all.
//!
//! ## Repeated requests
//!
//! With [`RepeatPolicy::Restart`] a new activation of a heading cancels its
//! pending clear, so the heading stays active until `duration_ms` after the
//! latest activation. [`RepeatPolicy::Preserve`] leaves earlier clears
//! running, so the oldest one ends the highlight early. Headings never share
//! timers; a clear for one id does not touch another.

use log::{debug, trace};
use std::collections::HashMap;

use crate::config::{HighlightConfig, RepeatPolicy};
use crate::timer::{TimerId, TimerQueue};

/// What the highlighter needs from the page.
pub trait Document {
    /// Absolute offset of the element from the top of the document, or
    /// `None` when no element has this id.
    fn offset_top(&self, id: &str) -> Option<f64>;

    fn scroll_y(&self) -> f64;

    fn set_active(&mut self, id: &str, active: bool);

    fn is_active(&self, id: &str) -> bool;

    fn has_element(&self, id: &str) -> bool {
        self.offset_top(id).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Normal,
    Active,
}

/// A state change, stamped with the virtual time it happened at.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub at_ms: u64,
    pub id: String,
    pub state: HighlightState,
}

#[derive(Debug)]
enum Task {
    Measure(String),
    Clear(String),
}

#[derive(Debug)]
pub struct Highlighter<D> {
    doc: D,
    config: HighlightConfig,
    timers: TimerQueue<Task>,
    /// Pending clear per heading, tracked under `RepeatPolicy::Restart`.
    clears: HashMap<String, TimerId>,
    transitions: Vec<Transition>,
}

impl<D: Document> Highlighter<D> {
    pub fn new(doc: D, config: HighlightConfig) -> Self {
        Self {
            doc,
            config,
            timers: TimerQueue::new(),
            clears: HashMap::new(),
            transitions: Vec::new(),
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Number of scheduled measurements and clears.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn state(&self, id: &str) -> HighlightState {
        if self.doc.is_active(id) {
            HighlightState::Active
        } else {
            HighlightState::Normal
        }
    }

    pub fn on_load(&mut self, hash: &str) -> bool {
        self.highlight(hash)
    }

    pub fn on_hash_change(&mut self, hash: &str) -> bool {
        self.highlight(hash)
    }

    pub fn on_popstate(&mut self, hash: &str) -> bool {
        self.highlight(hash)
    }

    /// In-page menu links name their heading in a `data-menu-target` attribute.
    pub fn on_page_menu_link(&mut self, target: &str) -> bool {
        self.highlight(target)
    }

    /// Request a highlight of `id` (a leading `#` is ignored).
    ///
    /// Returns whether anything was scheduled.
    pub fn highlight(&mut self, id: &str) -> bool {
        let id = id.strip_prefix('#').unwrap_or(id);
        if id.is_empty() {
            return false;
        }
        if !self.doc.has_element(id) {
            debug!("no element with id {id:?}; nothing to highlight");
            return false;
        }
        self.timers
            .schedule(self.config.settle_ms, Task::Measure(id.to_string()));
        true
    }

    /// Let `ms` milliseconds pass, running every timer that comes due.
    pub fn advance(&mut self, ms: u64) {
        let deadline = self.timers.now().saturating_add(ms);
        while let Some(task) = self.timers.pop_due(deadline) {
            self.run(task);
        }
        self.timers.set_now(deadline);
    }

    /// Drain the recorded state changes.
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Measure(id) => self.measure(id),
            Task::Clear(id) => {
                trace!("clearing highlight on {id:?}");
                if self.config.repeat == RepeatPolicy::Restart {
                    self.clears.remove(&id);
                }
                self.set_state(&id, HighlightState::Normal);
            }
        }
    }

    fn measure(&mut self, id: String) {
        let Some(offset) = self.doc.offset_top(&id) else {
            debug!("element {id:?} disappeared before it could be highlighted");
            return;
        };
        if offset - self.config.top_tolerance_px <= self.doc.scroll_y() {
            trace!("{id:?} already at the viewport top; not highlighting");
            return;
        }
        self.set_state(&id, HighlightState::Active);

        let clear = self
            .timers
            .schedule(self.config.duration_ms, Task::Clear(id.clone()));
        if self.config.repeat == RepeatPolicy::Restart {
            if let Some(previous) = self.clears.insert(id, clear) {
                self.timers.cancel(previous);
            }
        }
    }

    fn set_state(&mut self, id: &str, state: HighlightState) {
        if self.state(id) == state {
            return;
        }
        self.doc.set_active(id, state == HighlightState::Active);
        self.transitions.push(Transition {
            at_ms: self.timers.now(),
            id: id.to_string(),
            state,
        });
    }
}

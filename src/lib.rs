//! # docnav
//!
//! Interactive navigation for generated documentation sets. An external
//! outline generator describes the document as a tree of titles and links
//! plus a breadcrumb naming the page being viewed; docnav turns that into a
//! collapsible menu that opens on the current page, and highlights the
//! heading a reader jumps to through the URL hash.
//!
//! # Architecture
//!
//! ```text
//! toc.js + breadcrumb  →  build_menu  →  Menu  →  render (HTML)
//!                                          │
//!                                          └──→  InteractionController (open/closed)
//!
//! hash / history events  →  Highlighter  →  page headings (active for 1s)
//! ```
//!
//! The menu build is a pure function of its inputs. After the build only the
//! open/closed state of entries changes, and only through the interaction
//! controller. The highlighter never looks at the menu; it works against the
//! page through the [`highlight::Document`] trait.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Outline tree and breadcrumb as produced by the outline generator |
//! | [`data`] | Loading the outline and breadcrumb from JSON or `var toc = ...;` scripts |
//! | [`menu`] | Menu construction: leaf rule, breadcrumb matching, open state |
//! | [`render`] | Maud HTML for the built menu |
//! | [`interaction`] | Delegated click and keyboard handling, mobile menu visibility |
//! | [`highlight`] | Hash-target highlighting state machine |
//! | [`timer`] | Virtual-clock timer queue driving the highlighter |
//! | [`page`] | In-memory page used to drive the highlighter outside a browser |
//! | [`config`] | `docnav.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Parent-Gated Breadcrumb Matching
//!
//! Titles repeat across real manuals ("Examples", "Overview"). A node only
//! matches the breadcrumb when its parent matched the previous entry, so a
//! same-titled section elsewhere in the tree is never opened or marked
//! current by accident.
//!
//! ## Anchor-Only Children Stay Out of the Menu
//!
//! An entry whose children are all in-page headings renders as a leaf. The
//! headings are still built so they remain highlight targets, but they add
//! no menu level.
//!
//! ## Explicit Time
//!
//! Highlight timing runs on a virtual clock ([`timer::TimerQueue`]) advanced
//! by the host, so the whole state machine is deterministic under test.

pub mod config;
pub mod data;
pub mod highlight;
pub mod interaction;
pub mod menu;
pub mod output;
pub mod page;
pub mod render;
pub mod timer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

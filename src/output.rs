//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! ## Tree
//!
//! ```text
//! 001 Getting Started [section open]
//!     001 Install [open current last]
//!     002 Configure [closed has-children]
//! 002 Reference [section closed last]
//! ```
//!
//! Entries left out of the rendered menu are shown in parentheses.
//!
//! ## Check
//!
//! ```text
//! Breadcrumb: Manual → Getting Started → Install
//! Matched:    Getting Started → Install
//! Current:    Install (install.html)
//! ```

use crate::highlight::{HighlightState, Transition};
use crate::menu::{Menu, NodeId};
use crate::render::entry_classes;
use crate::types::Breadcrumb;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Tree
// ============================================================================

pub fn format_tree(menu: &Menu) -> Vec<String> {
    let mut lines = Vec::new();
    format_level(menu, menu.roots(), 0, &mut lines);
    lines
}

fn format_level(menu: &Menu, ids: &[NodeId], depth: usize, lines: &mut Vec<String>) {
    for (i, &id) in ids.iter().enumerate() {
        let Some(node) = menu.get(id) else { continue };
        let label = if node.visible {
            node.title.clone()
        } else {
            format!("({})", node.title)
        };
        lines.push(format!(
            "{}{} {} [{}]",
            indent(depth),
            format_index(i + 1),
            label,
            entry_classes(node)
        ));
        format_level(menu, menu.children(id), depth + 1, lines);
    }
}

pub fn print_tree(menu: &Menu) {
    for line in format_tree(menu) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summarize how far the breadcrumb matched the menu.
pub fn format_check(menu: &Menu, breadcrumb: &Breadcrumb) -> Vec<String> {
    let matched: Vec<&str> = menu
        .on_path()
        .iter()
        .filter_map(|&id| menu.get(id))
        .map(|n| n.title.as_str())
        .collect();

    let mut lines = vec![
        format!("Breadcrumb: {}", breadcrumb.0.join(" → ")),
        format!(
            "Matched:    {}",
            if matched.is_empty() {
                "(nothing)".to_string()
            } else {
                matched.join(" → ")
            }
        ),
    ];
    match menu.current().and_then(|id| menu.get(id)) {
        Some(node) => lines.push(format!(
            "Current:    {} ({})",
            node.title,
            node.url.as_deref().unwrap_or("no link")
        )),
        None if breadcrumb.len() < 2 => {
            lines.push("Current:    none; breadcrumb names no page below the root".to_string())
        }
        None => lines.push(format!(
            "Current:    none; breadcrumb entry {} has no match",
            matched.len() + 1
        )),
    }
    lines
}

pub fn print_check(menu: &Menu, breadcrumb: &Breadcrumb) {
    for line in format_check(menu, breadcrumb) {
        println!("{}", line);
    }
}

// ============================================================================
// Highlight
// ============================================================================

pub fn format_transitions(transitions: &[Transition]) -> Vec<String> {
    if transitions.is_empty() {
        return vec!["no highlight".to_string()];
    }
    transitions
        .iter()
        .map(|t| {
            let state = match t.state {
                HighlightState::Active => "active",
                HighlightState::Normal => "normal",
            };
            format!("{:>6}ms  #{} → {}", t.at_ms, t.id, state)
        })
        .collect()
}

pub fn print_transitions(transitions: &[Transition]) {
    for line in format_transitions(transitions) {
        println!("{}", line);
    }
}

//! HTML rendering of a built [`Menu`].
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the HTML output.
//! The markup is the contract with the external stylesheet and the
//! delegated event listener:
//!
//! ```text
//! div#table-of-contents-wrapper
//! ├── button#hamburger-menu
//! └── ul.table-of-contents.depth-0
//!     └── li.section.open[data-node=0]
//!         ├── a.depth-0-link
//!         └── ul.depth-1
//!             ├── li.open.current.last[data-node=1]
//!             └── li.closed.has-children[data-node=2]
//! ```
//!
//! `li` classes: `section` for top-level entries, exactly one of
//! `open`/`closed` on every entry, `current` for the page being viewed,
//! `last` (plus any outline flags) for leaf entries, `has-children` for
//! expandable non-top entries.

use maud::{Markup, html};

use crate::config::MenuConfig;
use crate::menu::{Menu, MenuNode, NodeId};

/// Render the menu list (`ul.table-of-contents`).
pub fn render_menu(menu: &Menu) -> Markup {
    html! {
        ul class="table-of-contents depth-0" {
            @for &id in menu.roots() {
                (render_entry(menu, id))
            }
        }
    }
}

/// Render the menu inside its container, with the mobile toggle control.
pub fn render_container(menu: &Menu, config: &MenuConfig) -> Markup {
    html! {
        button id=(config.mobile_toggle_id) type="button" aria-label="Menu" {}
        div id=(config.container_id) {
            (render_menu(menu))
        }
    }
}

/// Space-separated class list for an entry.
pub fn entry_classes(node: &MenuNode) -> String {
    let mut classes: Vec<&str> = Vec::new();
    if node.is_section {
        classes.push("section");
    }
    classes.push(node.open_state.css_class());
    if node.is_current {
        classes.push("current");
    }
    if node.is_last {
        classes.push("last");
        classes.extend(node.flags.iter().map(String::as_str));
    } else if !node.is_section {
        classes.push("has-children");
    }
    classes.join(" ")
}

fn render_entry(menu: &Menu, id: NodeId) -> Markup {
    let Some(node) = menu.get(id).filter(|n| n.visible) else {
        return html! {};
    };
    let link_class = format!("depth-{}-link", node.render_depth);
    let tabindex = (node.url.is_none() && node.is_collapsible()).then_some("0");

    html! {
        li class=(entry_classes(node)) data-node=(id.0) {
            @if let Some(url) = &node.url {
                a class=(link_class) href=(url) { (node.title) }
            } @else {
                span class=(link_class) tabindex=[tabindex] { (node.title) }
            }
            @if !node.is_last {
                ul class={ "depth-" (node.render_depth + 1) } {
                    @for &child in menu.children(id) {
                        (render_entry(menu, child))
                    }
                }
            }
        }
    }
}

//! Shared test utilities: outline builders, seeded random outlines, and
//! lookups that panic with a readable message on a miss.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let outline = root(vec![
//!     file("Guide", vec![anchor("Intro", vec![])]),
//!     file("Reference", vec![]),
//! ]);
//! let menu = build_menu(&outline, &Breadcrumb::new(["Root", "Guide"]), &MenuOptions::default());
//! assert!(find_node(&menu, "Guide").is_current);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::menu::{Menu, MenuNode, NodeId};
use crate::types::OutlineNode;

// =========================================================================
// Outline builders
// =========================================================================

/// The outline root ("Root", a file) holding `children`.
pub fn root(children: Vec<OutlineNode>) -> OutlineNode {
    OutlineNode::new("Root", Some("index.html"), true).with_children(children)
}

/// A node that is its own output page.
pub fn file(title: &str, children: Vec<OutlineNode>) -> OutlineNode {
    let url = format!("{}.html", title.to_lowercase().replace(' ', "-"));
    OutlineNode::new(title, Some(&url), true).with_children(children)
}

/// An in-page heading.
pub fn anchor(title: &str, children: Vec<OutlineNode>) -> OutlineNode {
    let url = format!("index.html#{}", title.to_lowercase().replace(' ', "-"));
    OutlineNode::new(title, Some(&url), false).with_children(children)
}

/// `Root → [A (anchor group) → [B (page)], C (page)]`.
pub fn sample_outline() -> OutlineNode {
    root(vec![
        OutlineNode::new("A", None, false)
            .with_children(vec![OutlineNode::new("B", Some("p.html#b"), true)]),
        OutlineNode::new("C", Some("c.html"), true),
    ])
}

/// Deterministic random outline with up to four levels below the root.
pub fn random_outline(seed: u64) -> OutlineNode {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counter = 0;
    let children = random_children(&mut rng, 0, &mut counter);
    root(children)
}

fn random_children(rng: &mut StdRng, depth: usize, counter: &mut usize) -> Vec<OutlineNode> {
    if depth >= 4 {
        return Vec::new();
    }
    let count = rng.random_range(0..4);
    (0..count)
        .map(|_| {
            *counter += 1;
            // Small title pool so duplicates show up across the tree.
            let title = format!("T{}", rng.random_range(0..6));
            let is_file = rng.random_bool(0.5);
            let url = format!("n{counter}.html");
            OutlineNode::new(&title, Some(&url), is_file)
                .with_children(random_children(rng, depth + 1, counter))
        })
        .collect()
}

// =========================================================================
// Outline traversal
// =========================================================================

pub fn flatten<'a>(nodes: &'a [OutlineNode], out: &mut Vec<&'a OutlineNode>) {
    for node in nodes {
        out.push(node);
        flatten(&node.children, out);
    }
}

pub fn preorder_titles(nodes: &[OutlineNode]) -> Vec<String> {
    let mut flat = Vec::new();
    flatten(nodes, &mut flat);
    flat.into_iter().map(|n| n.title.clone()).collect()
}

// =========================================================================
// Menu lookups and assertions
// =========================================================================

/// Find the first menu node with `title`. Panics if not found.
pub fn find_node<'a>(menu: &'a Menu, title: &str) -> &'a MenuNode {
    menu.get(find_id(menu, title)).unwrap()
}

/// Id of the first menu node with `title`. Panics if not found.
pub fn find_id(menu: &Menu, title: &str) -> NodeId {
    menu.iter()
        .find(|(_, n)| n.title == title)
        .map(|(id, _)| id)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = menu.iter().map(|(_, n)| n.title.as_str()).collect();
            panic!("menu node '{title}' not found. Available: {titles:?}")
        })
}

/// Assert that the menu subtree under `ids` mirrors `outline` title by title.
pub fn assert_children_match(menu: &Menu, ids: &[NodeId], outline: &[OutlineNode]) {
    assert_eq!(
        ids.len(),
        outline.len(),
        "child count mismatch under {:?}",
        outline.first().map(|n| &n.title)
    );
    for (&id, source) in ids.iter().zip(outline) {
        let node = menu.get(id).unwrap();
        assert_eq!(node.title, source.title);
        assert_children_match(menu, &node.children, &source.children);
    }
}

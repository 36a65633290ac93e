//! Menu construction from the outline and the breadcrumb.
//!
//! [`build_menu`] turns the outline's children into a flat arena of
//! [`MenuNode`]s, one per outline node, in document (pre-order) order. Each
//! node carries the flags the renderer and the interaction layer need:
//!
//! - **section**: top-level entry
//! - **last**: renders as a leaf; see [`OutlineNode::is_last`]
//! - **on path / current**: the node lies on the breadcrumb chain, or is its
//!   terminal element
//! - **open state**: collapsible sections and on-path nodes start open,
//!   everything else starts closed (a top-level leaf off the path included)
//!
//! ## Breadcrumb matching
//!
//! Matching walks the breadcrumb in lock-step with the recursion. A child of
//! a node at breadcrumb depth `d` matches when its title equals
//! `breadcrumb[d + 1]` *and* its parent matched. Titles repeat across the
//! outline ("Examples", "Overview", ...), so a title match anywhere else in
//! the tree never counts. Within one sibling list only the first matching
//! title is taken, which keeps the on-path set a single chain.
//!
//! When the breadcrumb names a title that no child carries, matching simply
//! stops there.
//!
//! ## Render depth
//!
//! Render depth only grows when descending into an expandable parent.
//! Children of a "last" node are still built (they stay valid anchor and
//! highlight targets) but are invisible and sit at their parent's render
//! depth.

use crate::types::{Breadcrumb, OutlineNode};
use log::debug;
use serde::Serialize;

/// Index of a node in its [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// Collapsed/expanded state of a menu entry. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    Open,
    Closed,
}

impl OpenState {
    pub fn toggle(self) -> Self {
        match self {
            OpenState::Open => OpenState::Closed,
            OpenState::Closed => OpenState::Open,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            OpenState::Open => "open",
            OpenState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuNode {
    pub title: String,
    pub url: Option<String>,
    pub flags: Vec<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub is_section: bool,
    pub is_last: bool,
    pub is_on_path: bool,
    pub is_current: bool,
    pub open_state: OpenState,
    /// Nesting level in the rendered menu.
    pub render_depth: usize,
    /// Nesting level in the outline (0 = top-level).
    pub depth: usize,
    /// False for anchor-only descendants of a leaf entry and for skipped titles.
    pub visible: bool,
}

impl MenuNode {
    /// Entries that can be expanded and collapsed by the user.
    pub fn is_collapsible(&self) -> bool {
        !self.is_last
    }
}

/// Options that shape the built menu without touching the matching rules.
#[derive(Debug, Clone, Default)]
pub struct MenuOptions {
    /// Titles that are built but never shown.
    pub hidden_titles: Vec<String>,
}

/// The built menu: an arena of nodes plus the ordered top-level ids.
#[derive(Debug, Clone, Serialize)]
pub struct Menu {
    nodes: Vec<MenuNode>,
    roots: Vec<NodeId>,
}

impl Menu {
    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Child ids in outline order; empty for an unknown id.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MenuNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn current(&self) -> Option<NodeId> {
        self.iter().find(|(_, n)| n.is_current).map(|(id, _)| id)
    }

    /// On-path nodes from the top level down.
    pub fn on_path(&self) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut level = self.roots.as_slice();
        while let Some(&id) = level.iter().find(|&&id| self.nodes[id.0].is_on_path) {
            path.push(id);
            level = &self.nodes[id.0].children;
        }
        path
    }

    pub fn find_by_url(&self, url: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, n)| n.url.as_deref() == Some(url))
            .map(|(id, _)| id)
    }
}

/// Build the menu for `outline`'s children as seen from the page named by
/// `breadcrumb`. The outline root itself is not part of the menu.
pub fn build_menu(outline: &OutlineNode, breadcrumb: &Breadcrumb, options: &MenuOptions) -> Menu {
    let mut builder = Builder {
        nodes: Vec::with_capacity(outline.count().saturating_sub(1)),
        breadcrumb,
        options,
    };
    let roots = builder.children(
        &outline.children,
        None,
        Level {
            depth: 0,
            on_path: true,
            render_depth: 0,
            visible: true,
        },
    );
    Menu {
        nodes: builder.nodes,
        roots,
    }
}

/// Position of the enclosing node during the build.
#[derive(Clone, Copy)]
struct Level {
    /// Breadcrumb index of the enclosing node (0 = outline root).
    depth: usize,
    /// Whether the enclosing node matched the breadcrumb.
    on_path: bool,
    render_depth: usize,
    visible: bool,
}

struct Builder<'a> {
    nodes: Vec<MenuNode>,
    breadcrumb: &'a Breadcrumb,
    options: &'a MenuOptions,
}

impl Builder<'_> {
    fn children(
        &mut self,
        children: &[OutlineNode],
        parent: Option<NodeId>,
        level: Level,
    ) -> Vec<NodeId> {
        let breadcrumb = self.breadcrumb;
        let expected = if level.on_path {
            breadcrumb.get(level.depth + 1)
        } else {
            None
        };
        let mut matched_any = false;
        let mut ids = Vec::with_capacity(children.len());

        for child in children {
            let id = NodeId(self.nodes.len());
            let matched = !matched_any && expected == Some(child.title.as_str());
            matched_any |= matched;

            let is_section = level.depth == 0;
            let is_last = child.is_last();
            let visible = level.visible && !self.options.hidden_titles.contains(&child.title);

            self.nodes.push(MenuNode {
                title: child.title.clone(),
                url: child.url.clone(),
                flags: child.flags.clone(),
                parent,
                children: Vec::new(),
                is_section,
                is_last,
                is_on_path: matched,
                is_current: matched && level.depth + 2 == breadcrumb.len(),
                open_state: if matched || (is_section && !is_last) {
                    OpenState::Open
                } else {
                    OpenState::Closed
                },
                render_depth: level.render_depth,
                depth: level.depth,
                visible,
            });

            let kids = self.children(
                &child.children,
                Some(id),
                Level {
                    depth: level.depth + 1,
                    on_path: matched,
                    render_depth: if is_last {
                        level.render_depth
                    } else {
                        level.render_depth + 1
                    },
                    visible: visible && !is_last,
                },
            );
            self.nodes[id.0].children = kids;
            ids.push(id);
        }

        if let Some(title) = expected.filter(|_| !matched_any) {
            debug!(
                "breadcrumb stops matching at depth {}: no child titled {:?}",
                level.depth + 1,
                title
            );
        }
        ids
    }
}

//! Input data shared by every stage: the outline tree and the breadcrumb.
//!
//! Both are produced by the external outline generator and are immutable for
//! the lifetime of a page view. The wire form uses camelCase keys
//! (`isFile`), matching what the generator writes into `toc.js`.

use serde::{Deserialize, Serialize};

/// A node of the document outline.
///
/// `url == None` marks a non-navigable grouping heading. `is_file` is true
/// when the node is a separate output page rather than an in-page anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineNode {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_file: bool,
    /// Missing in malformed input; treated as a leaf.
    #[serde(default, deserialize_with = "nullable_children")]
    pub children: Vec<OutlineNode>,
    /// Extra CSS classes for the node's menu entry when it renders as a leaf.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<OutlineNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<OutlineNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl OutlineNode {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(title: &str, url: Option<&str>, is_file: bool) -> Self {
        Self {
            title: title.to_string(),
            url: url.map(str::to_string),
            is_file,
            children: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// A node renders as a menu leaf when none of its immediate children is a
    /// separate page. Anchor-only children stay out of the menu.
    pub fn is_last(&self) -> bool {
        !self.children.iter().any(|c| c.is_file)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count).sum::<usize>()
    }
}

/// Titles from the outline root down to the page being viewed.
///
/// Titles are not unique across the outline, so a breadcrumb entry is only
/// meaningful relative to its parent entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breadcrumb(pub Vec<String>);

impl Breadcrumb {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(titles.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title at `depth` (0 = outline root).
    pub fn get(&self, depth: usize) -> Option<&str> {
        self.0.get(depth).map(String::as_str)
    }
}

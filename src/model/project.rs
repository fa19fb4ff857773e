use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// A launchable project: a local folder or a remote link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    /// Local folder (set for local projects)
    #[serde(default)]
    pub path: Option<String>,
    /// Remote link (set for link projects)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Tags in attach order
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Display rank; across the collection these form a permutation of `0..n`
    pub order_idx: i64,
}

/// Where a project lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    Folder(&'a str),
    Link(&'a str),
}

impl<'a> Location<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Location::Folder(p) | Location::Link(p) => p,
        }
    }
}

impl Project {
    /// Create a local-folder project with no description or tags.
    pub fn local(id: i64, name: impl Into<String>, path: impl Into<String>, order_idx: i64) -> Self {
        Project {
            id,
            name: name.into(),
            path: Some(path.into()),
            url: None,
            description: String::new(),
            tags: Vec::new(),
            order_idx,
        }
    }

    /// Create a remote-link project with no description or tags.
    pub fn link(id: i64, name: impl Into<String>, url: impl Into<String>, order_idx: i64) -> Self {
        Project {
            id,
            name: name.into(),
            path: None,
            url: Some(url.into()),
            description: String::new(),
            tags: Vec::new(),
            order_idx,
        }
    }

    /// The project's location. A path wins if a malformed record carries both.
    pub fn location(&self) -> Option<Location<'_>> {
        match (&self.path, &self.url) {
            (Some(p), _) => Some(Location::Folder(p)),
            (None, Some(u)) => Some(Location::Link(u)),
            (None, None) => None,
        }
    }
}

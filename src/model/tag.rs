use serde::{Deserialize, Serialize};

use super::color::Color;

/// A catalog tag. Projects hold copies, not references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Positive, unique within the catalog
    pub id: u32,
    pub name: String,
    pub color: Color,
}

impl Tag {
    pub fn new(id: u32, name: impl Into<String>, color: Color) -> Self {
        Tag {
            id,
            name: name.into(),
            color,
        }
    }
}

use serde::Serialize;

use crate::model::{Location, Project, Tag};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TagJson {
    pub id: u32,
    pub name: String,
    pub color: String,
}

#[derive(Serialize)]
pub struct ProjectJson {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub tags: Vec<TagJson>,
    pub order_idx: i64,
}

pub fn tag_to_json(tag: &Tag) -> TagJson {
    TagJson {
        id: tag.id,
        name: tag.name.clone(),
        color: tag.color.to_hex(),
    }
}

pub fn project_to_json(project: &Project) -> ProjectJson {
    ProjectJson {
        id: project.id,
        name: project.name.clone(),
        path: project.path.clone(),
        url: project.url.clone(),
        description: project.description.clone(),
        tags: project.tags.iter().map(tag_to_json).collect(),
        order_idx: project.order_idx,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `  3  name  /path  #tag #tag`
pub fn format_project_line(project: &Project, name_width: usize) -> String {
    let location = match project.location() {
        Some(Location::Folder(path)) => path.to_string(),
        Some(Location::Link(url)) => url.to_string(),
        None => "-".to_string(),
    };
    let tags_str = if project.tags.is_empty() {
        String::new()
    } else {
        format!(
            "  {}",
            project
                .tags
                .iter()
                .map(|t| format!("#{}", t.name))
                .collect::<Vec<_>>()
                .join(" ")
        )
    };
    format!(
        "{:>3}  {:<width$}  {}{}",
        project.id,
        project.name,
        location,
        tags_str,
        width = name_width
    )
}

pub fn format_tag_line(tag: &Tag) -> String {
    format!("{:>3}  {}  {}", tag.id, tag.color.to_hex(), tag.name)
}

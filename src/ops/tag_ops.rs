use std::collections::HashSet;

use crate::model::tag::Tag;

/// Smallest positive id not used by any tag in `catalog`.
pub fn smallest_free_id(catalog: &[Tag]) -> u32 {
    let used: HashSet<u32> = catalog.iter().map(|t| t.id).collect();
    (1..).find(|id| !used.contains(id)).unwrap_or(u32::MAX)
}

/// Catalog tags not attached to `attached`, in catalog order.
pub fn unused_tags<'a>(catalog: &'a [Tag], attached: &[Tag]) -> Vec<&'a Tag> {
    let attached_ids: HashSet<u32> = attached.iter().map(|t| t.id).collect();
    catalog
        .iter()
        .filter(|t| !attached_ids.contains(&t.id))
        .collect()
}

/// Merge a project's tags into the catalog. Tags whose id is unknown are
/// appended as-is; a tag whose id is taken by a different tag gets the
/// smallest free id. Returns the project's tags as rewritten.
pub fn reconcile_tags(catalog: &mut Vec<Tag>, tags: &[Tag]) -> Vec<Tag> {
    tags.iter()
        .map(|tag| match catalog.iter().find(|t| t.id == tag.id) {
            Some(existing) if existing == tag => tag.clone(),
            Some(_) => {
                let fresh = Tag {
                    id: smallest_free_id(catalog),
                    ..tag.clone()
                };
                catalog.push(fresh.clone());
                fresh
            }
            None => {
                catalog.push(tag.clone());
                tag.clone()
            }
        })
        .collect()
}

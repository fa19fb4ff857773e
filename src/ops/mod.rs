pub mod reorder;
pub mod search;
pub mod tag_ops;

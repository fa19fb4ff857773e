pub mod app;
pub mod autocomplete;
pub mod drag;
pub mod edit_modal;
pub mod input;
pub mod render;
pub mod text_field;
pub mod theme;

pub use app::run;

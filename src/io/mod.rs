pub mod config_io;
pub mod library_io;
pub mod state;
pub mod watcher;

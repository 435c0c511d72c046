pub mod api;
pub mod directory;

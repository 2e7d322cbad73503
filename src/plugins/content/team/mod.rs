pub mod models;
pub mod handlers;
pub mod plugin;
pub mod repo;

pub use models::*;
pub use plugin::TeamPlugin;

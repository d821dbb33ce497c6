pub mod config;
pub mod engine;

pub use config::DiffConfig;
pub use engine::{diff_menus, ChangeKind, DiffResult};

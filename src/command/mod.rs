mod commands;
mod history;

pub use commands::{Command, MoveTarget};
pub use history::{History, Snapshot};

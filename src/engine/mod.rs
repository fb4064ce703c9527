//! Engine module: process supervision, hit store, CLI plumbing

pub mod arg_parser;
pub mod db_ops;
pub mod handlers;
pub mod progress;
pub mod supervisor;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use db_ops::{HitStore, SqliteStore, open_db, open_db_in_memory};
pub use handlers::handle_run;
pub use supervisor::{
    CapturedOutput, GrowProcess, LaunchSpec, ProcessHandle, exit_code, grow_args, start,
};

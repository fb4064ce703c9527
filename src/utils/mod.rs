pub mod config;
pub mod credentials;
pub mod grow_toml;
pub mod job_toml;
pub mod logger;
pub mod workspace;

pub use config::*;
pub use credentials::get_db_password;
pub use grow_toml::{apply_file_to_config, load_grow_toml};
pub use job_toml::load_job;
pub use logger::{Colors, setup_logging};
pub use workspace::{RunWorkspace, prepare_workspace};

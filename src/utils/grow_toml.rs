//! Load `.fastgrow.toml` from the job directory (CLI only). Lib callers build a GrowConfig directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::GrowConfig;

use super::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct GrowToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    binary: Option<String>,
    chunk_size: Option<usize>,
    write_mode: Option<u8>,
    database_type: Option<u8>,
    db_user: Option<String>,
    db_host: Option<String>,
    db_port: Option<u16>,
    poll_interval_ms: Option<u64>,
    result_extension: Option<String>,
}

/// Load the settings file from `dir` if present. Returns None if missing or unreadable.
pub fn load_grow_toml(dir: &Path) -> Option<GrowToml> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_grow_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_grow_toml(s: &str) -> Result<GrowToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite config field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $cfg:expr, $sec_field:ident => $($cfg_field:ident).+) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $cfg.$($cfg_field).+ = v;
        }
    };
}

/// Apply file settings to config (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_config(file: &GrowToml, config: &mut GrowConfig) {
    let sec = &file.settings;
    if let Some(ref p) = sec.binary {
        config.binary = PathBuf::from(p);
    }
    apply_file_opt!(sec, config, chunk_size => chunk_size);
    apply_file_opt!(sec, config, write_mode => write_mode);
    apply_file_opt!(sec, config, database_type => database_type);
    apply_file_opt!(sec, config, db_user => credentials.username);
    apply_file_opt!(sec, config, db_host => credentials.host);
    apply_file_opt!(sec, config, db_port => credentials.port);
    apply_file_opt!(sec, config, result_extension => result_extension);
    if let Some(ms) = sec.poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
}

//! Fragment database password: env var → .env in dir → secure prompt (only when asked).

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::path::Path;

use super::config::PASSWORD_ENV_KEY;

fn try_env_then_dotenv(dir: &Path) -> Option<String> {
    if let Ok(s) = std::env::var(PASSWORD_ENV_KEY) {
        let s = s.trim().to_string();
        if !s.is_empty() {
            return Some(s);
        }
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Ok(s) = std::env::var(PASSWORD_ENV_KEY) {
            let s = s.trim().to_string();
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

/// Read the password: env (FASTGROW_DB_PASSWORD) → .env in `dir` → prompt when `ask` is set.
/// Returns None when nothing is configured and no prompt was requested; the binary then falls
/// back to its own credential lookup.
pub fn get_db_password(dir: &Path, ask: bool) -> Result<Option<String>> {
    if let Some(s) = try_env_then_dotenv(dir) {
        debug!("Database password found in environment");
        return Ok(Some(s));
    }
    if !ask {
        return Ok(None);
    }
    info!("Database password not found in {PASSWORD_ENV_KEY} or .env");
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    let pass = rpassword::prompt_password(format!("{} Database password: ", label))
        .context("read database password")?;
    let pass = pass.trim().to_string();
    Ok((!pass.is_empty()).then_some(pass))
}

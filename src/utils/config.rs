//! Application configuration constants.
//! Defaults and format markers in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    db_filename: String,
    settings_filename: String,
    stdout_log: String,
    stderr_log: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                db_filename: format!("{pkg}_hits.db"),
                settings_filename: format!(".{pkg}.toml"),
                stdout_log: format!("{pkg}.stdout.log"),
                stderr_log: format!("{pkg}.stderr.log"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Default hit store file name, placed next to the job file.
    pub fn db_filename(&self) -> &str {
        &self.db_filename
    }

    pub fn settings_filename(&self) -> &str {
        &self.settings_filename
    }

    /// Child stdout capture, inside the run workspace.
    pub fn stdout_log(&self) -> &str {
        &self.stdout_log
    }

    /// Child stderr capture, inside the run workspace.
    pub fn stderr_log(&self) -> &str {
        &self.stderr_log
    }
}

// ---- Growing binary defaults ----

/// Defaults for [`GrowConfig`](crate::GrowConfig) when neither the settings file nor the CLI set a value.
pub struct GrowDefaults;

impl GrowDefaults {
    pub const BINARY: &'static str = "fast_grow";
    /// Hits per result file the binary writes.
    pub const CHUNK_SIZE: usize = 100;
    pub const WRITE_MODE: u8 = 1;
    pub const DATABASE_TYPE: u8 = 0;
    pub const DB_USER: &'static str = "postgres";
    pub const DB_HOST: &'static str = "localhost";
    pub const DB_PORT: u16 = 5432;
    pub const POLL_INTERVAL_MS: u64 = 1000;
}

/// Environment variable read for the fragment database password.
pub const PASSWORD_ENV_KEY: &str = "FASTGROW_DB_PASSWORD";

/// Environment variable the growing binary reads the password from.
pub const CHILD_PASSWORD_ENV_KEY: &str = "PGPASSWORD";

// ---- Workspace layout ----

pub struct WorkspaceNames;

impl WorkspaceNames {
    pub const CORE_FILE: &'static str = "core.sdf";
    pub const ENSEMBLE_DIR: &'static str = "ensemble";
    pub const ENSEMBLE_EXTENSION: &'static str = "pdb";
    pub const RESULTS_DIR: &'static str = "results";
    /// Base name handed to `--results`; the binary derives chunk file names from it.
    pub const RESULTS_FILE: &'static str = "hits.sdf";
    pub const SEARCH_POINTS_FILE: &'static str = "search_points.json";
}

// ---- SDF format ----

/// Extension of result files in the results directory.
pub const RESULT_EXTENSION: &str = "sdf";

/// Line terminating every SDF record.
pub const RECORD_DELIMITER: &str = "$$$$";

/// Delimiter with its line ending, as it separates records in a file.
pub const RECORD_DELIMITER_LINE: &str = "$$$$\n";

/// Opening of a property block header line: `> <KEY>`.
pub const PROPERTY_MARKER: &str = "> <";

/// Property carrying the primary score.
pub const SCORE_PROPERTY: &str = "Score";

/// Format tag stored with every hit.
pub const HIT_FILE_TYPE: &str = "sdf";

/// Hit names are cut to this many characters before storing.
pub const HIT_NAME_MAX_CHARS: usize = 254;

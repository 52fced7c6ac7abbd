//! Path management for the budget planner
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_PLANNER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `budget-planner`
//!    (`~/.config/budget-planner`, `%APPDATA%\budget-planner`, ...)
//!
//! ## Layout
//!
//! ```text
//! <base>/config.json
//! <base>/users/<user>/budget.json
//! <base>/users/<user>/audit.log
//! ```

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PlannerError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_PLANNER_DATA_DIR";

const APP_DIR_NAME: &str = "budget-planner";

/// Manages all paths used by the budget planner
#[derive(Debug, Clone)]
pub struct PlannerPaths {
    base_dir: PathBuf,
}

impl PlannerPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PlannerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Directory holding one subdirectory per user
    pub fn users_dir(&self) -> PathBuf {
        self.base_dir.join("users")
    }

    /// Directory of one user's data
    pub fn user_dir(&self, user: &str) -> Result<PathBuf, PlannerError> {
        Ok(self.users_dir().join(validate_user(user)?))
    }

    /// Path to a user's budget document
    pub fn budget_file(&self, user: &str) -> Result<PathBuf, PlannerError> {
        Ok(self.user_dir(user)?.join("budget.json"))
    }

    /// Path to a user's audit log
    pub fn audit_log(&self, user: &str) -> Result<PathBuf, PlannerError> {
        Ok(self.user_dir(user)?.join("audit.log"))
    }

    /// Ensure the base and users directories exist
    pub fn ensure_directories(&self) -> Result<(), PlannerError> {
        std::fs::create_dir_all(self.users_dir())
            .map_err(|e| PlannerError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(())
    }
}

/// Check that a user name can be used as a single path component
pub fn validate_user(user: &str) -> Result<&str, PlannerError> {
    let trimmed = user.trim();
    let invalid = trimmed.is_empty()
        || trimmed != user
        || user == "."
        || user == ".."
        || user
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control());

    if invalid {
        return Err(PlannerError::InvalidUser(format!("{:?}", user)));
    }
    Ok(user)
}

fn resolve_default_path() -> Result<PathBuf, PlannerError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PlannerError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}

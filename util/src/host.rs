//! Host platform utility functions

use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "NAV_SW_ROOT";

/// Get the software root directory from the environment.
///
/// The root directory contains the `params` and `sessions` directories.
pub fn get_nav_sw_root() -> Result<PathBuf, std::env::VarError> {
    let root = std::env::var(SW_ROOT_ENV_VAR)?;
    Ok(PathBuf::from(root))
}

pub mod check;
pub mod config;
pub mod init;
pub mod sidebar;

use std::path::Path;

/// Directory the config file lives in; content paths resolve against it.
pub(crate) fn project_root(config_path: &Path) -> &Path {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

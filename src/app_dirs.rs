use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn text_store_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "keydrill")
            .map(|proj_dirs| proj_dirs.config_dir().join("text.json"))
    }

    pub fn results_log_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "keydrill")
            .map(|proj_dirs| proj_dirs.config_dir().join("log.csv"))
    }
}

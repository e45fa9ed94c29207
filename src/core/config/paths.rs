use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub index_path: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let project_root = locate_project_root();
        let user_data_dir = resolve_data_dir(&project_root);
        Self::from_dirs(project_root, user_data_dir)
    }

    /// Roots every path under `root`. Used by tests to keep state isolated.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::from_dirs(root.clone(), root)
    }

    fn from_dirs(project_root: PathBuf, user_data_dir: PathBuf) -> Self {
        let log_dir = user_data_dir.join("logs");
        let index_path = user_data_dir.join("index.db");
        let secrets_path = user_data_dir.join("secrets.yml");

        // log_dir sits under user_data_dir, so one create covers both.
        let _ = fs::create_dir_all(&log_dir);

        AppPaths {
            project_root,
            user_data_dir,
            log_dir,
            index_path,
            secrets_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn locate_project_root() -> PathBuf {
    if let Ok(root) = env::var("DOCASK_ROOT") {
        return PathBuf::from(root);
    }

    // A config.yml beside the manifest marks a source checkout.
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("config.yml").exists() {
        manifest_dir
    } else {
        env::current_dir().unwrap_or(manifest_dir)
    }
}

/// Debug builds keep state beside the sources; release builds use the
/// platform data directory unless `DOCASK_DATA_DIR` says otherwise.
fn resolve_data_dir(project_root: &Path) -> PathBuf {
    if let Ok(dir) = env::var("DOCASK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if cfg!(debug_assertions) {
        project_root.to_path_buf()
    } else {
        platform_data_dir()
    }
}

fn platform_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let base = env::var("LOCALAPPDATA")
            .or_else(|_| env::var("USERPROFILE"))
            .unwrap_or_else(|_| String::from("."));
        PathBuf::from(base).join("Docask")
    } else if cfg!(target_os = "macos") {
        home_dir().join("Library/Application Support").join("Docask")
    } else {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("docask"),
            Err(_) => home_dir().join(".local/share/docask"),
        }
    }
}

fn home_dir() -> PathBuf {
    for var in ["HOME", "USERPROFILE"] {
        if let Ok(home) = env::var(var) {
            return PathBuf::from(home);
        }
    }
    PathBuf::from(".")
}

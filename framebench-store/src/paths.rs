//! Results Directory Resolution
//!
//! The results directory is always named `PerformanceResults`; where it
//! lives depends on the execution context. A development build keeps it
//! next to the workspace, a deployed build uses the platform's
//! application-private data directory. The `FRAMEBENCH_RESULTS_DIR`
//! environment variable overrides both.

use std::path::PathBuf;

/// Name of the directory results are written into
pub const RESULTS_DIR_NAME: &str = "PerformanceResults";

/// Environment variable overriding the resolved results directory
pub const RESULTS_DIR_ENV: &str = "FRAMEBENCH_RESULTS_DIR";

/// Execution context the store resolves its directory for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreContext {
    /// Development/editor workspace: results land next to the project
    Development,
    /// Packaged application: results land in the app-private data dir
    Deployed,
}

/// Resolve the `PerformanceResults` directory for a context.
///
/// The directory is not created here; [`ResultStore::new`](crate::ResultStore::new)
/// creates it on first use.
pub fn resolve_results_dir(context: StoreContext, app_name: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(RESULTS_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    let base = match context {
        StoreContext::Development => {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
        StoreContext::Deployed => data_dir()
            .map(|dir| dir.join(app_name))
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    base.join(RESULTS_DIR_NAME)
}

#[cfg(target_os = "windows")]
fn data_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn data_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join("Library/Application Support"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn data_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_dir_is_workspace_relative() {
        let dir = resolve_results_dir(StoreContext::Development, "framebench");
        assert!(dir.ends_with(RESULTS_DIR_NAME));
    }

    #[test]
    fn test_deployed_dir_includes_app_name() {
        let dir = resolve_results_dir(StoreContext::Deployed, "framebench-app");
        let rendered = dir.to_string_lossy();
        // Unless the env override is set, the app name is part of the path.
        if std::env::var_os(RESULTS_DIR_ENV).is_none() {
            assert!(rendered.contains("framebench-app") || rendered.starts_with('.'));
        }
        assert!(dir.ends_with(RESULTS_DIR_NAME));
    }
}

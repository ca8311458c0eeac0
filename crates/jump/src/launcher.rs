//! OS intent resolution seam.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// A URI the OS should resolve and open, optionally pinned to one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub uri: String,
    /// Package that should handle the URI, when known.
    pub package: Option<String>,
}

impl LaunchRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            package: None,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Scheme part of the URI ("spotify", "https", ...).
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.uri.split_once(':')?;
        (!scheme.is_empty()).then_some(scheme)
    }

    pub fn is_web(&self) -> bool {
        matches!(self.scheme(), Some("http") | Some("https"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// No installed app can handle the URI.
    #[error("no app can open {0}")]
    NoHandler(String),

    #[error("launch failed: {0}")]
    Failed(String),
}

/// Resolves a URI to an installed app and launches it.
///
/// Implementations may block on IPC; callers keep them off interactive threads.
pub trait UriLauncher: Send + Sync {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError>;
}

/// Launcher used when no platform integration is available.
pub struct NullLauncher;

impl UriLauncher for NullLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        Err(LaunchError::NoHandler(request.uri.clone()))
    }
}

/// Launcher that knows a fixed set of handled schemes and records attempts.
///
/// Web URLs always open unless the browser is marked unavailable.
pub struct InMemoryLauncher {
    schemes: Mutex<HashSet<String>>,
    browser: Mutex<bool>,
    launched: Mutex<Vec<LaunchRequest>>,
}

impl Default for InMemoryLauncher {
    fn default() -> Self {
        Self {
            schemes: Mutex::new(HashSet::new()),
            browser: Mutex::new(true),
            launched: Mutex::new(Vec::new()),
        }
    }
}

impl InMemoryLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher with handlers installed for `schemes`.
    pub fn with_schemes(schemes: &[&str]) -> Self {
        let launcher = Self::default();
        for scheme in schemes {
            launcher.install(scheme);
        }
        launcher
    }

    pub fn install(&self, scheme: &str) {
        lock(&self.schemes).insert(scheme.to_string());
    }

    pub fn uninstall(&self, scheme: &str) {
        lock(&self.schemes).remove(scheme);
    }

    pub fn set_browser_available(&self, available: bool) {
        *lock(&self.browser) = available;
    }

    /// Requests that were successfully launched, in order.
    pub fn launched(&self) -> Vec<LaunchRequest> {
        lock(&self.launched).clone()
    }
}

impl UriLauncher for InMemoryLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        let handled = if request.is_web() {
            *lock(&self.browser)
        } else {
            request
                .scheme()
                .is_some_and(|scheme| lock(&self.schemes).contains(scheme))
        };

        if !handled {
            return Err(LaunchError::NoHandler(request.uri.clone()));
        }

        lock(&self.launched).push(request.clone());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parsing() {
        assert_eq!(LaunchRequest::new("spotify:episode:ABC").scheme(), Some("spotify"));
        assert_eq!(LaunchRequest::new("no-scheme").scheme(), None);
        assert!(LaunchRequest::new("https://open.spotify.com").is_web());
        assert!(!LaunchRequest::new("spotify:episode:ABC").is_web());
    }

    #[test]
    fn test_in_memory_launcher_handles_installed_schemes() {
        let launcher = InMemoryLauncher::with_schemes(&["spotify"]);

        assert!(launcher.launch(&LaunchRequest::new("spotify:episode:ABC")).is_ok());
        assert_eq!(
            launcher.launch(&LaunchRequest::new("pcast:feed")),
            Err(LaunchError::NoHandler("pcast:feed".into()))
        );
        assert_eq!(launcher.launched().len(), 1);
    }

    #[test]
    fn test_browser_can_be_unavailable() {
        let launcher = InMemoryLauncher::new();
        launcher.set_browser_available(false);

        assert!(launcher
            .launch(&LaunchRequest::new("https://www.google.com"))
            .is_err());
        assert!(launcher.launched().is_empty());
    }

    #[test]
    fn test_null_launcher_rejects() {
        assert!(NullLauncher.launch(&LaunchRequest::new("spotify:x")).is_err());
    }
}

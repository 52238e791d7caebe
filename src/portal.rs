//! Portal effect execution.
//!
//! Navigation opens the target page in the system browser; alerts and
//! prompts are shown as desktop notifications.

use std::process::Command;
use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::notifier::Notifier;

/// Where dispatched effects land. Production uses the desktop; tests
/// substitute a recording implementation.
pub trait PortalUi: Send + Sync {
    /// Full-page navigation to a portal page (relative URL).
    fn navigate(&self, page: &str);
    /// Informational alert.
    fn alert(&self, message: &str);
    /// Ask the user for a missing value.
    fn prompt(&self, message: &str);
}

pub struct DesktopPortal {
    base_url: String,
    notifier: Notifier,
}

impl DesktopPortal {
    pub fn new(config: &PortalConfig, notifier: Notifier) -> Self {
        Self {
            base_url: config.base_url.clone(),
            notifier,
        }
    }

    fn page_url(&self, page: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), page)
    }
}

impl PortalUi for DesktopPortal {
    fn navigate(&self, page: &str) {
        let url = self.page_url(page);
        info!("Navigating to {url}");

        match Command::new("xdg-open").arg(&url).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("xdg-open exited with {status}"),
            Err(e) => warn!("Failed to open {url}: {e}"),
        }
    }

    fn alert(&self, message: &str) {
        info!("Alert: {message}");
        self.notifier.notify("Voice Assistant", message);
    }

    fn prompt(&self, message: &str) {
        info!("Prompt: {message}");
        self.notifier.notify("Voice Assistant", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_urls_resolve_against_the_base() {
        let portal = DesktopPortal::new(
            &PortalConfig {
                base_url: "https://portal.example.org/".into(),
            },
            Notifier::new(false),
        );
        assert_eq!(
            portal.page_url("renewLicense.xhtml"),
            "https://portal.example.org/renewLicense.xhtml"
        );

        let no_slash = DesktopPortal::new(
            &PortalConfig {
                base_url: "https://portal.example.org".into(),
            },
            Notifier::new(false),
        );
        assert_eq!(
            no_slash.page_url("index.html"),
            "https://portal.example.org/index.html"
        );
    }
}

//! Notification engine configuration — loaded from environment variables.

#[derive(Clone, Debug)]
pub struct NotifyConfig {
    /// Dashboard base URL used for links in notification bodies.
    pub dashboard_url: String,
    /// Maximum number of items listed per topic section.
    pub max_items: usize,
    /// Maximum length of a composed subject line.
    pub max_subject_chars: usize,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        let dashboard_url = std::env::var("CI_NOTIFY_DASHBOARD_URL")
            .unwrap_or_else(|_| "http://localhost:9090/ci".to_string());
        let max_items = std::env::var("CI_NOTIFY_MAX_ITEMS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let max_subject_chars = std::env::var("CI_NOTIFY_MAX_SUBJECT_CHARS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120);

        if max_items == 0 {
            tracing::warn!("CI_NOTIFY_MAX_ITEMS is 0 -- topic sections will list no items");
        }

        Self {
            dashboard_url,
            max_items,
            max_subject_chars,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            dashboard_url: "http://localhost:9090/ci".to_string(),
            max_items: 10,
            max_subject_chars: 120,
        }
    }
}

/// Extension-wide settings shared by the popup and the dashboard

/// Fixed settings for storage keys, navigation and UI timings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// chrome.storage.local key holding the submission collection
    pub storage_key: String,
    /// Key holding the write counter used for optimistic version checks
    pub revision_key: String,
    /// Extension page opened after a successful submission
    pub dashboard_page: String,
    /// Delay between the success message and opening the dashboard
    pub redirect_delay_ms: u32,
    /// How long a success message stays visible
    pub success_status_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: "submissions".to_string(),
            revision_key: "submissions_revision".to_string(),
            dashboard_page: "dashboard.html".to_string(),
            redirect_delay_ms: 500,
            success_status_ms: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = Config::default();

        assert_eq!(config.storage_key, "submissions");
        assert_ne!(config.storage_key, config.revision_key);
        assert_eq!(config.redirect_delay_ms, 500);
    }
}

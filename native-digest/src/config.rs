/// Settings for the background context reclaimer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimerConfig {
    /// Name given to the reclaimer thread.
    pub thread_name: String,
    /// Start the thread when the store is created instead of on first drop.
    pub start_eagerly: bool,
    /// When disabled, dropped digests release their context on the dropping
    /// thread instead of handing it to the reclaimer.
    pub enabled: bool,
}

impl Default for ReclaimerConfig {
    fn default() -> Self {
        Self {
            thread_name: "native-digest-reclaimer".to_string(),
            start_eagerly: false,
            enabled: true,
        }
    }
}

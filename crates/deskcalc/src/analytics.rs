//! Page-view and event analytics
//!
//! A thin wrapper over an [`AnalyticsClient`]. Nothing is sent unless a
//! tracking id is configured, and the process-wide instance is initialised
//! at most once; calls made before that are dropped.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};

/// Primary environment variable holding the tracking id
pub const TRACKING_ID_ENV: &str = "DESKCALC_TRACKING_ID";

/// Fallback environment variable holding the tracking id
pub const TRACKING_ID_FALLBACK_ENV: &str = "GA_MEASUREMENT_ID";

/// One analytics hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hit_type", rename_all = "lowercase")]
pub enum AnalyticsHit {
    /// Client initialised with a tracking id
    Initialize {
        /// Measurement id
        tracking_id: String,
    },
    /// A page was viewed
    Pageview {
        /// Page path
        page: String,
        /// Page title
        title: String,
    },
    /// A user interaction
    Event {
        /// Event category
        category: String,
        /// Event action
        action: String,
        /// Event label
        label: String,
    },
}

/// Delivery backend for analytics hits
pub trait AnalyticsClient: Send + Sync {
    /// Binds the client to a tracking id
    fn initialize(&self, tracking_id: &str);

    /// Records a page view
    fn send_pageview(&self, page: &str, title: &str);

    /// Records an event
    fn send_event(&self, category: &str, action: &str, label: &str);
}

/// Client that drops every hit
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsClient for NoopAnalytics {
    fn initialize(&self, _tracking_id: &str) {}
    fn send_pageview(&self, _page: &str, _title: &str) {}
    fn send_event(&self, _category: &str, _action: &str, _label: &str) {}
}

/// Client that emits each hit as a structured `info` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsClient for TracingAnalytics {
    fn initialize(&self, tracking_id: &str) {
        tracing::info!(target: "deskcalc::analytics", tracking_id, "analytics initialized");
    }

    fn send_pageview(&self, page: &str, title: &str) {
        tracing::info!(target: "deskcalc::analytics", hit_type = "pageview", page, title);
    }

    fn send_event(&self, category: &str, action: &str, label: &str) {
        tracing::info!(
            target: "deskcalc::analytics",
            hit_type = "event",
            category,
            action,
            label
        );
    }
}

/// Client that keeps hits in memory
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to [`Analytics`].
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    hits: Arc<Mutex<Vec<AnalyticsHit>>>,
}

impl RecordingAnalytics {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every hit so far
    #[must_use]
    pub fn hits(&self) -> Vec<AnalyticsHit> {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, hit: AnalyticsHit) {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hit);
    }
}

impl AnalyticsClient for RecordingAnalytics {
    fn initialize(&self, tracking_id: &str) {
        self.record(AnalyticsHit::Initialize {
            tracking_id: tracking_id.to_string(),
        });
    }

    fn send_pageview(&self, page: &str, title: &str) {
        self.record(AnalyticsHit::Pageview {
            page: page.to_string(),
            title: title.to_string(),
        });
    }

    fn send_event(&self, category: &str, action: &str, label: &str) {
        self.record(AnalyticsHit::Event {
            category: category.to_string(),
            action: action.to_string(),
            label: label.to_string(),
        });
    }
}

/// Analytics facade
///
/// Initialises its client only for a non-empty tracking id; without one
/// every call is a no-op.
pub struct Analytics {
    tracking_id: Option<String>,
    client: Box<dyn AnalyticsClient>,
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("tracking_id", &self.tracking_id)
            .finish_non_exhaustive()
    }
}

impl Analytics {
    /// Wraps `client`, initialising it when `tracking_id` is non-empty
    pub fn new(tracking_id: Option<&str>, client: impl AnalyticsClient + 'static) -> Self {
        let tracking_id = tracking_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if let Some(id) = &tracking_id {
            client.initialize(id);
        }
        Self {
            tracking_id,
            client: Box::new(client),
        }
    }

    /// A facade that never sends anything
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, NoopAnalytics)
    }

    /// Whether a tracking id was configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.tracking_id.is_some()
    }

    /// The configured tracking id
    #[must_use]
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    /// Sends a page view if enabled
    pub fn track_pageview(&self, page: &str, title: &str) {
        if self.is_enabled() {
            self.client.send_pageview(page, title);
        }
    }

    /// Sends an event if enabled
    pub fn track_event(&self, category: &str, action: &str, label: &str) {
        if self.is_enabled() {
            self.client.send_event(category, action, label);
        }
    }
}

/// Reads the tracking id from the environment
#[must_use]
pub fn tracking_id_from_env() -> Option<String> {
    tracking_id_from(|key| std::env::var(key).ok())
}

/// Resolves the tracking id through `lookup`, primary variable first
pub fn tracking_id_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    [TRACKING_ID_ENV, TRACKING_ID_FALLBACK_ENV]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|id| !id.trim().is_empty())
}

static GLOBAL: OnceLock<Analytics> = OnceLock::new();

/// Installs the process-wide analytics
///
/// Only an enabled facade is installed, and only once. Returns whether this
/// call installed it.
pub fn init_global(analytics: Analytics) -> bool {
    if !analytics.is_enabled() {
        return false;
    }
    GLOBAL.set(analytics).is_ok()
}

/// Whether the process-wide analytics is installed
#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// Sends a page view through the process-wide analytics, if installed
pub fn track_pageview(page: &str, title: &str) {
    if let Some(analytics) = GLOBAL.get() {
        analytics.track_pageview(page, title);
    }
}

/// Sends an event through the process-wide analytics, if installed
pub fn track_event(category: &str, action: &str, label: &str) {
    if let Some(analytics) = GLOBAL.get() {
        analytics.track_event(category, action, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_facade_initializes_client() {
        let recorder = RecordingAnalytics::new();
        let analytics = Analytics::new(Some("G-TEST"), recorder.clone());
        assert!(analytics.is_enabled());
        assert_eq!(analytics.tracking_id(), Some("G-TEST"));

        analytics.track_pageview("/", "Home");
        analytics.track_event("calculator", "press", "=");
        assert_eq!(
            recorder.hits(),
            vec![
                AnalyticsHit::Initialize {
                    tracking_id: "G-TEST".into()
                },
                AnalyticsHit::Pageview {
                    page: "/".into(),
                    title: "Home".into()
                },
                AnalyticsHit::Event {
                    category: "calculator".into(),
                    action: "press".into(),
                    label: "=".into()
                },
            ]
        );
    }

    #[test]
    fn test_missing_tracking_id_is_noop() {
        let recorder = RecordingAnalytics::new();
        let analytics = Analytics::new(None, recorder.clone());
        analytics.track_pageview("/", "Home");
        assert!(!analytics.is_enabled());
        assert!(recorder.hits().is_empty());
    }

    #[test]
    fn test_blank_tracking_id_is_noop() {
        let recorder = RecordingAnalytics::new();
        let analytics = Analytics::new(Some("  "), recorder.clone());
        analytics.track_event("a", "b", "c");
        assert!(!analytics.is_enabled());
        assert!(recorder.hits().is_empty());
    }

    #[test]
    fn test_tracking_id_lookup_order() {
        let both = |key: &str| Some(format!("{key}-value"));
        assert_eq!(
            tracking_id_from(both),
            Some("DESKCALC_TRACKING_ID-value".into())
        );

        let fallback = |key: &str| (key == TRACKING_ID_FALLBACK_ENV).then(|| "G-FALLBACK".into());
        assert_eq!(tracking_id_from(fallback), Some("G-FALLBACK".into()));

        let blank_primary = |key: &str| {
            if key == TRACKING_ID_ENV {
                Some(String::new())
            } else {
                Some("G-2".into())
            }
        };
        assert_eq!(tracking_id_from(blank_primary), Some("G-2".into()));

        assert_eq!(tracking_id_from(|_| None), None);
    }

    #[test]
    fn test_hit_serializes_with_type_tag() {
        let hit = AnalyticsHit::Pageview {
            page: "/".into(),
            title: "Home".into(),
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["hit_type"], "pageview");
        assert_eq!(json["page"], "/");
    }

    #[test]
    fn test_disabled_debug() {
        let debug = format!("{:?}", Analytics::disabled());
        assert!(debug.contains("tracking_id: None"));
    }

    // The only test touching the process-wide instance
    #[test]
    fn test_global_initializes_once() {
        let recorder = RecordingAnalytics::new();

        track_pageview("/early", "Dropped");
        assert!(!init_global(Analytics::disabled()));
        assert!(!is_initialized());

        assert!(init_global(Analytics::new(Some("G-1"), recorder.clone())));
        assert!(!init_global(Analytics::new(Some("G-2"), NoopAnalytics)));
        assert!(is_initialized());

        track_pageview("/", "Desktop");
        track_event("app", "open", "calculator");

        let hits = recorder.hits();
        assert_eq!(hits.len(), 3);
        assert_eq!(
            hits[1],
            AnalyticsHit::Pageview {
                page: "/".into(),
                title: "Desktop".into()
            }
        );
    }
}

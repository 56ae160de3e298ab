//! Application state management

use artsim_core::AppConfig;
use artsim_store::ArticleService;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// State shared across handlers. The store client is constructed once
/// at startup and injected here; handlers never reach for ambient
/// globals.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Query service over the vector store
    pub service: ArticleService,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig, service: ArticleService) -> Self {
        Self {
            config,
            service,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

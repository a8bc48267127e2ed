use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::Person;
use crate::source::{PeopleSource, SourceError};

/// Default snapshot lifetime.
/// Form responses trickle in slowly; 15 minutes keeps the sheet's quota safe.
pub const DEFAULT_TTL_MINUTES: i64 = 15;

/// A value together with the time it was loaded.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.cached_at
    }

    pub fn age_minutes(&self) -> i64 {
        self.age().num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            let remaining_mins = minutes % 60;
            if remaining_mins >= 30 {
                // Round up: 1h 30m+ becomes 2h
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            let remaining_hours = (minutes % 1440) / 60;
            if remaining_hours >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}

/// A `PeopleSource` that serves a snapshot of another source until it expires.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    snapshot: RwLock<Option<CachedData<Arc<Vec<Person>>>>>,
}

impl<S: PeopleSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn fresh_snapshot(&self) -> Option<Arc<Vec<Person>>> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|cached| !cached.is_stale(self.ttl))
            .map(|cached| Arc::clone(&cached.data))
    }

    /// Reload from the wrapped source, replacing the snapshot on success.
    ///
    /// On failure the previous snapshot is left untouched and the error is
    /// returned.
    pub async fn refresh(&self) -> Result<Arc<Vec<Person>>, SourceError> {
        let people = Arc::new(self.inner.load_people().await?);
        info!(people = people.len(), "Roster snapshot refreshed");
        *self.snapshot.write().await = Some(CachedData::new(Arc::clone(&people)));
        Ok(people)
    }

    /// The current snapshot, reloading first when it is missing or expired.
    pub async fn snapshot(&self) -> Result<Arc<Vec<Person>>, SourceError> {
        if let Some(people) = self.fresh_snapshot().await {
            debug!(people = people.len(), "Serving cached roster");
            return Ok(people);
        }
        debug!("Roster snapshot missing or stale; reloading");
        self.refresh().await
    }

    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    /// "never" when nothing has been loaded yet.
    pub async fn age_display(&self) -> String {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|cached| cached.age_display())
            .unwrap_or_else(|| "never".to_string())
    }
}

impl<S: PeopleSource + 'static> CachedSource<S> {
    /// Refresh out-of-band every `every`, logging failures.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_refresh_loop(self: Arc<Self>, every: StdDuration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    warn!(error = %e, "Scheduled roster refresh failed");
                }
            }
        })
    }
}

impl<S: PeopleSource> PeopleSource for CachedSource<S> {
    async fn load_people(&self) -> Result<Vec<Person>, SourceError> {
        let people = self.snapshot().await?;
        Ok(people.as_ref().clone())
    }
}

// ============================================================================
// Tests
// ============================================================================

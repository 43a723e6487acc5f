use moka::future::Cache;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use crate::db::{inquiries, packages, projects};
use crate::models::inquiries::Status;

const STATS_KEY: &str = "dashboard-stats";

/// How long dashboard counts are served before being recomputed.
pub const STATS_TTL: Duration = Duration::from_secs(60);

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub projects: u64,
    pub packages: u64,
    pub inquiries: u64,
    pub new_inquiries: u64,
}

impl DashboardStats {
    /// Run the four counts concurrently.
    pub async fn load(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let (projects, packages, inquiries, new_inquiries) = tokio::try_join!(
            projects::count_projects(db),
            packages::count_packages(db),
            inquiries::count_inquiries(db, None),
            inquiries::count_inquiries(db, Some(Status::New)),
        )?;

        Ok(Self {
            projects,
            packages,
            inquiries,
            new_inquiries,
        })
    }
}

/// Short-lived cache in front of [`DashboardStats::load`].
#[derive(Clone)]
pub struct StatsCache {
    cache: Cache<&'static str, DashboardStats>,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).max_capacity(1).build();
        Self { cache }
    }

    /// Return the cached stats, or compute and store them with `load`.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<DashboardStats, DbErr>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DashboardStats, DbErr>>,
    {
        if let Some(cached) = self.cache.get(STATS_KEY).await {
            return Ok(cached);
        }

        let stats = load().await?;
        self.cache.insert(STATS_KEY, stats).await;
        Ok(stats)
    }

    /// Drop cached stats after any write.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(STATS_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stats(projects: u64) -> DashboardStats {
        DashboardStats {
            projects,
            packages: 3,
            inquiries: 5,
            new_inquiries: 2,
        }
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = StatsCache::default();
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = cache
                .get_or_load(|| async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(stats(7))
                })
                .await
                .unwrap();
            assert_eq!(got, stats(7));
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_reload() {
        let cache = StatsCache::default();
        cache.get_or_load(|| async { Ok(stats(1)) }).await.unwrap();

        cache.invalidate();

        let got = cache.get_or_load(|| async { Ok(stats(2)) }).await.unwrap();
        assert_eq!(got.projects, 2);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let cache = StatsCache::default();
        let err = cache
            .get_or_load(|| async { Err(DbErr::Custom("down".into())) })
            .await;
        assert!(err.is_err());

        let got = cache.get_or_load(|| async { Ok(stats(4)) }).await.unwrap();
        assert_eq!(got.projects, 4);
    }

    #[test]
    fn stats_serialize_in_camel_case() {
        let json = serde_json::to_value(stats(1)).unwrap();
        assert_eq!(json["newInquiries"], 2);
    }
}

//! View-counter increments with capability fallback.
//!
//! Recording a view bumps the project's persisted counter by exactly one.
//! Three tiers are tried in order:
//!
//! 1. the atomic `bump_project_views` stored procedure,
//! 2. a targeted incrementing column update,
//! 3. read the current value, write back `current + 1`.
//!
//! The tiers are not transactional with each other. Tier 3 is a plain
//! read-modify-write: concurrent callers landing there can read the same
//! snapshot and lose increments. That lost-update window is inherited
//! behavior, not a guarantee — callers get no retry when all tiers fail.

use sqlx::PgPool;

/// Primitive counter operations the fallback chain is built from.
///
/// `PgPool` is the production implementation; tests substitute mocks to
/// exercise each tier without a database.
pub trait ViewStore {
    /// Tier 1 — atomic incrementing stored procedure. Returns the new count.
    fn call_increment_proc(
        &self,
        project_id: i64,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Tier 2 — targeted `view_count = view_count + 1` column update.
    fn bump_column(&self, project_id: i64)
        -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Tier 3a — read the current counter value.
    fn read_count(&self, project_id: i64)
        -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Tier 3b — overwrite the counter with an absolute value.
    fn write_count(
        &self,
        project_id: i64,
        count: i64,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

/// Record one view for a project. Returns the new counter value.
///
/// Exactly one row's counter changes per successful call; a later tier only
/// runs when every earlier tier failed. If all three tiers fail the error
/// from the final tier is returned and the counter is unchanged.
pub async fn record_view<S: ViewStore>(store: &S, project_id: i64) -> Result<i64, sqlx::Error> {
    match store.call_increment_proc(project_id).await {
        Ok(count) => return Ok(count),
        Err(e) => {
            tracing::debug!(project_id, error = %e, "increment procedure unavailable, trying column update");
        }
    }

    match store.bump_column(project_id).await {
        Ok(count) => return Ok(count),
        Err(e) => {
            tracing::warn!(project_id, error = %e, "column update failed, falling back to read-modify-write");
        }
    }

    let current = store.read_count(project_id).await?;
    store.write_count(project_id, current + 1).await
}

impl ViewStore for PgPool {
    async fn call_increment_proc(&self, project_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT bump_project_views($1)")
            .bind(project_id)
            .fetch_one(self)
            .await
    }

    async fn bump_column(&self, project_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE projects SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(project_id)
        .fetch_one(self)
        .await
    }

    async fn read_count(&self, project_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT view_count FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_one(self)
            .await
    }

    async fn write_count(&self, project_id: i64, count: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE projects SET view_count = $2 WHERE id = $1 RETURNING view_count",
        )
        .bind(project_id)
        .bind(count)
        .fetch_one(self)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::{Barrier, Mutex};

    /// In-memory counter store with per-tier failure switches.
    #[derive(Default)]
    struct MockStore {
        views: Mutex<i64>,
        fail_proc: bool,
        fail_bump: bool,
        fail_read: bool,
        proc_calls: AtomicU32,
        bump_calls: AtomicU32,
        read_calls: AtomicU32,
        write_calls: AtomicU32,
        /// When set, `read_count` parks on the barrier after reading so two
        /// callers can be forced to observe the same snapshot.
        read_barrier: Option<Arc<Barrier>>,
    }

    fn unavailable() -> sqlx::Error {
        sqlx::Error::Protocol("tier unavailable".into())
    }

    impl ViewStore for MockStore {
        async fn call_increment_proc(&self, _project_id: i64) -> Result<i64, sqlx::Error> {
            self.proc_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_proc {
                return Err(unavailable());
            }
            let mut views = self.views.lock().await;
            *views += 1;
            Ok(*views)
        }

        async fn bump_column(&self, _project_id: i64) -> Result<i64, sqlx::Error> {
            self.bump_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_bump {
                return Err(unavailable());
            }
            let mut views = self.views.lock().await;
            *views += 1;
            Ok(*views)
        }

        async fn read_count(&self, _project_id: i64) -> Result<i64, sqlx::Error> {
            self.read_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_read {
                return Err(unavailable());
            }
            let snapshot = *self.views.lock().await;
            if let Some(barrier) = &self.read_barrier {
                barrier.wait().await;
            }
            Ok(snapshot)
        }

        async fn write_count(&self, _project_id: i64, count: i64) -> Result<i64, sqlx::Error> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            let mut views = self.views.lock().await;
            *views = count;
            Ok(*views)
        }
    }

    #[tokio::test]
    async fn procedure_success_skips_fallback_tiers() {
        let store = MockStore {
            views: Mutex::new(5),
            ..Default::default()
        };

        let count = record_view(&store, 1).await.unwrap();

        assert_eq!(count, 6);
        assert_eq!(store.proc_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.bump_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.read_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.write_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn column_update_covers_procedure_failure() {
        let store = MockStore {
            views: Mutex::new(10),
            fail_proc: true,
            ..Default::default()
        };

        let count = record_view(&store, 1).await.unwrap();

        assert_eq!(count, 11);
        assert_eq!(store.bump_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.read_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn read_modify_write_persists_when_both_remote_tiers_fail() {
        let store = MockStore {
            views: Mutex::new(3),
            fail_proc: true,
            fail_bump: true,
            ..Default::default()
        };

        let count = record_view(&store, 1).await.unwrap();

        assert_eq!(count, 4);
        assert_eq!(*store.views.lock().await, 4);
        assert_eq!(store.read_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.write_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_tiers_failing_reports_error_and_leaves_counter_alone() {
        let store = MockStore {
            views: Mutex::new(7),
            fail_proc: true,
            fail_bump: true,
            fail_read: true,
            ..Default::default()
        };

        let result = record_view(&store, 1).await;

        assert!(result.is_err());
        assert_eq!(*store.views.lock().await, 7);
        assert_eq!(store.write_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_read_modify_write_can_lose_an_increment() {
        // Both callers are forced onto tier 3 and held at a barrier after
        // reading, so each observes the same snapshot. This demonstrates the
        // known lost-update window rather than asserting it cannot happen.
        let store = MockStore {
            fail_proc: true,
            fail_bump: true,
            read_barrier: Some(Arc::new(Barrier::new(2))),
            ..Default::default()
        };

        let (a, b) = tokio::join!(record_view(&store, 1), record_view(&store, 1));

        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 1);
        // Two successful calls, one surviving increment.
        assert_eq!(*store.views.lock().await, 1);
    }
}

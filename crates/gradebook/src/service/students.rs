//! Student service with read-through caching.
//!
//! Reads consult the cache first and fall back to the repository,
//! repopulating the cache on the way out. Writes go to the repository and
//! then void the whole `students` namespace: every cached listing, filtered
//! or not, is dropped on any successful mutation, so no stale read survives
//! a write. Concurrent misses may each query the repository and repopulate
//! the same key; repopulation is idempotent so this is only redundant work,
//! not a consistency hazard.
//!
//! Cache and metrics failures are absorbed here. The only errors that leave
//! this module come from validation, identifier resolution and the record
//! store itself.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use gradebook_core::cache::{
    deserialize_students, serialize_students, students_key, Cache, CacheBackendStats,
    STUDENTS_NAMESPACE,
};
use gradebook_core::metrics::{MetricSource, MetricsRecorder, MetricsSnapshot};
use gradebook_core::service::{Result, ServiceError};
use gradebook_core::storage::StudentRepository;
use gradebook_core::student::{NewStudent, Student, StudentQuery, StudentUpdate};

/// Outcome of a listing read, with its cache provenance and the measured
/// lookup latency.
#[derive(Debug, Clone, PartialEq)]
pub struct ListStudentsResult {
    pub students: Vec<Student>,
    pub from_cache: bool,
    /// Latency of the cache lookup (hit) or store query (miss) alone, in
    /// milliseconds. Serialization and transport are not included.
    pub access_time_ms: f64,
}

/// Orchestrates the repository, cache and metrics recorder.
///
/// All collaborators are injected handles, never process-wide globals, so
/// tests can substitute doubles for any of them.
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
    cache: Arc<dyn Cache>,
    metrics: Arc<dyn MetricsRecorder>,
    cache_ttl: Duration,
}

impl StudentService {
    pub fn new(
        repository: Arc<dyn StudentRepository>,
        cache: Arc<dyn Cache>,
        metrics: Arc<dyn MetricsRecorder>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            metrics,
            cache_ttl,
        }
    }

    /// Lists students, serving from the cache when possible.
    ///
    /// An unreachable cache backend and an undecodable cached payload both
    /// degrade to a miss; the two cases stay distinguishable in the logs.
    pub async fn list_students(&self, filter: Option<&str>) -> Result<ListStudentsResult> {
        let query = StudentQuery::from_filter(filter);
        let key = students_key(&query);

        let start = Instant::now();
        let lookup = self.cache.get(&key).await;
        let cache_ms = start.elapsed().as_secs_f64() * 1000.0;

        match lookup {
            Ok(Some(bytes)) => match deserialize_students(&bytes) {
                Ok(students) => {
                    tracing::trace!(key = %key, count = students.len(), "Cache hit for student listing");
                    self.record_sample(MetricSource::Cache, cache_ms).await;
                    return Ok(ListStudentsResult {
                        students,
                        from_cache: true,
                        access_time_ms: cache_ms,
                    });
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Cached listing is undecodable, treating as miss");
                }
            },
            Ok(None) => {
                tracing::trace!(key = %key, "Cache miss for student listing");
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache unavailable, falling back to store");
            }
        }

        let start = Instant::now();
        let students = self.repository.list_students(&query).await?;
        let db_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.record_sample(MetricSource::Database, db_ms).await;
        self.populate(&key, &students).await;

        Ok(ListStudentsResult {
            students,
            from_cache: false,
            access_time_ms: db_ms,
        })
    }

    /// Creates a student. Validation happens before the store is touched;
    /// the listing cache is voided after the insert commits.
    pub async fn create_student(&self, name: &str, grade: f64) -> Result<Student> {
        let new = NewStudent::new(name, grade)?;

        let student = self.repository.create_student(&new).await?;
        tracing::info!(student_id = student.id, name = %student.name, "Student created");

        self.invalidate_listings().await;
        Ok(student)
    }

    /// Applies a partial update to a student.
    ///
    /// The record is resolved first: an unknown id fails with `NotFound`
    /// before anything is mutated and without touching the cache.
    pub async fn update_student(
        &self,
        id: i64,
        name: Option<&str>,
        grade: Option<f64>,
    ) -> Result<Student> {
        let update = StudentUpdate::new(name, grade)?;

        let Some(mut student) = self.repository.get_student(id).await? else {
            return Err(ServiceError::NotFound { id });
        };

        update.apply_to(&mut student);
        student.updated_at = Utc::now();

        self.repository.update_student(&student).await?;
        tracing::info!(student_id = id, "Student updated");

        self.invalidate_listings().await;
        Ok(student)
    }

    /// Deletes a student. An unknown id fails with `NotFound` and leaves
    /// the cache untouched.
    pub async fn delete_student(&self, id: i64) -> Result<()> {
        if self.repository.get_student(id).await?.is_none() {
            return Err(ServiceError::NotFound { id });
        }

        self.repository.delete_student(id).await?;
        tracing::info!(student_id = id, "Student deleted");

        self.invalidate_listings().await;
        Ok(())
    }

    /// Manually clears every cached listing. Unlike the write-path
    /// invalidation this propagates backend failures, since clearing the
    /// cache is the whole point of the call.
    pub async fn clear_cache(&self) -> Result<u64> {
        let deleted = self.cache.delete_namespace(STUDENTS_NAMESPACE).await?;
        tracing::info!(deleted, "Student listing cache cleared");
        Ok(deleted)
    }

    /// Returns the latency statistics and the cache backend's operational
    /// stats. Both sides are best-effort and fall back to empty defaults.
    pub async fn performance_metrics(&self) -> (MetricsSnapshot, CacheBackendStats) {
        let snapshot = match self.metrics.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read latency metrics");
                MetricsSnapshot::empty()
            }
        };

        let stats = match self.cache.backend_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read cache backend stats");
                CacheBackendStats::default()
            }
        };

        (snapshot, stats)
    }

    /// Best-effort latency sample recording.
    async fn record_sample(&self, source: MetricSource, latency_ms: f64) {
        if let Err(err) = self.metrics.record(source, latency_ms).await {
            tracing::warn!(source = %source, error = %err, "Failed to record latency sample");
        }
    }

    /// Best-effort cache population after a store read.
    async fn populate(&self, key: &str, students: &[Student]) {
        match serialize_students(students) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(key, &bytes, Some(self.cache_ttl)).await {
                    tracing::warn!(key = %key, error = %err, "Failed to cache student listing");
                }
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to serialize listing for cache");
            }
        }
    }

    /// Best-effort invalidation of the whole listing namespace, performed
    /// after a successful write. A failure here leaves at most a TTL-bounded
    /// window of staleness and never rolls back the store mutation.
    async fn invalidate_listings(&self) {
        match self.cache.delete_namespace(STUDENTS_NAMESPACE).await {
            Ok(deleted) => {
                tracing::debug!(deleted, "Invalidated student listings");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to invalidate student listings");
            }
        }
    }
}

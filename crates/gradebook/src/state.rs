//! Application state wiring.
//!
//! The shared state owns the grade service, which in turn holds the
//! repository, cache and metrics recorder as injected trait objects. The
//! concrete backends are selected at compile time via feature flags; every
//! supported combination gets its own `AppState::new` factory.

use std::sync::Arc;

use crate::service::StudentService;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'sqlite' or 'inmemory'");

// Cache features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// The grade service orchestrating repository, cache and metrics.
    pub students: Arc<StudentService>,
}

impl AppState {
    fn build(students: StudentService) -> Self {
        Self {
            students: Arc::new(students),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::config::Config;
    use crate::metrics::memory::MemoryMetrics;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let metrics = Arc::new(MemoryMetrics::new());

            Ok(Self::build(StudentService::new(
                repository,
                cache,
                metrics,
                config.cache_ttl(),
            )))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::redis_impl::RedisCache;
    use crate::config::Config;
    use crate::metrics::redis_impl::RedisMetrics;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache. The latency
        /// histories live in the same Redis as the cached listings.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            let metrics = Arc::new(RedisMetrics::new(&config.redis_url).await?);

            Ok(Self::build(StudentService::new(
                repository,
                cache,
                metrics,
                config.cache_ttl(),
            )))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::config::Config;
    use crate::metrics::memory::MemoryMetrics;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for running without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let metrics = Arc::new(MemoryMetrics::new());

            Ok(Self::build(StudentService::new(
                repository,
                cache,
                metrics,
                config.cache_ttl(),
            )))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::RwLock;

    use gradebook_core::storage::{RepositoryError, Result, StudentRepository};
    use gradebook_core::student::{
        matches_filter, sort_students_by_name, NewStudent, Student, StudentQuery,
    };

    use crate::cache::memory::MemoryCache;
    use crate::metrics::memory::MemoryMetrics;

    /// Minimal in-memory repository for tests, constructible synchronously.
    #[derive(Debug, Default)]
    struct TestRepository {
        students: RwLock<HashMap<i64, Student>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl StudentRepository for TestRepository {
        async fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>> {
            let students = self.students.read().await;
            let mut matched: Vec<Student> = students
                .values()
                .filter(|s| match query.filter() {
                    Some(fragment) => matches_filter(&s.name, fragment),
                    None => true,
                })
                .cloned()
                .collect();
            sort_students_by_name(&mut matched);
            Ok(matched)
        }

        async fn get_student(&self, id: i64) -> Result<Option<Student>> {
            Ok(self.students.read().await.get(&id).cloned())
        }

        async fn create_student(&self, new: &NewStudent) -> Result<Student> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let student = Student::new(id, new.name(), new.grade(), Utc::now());
            self.students.write().await.insert(id, student.clone());
            Ok(student)
        }

        async fn update_student(&self, student: &Student) -> Result<()> {
            let mut students = self.students.write().await;
            if !students.contains_key(&student.id) {
                return Err(RepositoryError::NotFound {
                    entity_type: "Student",
                    id: student.id.to_string(),
                });
            }
            students.insert(student.id, student.clone());
            Ok(())
        }

        async fn delete_student(&self, id: i64) -> Result<()> {
            let mut students = self.students.write().await;
            if students.remove(&id).is_none() {
                return Err(RepositoryError::NotFound {
                    entity_type: "Student",
                    id: id.to_string(),
                });
            }
            Ok(())
        }
    }

    impl Default for AppState {
        /// Creates an AppState over in-memory doubles for testing.
        fn default() -> Self {
            let service = StudentService::new(
                Arc::new(TestRepository::default()),
                Arc::new(MemoryCache::new(1000)),
                Arc::new(MemoryMetrics::new()),
                Duration::from_secs(300),
            );
            Self::build(service)
        }
    }
}

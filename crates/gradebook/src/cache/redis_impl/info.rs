//! Pure parsing helpers for Redis `INFO` output.
//!
//! `INFO` returns `key:value` lines grouped under `# Section` headers.
//! Unknown or missing fields fall back to defaults so a partial reply never
//! fails the stats endpoint.

use gradebook_core::cache::CacheBackendStats;

/// Extracts a single field value from an `INFO` reply.
pub fn info_field<'a>(info: &'a str, field: &str) -> Option<&'a str> {
    info.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key == field).then(|| value.trim_end_matches('\r'))
    })
}

/// Extracts a numeric field value, defaulting to 0 when absent or malformed.
pub fn info_counter(info: &str, field: &str) -> u64 {
    info_field(info, field)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Builds the backend stats from the `INFO stats` and `INFO memory` replies.
pub fn stats_from_info(stats_info: &str, memory_info: &str) -> CacheBackendStats {
    CacheBackendStats {
        total_connections: info_counter(stats_info, "total_connections_received"),
        total_commands: info_counter(stats_info, "total_commands_processed"),
        keyspace_hits: info_counter(stats_info, "keyspace_hits"),
        keyspace_misses: info_counter(stats_info, "keyspace_misses"),
        used_memory_human: info_field(memory_info, "used_memory_human")
            .unwrap_or("N/A")
            .to_string(),
    }
}

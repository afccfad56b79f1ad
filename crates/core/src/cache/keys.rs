use crate::student::StudentQuery;

/// Namespace under which all student listing entries are cached.
pub const STUDENTS_NAMESPACE: &str = "students";

/// Returns the cache key for a student listing query.
///
/// Keys are always built through this function rather than by ad-hoc string
/// concatenation, so every key is guaranteed to sit under
/// `students:` and carry a well-formed discriminator.
///
/// # Examples
///
/// ```
/// use gradebook_core::cache::students_key;
/// use gradebook_core::student::StudentQuery;
///
/// assert_eq!(students_key(&StudentQuery::All), "students:all");
/// assert_eq!(
///     students_key(&StudentQuery::from_filter(Some("Zoe"))),
///     "students:filter:zoe"
/// );
/// ```
pub fn students_key(query: &StudentQuery) -> String {
    format!("{}:{}", STUDENTS_NAMESPACE, query.discriminator())
}

/// Returns the key prefix that all entries of a namespace share.
pub fn namespace_prefix(namespace: &str) -> String {
    format!("{namespace}:")
}

/// Returns the Redis Set key used to track the live keys of a namespace.
///
/// The tracking set allows namespace-wide deletion without SCAN: every `set`
/// adds its key to the set, and invalidation deletes the set members.
pub fn namespace_tracking_key(namespace: &str) -> String {
    format!("{namespace}:_keys")
}

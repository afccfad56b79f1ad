use super::Student;

/// Sorts students by name ascending (lexicographic on the stored name),
/// falling back to id so equal names order deterministically.
///
/// Listings are sorted before they are cached, so cached and uncached reads
/// return byte-identical payloads.
pub fn sort_students_by_name(students: &mut [Student]) {
    students.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

/// Case-insensitive substring test used by the name filter.
pub fn matches_filter(name: &str, fragment: &str) -> bool {
    name.to_lowercase().contains(&fragment.to_lowercase())
}

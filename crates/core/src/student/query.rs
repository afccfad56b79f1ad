/// The logical variants of a student listing query.
///
/// A query doubles as the cache-key discriminator: the unfiltered listing is
/// `all`, a name filter is `filter:<lowercased fragment>`. Normalization
/// happens once, in [`StudentQuery::from_filter`], so the repository and the
/// cache always agree on what a given filter means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentQuery {
    /// The full listing, sorted by name.
    All,
    /// Students whose name contains the fragment, case-insensitively.
    Filter(String),
}

impl StudentQuery {
    /// Builds a query from an optional raw filter string.
    ///
    /// The filter is trimmed; an absent or blank filter means "no filter".
    pub fn from_filter(filter: Option<&str>) -> Self {
        match filter.map(str::trim) {
            Some(fragment) if !fragment.is_empty() => Self::Filter(fragment.to_string()),
            _ => Self::All,
        }
    }

    /// Returns the name fragment to match against, if any.
    pub fn filter(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Filter(fragment) => Some(fragment),
        }
    }

    /// Returns the cache-key discriminator for this query.
    pub fn discriminator(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Filter(fragment) => format!("filter:{}", fragment.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_filter_is_all() {
        assert_eq!(StudentQuery::from_filter(None), StudentQuery::All);
    }

    #[test]
    fn test_blank_filter_is_all() {
        assert_eq!(StudentQuery::from_filter(Some("")), StudentQuery::All);
        assert_eq!(StudentQuery::from_filter(Some("   ")), StudentQuery::All);
    }

    #[test]
    fn test_filter_is_trimmed_but_keeps_case() {
        let query = StudentQuery::from_filter(Some("  DuPont "));
        assert_eq!(query, StudentQuery::Filter("DuPont".to_string()));
        assert_eq!(query.filter(), Some("DuPont"));
    }

    #[test]
    fn test_discriminator_lowercases_the_fragment() {
        let query = StudentQuery::from_filter(Some("DuPont"));
        assert_eq!(query.discriminator(), "filter:dupont");
    }

    #[test]
    fn test_same_fragment_different_case_shares_a_discriminator() {
        let a = StudentQuery::from_filter(Some("alice"));
        let b = StudentQuery::from_filter(Some("ALICE"));
        assert_eq!(a.discriminator(), b.discriminator());
    }

    #[test]
    fn test_all_discriminator() {
        assert_eq!(StudentQuery::All.discriminator(), "all");
    }
}

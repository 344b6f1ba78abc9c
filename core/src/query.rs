//! Query-string construction for collection searches.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters gets escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Filters accepted by `GET /wishlists`. `None` and blank values are left
/// out of the query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
}

impl SearchFilters {
    /// Non-blank filters as `(key, value)` pairs, in a fixed key order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", self.title.as_deref()),
            ("description", self.description.as_deref()),
            ("user_id", self.user_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value?.trim();
            (!value.is_empty()).then_some((key, value))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Encoded query string without the leading `?`; empty when no filter
    /// is set.
    pub fn to_query(&self) -> String {
        encode_pairs(&self.pairs())
    }
}

/// Join `key=value` pairs with `&`, percent-encoding both sides.
pub fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_VALUE),
                utf8_percent_encode(value, QUERY_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(title: &str, description: &str, user_id: &str) -> SearchFilters {
        SearchFilters {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            user_id: Some(user_id.to_string()),
        }
    }

    #[test]
    fn no_filters_gives_empty_query() {
        assert_eq!(SearchFilters::default().to_query(), "");
        assert_eq!(filters("", "", "").to_query(), "");
        assert!(filters("", " ", "").is_empty());
    }

    #[test]
    fn every_subset_has_one_pair_per_field_and_clean_separators() {
        let values = ["Book", "Sci-fi", "42"];
        for mask in 1u8..8 {
            let pick = |i: usize| if mask & (1 << i) != 0 { values[i] } else { "" };
            let f = filters(pick(0), pick(1), pick(2));
            let query = f.to_query();

            let expected = mask.count_ones() as usize;
            assert_eq!(query.split('&').count(), expected, "mask {mask}: {query}");
            assert!(!query.starts_with('&') && !query.ends_with('&'), "{query}");
            assert!(!query.contains("&&"), "{query}");
            assert!(query.split('&').all(|p| p.split_once('=').is_some_and(|(_, v)| !v.is_empty())));
        }
    }

    #[test]
    fn keys_follow_field_order() {
        assert_eq!(
            filters("Book", "Sci-fi", "42").to_query(),
            "title=Book&description=Sci-fi&user_id=42"
        );
        assert_eq!(filters("", "Sci-fi", "42").to_query(), "description=Sci-fi&user_id=42");
        assert_eq!(filters("Book", "", "42").to_query(), "title=Book&user_id=42");
    }

    #[test]
    fn values_are_percent_encoded() {
        let f = SearchFilters {
            title: Some("Books & Games".to_string()),
            ..Default::default()
        };
        assert_eq!(f.to_query(), "title=Books%20%26%20Games");

        let f = SearchFilters {
            description: Some("a=b?c#d/é".to_string()),
            ..Default::default()
        };
        assert_eq!(f.to_query(), "description=a%3Db%3Fc%23d%2F%C3%A9");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let f = SearchFilters {
            user_id: Some("  7 ".to_string()),
            ..Default::default()
        };
        assert_eq!(f.to_query(), "user_id=7");
    }
}

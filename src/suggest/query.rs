//! Prefix range queries over a [`NameIndex`].
//!
//! Matches are found with two binary searches instead of a scan, so a lookup
//! costs O(log n + K) no matter how large the roster is.

use super::index::NameIndex;

/// Maximum number of suggestions returned for a prefix.
pub const SUGGESTION_LIMIT: usize = 5;

/// Appended to a prefix to form the upper search key.
///
/// `char::MAX` encodes to the largest possible UTF-8 sequence, so
/// `prefix + SENTINEL` compares greater than every name that continues the
/// prefix with a real character.
pub const SENTINEL: char = char::MAX;

/// Returns the first position whose name is `>= key`.
pub fn lower_bound(names: &[String], key: &str) -> usize {
    names.partition_point(|name| name.as_str() < key)
}

/// Returns the first position whose name is `> key`.
pub fn upper_bound(names: &[String], key: &str) -> usize {
    names.partition_point(|name| name.as_str() <= key)
}

/// Returns the half-open range of names starting with the lower-cased prefix.
pub fn match_range(names: &[String], prefix: &str) -> std::ops::Range<usize> {
    let prefix = prefix.to_lowercase();
    let start = lower_bound(names, &prefix);

    let mut upper_key = prefix;
    upper_key.push(SENTINEL);
    let end = upper_bound(names, &upper_key);

    start..end.max(start)
}

/// Returns the first [`SUGGESTION_LIMIT`] names that start with `prefix`,
/// ignoring case, in ascending order.
///
/// A blank prefix yields no suggestions.
pub fn suggest(index: &NameIndex, prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return Vec::new();
    }

    let range = match_range(index, prefix);
    index[range].iter().take(SUGGESTION_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(names: &[&str]) -> NameIndex {
        NameIndex::build(names)
    }

    #[test]
    fn test_first_five_matches_in_order() {
        let idx = index(&["abbott", "abreu", "acuna", "adell", "alonso", "altuve"]);
        assert_eq!(
            suggest(&idx, "a"),
            vec!["abbott", "abreu", "acuna", "adell", "alonso"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let idx = index(&["abbott", "abreu"]);
        assert!(suggest(&idx, "z").is_empty());
    }

    #[test]
    fn test_empty_prefix_is_empty() {
        let idx = index(&["abbott", "abreu"]);
        assert!(suggest(&idx, "").is_empty());
        assert!(suggest(&NameIndex::empty(), "").is_empty());
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let idx = index(&["Judge, Aaron", "Jung, Josh", "Soto, Juan"]);
        assert_eq!(suggest(&idx, "JU"), vec!["judge, aaron", "jung, josh"]);
        assert_eq!(suggest(&idx, "judGE"), vec!["judge, aaron"]);
    }

    #[test]
    fn test_exact_name_is_included() {
        let idx = index(&["ab", "abc", "abd", "b"]);
        assert_eq!(suggest(&idx, "ab"), vec!["ab", "abc", "abd"]);
    }

    #[test]
    fn test_range_stops_at_next_prefix() {
        let idx = index(&["ca", "cab", "cabz", "cac", "cb"]);
        assert_eq!(match_range(&idx, "cab"), 1..3);
        assert_eq!(match_range(&idx, "cb"), 4..5);
    }

    #[test]
    fn test_range_handles_high_code_points() {
        let idx = index(&["ze", "zé", "zê", "z\u{FFFF}", "z\u{1F600}", "zz"]);
        assert_eq!(match_range(&idx, "z").len(), 6);
        assert_eq!(suggest(&idx, "zé"), vec!["zé"]);
    }

    #[test]
    fn test_prefix_past_all_names() {
        let idx = index(&["a", "b"]);
        assert_eq!(match_range(&idx, "c"), 2..2);
    }

    #[test]
    fn test_duplicates_count_toward_limit() {
        let idx = index(&["x", "x", "x", "x", "x", "xa"]);
        assert_eq!(suggest(&idx, "x"), vec!["x"; 5]);
    }

    #[test]
    fn test_bounds_on_plain_slice() {
        let names: Vec<String> = ["b", "d", "d", "f"].iter().map(|s| s.to_string()).collect();
        assert_eq!(lower_bound(&names, "d"), 1);
        assert_eq!(upper_bound(&names, "d"), 3);
        assert_eq!(lower_bound(&names, "a"), 0);
        assert_eq!(upper_bound(&names, "z"), 4);
    }

    #[test]
    fn test_matches_agree_with_linear_scan() {
        let roster: Vec<String> = (0..2000)
            .map(|i| format!("{}{}, player {}", (b'a' + (i % 26) as u8) as char, i % 7, i))
            .collect();
        let idx = NameIndex::build(&roster);

        for prefix in ["a", "a3", "Q", "q0, p", "z6, player 2", "m", "", "zz", "b1, player 1"] {
            let fast = suggest(&idx, prefix);
            let slow: Vec<String> = if prefix.is_empty() {
                Vec::new()
            } else {
                let lower = prefix.to_lowercase();
                idx.iter()
                    .filter(|name| name.starts_with(&lower))
                    .take(SUGGESTION_LIMIT)
                    .cloned()
                    .collect()
            };
            assert_eq!(fast, slow, "prefix {prefix:?}");
            assert!(fast.len() <= SUGGESTION_LIMIT);
        }
    }

    #[test]
    fn test_query_is_deterministic() {
        let idx = index(&["rodriguez, julio", "Ramirez, Jose", "riley, austin"]);
        assert_eq!(suggest(&idx, "r"), suggest(&idx, "r"));
    }
}

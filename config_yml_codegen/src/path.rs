//! Underscore path decomposition.
//!
//! Field names encode nesting with [`DELIMITER`]: `db_pool_size` is the leaf
//! `size` inside branch `pool` inside branch `db`. Everything here is a pure
//! string function; callers only ask for occurrences they know exist.

/// Character separating path segments inside a field name.
pub const DELIMITER: char = '_';

/// Character separating path segments in display and persistence paths.
pub const DISPLAY_SEPARATOR: char = '.';

/// Counts the delimiters in `phrase`.
#[must_use]
pub fn count_occurrences(phrase: &str) -> usize {
    phrase.matches(DELIMITER).count()
}

/// Splits `phrase` around the `occurrence`-th delimiter (1-based).
///
/// Returns everything before that delimiter and everything after it, with
/// the delimiter itself excluded. When the delimiter does not occur that
/// many times the whole phrase is returned as the first half and the second
/// half is empty.
///
/// # Examples
///
/// ```rust
/// use config_yml_codegen::path::split_at_occurrence;
///
/// assert_eq!(split_at_occurrence("db_pool_size", 1), ("db", "pool_size"));
/// assert_eq!(split_at_occurrence("db_pool_size", 2), ("db_pool", "size"));
/// assert_eq!(split_at_occurrence("db_pool_size", 3), ("db_pool_size", ""));
/// ```
#[must_use]
pub fn split_at_occurrence(phrase: &str, occurrence: usize) -> (&str, &str) {
    let found = occurrence
        .checked_sub(1)
        .and_then(|skip| phrase.match_indices(DELIMITER).nth(skip));
    let Some((index, _)) = found else {
        return (phrase, "");
    };
    let (before, rest) = phrase.split_at(index);
    (before, rest.strip_prefix(DELIMITER).unwrap_or(rest))
}

/// Returns the segments of `name`, split on every delimiter.
#[must_use]
pub fn segments(name: &str) -> Vec<String> {
    name.split(DELIMITER).map(str::to_owned).collect()
}

/// Returns the proper prefixes of `name`, shortest first.
///
/// `db_pool_size` yields `db` and `db_pool`; a name without delimiters yields
/// nothing.
pub fn prefixes(name: &str) -> impl Iterator<Item = &str> {
    (1..=count_occurrences(name)).map(move |occurrence| split_at_occurrence(name, occurrence).0)
}

/// Returns the unqualified trailing segment of a joined prefix.
///
/// `db_pool` yields `pool`; a single segment is returned unchanged.
#[must_use]
pub fn trailing_segment(prefix: &str) -> &str {
    prefix
        .rsplit_once(DELIMITER)
        .map_or(prefix, |(_, trailing)| trailing)
}

/// Renders a field name as a dotted path (`db_port` becomes `db.port`).
#[must_use]
pub fn dotted(name: &str) -> String {
    name.replace(DELIMITER, &DISPLAY_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::none("port", 0)]
    #[case::one("db_port", 1)]
    #[case::two("db_pool_size", 2)]
    #[case::doubled("a__b", 2)]
    fn counts_delimiters(#[case] phrase: &str, #[case] expected: usize) {
        assert_eq!(count_occurrences(phrase), expected);
    }

    #[rstest]
    #[case::first("a_b_c", 1, ("a", "b_c"))]
    #[case::second("a_b_c", 2, ("a_b", "c"))]
    #[case::past_end("a_b_c", 3, ("a_b_c", ""))]
    #[case::no_delimiter("port", 1, ("port", ""))]
    #[case::zeroth("a_b", 0, ("a_b", ""))]
    #[case::leading("_a", 1, ("", "a"))]
    #[case::trailing("a_", 1, ("a", ""))]
    #[case::multibyte("é_ü_ß", 2, ("é_ü", "ß"))]
    fn splits_at_occurrence(
        #[case] phrase: &str,
        #[case] occurrence: usize,
        #[case] expected: (&str, &str),
    ) {
        assert_eq!(split_at_occurrence(phrase, occurrence), expected);
    }

    #[rstest]
    fn prefixes_are_shortest_first() {
        let found: Vec<_> = prefixes("db_pool_size").collect();
        assert_eq!(found, ["db", "db_pool"]);
        assert_eq!(prefixes("port").count(), 0);
    }

    #[rstest]
    #[case("db_pool", "pool")]
    #[case("db", "db")]
    fn trailing_segment_is_unqualified(#[case] prefix: &str, #[case] expected: &str) {
        assert_eq!(trailing_segment(prefix), expected);
    }

    #[rstest]
    fn dotted_replaces_every_delimiter() {
        assert_eq!(dotted("db_pool_size"), "db.pool.size");
        assert_eq!(segments("db_pool_size"), ["db", "pool", "size"]);
    }
}

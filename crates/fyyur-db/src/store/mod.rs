//! Store operations and read-side queries.
//!
//! Every function takes the connection explicitly. Writes open their own
//! transaction on the pool and commit it before returning; reads accept any
//! `ConnectionTrait` so they also run inside a caller's transaction.

pub mod artists;
pub mod schedule;
pub mod shows;
pub mod venues;

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::ColumnTrait;
use serde::Serialize;

/// Rows matched by a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> SearchResults<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Lower-cased `LIKE` pattern matching `term` anywhere in the value.
///
/// The term is trimmed, and `\`, `%` and `_` are escaped so they only match
/// themselves. Surrounding whitespace is not part of the term: `"a "` searches
/// for `a`. An empty term yields `%%`, which matches every row.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Case-insensitive substring filter on a text column.
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(like_pattern(term)).escape('\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_and_lowercases() {
        assert_eq!(like_pattern("Hop"), "%hop%");
        assert_eq!(like_pattern("  The Musical "), "%the musical%");
    }

    #[test]
    fn test_like_pattern_ignores_surrounding_whitespace() {
        assert_eq!(like_pattern("a "), like_pattern("a"));
        assert_eq!(like_pattern(" Sax Band\t"), "%sax band%");
    }

    #[test]
    fn test_like_pattern_empty_matches_all() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("   "), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_search_results_count_matches_data() {
        let results = SearchResults::new(vec!["a", "b", "c"]);
        assert_eq!(results.count, 3);
        let empty: SearchResults<&str> = SearchResults::new(vec![]);
        assert_eq!(empty.count, 0);
    }

    #[test]
    fn test_search_results_serialization() {
        let json = serde_json::to_value(SearchResults::new(vec![1, 2])).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}

//! Search term derivation.
//!
//! The helpdesk sends up to four identifying fields; the directory accepts a
//! single free-text query. Priority: full name, then email, then customer id.

use crate::models::LookupRequest;
use std::fmt;

/// The single string forwarded to the directory. Empty means "don't ask".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the search term from the four lookup fields.
///
/// First matching rule wins:
/// 1. either name present: `"{first} {last}"` trimmed
/// 2. email present: email as-is
/// 3. customer id present: customer id as-is
/// 4. otherwise empty
pub fn build_search_term(first: &str, last: &str, email: &str, customer_id: &str) -> SearchTerm {
    if !first.is_empty() || !last.is_empty() {
        let joined = format!("{} {}", first, last);
        SearchTerm::new(joined.trim_matches(is_trimmable))
    } else if !email.is_empty() {
        SearchTerm::new(email)
    } else if !customer_id.is_empty() {
        SearchTerm::new(customer_id)
    } else {
        SearchTerm::default()
    }
}

/// Convenience wrapper over [`build_search_term`] for a parsed request.
pub fn search_term_for(request: &LookupRequest) -> SearchTerm {
    build_search_term(
        request.first_name(),
        request.last_name(),
        request.email(),
        request.customer_id(),
    )
}

// Space, tab, LF, CR, NUL and vertical tab only; other Unicode whitespace is kept.
fn is_trimmable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_empty_yields_empty_term() {
        assert!(build_search_term("", "", "", "").is_empty());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            build_search_term("Ada", "Lovelace", "", "").as_str(),
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_single_name_has_no_stray_space() {
        assert_eq!(build_search_term("Ada", "", "", "").as_str(), "Ada");
        assert_eq!(build_search_term("", "Lovelace", "", "").as_str(), "Lovelace");
    }

    #[test]
    fn test_name_beats_email_and_id() {
        assert_eq!(
            build_search_term("Ada", "", "a@b.com", "7").as_str(),
            "Ada"
        );
    }

    #[test]
    fn test_email_beats_customer_id() {
        assert_eq!(build_search_term("", "", "a@b.com", "7").as_str(), "a@b.com");
    }

    #[test]
    fn test_customer_id_last_resort() {
        assert_eq!(build_search_term("", "", "", "7").as_str(), "7");
    }

    #[test]
    fn test_email_and_id_not_trimmed() {
        assert_eq!(build_search_term("", "", " a@b.com ", "").as_str(), " a@b.com ");
        assert_eq!(build_search_term("", "", "", " 7").as_str(), " 7");
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        assert_eq!(
            build_search_term("  Ada  ", "  Lovelace ", "", "").as_str(),
            "Ada     Lovelace"
        );
    }

    #[test]
    fn test_whitespace_only_name_still_wins_and_is_empty() {
        let term = build_search_term(" ", "", "a@b.com", "7");
        assert!(term.is_empty());
    }

    #[test]
    fn test_non_breaking_space_not_trimmed() {
        assert_eq!(
            build_search_term("Ada\u{a0}", "", "", "").as_str(),
            "Ada\u{a0}"
        );
    }

    #[test]
    fn test_search_term_for_request() {
        let request = LookupRequest {
            first_name: None,
            last_name: Some("Lovelace".to_string()),
            email: Some("a@b.com".to_string()),
            customer_id: None,
        };
        assert_eq!(search_term_for(&request).as_str(), "Lovelace");
    }
}

//! Page-id resolution: extract a canonical 32-hex identifier from a URL.
//!
//! Share links carry the page id as the last path component, usually glued
//! to a slugified title (`/Launch-Notes-<32 hex>`); API responses and some
//! copies use the canonical hyphenated 8-4-4-4-12 grouping instead. Both
//! spellings resolve here. Resolution never fails loudly — an unparseable
//! URL or a path with no qualifying hex run yields `None`.

use once_cell::sync::Lazy;
use regex::Regex;

/// A plain run of 32+ contiguous hex characters.
static RE_HEX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9a-fA-F]{32,}").unwrap());

/// The canonical hyphenated UUID grouping (8-4-4-4-12).
static RE_HYPHENATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .unwrap()
});

/// A resolved page identifier: exactly 32 lowercase hex characters.
///
/// Both output forms are legitimate; callers pick whichever their API
/// endpoint expects via [`bare`](PageId::bare) or
/// [`hyphenated`](PageId::hyphenated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageId {
    raw: String,
}

impl PageId {
    /// Extract a page id from an arbitrary URL string.
    ///
    /// Looks at the URL's path only. Plain 32-hex runs win over hyphenated
    /// spellings, and the *last* qualifying run in the path is taken (titles
    /// occasionally contain hex-looking words; the id is always rightmost).
    /// Runs longer than 32 characters are truncated after hyphen-stripping.
    ///
    /// Returns `None` if the URL fails to parse or no qualifying run exists.
    pub fn from_url(input: &str) -> Option<PageId> {
        let url = reqwest::Url::parse(input).ok()?;
        let path = url.path();

        let candidate = RE_HEX_RUN
            .find_iter(path)
            .last()
            .or_else(|| RE_HYPHENATED.find_iter(path).last())?;

        let stripped = candidate.as_str().replace('-', "");
        if stripped.len() < 32 {
            return None;
        }
        Some(PageId {
            raw: stripped[..32].to_ascii_lowercase(),
        })
    }

    /// The bare 32-character form.
    pub fn bare(&self) -> &str {
        &self.raw
    }

    /// The canonical 8-4-4-4-12 grouping.
    pub fn hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.raw[..8],
            &self.raw[8..12],
            &self.raw[12..16],
            &self.raw[16..20],
            &self.raw[20..]
        )
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "abcdef0123456789abcdef0123456789";

    #[test]
    fn slugged_share_link_resolves_bare() {
        let id = PageId::from_url(&format!("https://x.com/Title-{ID}")).unwrap();
        assert_eq!(id.bare(), ID);
    }

    #[test]
    fn last_qualifying_run_wins() {
        let first = "00000000000000000000000000000000";
        let id = PageId::from_url(&format!("https://x.com/{first}/Title-{ID}")).unwrap();
        assert_eq!(id.bare(), ID);
    }

    #[test]
    fn hyphenated_form_groups_8_4_4_4_12() {
        let id = PageId::from_url(&format!("https://x.com/p/{ID}")).unwrap();
        assert_eq!(
            id.hyphenated(),
            "abcdef01-2345-6789-abcd-ef0123456789"
        );
    }

    #[test]
    fn hyphenated_url_spelling_resolves() {
        let id =
            PageId::from_url("https://x.com/p/abcdef01-2345-6789-abcd-ef0123456789").unwrap();
        assert_eq!(id.bare(), ID);
    }

    #[test]
    fn uppercase_is_lowercased() {
        let id = PageId::from_url(&format!("https://x.com/{}", ID.to_uppercase())).unwrap();
        assert_eq!(id.bare(), ID);
    }

    #[test]
    fn overlong_run_truncates_to_32() {
        let id = PageId::from_url(&format!("https://x.com/{ID}ffff")).unwrap();
        assert_eq!(id.bare().len(), 32);
        assert_eq!(id.bare(), ID);
    }

    #[test]
    fn no_qualifying_run_is_none() {
        assert_eq!(PageId::from_url("https://x.com/just-a-title"), None);
        // 31 hex chars — one short
        assert_eq!(
            PageId::from_url("https://x.com/abcdef0123456789abcdef012345678"),
            None
        );
    }

    #[test]
    fn unparseable_url_is_none() {
        assert_eq!(PageId::from_url("not a url at all"), None);
        assert_eq!(PageId::from_url(""), None);
    }

    #[test]
    fn query_string_hex_is_ignored() {
        // The id must appear in the path, not the query.
        assert_eq!(
            PageId::from_url(&format!("https://x.com/title?ref={ID}")),
            None
        );
    }
}

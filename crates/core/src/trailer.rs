//! Outbound "watch trailer" links.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Video search endpoint used when no override is configured.
pub const DEFAULT_TRAILER_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

const TRAILER_QUALIFIER: &str = "trailer";

/// Search text for a game's trailer.
pub fn trailer_query(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        TRAILER_QUALIFIER.to_string()
    } else {
        format!("{name} {TRAILER_QUALIFIER}")
    }
}

/// Append the encoded trailer query for `name` to `base_url`.
pub fn trailer_search_url(base_url: &str, name: &str) -> String {
    let query = trailer_query(name);
    format!("{base_url}{}", utf8_percent_encode(&query, NON_ALPHANUMERIC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_appends_qualifier() {
        assert_eq!(trailer_query("Hollow Knight"), "Hollow Knight trailer");
        assert_eq!(trailer_query("  Celeste "), "Celeste trailer");
        assert_eq!(trailer_query(""), "trailer");
    }

    #[test]
    fn url_encodes_reserved_characters() {
        assert_eq!(
            trailer_search_url(DEFAULT_TRAILER_SEARCH_URL, "Ratchet & Clank"),
            "https://www.youtube.com/results?search_query=Ratchet%20%26%20Clank%20trailer"
        );
        assert_eq!(
            trailer_search_url("https://v.example/?q=", "Pokémon"),
            "https://v.example/?q=Pok%C3%A9mon%20trailer"
        );
    }
}

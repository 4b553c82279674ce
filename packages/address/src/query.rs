//! Query-string parsing for addresses.

use std::collections::BTreeMap;

use crate::error::AddressError;

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse an address query string (the part after `?`).
///
/// Pairs are split on `&`, each pair on the first `=`. Keys and values are
/// restricted to word characters and used verbatim - no percent-decoding.
/// Duplicate keys keep the last value. A pair with no `=` is an error.
///
/// # Examples
///
/// ```rust
/// use lsw_address::parse_query;
///
/// let q = parse_query("a=1&b=2&a=3").unwrap();
/// assert_eq!(q.get("a").map(String::as_str), Some("3"));
/// assert_eq!(q.get("b").map(String::as_str), Some("2"));
/// ```
pub fn parse_query(query: &str) -> Result<BTreeMap<String, String>, AddressError> {
    let mut params = BTreeMap::new();
    if query.is_empty() {
        return Ok(params);
    }

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').ok_or_else(|| AddressError::QueryPair {
            pair: pair.to_string(),
        })?;
        if key.is_empty() || !key.chars().all(is_word) || !value.chars().all(is_word) {
            return Err(AddressError::QueryPair {
                pair: pair.to_string(),
            });
        }
        // Last duplicate wins.
        params.insert(key.to_string(), value.to_string());
    }

    Ok(params)
}

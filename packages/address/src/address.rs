//! The structured address value.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::AddressError;
use crate::query::parse_query;

/// The address scheme, matched case-insensitively on parse.
pub const SCHEME: &str = "lsw";

/// Scope assumed when an address omits `@scope`.
pub const DEFAULT_SCOPE: &str = "PUBLIC";

const SCHEME_PREFIX: &str = "lsw://";

/// Structured coordinates decoded from an `lsw://` address string.
///
/// An address is an immutable value. `partition` and `key_id` are word
/// characters, `cache_id` additionally allows hyphens, and `scope` defaults
/// to [`DEFAULT_SCOPE`] when omitted. Query parameters ride along for
/// resolution but are dropped when composing request coordinates.
///
/// Round-trip invariant: `Address::parse(&addr.to_string())` reconstructs an
/// equal value (the string form normalizes the scheme to lowercase and always
/// spells the scope explicitly).
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Address {
    scope: String,
    partition: String,
    key_id: String,
    cache_id: String,
    query: BTreeMap<String, String>,
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Address {
    /// Parse an address string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lsw_address::Address;
    ///
    /// let addr = Address::parse("lsw://apps/a1b2c3/landing-page?v=2").unwrap();
    /// assert_eq!(addr.scope(), "PUBLIC");
    /// assert_eq!(addr.cache_id(), "landing-page");
    /// assert_eq!(addr.query().get("v").map(String::as_str), Some("2"));
    /// ```
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let rest = strip_scheme(address).ok_or_else(|| AddressError::Scheme {
            address: address.to_string(),
        })?;

        let (path, query_str) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        let mut segments = path.split('/');
        let (scoped_partition, key_id, cache_id) =
            match (segments.next(), segments.next(), segments.next()) {
                (Some(sp), Some(kid), Some(cid)) if segments.next().is_none() => (sp, kid, cid),
                _ => {
                    return Err(AddressError::Shape {
                        address: address.to_string(),
                        message: "expected partition[@scope]/keyID/cacheID",
                    })
                }
            };

        let (partition, scope) = match scoped_partition.split_once('@') {
            // An empty scope after '@' falls back to the default.
            Some((partition, "")) => (partition, DEFAULT_SCOPE),
            Some((partition, scope)) => (partition, scope),
            None => (scoped_partition, DEFAULT_SCOPE),
        };

        validate_field("partition", partition, false)?;
        validate_field("scope", scope, false)?;
        validate_field("keyID", key_id, false)?;
        validate_field("cacheID", cache_id, true)?;

        Ok(Address {
            scope: scope.to_string(),
            partition: partition.to_string(),
            key_id: key_id.to_string(),
            cache_id: cache_id.to_string(),
            query: parse_query(query_str)?,
        })
    }

    /// The scope, `"PUBLIC"` unless the address named one.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The partition identifier.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// The key identifier.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// The cache identifier.
    pub fn cache_id(&self) -> &str {
        &self.cache_id
    }

    /// Query parameters, if any.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Compose the scoped partition, `partition@scope`.
    ///
    /// Together with [`key_id`](Self::key_id) and
    /// [`cache_id`](Self::cache_id) this forms the request coordinates for
    /// the transport. Query parameters are deliberately not part of it.
    pub fn scoped_partition(&self) -> String {
        format!("{}@{}", self.partition, self.scope)
    }
}

fn strip_scheme(address: &str) -> Option<&str> {
    let prefix = address.get(..SCHEME_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(SCHEME_PREFIX) {
        Some(&address[SCHEME_PREFIX.len()..])
    } else {
        None
    }
}

fn validate_field(
    field: &'static str,
    value: &str,
    allow_hyphen: bool,
) -> Result<(), AddressError> {
    if value.is_empty() {
        return Err(AddressError::Field {
            field,
            value: value.to_string(),
            message: "must not be empty",
        });
    }
    let valid = value.chars().all(|c| is_word(c) || (allow_hyphen && c == '-'));
    if !valid {
        return Err(AddressError::Field {
            field,
            value: value.to_string(),
            message: if allow_hyphen {
                "allowed characters are letters, digits, '_' and '-'"
            } else {
                "allowed characters are letters, digits and '_'"
            },
        });
    }
    Ok(())
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}@{}/{}/{}",
            SCHEME_PREFIX, self.partition, self.scope, self.key_id, self.cache_id
        )?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_address() {
        let addr = Address::parse("lsw://apps@TEAM/a1b2c3/landing-page?v=2").unwrap();
        assert_eq!(addr.partition(), "apps");
        assert_eq!(addr.scope(), "TEAM");
        assert_eq!(addr.key_id(), "a1b2c3");
        assert_eq!(addr.cache_id(), "landing-page");
        assert_eq!(addr.query().get("v").map(String::as_str), Some("2"));
    }

    #[test]
    fn omitted_scope_defaults_to_public() {
        let addr = Address::parse("lsw://apps/key/cache").unwrap();
        assert_eq!(addr.scope(), DEFAULT_SCOPE);
    }

    #[test]
    fn empty_scope_after_at_defaults_to_public() {
        let addr = Address::parse("lsw://apps@/key/cache").unwrap();
        assert_eq!(addr.scope(), DEFAULT_SCOPE);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let addr = Address::parse("LSW://apps/key/cache").unwrap();
        assert_eq!(addr.partition(), "apps");
        assert_eq!(Address::parse("Lsw://apps/key/cache").unwrap(), addr);
    }

    #[test]
    fn missing_scheme_rejected() {
        assert!(matches!(
            Address::parse("http://apps/key/cache"),
            Err(AddressError::Scheme { .. })
        ));
        assert!(matches!(
            Address::parse("apps/key/cache"),
            Err(AddressError::Scheme { .. })
        ));
    }

    #[test]
    fn missing_key_id_rejected() {
        assert!(matches!(
            Address::parse("lsw://apps"),
            Err(AddressError::Shape { .. })
        ));
    }

    #[test]
    fn missing_cache_id_rejected() {
        assert!(matches!(
            Address::parse("lsw://apps/key"),
            Err(AddressError::Shape { .. })
        ));
    }

    #[test]
    fn extra_path_segment_rejected() {
        assert!(matches!(
            Address::parse("lsw://apps/key/cache/extra"),
            Err(AddressError::Shape { .. })
        ));
    }

    #[test]
    fn partition_with_disallowed_characters_rejected() {
        let err = Address::parse("lsw://ap ps/key/cache").unwrap_err();
        assert!(matches!(err, AddressError::Field { field: "partition", .. }));

        // Hyphens are only allowed in the cacheID
        let err = Address::parse("lsw://ap-ps/key/cache").unwrap_err();
        assert!(matches!(err, AddressError::Field { field: "partition", .. }));
    }

    #[test]
    fn cache_id_allows_hyphens() {
        let addr = Address::parse("lsw://apps/key/my-cache-1").unwrap();
        assert_eq!(addr.cache_id(), "my-cache-1");
    }

    #[test]
    fn key_id_rejects_hyphens() {
        assert!(matches!(
            Address::parse("lsw://apps/my-key/cache"),
            Err(AddressError::Field { field: "keyID", .. })
        ));
    }

    #[test]
    fn malformed_query_rejected() {
        assert!(matches!(
            Address::parse("lsw://apps/key/cache?flag"),
            Err(AddressError::QueryPair { .. })
        ));
    }

    #[test]
    fn duplicate_query_keys_last_wins() {
        let addr = Address::parse("lsw://apps/key/cache?a=1&a=2").unwrap();
        assert_eq!(addr.query().get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn scoped_partition_composes() {
        let addr = Address::parse("lsw://apps@TEAM/key/cache").unwrap();
        assert_eq!(addr.scoped_partition(), "apps@TEAM");

        let addr = Address::parse("lsw://apps/key/cache").unwrap();
        assert_eq!(addr.scoped_partition(), "apps@PUBLIC");
    }

    #[test]
    fn scoped_partition_drops_query() {
        let addr = Address::parse("lsw://apps/key/cache?a=1").unwrap();
        assert_eq!(addr.scoped_partition(), "apps@PUBLIC");
    }

    #[test]
    fn display_round_trips() {
        for s in [
            "lsw://apps@TEAM/a1b2c3/landing-page?v=2&w=3",
            "lsw://apps/key/cache",
            "LSW://apps@/key/my-cache",
        ] {
            let addr = Address::parse(s).unwrap();
            let reparsed = Address::parse(&addr.to_string()).unwrap();
            assert_eq!(addr, reparsed);
        }
    }

    #[test]
    fn display_normalizes_scheme_and_scope() {
        let addr = Address::parse("LSW://apps/key/cache").unwrap();
        assert_eq!(addr.to_string(), "lsw://apps@PUBLIC/key/cache");
    }

    #[test]
    fn display_serializes_query() {
        let addr = Address::parse("lsw://apps/key/cache?b=2&a=1").unwrap();
        // BTreeMap ordering makes the serialized form deterministic
        assert_eq!(addr.to_string(), "lsw://apps@PUBLIC/key/cache?a=1&b=2");
    }
}

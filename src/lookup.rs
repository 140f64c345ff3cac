//! Keyed lookups that fail with [`ErrorKeyNotFound`].

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use crate::error::ErrorKeyNotFound;
use crate::option::OptionExt;
use crate::Outcome;

/// Look up a key, failing with a key-not-found leaf when it is absent.
///
/// `source_description` names the collection in the error, so the rendered
/// message reads `Unable to find key '<key>' in source '<source>'`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use faultline::{KeyLookup, Outcome};
///
/// let mut ports = HashMap::new();
/// ports.insert("http", 80);
///
/// assert_eq!(ports.lookup("http", "port table"), Outcome::ok(&80));
/// assert_eq!(
///     ports.lookup("gopher", "port table").unwrap_error().to_safe_string(),
///     "Unable to find key 'gopher' in source 'port table'"
/// );
/// ```
pub trait KeyLookup<K, V> {
    /// Borrow the value stored under `key`.
    fn lookup<Q>(&self, key: &Q, source_description: &str) -> Outcome<&V>
    where
        K: Borrow<Q>,
        Q: Display + Hash + Ord + ?Sized;
}

impl<K, V, S> KeyLookup<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    #[track_caller]
    fn lookup<Q>(&self, key: &Q, source_description: &str) -> Outcome<&V>
    where
        K: Borrow<Q>,
        Q: Display + Hash + Ord + ?Sized,
    {
        // HashMap::get needs Q: Eq, which Ord implies.
        self.get(key)
            .to_outcome_with(|| ErrorKeyNotFound::create(key, source_description))
    }
}

impl<K, V> KeyLookup<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    #[track_caller]
    fn lookup<Q>(&self, key: &Q, source_description: &str) -> Outcome<&V>
    where
        K: Borrow<Q>,
        Q: Display + Hash + Ord + ?Sized,
    {
        self.get(key)
            .to_outcome_with(|| ErrorKeyNotFound::create(key, source_description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ResultError};

    #[test]
    fn test_hash_map_lookup() {
        let mut map = HashMap::new();
        map.insert(String::from("region"), "eu-west");

        assert_eq!(map.lookup("region", "settings"), Outcome::ok(&"eu-west"));

        let error = map.lookup("zone", "settings").unwrap_error();
        let missing = ErrorKeyNotFound::select(&error).unwrap();
        assert_eq!(missing.key(), "zone");
        assert_eq!(missing.source_description(), "settings");
    }

    #[test]
    fn test_btree_map_lookup_with_numeric_key() {
        let map: BTreeMap<u32, &str> = [(1, "one"), (2, "two")].into_iter().collect();

        assert_eq!(map.lookup(&2, "numbers"), Outcome::ok(&"two"));
        assert_eq!(
            map.lookup(&9, "numbers").unwrap_error(),
            ResultError::key_not_found(9, "numbers")
        );
    }

    #[test]
    fn test_lookup_can_be_recovered_by_kind() {
        let map: HashMap<&str, u16> = HashMap::new();
        let port = map
            .lookup("port", "env")
            .map(|port| *port)
            .compensate_when::<ErrorKeyNotFound, _>(|_| Outcome::ok(8080));
        assert_eq!(port, Outcome::ok(8080));
    }
}

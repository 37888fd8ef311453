//! First-match search over candidate passwords.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Candidates are tried strictly in the order given, and the search stops
//! at the first one that matches. There is no ranking and no parallelism.
//!
//! # Example
//!
//! ```
//! use pwaudit::{candidates, search};
//!
//! let h = "hcOYa4Y0UUm8qHILwKbuHqeH9CJZCYsGoEEvF6xMxnI=:\
//!          550e8400-e29b-41d4-a716-446655440003";
//! let found = search::search(h, candidates::ROLE_DEFAULTS.iter().copied());
//! assert_eq!(found.as_deref(), Some("user123"));
//! ```

use tracing::{debug, info};
use crate::legacy;

/// Find the first candidate for which `check` succeeds.
///
/// This is the search procedure on its own, independent of the hashing
/// scheme.
pub fn search_by<I, F>(candidates: I, mut check: F) -> Option<I::Item>
    where I: IntoIterator, F: FnMut(&I::Item) -> bool
{
    let mut attempts = 0u64;
    for cand in candidates {
        attempts += 1;
        if check(&cand) {
            debug!(attempts, "candidate matched");
            return Some(cand);
        }
    }
    debug!(attempts, "no candidate matched");
    None
}

/// Find the first candidate which verifies against a stored legacy hash.
///
/// A malformed `stored` value matches nothing, so the result is `None`
/// after all candidates have been tried.
pub fn search<I, S>(stored: &str, candidates: I) -> Option<String>
    where I: IntoIterator<Item = S>, S: AsRef<str>
{
    info!(stored, "searching for password");
    let found = search_by(candidates, |cand| {
        let pass: &str = cand.as_ref();
        legacy::verify(pass, stored)
    });
    match found {
        Some(cand) => {
            info!("password found");
            Some(cand.as_ref().to_owned())
        }
        None => {
            info!("password not found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{search, search_by};
    use crate::candidates::{BruteForce, BruteForceSetup, COMMON_PASSWORDS, ROLE_DEFAULTS};
    use crate::{legacy, HashSetup};

    const ADMIN_HASH: &str = "lhYqmKfEnhdQZTEU1c/w9JRG1B+A9RmMvwNrMqDo8wM=:550e8400-e29b-41d4-a716-446655440000";
    const UNKNOWN_HASH: &str = "YajzDl4gykhWfs21H4zClojGaaYfdUZvvOJdul4aFUU=:550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn common_list() {
        assert_eq!(search(ADMIN_HASH, COMMON_PASSWORDS.iter()).as_deref(), Some("admin"));
        let h = "4ONWLrE5XmMmGFMd+ZjOBw00wrNP2PMsj5jghnx5r5c=:550e8400-e29b-41d4-a716-446655440001";
        assert_eq!(search(h, COMMON_PASSWORDS.iter()).as_deref(), Some("SecureAdmin2024!"));
        assert_eq!(search(UNKNOWN_HASH, COMMON_PASSWORDS.iter()), None);
    }

    #[test]
    fn role_defaults() {
        let h = "DlDCngVJc6Ywv1XU0AmJitu32FCM75j2EaTdX/k2LTI=:550e8400-e29b-41d4-a716-446655440002";
        assert_eq!(search(h, ROLE_DEFAULTS.iter()).as_deref(), Some("manager123"));
        assert_eq!(search(ADMIN_HASH, ROLE_DEFAULTS.iter()), None);
    }

    #[test]
    fn empty_password_in_list() {
        let h = legacy::hash_with(HashSetup { salt: Some("x"), rounds: None }, "").unwrap();
        assert_eq!(search(&h, COMMON_PASSWORDS.iter()).as_deref(), Some(""));
    }

    #[test]
    fn nothing_to_search() {
        assert_eq!(search(ADMIN_HASH, Vec::<String>::new()), None);
        assert_eq!(search_by(Vec::<u32>::new(), |_| true), None);
    }

    #[test]
    fn malformed_stored() {
        assert_eq!(search("lhYqmKfEnhdQZTEU1c/w9JRG1B+A9RmMvwNrMqDo8wM=", COMMON_PASSWORDS.iter()), None);
        assert_eq!(search("a:b:c", COMMON_PASSWORDS.iter()), None);
    }

    #[test]
    fn first_match_wins() {
        // A deliberately weak digest: only the length counts, so all
        // four-letter candidates collide.
        let weak = |cand: &&str| cand.len() == 4;
        let cands = ["admin", "test", "demo", "user"];
        assert_eq!(search_by(cands.iter().copied(), weak), Some("test"));
        assert_eq!(search_by(cands.iter().rev().copied(), weak), Some("user"));
    }

    #[test]
    fn stops_at_first_match() {
        let mut seen = Vec::new();
        let found = search_by(1..100, |n| { seen.push(*n); n % 7 == 0 });
        assert_eq!(found, Some(7));
        assert_eq!(seen, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn brute_force() {
        let h = legacy::hash_with(HashSetup { salt: Some("s"), rounds: None }, "aab9").unwrap();
        let bf = BruteForce::new(BruteForceSetup { max_len: 4, ..Default::default() }).unwrap();
        assert_eq!(search(&h, bf).as_deref(), Some("aab9"));
        // Beyond the default cap for its length.
        let h = legacy::hash_with(HashSetup { salt: Some("s"), rounds: None }, "zz99").unwrap();
        let bf = BruteForce::new(BruteForceSetup { max_len: 4, ..Default::default() }).unwrap();
        assert_eq!(search(&h, bf), None);
        let bf = BruteForce::new(BruteForceSetup { alphabet: "z9", max_len: 4, ..Default::default() }).unwrap();
        assert_eq!(search(&h, bf).as_deref(), Some("zz99"));
    }
}

//! Candidate password sources.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! All sources are finite and deterministic, and can be restarted by
//! iterating again (or cloning the generator).
//!
//! # Example
//!
//! ```
//! use pwaudit::candidates::{BruteForce, BruteForceSetup};
//!
//! let bf = BruteForce::new(BruteForceSetup { min_len: 2, max_len: 2, ..Default::default() }).unwrap();
//! let first: Vec<String> = bf.take(3).collect();
//! assert_eq!(first, ["aa", "ab", "ac"]);
//! ```
//!
//! # Brute Force Parameters
//!
//! * __Alphabet__: any non-empty set of distinct characters, in the order
//!   in which they should be tried. Default is `a-z` followed by `0-9`.
//!
//! * __Length__: `min_len` to `max_len`, inclusive, both at least 1.
//!   Default is 4 to 7.
//!
//! * __Attempts__: at most `max_attempts` candidates of each length.
//!   The default of 10,000 covers only a small fraction of the space for
//!   lengths above 2, so the default search is incomplete; `None` lifts
//!   the cap.

use std::fs;
use std::path::Path;
use tracing::{debug, info};
use super::Result;
use crate::error::Error;

/// Commonly used passwords, including ones derived from the product name.
pub const COMMON_PASSWORDS: &[&str] = &[
    "admin", "password", "123456", "admin123", "password123",
    "stockflow", "test", "demo", "user", "login",
    "Admin", "ADMIN", "Password", "StockFlow",
    "admin@stockflowpro.com", "admin@gmail.com",
    "SecureAdmin2024!", "default", "letmein",
    "", "admin!", "admin$", "admin@", "admin#",
];

/// Initial passwords the application assigns to seeded accounts, by role.
pub const ROLE_DEFAULTS: &[&str] = &["admin123", "manager123", "user123", "SecureAdmin2024!"];

/// Default brute-force alphabet.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
/// Default minimum candidate length.
pub const DEFAULT_MIN_LEN: usize = 4;
/// Default maximum candidate length.
pub const DEFAULT_MAX_LEN: usize = 7;
/// Default per-length attempt cap.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000;

/// Setup struct for the brute-force generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BruteForceSetup<'a> {
    /// Characters to combine, in order.
    pub alphabet: &'a str,
    /// Shortest candidate length.
    pub min_len: usize,
    /// Longest candidate length.
    pub max_len: usize,
    /// Per-length cap on generated candidates.
    pub max_attempts: Option<u64>,
}

impl Default for BruteForceSetup<'_> {
    fn default() -> Self {
        BruteForceSetup {
            alphabet: DEFAULT_ALPHABET,
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

/// Generator of all strings over an alphabet, by increasing length.
///
/// Within a length, strings come out in lexicographic order with respect
/// to the alphabet order, i.e. the last position varies fastest.
#[derive(Clone, Debug)]
pub struct BruteForce {
    alphabet: Vec<char>,
    max_len: usize,
    max_attempts: Option<u64>,
    // Current position: one alphabet index per character. Empty once the
    // generator is exhausted.
    idx: Vec<usize>,
    emitted: u64,
}

impl BruteForce {
    /// Create a generator.
    ///
    /// Returns `InsufficientLength` for an empty alphabet or a zero minimum
    /// length, and `EncodingError` if the alphabet repeats a character.
    pub fn new(setup: BruteForceSetup) -> Result<BruteForce> {
        let alphabet: Vec<char> = setup.alphabet.chars().collect();
        if alphabet.is_empty() || setup.min_len == 0 {
            return Err(Error::InsufficientLength);
        }
        for (i, c) in alphabet.iter().enumerate() {
            if alphabet[..i].contains(c) {
                return Err(Error::EncodingError);
            }
        }
        let idx = if setup.min_len <= setup.max_len { vec![0; setup.min_len] } else { Vec::new() };
        Ok(BruteForce { alphabet, max_len: setup.max_len, max_attempts: setup.max_attempts, idx, emitted: 0 })
    }

    /// Number of candidates this generator yields from the start.
    pub fn total(setup: &BruteForceSetup) -> u64 {
        let radix = setup.alphabet.chars().count() as u64;
        (setup.min_len..=setup.max_len)
            .map(|len| {
                let space = radix.checked_pow(len as u32).unwrap_or(u64::MAX);
                setup.max_attempts.map_or(space, |cap| space.min(cap))
            })
            .fold(0u64, |acc, n| acc.saturating_add(n))
    }

    fn current(&self) -> String {
        self.idx.iter().map(|&i| self.alphabet[i]).collect()
    }

    // Move to the next length, or mark the generator exhausted.
    fn next_len(&mut self) {
        let len = self.idx.len() + 1;
        self.emitted = 0;
        if len > self.max_len {
            debug!("brute force exhausted");
            self.idx.clear();
        } else {
            info!(len, "trying candidates of length {}", len);
            self.idx = vec![0; len];
        }
    }

    fn advance(&mut self) {
        let radix = self.alphabet.len();
        for pos in (0..self.idx.len()).rev() {
            self.idx[pos] += 1;
            if self.idx[pos] < radix {
                return;
            }
            self.idx[pos] = 0;
        }
        // Wrapped around: every string of this length has been produced.
        self.next_len();
    }
}

impl Iterator for BruteForce {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if self.idx.is_empty() {
                return None;
            }
            match self.max_attempts {
                Some(cap) if self.emitted >= cap => self.next_len(),
                _ => break,
            }
        }
        let cand = self.current();
        self.emitted += 1;
        self.advance();
        Some(cand)
    }
}

/// Read candidates from a word list, one per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped; nothing else is. Empty
/// lines are kept, since the empty password is a legitimate candidate.
pub fn read_wordlist<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = fs::read_to_string(path.as_ref())?;
    let words: Vec<String> = text.lines().map(str::to_owned).collect();
    debug!(path = %path.as_ref().display(), count = words.len(), "read word list");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;
    use super::{BruteForce, BruteForceSetup, COMMON_PASSWORDS, ROLE_DEFAULTS};
    use crate::error::Error;

    #[test]
    fn fixed_lists() {
        assert_eq!(COMMON_PASSWORDS.len(), 24);
        assert_eq!(COMMON_PASSWORDS[0], "admin");
        assert!(COMMON_PASSWORDS.contains(&""));
        assert_eq!(ROLE_DEFAULTS.len(), 4);
    }

    #[test]
    fn default_length_four_capped() {
        let setup = BruteForceSetup { max_len: 4, ..Default::default() };
        let all: Vec<String> = BruteForce::new(setup.clone()).unwrap().collect();
        assert_eq!(all.len(), 10_000);
        assert_eq!(BruteForce::total(&setup), 10_000);
        let distinct: HashSet<&String> = all.iter().collect();
        assert_eq!(distinct.len(), all.len());
        assert_eq!(all[0], "aaaa");
        assert_eq!(all[1], "aaab");
        assert_eq!(all[35], "aaa9");
        assert_eq!(all[36], "aaba");
        assert_eq!(all[9999], "ahz1");
        let rank = |s: &str| s.chars().map(|c| super::DEFAULT_ALPHABET.find(c).unwrap()).collect::<Vec<_>>();
        assert!(all.windows(2).all(|w| rank(w[0].as_str()) < rank(w[1].as_str())));
    }

    #[test]
    fn cap_applies_per_length() {
        let bf = BruteForce::new(BruteForceSetup { max_len: 5, ..Default::default() }).unwrap();
        let all: Vec<String> = bf.collect();
        assert_eq!(all.len(), 20_000);
        assert_eq!(all[10_000], "aaaaa");
        assert_eq!(all[19_999], "aahz1");
    }

    #[test]
    fn exhaustive_small() {
        let setup = BruteForceSetup { alphabet: "ab", min_len: 1, max_len: 3, max_attempts: None };
        let all: Vec<String> = BruteForce::new(setup.clone()).unwrap().collect();
        assert_eq!(all, ["a", "b", "aa", "ab", "ba", "bb", "aaa", "aab", "aba", "abb", "baa", "bab", "bba", "bbb"]);
        assert_eq!(BruteForce::total(&setup), 14);
    }

    #[test]
    fn cap_larger_than_space() {
        let setup = BruteForceSetup { alphabet: "xyz", min_len: 2, max_len: 2, max_attempts: Some(100) };
        assert_eq!(BruteForce::new(setup).unwrap().count(), 9);
    }

    #[test]
    fn restartable() {
        let setup = BruteForceSetup { alphabet: "01", min_len: 2, max_len: 3, max_attempts: Some(3) };
        let bf = BruteForce::new(setup).unwrap();
        let again = bf.clone();
        let first: Vec<String> = bf.collect();
        assert_eq!(first, ["00", "01", "10", "000", "001", "010"]);
        assert_eq!(again.collect::<Vec<_>>(), first);
    }

    #[test]
    fn degenerate_setups() {
        assert!(matches!(BruteForce::new(BruteForceSetup { alphabet: "", ..Default::default() }), Err(Error::InsufficientLength)));
        assert!(matches!(BruteForce::new(BruteForceSetup { min_len: 0, ..Default::default() }), Err(Error::InsufficientLength)));
        assert!(matches!(BruteForce::new(BruteForceSetup { alphabet: "aba", ..Default::default() }), Err(Error::EncodingError)));
        let empty = BruteForce::new(BruteForceSetup { min_len: 5, max_len: 4, ..Default::default() }).unwrap();
        assert_eq!(empty.count(), 0);
        let zero = BruteForce::new(BruteForceSetup { max_attempts: Some(0), ..Default::default() }).unwrap();
        assert_eq!(zero.count(), 0);
    }

    #[test]
    fn wordlist() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "admin\r\n\nhunter2\n").unwrap();
        let words = super::read_wordlist(f.path()).unwrap();
        assert_eq!(words, ["admin", "", "hunter2"]);
        assert!(matches!(super::read_wordlist("/nonexistent/words.txt"), Err(Error::Io(_))));
    }
}

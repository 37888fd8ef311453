//! Offline verification and recovery of legacy salted password hashes.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The hashes examined by this crate come from an external application
//! which stores passwords as __`{digest}:{salt}`__, where *`{digest}`* is
//! the Base64 encoding of a single SHA-256 pass over the password
//! concatenated with the salt. The salt is usually a UUID. The scheme has
//! no key stretching and is kept here only to check and recover existing
//! values; see [pbkdf2_sha256](pbkdf2_sha256) for the format the same
//! application uses for new passwords.
//!
//! # Examples
//!
//! To verify a password against a stored legacy hash:
//!
//! ```
//! use pwaudit::legacy;
//!
//! let h = "lhYqmKfEnhdQZTEU1c/w9JRG1B+A9RmMvwNrMqDo8wM=:\
//!          550e8400-e29b-41d4-a716-446655440000";
//! assert_eq!(legacy::verify("admin", h), true);
//! assert_eq!(legacy::verify("wrongpassword", h), false);
//! ```
//!
//! To look for the password among a list of candidates:
//!
//! ```
//! use pwaudit::{candidates, search};
//!
//! let h = "lhYqmKfEnhdQZTEU1c/w9JRG1B+A9RmMvwNrMqDo8wM=:\
//!          550e8400-e29b-41d4-a716-446655440000";
//! let found = search::search(h, candidates::COMMON_PASSWORDS.iter().copied());
//! assert_eq!(found.as_deref(), Some("admin"));
//! ```
//!
//! # Summary
//!
//! * [legacy](legacy) hashes and verifies the `digest:salt` format.
//!
//! * [candidates](candidates) provides the candidate sources: a list of
//!   common passwords, the role defaults used when seeding accounts, and a
//!   bounded brute-force generator.
//!
//! * [search](search) runs a candidate source against a stored hash and
//!   reports the first match.
//!
//! * [mock](mock) builds user records with freshly computed legacy hashes
//!   and writes them out as a JSON fixture.
//!
//! * [pbkdf2_sha256](pbkdf2_sha256) produces (and checks) the salted
//!   PBKDF2 format, for comparison.
//!
//! The [auto](auto) module recognizes which of the two formats a stored
//! value is in.

#![warn(missing_docs)]

mod enc_dec;
pub mod error;
pub mod legacy;
pub mod candidates;
pub mod search;
pub mod mock;
pub mod pbkdf2_sha256;

/// Type alias for the Result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// Setup struct for legacy hashing customization.
///
/// If `salt` is set to `None`, a random UUID salt will be generated. The
/// legacy scheme has exactly one round; `rounds` may be left as `None` or
/// set to 1, and any other value is rejected.
pub struct HashSetup<'a> {
    /// Custom salt.
    pub salt: Option<&'a str>,
    /// Number of rounds.
    pub rounds: Option<u32>,
}

/// A trait for converting a type into a `HashSetup` struct.
pub trait IntoHashSetup<'a> {
    /// The conversion function.
    fn into_hash_setup(self, f: fn(&'a str) -> Result<HashSetup<'a>>) -> Result<HashSetup<'a>>;
}

impl<'a> IntoHashSetup<'a> for &'a str {
    fn into_hash_setup(self, f: fn(&'a str) -> Result<HashSetup<'a>>) -> Result<HashSetup<'a>> {
        f(self)
    }
}

impl<'a> IntoHashSetup<'a> for HashSetup<'a> {
    fn into_hash_setup(self, _f: fn(&'a str) -> Result<HashSetup<'a>>) -> Result<HashSetup<'a>> {
        Ok(self)
    }
}

fn consteq(stored: &[u8], calc: &[u8]) -> bool {
    if stored.len() != calc.len() {
        return false;
    }
    0 == stored.iter().zip(calc.iter()).fold(0, |xs, (h1, h2)| xs | h1 ^ h2)
}

mod random {
    use rand::RngCore;
    use rand::rngs::OsRng;
    use uuid::Uuid;
    use crate::error::Error;
    use super::Result;

    pub fn gen_salt_uuid() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn gen_salt_bytes(bytes: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(bytes).map_err(|e| Error::RandomError(e.to_string()))
    }
}

mod parse {
    use std::str;

    /// A trait for traversing a hash string.
    ///
    /// Stored hashes consist of substrings joined by a delimiter. This trait
    /// enables extracting references to those substrings.
    pub trait HashIterator {
        /// The substring that is returned by methods.
        type Elem;

        /// Extract a fixed-size substring.
        ///
        /// There must be <i>at least</i> `n` ASCII characters remaining in the
        /// string. If there are less, `None` is returned. If called with a non-zero
        /// `n`, this method drains the string: if there are exactly `n` characters
        /// remaining, subsequent calls will return `None`.
        ///
        /// Calling `take` with `n` set to zero returns an empty string if the main
        /// string is not drained.
        fn take(&mut self, n: usize) -> Option<Self::Elem>;

        /// Extract a substring delimited by a byte.
        ///
        /// Return a substring from the current position to the next occurrence of the
        /// ASCII delimiter `ac` or the end of the string. If the delimiter is found,
        /// advance the position one byte after it. Drains the string.
        fn take_until(&mut self, ac: u8) -> Option<Self::Elem>;

        /// Returns `true` if the string is drained.
        fn at_end(&mut self) -> bool;
    }

    pub struct HashSlice<'a> {
        bp: &'a [u8],
        len: usize,
        pos: usize,
    }

    impl<'a> HashSlice<'a> {
        pub fn new(hash: &'a str) -> HashSlice<'a> {
            HashSlice { bp: hash.as_bytes(), len: hash.len(), pos: 0 }
        }
    }

    impl<'a> HashIterator for HashSlice<'a> {
        type Elem = &'a str;

        fn take(&mut self, n: usize) -> Option<Self::Elem> {
            if self.pos > self.len {
                return None;
            }
            let sp = self.pos;
            if sp + n > self.len {
                self.pos = self.len + 1;
                None
            } else {
                let endp = self.pos + n;
                self.pos = endp + if endp == self.len { 1 } else { 0 };
                str::from_utf8(&self.bp[sp..endp]).ok()
            }
        }

        fn take_until(&mut self, ac: u8) -> Option<Self::Elem> {
            if self.pos > self.len {
                return None;
            }
            let mut sp = self.pos;
            while sp < self.len {
                if self.bp[sp] == ac {
                    break;
                }
                sp += 1;
            }
            let oldp = self.pos;
            self.pos = sp + 1;
            str::from_utf8(&self.bp[oldp..sp]).ok()
        }

        fn at_end(&mut self) -> bool {
            self.take(0).unwrap_or("X") == "X"
        }
    }

    /// Split a string into exactly two parts around a single delimiter.
    ///
    /// Returns `None` if the delimiter is absent or appears more than once.
    /// Either part may be empty.
    pub fn split_pair(hash: &str, ac: u8) -> Option<(&str, &str)> {
        let mut hs = HashSlice::new(hash);
        let first = hs.take_until(ac)?;
        let second = hs.take_until(ac)?;
        if hs.at_end() {
            Some((first, second))
        } else {
            None
        }
    }

    #[cfg(test)]
    mod tests {
        use super::{HashSlice, HashIterator, split_pair};

        #[test]
        fn drain_string() {
            let mut hs = HashSlice::new("YajzDl4gykhWfs21H4zClojGaaYfdUZvvOJdul4aFUU=:550e8400-e29b-41d4-a716-446655440000");
            assert_eq!(hs.take(4).unwrap(), "Yajz");
            let mut hs1 = HashSlice { bp: hs.bp, pos: hs.pos, len: hs.len };
            assert_eq!(hs.take_until(b':').unwrap(), "Dl4gykhWfs21H4zClojGaaYfdUZvvOJdul4aFUU=");
            assert_eq!(hs.take_until(b':').unwrap(), "550e8400-e29b-41d4-a716-446655440000");
            assert_eq!(hs.at_end(), true);
            assert_eq!(hs1.take(40).unwrap(), "Dl4gykhWfs21H4zClojGaaYfdUZvvOJdul4aFUU=");
            assert_eq!(hs1.at_end(), false);
        }

        #[test]
        fn empty_string() {
            let mut hs = HashSlice::new("");
            assert_eq!(hs.take_until(b':').unwrap(), "");
            assert_eq!(hs.at_end(), true);
            let mut hs = HashSlice::new("");
            assert_eq!(hs.at_end(), false);
        }

        #[test]
        fn empty_elements() {
            let mut hs = HashSlice::new(":");
            assert_eq!(hs.take_until(b':').unwrap(), "");
            assert_eq!(hs.take_until(b':').unwrap(), "");
            assert_eq!(hs.at_end(), true);
        }

        #[test]
        fn pairs() {
            assert_eq!(split_pair("abc:def", b':'), Some(("abc", "def")));
            assert_eq!(split_pair("abc:", b':'), Some(("abc", "")));
            assert_eq!(split_pair(":", b':'), Some(("", "")));
            assert_eq!(split_pair("abc", b':'), None);
            assert_eq!(split_pair("", b':'), None);
            assert_eq!(split_pair("a:b:c", b':'), None);
            assert_eq!(split_pair("a::", b':'), None);
        }
    }
}

pub mod auto {
    //! Format recognition for stored hashes.
    //!
    //! The external application keeps both formats side by side in the same
    //! column and tells them apart by the `:` separator, which can't occur in
    //! a standard Base64 string. The functions here follow the same rule.
    use crate::{legacy, pbkdf2_sha256};

    /// The format of a stored hash.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Scheme {
        /// Legacy `digest:salt`.
        Legacy,
        /// Base64 of salt and derived key.
        Pbkdf2Sha256,
    }

    /// Recognize the format of a stored hash.
    pub fn scheme(hash: &str) -> Scheme {
        if hash.contains(':') {
            Scheme::Legacy
        } else {
            Scheme::Pbkdf2Sha256
        }
    }

    /// Verify that the hash corresponds to a password, using format recognition.
    ///
    /// Blank passwords and blank hashes never match.
    pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> bool {
        let pass = pass.as_ref();
        if pass.iter().all(u8::is_ascii_whitespace) || hash.trim().is_empty() {
            return false;
        }
        match scheme(hash) {
            Scheme::Legacy => legacy::verify(pass, hash),
            Scheme::Pbkdf2Sha256 => pbkdf2_sha256::verify(pass, hash),
        }
    }

}

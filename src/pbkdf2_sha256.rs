//! PBKDF2-HMAC-SHA256 hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This is the format the external application uses for new passwords.
//! It is included so that its output can be produced next to the legacy
//! format for comparison. The salt is random and stored together with
//! the derived key; the number of rounds is not stored at all, so every
//! value is verified with the default.
//!
//! # Example
//!
//! ```
//! use pwaudit::pbkdf2_sha256::{self, Pbkdf2Setup};
//!
//! let salt = [7u8; 32];
//! let h = pbkdf2_sha256::hash_with(Pbkdf2Setup { salt: Some(&salt), rounds: None }, "secret").unwrap();
//! assert_eq!(h, "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwdeyeU5m6SMYWETVwuj3KLRodNGzXaDvNIZwlTTSyYE7w==");
//! assert!(pbkdf2_sha256::verify("secret", &h));
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited.
//!
//! * __Salt length__: exactly 32 bytes, random by default.
//!
//! * __Rounds__: 1 to 2<sup>32</sup>-1. Default is 100,000, and only
//!   the default can be verified.
//!
//! # Hash Format
//!
//! The hash is the 88-character standard Base64 encoding (with padding)
//! of the 32-byte salt followed by the 32-byte derived key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use super::{Result, consteq};
use crate::enc_dec::{b64_encode, b64_decode_exact};
use crate::error::Error;
use crate::random;

const MIN_ROUNDS: u32 = 1;
/// Default number of rounds.
pub const DEFAULT_ROUNDS: u32 = 100_000;
/// Salt length in bytes.
pub const SALT_LEN: usize = 32;
/// Derived key length in bytes.
pub const HASH_LEN: usize = 32;

/// Setup struct for PBKDF2 hashing customization.
///
/// If `salt` is `None`, a random salt is generated; if `rounds` is `None`,
/// `DEFAULT_ROUNDS` is used.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pbkdf2Setup<'a> {
    /// Custom salt.
    pub salt: Option<&'a [u8]>,
    /// Number of rounds.
    pub rounds: Option<u32>,
}

fn do_pbkdf2_sha256(pass: &[u8], salt: &[u8], rounds: u32) -> Result<String> {
    if salt.len() != SALT_LEN {
        return Err(Error::InsufficientLength);
    }
    let mut buf = [0u8; SALT_LEN + HASH_LEN];
    buf[..SALT_LEN].copy_from_slice(salt);
    pbkdf2_hmac::<Sha256>(pass, salt, rounds, &mut buf[SALT_LEN..]);
    Ok(b64_encode(&buf))
}

/// Hash a password with a randomly generated salt and the default
/// number of rounds.
///
/// An error is returned if the system random number generator cannot
/// be used.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    random::gen_salt_bytes(&mut salt)?;
    do_pbkdf2_sha256(pass.as_ref(), &salt, DEFAULT_ROUNDS)
}

/// Hash a password with user-provided parameters.
///
/// A salt of the wrong length is rejected with `InsufficientLength`, and
/// zero rounds with `InvalidRounds`.
pub fn hash_with<B: AsRef<[u8]>>(param: Pbkdf2Setup, pass: B) -> Result<String> {
    let rounds = match param.rounds {
        Some(r) if r < MIN_ROUNDS => return Err(Error::InvalidRounds),
        Some(r) => r,
        None => DEFAULT_ROUNDS,
    };
    if let Some(salt) = param.salt {
        do_pbkdf2_sha256(pass.as_ref(), salt, rounds)
    } else {
        let mut salt = [0u8; SALT_LEN];
        random::gen_salt_bytes(&mut salt)?;
        do_pbkdf2_sha256(pass.as_ref(), &salt, rounds)
    }
}

/// Verify that the hash corresponds to a password.
///
/// Anything which doesn't decode to exactly a salt and a derived key
/// doesn't match.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> bool {
    let mut buf = [0u8; SALT_LEN + HASH_LEN];
    if b64_decode_exact(hash, &mut buf).is_err() {
        return false;
    }
    let mut dk = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(pass.as_ref(), &buf[..SALT_LEN], DEFAULT_ROUNDS, &mut dk);
    consteq(&buf[SALT_LEN..], &dk)
}

#[cfg(test)]
mod tests {
    use super::Pbkdf2Setup;
    use crate::enc_dec::b64_decode;
    use crate::error::Error;

    #[test]
    fn custom() {
        let salt: Vec<u8> = (0..32).collect();
        assert_eq!(super::hash_with(Pbkdf2Setup { salt: Some(&salt), rounds: Some(1000) }, "password").unwrap(),
            "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh/O4x2elYOagzHOG4zys471wmcp2WoMAE3YoeS59zNWZA==");
    }

    #[test]
    fn random_salt() {
        let h1 = super::hash("SecureAdmin2024!").unwrap();
        let h2 = super::hash_with(Pbkdf2Setup::default(), "SecureAdmin2024!").unwrap();
        assert_ne!(h1, h2);
        assert_eq!(h1.len(), 88);
        assert_eq!(b64_decode(&h1).unwrap().len(), 64);
        assert!(super::verify("SecureAdmin2024!", &h1));
        assert!(!super::verify("SecureAdmin2024", &h1));
    }

    #[test]
    fn undecodable() {
        assert!(!super::verify("secret", ""));
        assert!(!super::verify("secret", "not base64!"));
        assert!(!super::verify("secret", "c2FsdA=="));
    }

    #[test]
    fn bad_params() {
        assert!(matches!(super::hash_with(Pbkdf2Setup { salt: None, rounds: Some(0) }, "pw"), Err(Error::InvalidRounds)));
        let short = [1u8; 16];
        assert!(matches!(super::hash_with(Pbkdf2Setup { salt: Some(&short), rounds: Some(1) }, "pw"), Err(Error::InsufficientLength)));
    }
}

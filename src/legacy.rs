//! Legacy salted SHA-256 hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This is the format the external application used before it switched
//! to PBKDF2. The password and the salt are concatenated and hashed once
//! with SHA-256; there is no iteration count. It must not be used for new
//! passwords, and is implemented only so that existing values can be
//! verified and recovered.
//!
//! # Example
//!
//! ```
//! use pwaudit::{legacy, HashSetup};
//!
//! let salt = "550e8400-e29b-41d4-a716-446655440002";
//! let h = legacy::hash_with(HashSetup { salt: Some(salt), rounds: None }, "manager123").unwrap();
//! assert_eq!(h, "DlDCngVJc6Ywv1XU0AmJitu32FCM75j2EaTdX/k2LTI=:\
//!                550e8400-e29b-41d4-a716-446655440002");
//! assert!(legacy::verify("manager123", &h));
//! ```
//!
//! # Parameters
//!
//! * __Password length__: unlimited.
//!
//! * __Salt__: any string without a `:`. The application uses a UUID in
//!   hyphenated form, which is also what `hash` generates.
//!
//! * __Rounds__: always 1.
//!
//! # Hash Format
//!
//! The format of the hash is *`{checksum}`*__:__*`{salt}`*, where:
//!
//! * *`{checksum}`* is a 44-character standard Base64 encoding (with
//!   padding) of the SHA-256 digest of the password followed by the salt.
//!
//! * *`{salt}`* is the salt string.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use super::{Result, HashSetup, IntoHashSetup, consteq};
use crate::enc_dec::b64_encode;
use crate::error::Error;
use crate::parse;
use crate::random;

/// Separator between the checksum and the salt.
pub const SEPARATOR: char = ':';
/// The only accepted number of rounds.
pub const ROUNDS: u32 = 1;

fn do_legacy_digest(pass: &[u8], salt: &str) -> String {
    let mut dgst = Sha256::new();
    dgst.update(pass);
    dgst.update(salt.as_bytes());
    b64_encode(&dgst.finalize())
}

fn do_legacy_hash(pass: &[u8], salt: &str) -> Result<String> {
    if salt.contains(SEPARATOR) {
        return Err(Error::InvalidHashString);
    }
    Ok(format!("{}{}{}", do_legacy_digest(pass, salt), SEPARATOR, salt))
}

/// Compute the checksum part of a legacy hash.
///
/// This is the bare Base64 digest, without the separator and the salt.
pub fn digest<B: AsRef<[u8]>>(pass: B, salt: &str) -> String {
    do_legacy_digest(pass.as_ref(), salt)
}

/// Hash a password with a randomly generated UUID salt.
///
/// Mirrors how the application seeds new accounts.
pub fn hash<B: AsRef<[u8]>>(pass: B) -> Result<String> {
    let salt = random::gen_salt_uuid();
    do_legacy_hash(pass.as_ref(), &salt)
}

fn parse_legacy_hash(hash: &str) -> Result<HashSetup> {
    match parse::split_pair(hash, SEPARATOR as u8) {
        Some((_, salt)) => Ok(HashSetup { salt: Some(salt), rounds: None }),
        None => Err(Error::InvalidHashString),
    }
}

/// Hash a password with user-provided parameters.
///
/// If the `param` argument is a `&str`, it must be in the final hash
/// format, and the salt is parsed out of that value. A salt which contains
/// the separator is rejected, as is any number of rounds other than 1.
pub fn hash_with<'a, IHS, B>(param: IHS, pass: B) -> Result<String>
    where IHS: IntoHashSetup<'a>, B: AsRef<[u8]>
{
    let hs = IHS::into_hash_setup(param, parse_legacy_hash)?;
    match hs.rounds {
        None | Some(ROUNDS) => (),
        Some(_) => return Err(Error::InvalidRounds),
    }
    if let Some(salt) = hs.salt {
        do_legacy_hash(pass.as_ref(), salt)
    } else {
        let salt = random::gen_salt_uuid();
        do_legacy_hash(pass.as_ref(), &salt)
    }
}

/// Verify that the hash corresponds to a password.
///
/// A hash that doesn't split into exactly one checksum and one salt
/// doesn't match anything.
pub fn verify<B: AsRef<[u8]>>(pass: B, hash: &str) -> bool {
    match parse::split_pair(hash, SEPARATOR as u8) {
        Some((checksum, salt)) => consteq(checksum.as_bytes(), do_legacy_digest(pass.as_ref(), salt).as_bytes()),
        None => false,
    }
}

/// A parsed legacy hash.
///
/// Serializes as its string form, which is how the application stores it
/// in a user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StoredCredential {
    digest: String,
    salt: String,
}

impl StoredCredential {
    /// Hash a password with the given salt.
    pub fn new<B: AsRef<[u8]>>(pass: B, salt: &str) -> Result<StoredCredential> {
        if salt.contains(SEPARATOR) {
            return Err(Error::InvalidHashString);
        }
        Ok(StoredCredential { digest: do_legacy_digest(pass.as_ref(), salt), salt: salt.to_owned() })
    }

    /// The Base64 checksum.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Verify that this credential corresponds to a password.
    pub fn verify<B: AsRef<[u8]>>(&self, pass: B) -> bool {
        consteq(self.digest.as_bytes(), do_legacy_digest(pass.as_ref(), &self.salt).as_bytes())
    }
}

impl FromStr for StoredCredential {
    type Err = Error;

    fn from_str(s: &str) -> Result<StoredCredential> {
        match parse::split_pair(s, SEPARATOR as u8) {
            Some((digest, salt)) => Ok(StoredCredential { digest: digest.to_owned(), salt: salt.to_owned() }),
            None => Err(Error::InvalidHashString),
        }
    }
}

impl fmt::Display for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.digest, SEPARATOR, self.salt)
    }
}

impl From<StoredCredential> for String {
    fn from(sc: StoredCredential) -> String {
        sc.to_string()
    }
}

impl TryFrom<String> for StoredCredential {
    type Error = Error;

    fn try_from(s: String) -> Result<StoredCredential> {
        s.parse()
    }
}

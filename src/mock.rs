//! Mock user records with legacy password hashes.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The records mirror the user objects of the external application's
//! mock data store, so that a generated fixture can be dropped in place
//! of its data file. Each record gets a freshly computed legacy hash for
//! a known password, which makes the seeded accounts usable for logging
//! in.
//!
//! The fixture is a single JSON array with camelCase keys, indented by two
//! spaces. Optional fields which are absent are written as `null`.
//! Timestamps are opaque strings, since the application's data contains
//! several formats that have to be preserved as they are.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use super::Result;
use crate::legacy::StoredCredential;

/// File name used for the fixture when none is given.
pub const DEFAULT_FIXTURE: &str = "updated-mock-users.json";

/// Account role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Administrator.
    Admin,
    /// Manager.
    Manager,
    /// Regular user.
    User,
}

/// Identity and profile fields of a user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub age: u32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub last_login_at: Option<String>,
    pub role: UserRole,
    pub profile_photo_url: Option<String>,
}

/// A user record as stored in the fixture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUserRecord {
    /// Identity and profile.
    #[serde(flatten)]
    pub profile: Profile,
    /// Legacy hash of the account password.
    pub password_hash: StoredCredential,
}

impl MockUserRecord {
    /// Verify a password against the record's hash.
    pub fn verify<B: AsRef<[u8]>>(&self, pass: B) -> bool {
        self.password_hash.verify(pass)
    }
}

/// Input for one generated record: the profile plus the known password
/// and the salt to hash it with.
#[derive(Clone, Debug)]
pub struct UserSeed<'a> {
    /// Plaintext password.
    pub password: &'a str,
    /// Salt for the legacy hash.
    pub salt: &'a str,
    /// Identity and profile.
    pub profile: Profile,
}

/// Build records from seeds, hashing each seed's password with its salt.
///
/// Fails only if a salt contains the legacy separator.
pub fn generate(seeds: &[UserSeed]) -> Result<Vec<MockUserRecord>> {
    seeds.iter()
        .map(|seed| -> Result<MockUserRecord> {
            Ok(MockUserRecord {
                profile: seed.profile.clone(),
                password_hash: StoredCredential::new(seed.password, seed.salt)?,
            })
        })
        .collect()
}

/// Write records to a file as a JSON array, replacing any previous content.
pub fn write_fixture<P: AsRef<Path>>(path: P, records: &[MockUserRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path.as_ref(), json)?;
    info!(path = %path.as_ref().display(), count = records.len(), "wrote fixture");
    Ok(())
}

/// Read records back from a fixture file.
pub fn read_fixture<P: AsRef<Path>>(path: P) -> Result<Vec<MockUserRecord>> {
    let json = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&json)?)
}

//! Error values.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Verification never fails with an error: a stored value which can't be
//! parsed simply doesn't match. Errors are reserved for hashing with bad
//! parameters and for fixture I/O.
use thiserror::Error;

/// Possible errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Random value cannot be generated.
    #[error("{0}")]
    RandomError(String),
    /// Some component of the hash string contains an invalid character.
    #[error("Invalid encoding")]
    EncodingError,
    /// An encoded value is too short.
    #[error("Encoded value is too short")]
    InsufficientLength,
    /// The number of rounds is out of range.
    #[error("Invalid rounds value")]
    InvalidRounds,
    /// The hash string is not in the expected format.
    #[error("Invalid hash string")]
    InvalidHashString,
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A fixture couldn't be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

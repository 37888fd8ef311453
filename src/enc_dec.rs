// Encoding and decoding routines.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crate::error::Error;
use super::Result;

// Both schemes use the standard alphabet with padding, which is what
// the external application's runtime emits.
pub fn b64_encode(bs: &[u8]) -> String {
    STANDARD.encode(bs)
}

pub fn b64_decode(enc: &str) -> Result<Vec<u8>> {
    STANDARD.decode(enc).map_err(|_| Error::EncodingError)
}

/// Decode into a fixed-size buffer; the encoded value must fill it exactly.
pub fn b64_decode_exact(enc: &str, decbuf: &mut [u8]) -> Result<()> {
    let dec = b64_decode(enc)?;
    if dec.len() < decbuf.len() {
        return Err(Error::InsufficientLength);
    }
    if dec.len() > decbuf.len() {
        return Err(Error::EncodingError);
    }
    decbuf.copy_from_slice(&dec);
    Ok(())
}

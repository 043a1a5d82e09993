/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! CMS webhook signature verification.
//!
//! The `sanity-webhook-signature` header has the form
//! `t=<unix seconds>,v1=<signature>` where the signature is the unpadded
//! URL-safe base64 HMAC-SHA256 of `"<t>.<raw body>"`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "sanity-webhook-signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    pub timestamp: &'a str,
    pub signature: &'a str,
}

/// Split a signature header into its timestamp and `v1` signature.
pub fn parse_header(header: &str) -> Option<SignatureHeader<'_>> {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }
    let timestamp = timestamp.filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))?;
    let signature = signature.filter(|s| !s.is_empty())?;
    Some(SignatureHeader {
        timestamp,
        signature,
    })
}

fn mac(secret: &str, timestamp: &str, body: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    Some(mac)
}

/// Signature header value for `body` at `timestamp`.
pub fn sign(secret: &str, timestamp: i64, body: &[u8]) -> Option<String> {
    let timestamp = timestamp.to_string();
    let digest = mac(secret, &timestamp, body)?.finalize().into_bytes();
    Some(format!("t={timestamp},v1={}", URL_SAFE_NO_PAD.encode(digest)))
}

/// Constant-time check of `header` against `body`.
pub fn verify(secret: &str, header: &str, body: &[u8]) -> bool {
    let Some(parsed) = parse_header(header) else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(parsed.signature.trim_end_matches('=')) else {
        return false;
    };
    mac(secret, parsed.timestamp, body)
        .is_some_and(|mac| mac.verify_slice(&expected).is_ok())
}

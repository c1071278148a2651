// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Unverified token decoding.
//!
//! WARNING: nothing here checks a signature. The decoded data is whatever
//! the caller sent. Use [`super::verify`] before trusting it.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine,
};
use serde::de::DeserializeOwned;

use super::claims::TokenPair;

/// Standard alphabet, padding optional (JWT segments are unpadded).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the payload segment of a compact token without a key.
///
/// Returns `None` on any structural problem: wrong segment count, bad
/// base64, bad UTF-8, or JSON that does not fit `T`.
pub fn decode_unverified<T: DeserializeOwned>(token: &str) -> Option<TokenPair<T>> {
    let payload = payload_segment(token)?;

    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(standard).ok()?;
    let json = String::from_utf8(bytes).ok()?;
    let data = serde_json::from_str::<T>(&json).ok()?;

    Some(TokenPair {
        token: token.to_string(),
        data,
    })
}

fn payload_segment(token: &str) -> Option<&str> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() || payload.is_empty() {
        return None;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Claims {
        sub: String,
        uid: String,
    }

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS512","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{claims}.fake_signature")
    }

    #[test]
    fn decodes_payload_without_key() {
        let token = token_with_payload(r#"{"sub":"actor","uid":"user_123"}"#);
        let pair = decode_unverified::<Claims>(&token).unwrap();
        assert_eq!(pair.token, token);
        assert_eq!(
            pair.data,
            Claims {
                sub: "actor".to_string(),
                uid: "user_123".to_string(),
            }
        );
    }

    #[test]
    fn handles_url_safe_characters() {
        // These payloads encode with '-' and '_' respectively.
        for uid in ["~~~", "???"] {
            let token = token_with_payload(&format!(r#"{{"sub":"actor","uid":"{uid}"}}"#));
            let pair = decode_unverified::<Claims>(&token).unwrap();
            assert_eq!(pair.data.uid, uid);
        }
    }

    #[test]
    fn accepts_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let claims = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"a","uid":"b"}"#);
        let token = format!("{header}.{claims}.sig");
        assert!(decode_unverified::<Claims>(&token).is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_unverified::<serde_json::Value>("").is_none());
        assert!(decode_unverified::<serde_json::Value>("not-a-jwt").is_none());
        assert!(decode_unverified::<serde_json::Value>("a.b").is_none());
        assert!(decode_unverified::<serde_json::Value>("a.b.c.d").is_none());
        assert!(decode_unverified::<serde_json::Value>("a.!!!.c").is_none());
        assert!(decode_unverified::<serde_json::Value>("a..c").is_none());
    }

    #[test]
    fn rejects_invalid_utf8() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let claims = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        let token = format!("{header}.{claims}.sig");
        assert!(decode_unverified::<serde_json::Value>(&token).is_none());
    }

    #[test]
    fn rejects_json_of_wrong_shape() {
        let token = token_with_payload(r#"{"sub":"actor"}"#);
        assert!(decode_unverified::<Claims>(&token).is_none());

        let token = token_with_payload("not json");
        assert!(decode_unverified::<serde_json::Value>(&token).is_none());
    }
}

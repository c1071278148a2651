// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Token Module
//!
//! Signed bearer credentials for the two principal kinds.
//!
//! ## Wire Format
//!
//! Compact JWT, `header.payload.signature`, HMAC-SHA-512. The payload always
//! carries `iss`, `sub`, `iat`, `exp` and `v`, plus `uid`, `sid` and, for
//! actors, an optional `proxy` flag.
//!
//! ## Trust
//!
//! - [`decode_unverified`] needs no key and checks nothing
//! - [`verify`] checks the signature only, never expiry

pub mod claims;
pub mod codec;
pub mod principal;
pub mod signer;

pub use claims::{Issuer, Subject, TokenClaims, TokenDataWithVersion, TokenPair, TOKEN_DATA_VERSION};
pub use codec::decode_unverified;
pub use principal::{
    decode_actor_token, decode_admin_token, sign_actor_token, sign_admin_token, ActorToken,
    ActorTokenData, AdminToken, AdminTokenData,
};
pub use signer::{sign, verify, SignOptions, TokenError};

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Turns `Authorization` headers into typed actor/admin identities.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <admin token>, Bearer <actor token>`
//!    (either or both)
//! 2. A verdict is produced:
//!    - `authoriser` mode: the middleware verifies signatures, expiry and
//!      sessions once per request and stores the verdict
//!    - `local` mode: handlers classify the header tokens directly
//! 3. Handlers wrap the verdict in [`HttpAuthentication`] and ask for
//!    `actor()` or `admin()`
//!
//! ## Security
//!
//! - `local` mode performs no signature check and is for development only
//! - Every failure is one code of [`AuthoriserResponseCode`]; nothing panics
//!   on attacker-controlled input

pub mod error;
pub mod extractor;
pub mod facade;
pub mod header;
pub mod middleware;
pub mod resolver;
pub mod response;
pub mod session;

pub use error::AuthError;
pub use extractor::{Actor, Admin, Authentication};
pub use facade::{ActorInspector, AdminInspector, HttpAuthentication};
pub use header::{compose_bearer_header, parse_bearer_tokens, NamedTokens};
pub use middleware::authoriser_middleware;
pub use resolver::{
    resolve_authorization, resolve_from_context, resolve_from_headers, resolve_from_verdict,
    LocalHeaderResolver, PrecomputedVerdictResolver, ResolveAuthoriser,
};
pub use response::{AuthoriserResponse, AuthoriserResponseCode, AuthoriserTokens};
pub use session::{InMemorySessionStore, SessionStatus, SessionStore};

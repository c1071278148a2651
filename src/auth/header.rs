// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `Authorization` header codec.
//!
//! One header may carry several credentials:
//!
//! ```text
//! Authorization: Bearer <admin token>, Bearer <actor token>
//! ```
//!
//! Parsing is all-or-nothing. A single malformed segment rejects the whole
//! header so that no credential is silently dropped.

/// Authentication scheme, compared case-insensitively.
const BEARER: &str = "bearer";

/// Parse a header value into its raw bearer tokens.
///
/// Returns `None` for an empty header or if any comma-separated segment is
/// not `Bearer <token>`.
pub fn parse_bearer_tokens(header: &str) -> Option<Vec<String>> {
    let header = header.trim();
    if header.is_empty() {
        return None;
    }

    header
        .split(',')
        .map(|segment| parse_segment(segment.trim()))
        .collect()
}

fn parse_segment(segment: &str) -> Option<String> {
    let scheme = segment.get(..BEARER.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }

    let rest = &segment[BEARER.len()..];
    if !rest.starts_with(' ') {
        return None;
    }

    let token = rest.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

/// Tokens to place in an outgoing header, by principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamedTokens<'a> {
    pub actor: Option<&'a str>,
    pub admin: Option<&'a str>,
}

/// Compose a header value from named tokens.
///
/// The admin token goes first when both are present. Readers classify by
/// the decoded `sub` claim, so the order carries no meaning.
pub fn compose_bearer_header(tokens: &NamedTokens<'_>) -> Option<String> {
    match (tokens.admin, tokens.actor) {
        (Some(admin), Some(actor)) => Some(format!("Bearer {admin}, Bearer {actor}")),
        (Some(single), None) | (None, Some(single)) => Some(format!("Bearer {single}")),
        (None, None) => None,
    }
}

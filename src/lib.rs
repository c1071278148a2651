// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Principal Auth - Actor/Admin Bearer Token Authentication
//!
//! Carries up to two signed principals on one request: an actor (the user
//! acting) and an admin (an operator, possibly acting on the actor's behalf).
//!
//! ## Modules
//!
//! - `token` - Token claims, unverified decoding, HS512 signing and verification
//! - `auth` - Header parsing, authoriser verdicts, facade and Axum extractors
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod token;

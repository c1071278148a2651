// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::InMemorySessionStore;
use crate::config::AuthConfig;

#[derive(Clone)]
pub struct AppState {
    pub auth_config: Arc<AuthConfig>,
    pub sessions: Arc<InMemorySessionStore>,
}

impl AppState {
    pub fn new(auth_config: AuthConfig) -> Self {
        Self {
            auth_config: Arc::new(auth_config),
            sessions: Arc::new(InMemorySessionStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AuthConfig::local())
    }
}

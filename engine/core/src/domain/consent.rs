// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary outcome handed back to callers (UI, wrapper layer, action invoker).
///
/// Only `reason` is meant for end users; `advisor` names the rule that vetoed,
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Consent {
    Allowed,
    Vetoed {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        advisor: Option<String>,
    },
}

impl Consent {
    pub fn veto(reason: &str) -> Self {
        Self::Vetoed {
            reason: reason.to_string(),
            advisor: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn is_vetoed(&self) -> bool {
        !self.is_allowed()
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Vetoed { reason, .. } => Some(reason),
        }
    }

    pub fn advisor(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Vetoed { advisor, .. } => advisor.as_deref(),
        }
    }
}

impl fmt::Display for Consent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "allowed"),
            Self::Vetoed { reason, .. } => write!(f, "vetoed: {}", reason),
        }
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Interaction Results
//!
//! [`InteractionResult`] accumulates the advice of every rule consulted for one
//! interaction; [`InteractionResultSet`] combines several of them into one
//! all-or-nothing check (e.g. every parameter of an action).
//!
//! ## Lifecycle
//!
//! ```text
//! NotEvaluated ─ advise() ─▶ Evaluating ─ resolve() ─▶ Resolved
//! ```
//!
//! A resolved result rejects further advice. The first veto recorded is *the*
//! reason; later vetoes are kept for diagnostics only.

use serde::{Deserialize, Serialize};

use crate::domain::consent::Consent;
use crate::domain::errors::InteractionError;
use crate::domain::events::InteractionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultState {
    NotEvaluated,
    Evaluating,
    Resolved,
}

/// One veto and the rule that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veto {
    pub reason: String,
    pub advisor: String,
}

#[derive(Debug, Clone)]
pub struct InteractionResult {
    event: InteractionEvent,
    vetoes: Vec<Veto>,
    state: ResultState,
}

impl InteractionResult {
    pub fn new(event: InteractionEvent) -> Self {
        Self {
            event,
            vetoes: Vec::new(),
            state: ResultState::NotEvaluated,
        }
    }

    /// Fold one rule's verdict in. `None` is no objection.
    pub fn advise(&mut self, reason: Option<String>, advisor: &str) -> Result<(), InteractionError> {
        if self.state == ResultState::Resolved {
            return Err(InteractionError::ResultAlreadyResolved(self.event.identifier.clone()));
        }
        self.state = ResultState::Evaluating;
        if let Some(reason) = reason {
            self.event.advised(&reason, advisor);
            self.vetoes.push(Veto {
                reason,
                advisor: advisor.to_string(),
            });
        }
        Ok(())
    }

    pub fn resolve(&mut self) {
        self.state = ResultState::Resolved;
    }

    pub fn state(&self) -> ResultState {
        self.state
    }

    pub fn event(&self) -> &InteractionEvent {
        &self.event
    }

    pub fn into_event(self) -> InteractionEvent {
        self.event
    }

    pub fn is_vetoed(&self) -> bool {
        !self.vetoes.is_empty()
    }

    pub fn is_allowed(&self) -> bool {
        !self.is_vetoed()
    }

    pub fn reason(&self) -> Option<&str> {
        self.vetoes.first().map(|v| v.reason.as_str())
    }

    pub fn advisor(&self) -> Option<&str> {
        self.vetoes.first().map(|v| v.advisor.as_str())
    }

    /// Every veto raised, in evaluation order.
    pub fn vetoes(&self) -> &[Veto] {
        &self.vetoes
    }

    pub fn create_consent(&self) -> Consent {
        match self.vetoes.first() {
            None => Consent::Allowed,
            Some(veto) => Consent::Vetoed {
                reason: veto.reason.clone(),
                advisor: Some(veto.advisor.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResultSet {
    results: Vec<InteractionResult>,
}

impl InteractionResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: InteractionResult) -> &mut Self {
        self.results.push(result);
        self
    }

    pub fn results(&self) -> &[InteractionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn is_vetoed(&self) -> bool {
        self.results.iter().any(InteractionResult::is_vetoed)
    }

    pub fn is_allowed(&self) -> bool {
        !self.is_vetoed()
    }

    /// The first vetoed result, otherwise the first result.
    pub fn interaction_result(&self) -> Option<&InteractionResult> {
        self.results
            .iter()
            .find(|r| r.is_vetoed())
            .or_else(|| self.results.first())
    }

    /// The leading reason of every vetoed result, in order.
    pub fn reasons(&self) -> Vec<&str> {
        self.results.iter().filter_map(InteractionResult::reason).collect()
    }

    pub fn create_consent(&self) -> Consent {
        self.results
            .iter()
            .find(|r| r.is_vetoed())
            .map(InteractionResult::create_consent)
            .unwrap_or(Consent::Allowed)
    }
}

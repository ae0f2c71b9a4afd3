// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Member Domain Events
//!
//! Business code can veto an interaction without writing a facet: a
//! [`crate::domain::facets::DomainEventFacet`] turns each hide/disable/validate
//! check into a [`MemberDomainEvent`], posts it synchronously to every
//! [`DomainEventSubscriber`], and reports whatever veto they recorded.
//!
//! ```text
//! VisibilityContext ─ create_interaction_event() ─┐
//!                                                 ▼
//!                       MemberDomainEvent { phase: Hide, .. }
//!                                                 │ DomainEventPoster::post
//!                                                 ▼
//!                       subscriber.on_event(&mut event) ─ event.hide()
//! ```
//!
//! Events carry only raw payloads; subscribers never see internal metamodel
//! types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::events::InteractionEvent;
use crate::domain::identifier::Identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    Hide,
    Disable,
    Validate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDomainEvent {
    pub phase: EventPhase,
    pub identifier: Identifier,
    pub source: Option<Value>,
    pub mixed_in: Option<Value>,
    pub arguments: Vec<Value>,
    pub position: Option<usize>,
    pub proposed: Option<Value>,
    hidden: bool,
    disabled_reason: Option<String>,
    invalidity_reason: Option<String>,
}

impl MemberDomainEvent {
    pub fn from_interaction(phase: EventPhase, event: &InteractionEvent) -> Self {
        Self {
            phase,
            identifier: event.identifier.clone(),
            source: event.source.clone(),
            mixed_in: event.mixed_in.clone(),
            arguments: event.arguments().to_vec(),
            position: event.position(),
            proposed: event.proposed().cloned(),
            hidden: false,
            disabled_reason: None,
            invalidity_reason: None,
        }
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Record a disabling reason; the first subscriber to disable wins.
    pub fn disable(&mut self, reason: &str) {
        if self.disabled_reason.is_none() {
            self.disabled_reason = Some(reason.to_string());
        }
    }

    /// Record an invalidity reason; the first subscriber to invalidate wins.
    pub fn invalidate(&mut self, reason: &str) {
        if self.invalidity_reason.is_none() {
            self.invalidity_reason = Some(reason.to_string());
        }
    }

    /// Veto in whatever way the current phase calls for.
    pub fn veto(&mut self, reason: &str) {
        match self.phase {
            EventPhase::Hide => self.hide(),
            EventPhase::Disable => self.disable(reason),
            EventPhase::Validate => self.invalidate(reason),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn disabled_reason(&self) -> Option<&str> {
        self.disabled_reason.as_deref()
    }

    pub fn invalidity_reason(&self) -> Option<&str> {
        self.invalidity_reason.as_deref()
    }

    pub fn is_vetoed(&self) -> bool {
        self.hidden || self.disabled_reason.is_some() || self.invalidity_reason.is_some()
    }
}

#[derive(Debug, Clone, Error)]
pub enum SubscriberError {
    #[error("subscriber '{subscriber}' failed: {message}")]
    Failed { subscriber: String, message: String },
}

/// Business code notified on every member interaction it may want to veto.
pub trait DomainEventSubscriber: Send + Sync {
    fn name(&self) -> &str;

    fn on_event(&self, event: &mut MemberDomainEvent) -> Result<(), SubscriberError>;
}

/// Delivers a member domain event to all subscribers before returning.
pub trait DomainEventPoster: Send + Sync {
    fn post(&self, event: &mut MemberDomainEvent) -> Result<(), SubscriberError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::InteractionEventKind;
    use serde_json::json;

    fn event(phase: EventPhase) -> MemberDomainEvent {
        let interaction = InteractionEvent::new(
            InteractionEventKind::ActionArgument {
                arguments: vec![json!("widget"), json!(-1)],
                position: 1,
                proposed: Some(json!(-1)),
            },
            Identifier::parameter(&Identifier::action("Order", "addLine"), 1),
            Some(json!({"id": 7})),
            None,
        );
        MemberDomainEvent::from_interaction(phase, &interaction)
    }

    #[test]
    fn test_from_interaction_copies_raw_values() {
        let event = event(EventPhase::Validate);
        assert_eq!(event.arguments, vec![json!("widget"), json!(-1)]);
        assert_eq!(event.position, Some(1));
        assert_eq!(event.proposed, Some(json!(-1)));
        assert_eq!(event.source, Some(json!({"id": 7})));
        assert!(!event.is_vetoed());
    }

    #[test]
    fn test_veto_follows_phase() {
        let mut hide = event(EventPhase::Hide);
        hide.veto("ignored");
        assert!(hide.is_hidden());

        let mut disable = event(EventPhase::Disable);
        disable.veto("Locked");
        disable.veto("Later");
        assert_eq!(disable.disabled_reason(), Some("Locked"));

        let mut validate = event(EventPhase::Validate);
        validate.veto("Must be positive");
        assert_eq!(validate.invalidity_reason(), Some("Must be positive"));
        assert!(validate.disabled_reason().is_none());
    }
}

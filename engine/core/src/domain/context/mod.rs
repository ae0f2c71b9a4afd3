// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Interaction Contexts
//!
//! One [`InteractionContext`] struct carries every interaction attempt: a kind
//! tag, the initiating party, the feature identifier, the [`InteractionHead`],
//! the rendering location and a kind-specific payload. The fields are private;
//! contexts are only built through the constructors in [`member`] and
//! [`action_argument`], so the tag and payload always agree.
//!
//! Advisors are typed against the three category wrappers:
//!
//! | Wrapper | Built for | Consulted by |
//! |---------|-----------|--------------|
//! | [`VisibilityContext`] | `*_VISIBLE` kinds | [`crate::domain::advisor::HidingInteractionAdvisor`] |
//! | [`UsabilityContext`] | `*_USABLE` kinds | [`crate::domain::advisor::DisablingInteractionAdvisor`] |
//! | [`ValidityContext`] | modify/add/remove/invoke/argument kinds | [`crate::domain::advisor::ValidatingInteractionAdvisor`] |
//!
//! Access, title and parse contexts stay plain `InteractionContext`s: no
//! advisor vetoes them, they only manufacture events.

pub mod action_argument;
pub mod member;

use serde_json::Value;
use std::ops::Deref;

use crate::domain::events::{InteractionEvent, InteractionEventKind};
use crate::domain::head::InteractionHead;
use crate::domain::identifier::Identifier;
use crate::domain::interaction::{InteractionCategory, InteractionContextType, InteractionInitiatedBy, Where};
use crate::domain::object::ManagedObject;

#[derive(Debug, Clone)]
pub(crate) enum ContextPayload {
    None,
    /// Proposed new value; `None` clears a property.
    Proposed(Option<ManagedObject>),
    CurrentValue(Option<ManagedObject>),
    Arguments {
        arguments: Vec<ManagedObject>,
        position: Option<usize>,
        proposed: Option<ManagedObject>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct InteractionContext {
    context_type: InteractionContextType,
    initiated_by: InteractionInitiatedBy,
    identifier: Identifier,
    head: InteractionHead,
    where_rendered: Where,
    payload: ContextPayload,
}

impl InteractionContext {
    pub(crate) fn new(
        context_type: InteractionContextType,
        identifier: Identifier,
        head: InteractionHead,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
        payload: ContextPayload,
    ) -> Self {
        Self {
            context_type,
            initiated_by,
            identifier,
            head,
            where_rendered,
            payload,
        }
    }

    pub fn context_type(&self) -> InteractionContextType {
        self.context_type
    }

    pub fn category(&self) -> InteractionCategory {
        self.context_type.category()
    }

    pub fn initiated_by(&self) -> InteractionInitiatedBy {
        self.initiated_by
    }

    pub fn is_framework_initiated(&self) -> bool {
        self.initiated_by.is_framework()
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn head(&self) -> &InteractionHead {
        &self.head
    }

    pub fn target(&self) -> &ManagedObject {
        self.head.target()
    }

    pub fn where_rendered(&self) -> Where {
        self.where_rendered
    }

    /// Candidate value: the proposed property/collection value or, for an
    /// argument context, the argument at [`Self::position`].
    pub fn proposed(&self) -> Option<&ManagedObject> {
        match &self.payload {
            ContextPayload::Proposed(proposed) => proposed.as_ref(),
            ContextPayload::Arguments { proposed, .. } => proposed.as_ref(),
            _ => None,
        }
    }

    pub fn current_value(&self) -> Option<&ManagedObject> {
        match &self.payload {
            ContextPayload::CurrentValue(value) => value.as_ref(),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[ManagedObject] {
        match &self.payload {
            ContextPayload::Arguments { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// A sibling argument bound in the same invocation attempt.
    pub fn argument(&self, index: usize) -> Option<&ManagedObject> {
        self.arguments().get(index)
    }

    /// Zero-based parameter index, for per-parameter contexts.
    pub fn position(&self) -> Option<usize> {
        match &self.payload {
            ContextPayload::Arguments { position, .. } => *position,
            _ => None,
        }
    }

    pub fn proposed_text(&self) -> Option<&str> {
        match &self.payload {
            ContextPayload::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Build the public event for subscribers, unwrapping every managed object
    /// to its raw payload.
    pub fn create_interaction_event(&self) -> InteractionEvent {
        use InteractionContextType as T;

        let kind = match self.context_type {
            T::ObjectVisible => InteractionEventKind::ObjectVisibility,
            T::ObjectValidate => InteractionEventKind::ObjectValidity,
            T::ObjectTitle => InteractionEventKind::ObjectTitle,
            T::ParseValue => InteractionEventKind::ParseValue {
                proposed: self.proposed_text().unwrap_or_default().to_string(),
            },
            T::PropertyVisible => InteractionEventKind::PropertyVisibility,
            T::PropertyUsable => InteractionEventKind::PropertyUsability,
            T::PropertyRead => InteractionEventKind::PropertyAccess {
                value: unwrap_optional(self.current_value()),
            },
            T::PropertyModify => InteractionEventKind::PropertyModify {
                proposed: unwrap_optional(self.proposed()),
            },
            T::CollectionVisible => InteractionEventKind::CollectionVisibility,
            T::CollectionUsable => InteractionEventKind::CollectionUsability,
            T::CollectionRead => InteractionEventKind::CollectionAccess {
                value: unwrap_optional(self.current_value()),
            },
            T::CollectionAddTo => InteractionEventKind::CollectionAddTo {
                proposed: unwrap_optional(self.proposed()),
            },
            T::CollectionRemoveFrom => InteractionEventKind::CollectionRemoveFrom {
                proposed: unwrap_optional(self.proposed()),
            },
            T::ActionVisible => InteractionEventKind::ActionVisibility,
            T::ActionUsable => InteractionEventKind::ActionUsability,
            T::ActionInvoke => InteractionEventKind::ActionInvocation {
                arguments: self.unwrapped_arguments(),
            },
            T::ActionParameterVisible => InteractionEventKind::ActionArgumentVisibility {
                arguments: self.unwrapped_arguments(),
                position: self.position().unwrap_or_default(),
            },
            T::ActionParameterUsable => InteractionEventKind::ActionArgumentUsability {
                arguments: self.unwrapped_arguments(),
                position: self.position().unwrap_or_default(),
            },
            T::ActionProposedArgument => InteractionEventKind::ActionArgument {
                arguments: self.unwrapped_arguments(),
                position: self.position().unwrap_or_default(),
                proposed: unwrap_optional(self.proposed()),
            },
        };

        InteractionEvent::new(
            kind,
            self.identifier.clone(),
            self.head.target().payload().cloned(),
            self.head.mixed_in().and_then(|owner| owner.payload().cloned()),
        )
    }

    fn unwrapped_arguments(&self) -> Vec<Value> {
        self.arguments().iter().map(ManagedObject::unwrap_payload).collect()
    }
}

fn unwrap_optional(object: Option<&ManagedObject>) -> Option<Value> {
    object.and_then(|o| o.payload().cloned())
}

/// Context for a visibility check; consulted by hiding advisors.
#[derive(Debug, Clone)]
pub struct VisibilityContext(InteractionContext);

/// Context for a usability check; consulted by disabling advisors.
#[derive(Debug, Clone)]
pub struct UsabilityContext(InteractionContext);

/// Context for a validity check; consulted by validating advisors.
#[derive(Debug, Clone)]
pub struct ValidityContext(InteractionContext);

impl VisibilityContext {
    pub fn into_inner(self) -> InteractionContext {
        self.0
    }
}

impl UsabilityContext {
    pub fn into_inner(self) -> InteractionContext {
        self.0
    }
}

impl ValidityContext {
    pub fn into_inner(self) -> InteractionContext {
        self.0
    }
}

impl Deref for VisibilityContext {
    type Target = InteractionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for UsabilityContext {
    type Target = InteractionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for ValidityContext {
    type Target = InteractionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

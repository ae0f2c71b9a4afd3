// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::identifier::Identifier;
use crate::domain::interaction::InteractionCategory;

/// Kind-specific payload of a public [`InteractionEvent`]. Only raw values,
/// never engine-internal wrappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEventKind {
    ObjectVisibility,
    ObjectValidity,
    ObjectTitle,
    ParseValue {
        proposed: String,
    },
    PropertyVisibility,
    PropertyUsability,
    PropertyAccess {
        value: Option<Value>,
    },
    PropertyModify {
        proposed: Option<Value>,
    },
    CollectionVisibility,
    CollectionUsability,
    CollectionAccess {
        value: Option<Value>,
    },
    CollectionAddTo {
        proposed: Option<Value>,
    },
    CollectionRemoveFrom {
        proposed: Option<Value>,
    },
    ActionVisibility,
    ActionUsability,
    ActionInvocation {
        arguments: Vec<Value>,
    },
    ActionArgumentVisibility {
        arguments: Vec<Value>,
        position: usize,
    },
    ActionArgumentUsability {
        arguments: Vec<Value>,
        position: usize,
    },
    ActionArgument {
        arguments: Vec<Value>,
        position: usize,
        proposed: Option<Value>,
    },
}

/// Public event manufactured by an interaction context.
///
/// `source` is the raw target, `mixed_in` the raw owner for mixin interactions.
/// The first advisor to veto is recorded via [`InteractionEvent::advised`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub kind: InteractionEventKind,
    pub identifier: Identifier,
    pub source: Option<Value>,
    pub mixed_in: Option<Value>,
    reason: Option<String>,
    advisor: Option<String>,
}

impl InteractionEvent {
    pub fn new(
        kind: InteractionEventKind,
        identifier: Identifier,
        source: Option<Value>,
        mixed_in: Option<Value>,
    ) -> Self {
        Self {
            kind,
            identifier,
            source,
            mixed_in,
            reason: None,
            advisor: None,
        }
    }

    /// Record a veto. The first one sticks.
    pub fn advised(&mut self, reason: &str, advisor: &str) {
        if self.reason.is_none() {
            self.reason = Some(reason.to_string());
            self.advisor = Some(advisor.to_string());
        }
    }

    pub fn is_veto(&self) -> bool {
        self.reason.is_some()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn advisor(&self) -> Option<&str> {
        self.advisor.as_deref()
    }

    pub fn arguments(&self) -> &[Value] {
        match &self.kind {
            InteractionEventKind::ActionInvocation { arguments }
            | InteractionEventKind::ActionArgumentVisibility { arguments, .. }
            | InteractionEventKind::ActionArgumentUsability { arguments, .. }
            | InteractionEventKind::ActionArgument { arguments, .. } => arguments,
            _ => &[],
        }
    }

    pub fn position(&self) -> Option<usize> {
        match &self.kind {
            InteractionEventKind::ActionArgumentVisibility { position, .. }
            | InteractionEventKind::ActionArgumentUsability { position, .. }
            | InteractionEventKind::ActionArgument { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn proposed(&self) -> Option<&Value> {
        match &self.kind {
            InteractionEventKind::PropertyModify { proposed }
            | InteractionEventKind::CollectionAddTo { proposed }
            | InteractionEventKind::CollectionRemoveFrom { proposed }
            | InteractionEventKind::ActionArgument { proposed, .. } => proposed.as_ref(),
            _ => None,
        }
    }
}

/// Outcome of one evaluation made through the interaction service, broadcast
/// on the event bus for observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvaluated {
    pub identifier: Identifier,
    pub category: InteractionCategory,
    pub vetoed: bool,
    pub reason: Option<String>,
    pub advisor: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_advice_sticks() {
        let mut event = InteractionEvent::new(
            InteractionEventKind::PropertyUsability,
            Identifier::property("Customer", "email"),
            Some(json!({})),
            None,
        );
        assert!(!event.is_veto());
        event.advised("Disabled", "DisabledFacet");
        event.advised("Immutable", "ImmutableFacet");
        assert_eq!(event.reason(), Some("Disabled"));
        assert_eq!(event.advisor(), Some("DisabledFacet"));
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = InteractionEvent::new(
            InteractionEventKind::ActionArgument {
                arguments: vec![json!(1), json!(2)],
                position: 1,
                proposed: Some(json!(2)),
            },
            Identifier::parameter(&Identifier::action("Order", "addLine"), 1),
            None,
            None,
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"]["type"], "action_argument");
        assert_eq!(event.position(), Some(1));
        assert_eq!(event.proposed(), Some(&json!(2)));
        assert_eq!(event.arguments().len(), 2);
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::advisor::{Advice, DisablingInteractionAdvisor, Facet};
use crate::domain::context::UsabilityContext;
use crate::domain::interaction::Where;

const DEFAULT_DISABLED_REASON: &str = "Disabled";

/// Disables a feature wherever `where_disabled` includes the rendering location.
#[derive(Debug, Clone)]
pub struct DisabledFacet {
    name: &'static str,
    where_disabled: Where,
    reason: Option<String>,
}

impl DisabledFacet {
    pub fn new(where_disabled: Where, reason: Option<String>) -> Self {
        Self {
            name: "DisabledFacet",
            where_disabled,
            reason,
        }
    }

    pub fn with_reason(reason: &str) -> Self {
        Self::new(Where::Anywhere, Some(reason.to_string()))
    }

    /// Added by the metamodel builder when property editing is disabled by
    /// configuration.
    pub fn for_editing_policy() -> Self {
        Self {
            name: "EditingPolicyFacet",
            where_disabled: Where::Anywhere,
            reason: None,
        }
    }
}

impl Facet for DisabledFacet {
    fn name(&self) -> &str {
        self.name
    }

    fn as_disabling(&self) -> Option<&dyn DisablingInteractionAdvisor> {
        Some(self)
    }

    fn governs_editing(&self) -> bool {
        true
    }
}

impl DisablingInteractionAdvisor for DisabledFacet {
    fn disables(&self, context: &UsabilityContext) -> Advice {
        if !self.where_disabled.includes(context.where_rendered()) {
            return Ok(None);
        }
        Ok(Some(
            self.reason
                .clone()
                .unwrap_or_else(|| DEFAULT_DISABLED_REASON.to_string()),
        ))
    }
}

/// Cannot be changed by a user; the framework may still update it.
#[derive(Debug, Clone)]
pub struct ImmutableFacet {
    reason: String,
}

impl ImmutableFacet {
    pub fn new() -> Self {
        Self {
            reason: "Immutable".to_string(),
        }
    }

    pub fn with_reason(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl Default for ImmutableFacet {
    fn default() -> Self {
        Self::new()
    }
}

impl Facet for ImmutableFacet {
    fn name(&self) -> &str {
        "ImmutableFacet"
    }

    fn as_disabling(&self) -> Option<&dyn DisablingInteractionAdvisor> {
        Some(self)
    }

    fn governs_editing(&self) -> bool {
        true
    }
}

impl DisablingInteractionAdvisor for ImmutableFacet {
    fn disables(&self, context: &UsabilityContext) -> Advice {
        // Only user edits are refused; framework and pass-through writes go ahead.
        if !context.initiated_by().is_user() {
            return Ok(None);
        }
        Ok(Some(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::head::InteractionHead;
    use crate::domain::identifier::Identifier;
    use crate::domain::interaction::InteractionInitiatedBy;
    use crate::domain::object::ManagedObject;

    fn context(initiated_by: InteractionInitiatedBy, where_rendered: Where) -> UsabilityContext {
        let head = InteractionHead::regular(ManagedObject::unspecified()).unwrap();
        UsabilityContext::property(Identifier::property("Customer", "createdAt"), head, initiated_by, where_rendered)
    }

    #[test]
    fn test_disabled_default_reason() {
        let facet = DisabledFacet::new(Where::Anywhere, None);
        assert_eq!(
            facet.disables(&context(InteractionInitiatedBy::User, Where::ObjectForms)).unwrap(),
            Some("Disabled".to_string())
        );
    }

    #[test]
    fn test_disabled_respects_where() {
        let facet = DisabledFacet::new(Where::ObjectForms, Some("Read-only here".to_string()));
        assert!(facet.disables(&context(InteractionInitiatedBy::User, Where::ParentedTables)).unwrap().is_none());
    }

    #[test]
    fn test_immutable_allows_framework() {
        let facet = ImmutableFacet::new();
        assert!(facet.disables(&context(InteractionInitiatedBy::Framework, Where::Anywhere)).unwrap().is_none());
        assert_eq!(
            facet.disables(&context(InteractionInitiatedBy::User, Where::Anywhere)).unwrap(),
            Some("Immutable".to_string())
        );
    }

    #[test]
    fn test_immutable_allows_pass_through() {
        let facet = ImmutableFacet::with_reason("Generated");
        assert!(facet
            .disables(&context(InteractionInitiatedBy::PassThrough, Where::ObjectForms))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_editing_policy_facet_name() {
        let facet = DisabledFacet::for_editing_policy();
        assert_eq!(facet.name(), "EditingPolicyFacet");
        assert!(facet.governs_editing());
    }
}

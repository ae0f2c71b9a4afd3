// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Constructors for object, property, collection and action contexts.

use super::{ContextPayload, InteractionContext, UsabilityContext, ValidityContext, VisibilityContext};
use crate::domain::errors::InteractionError;
use crate::domain::head::InteractionHead;
use crate::domain::identifier::{FeatureType, Identifier};
use crate::domain::interaction::{InteractionContextType as T, InteractionInitiatedBy, Where};
use crate::domain::object::ManagedObject;

impl VisibilityContext {
    pub fn object(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::ObjectVisible, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    pub fn property(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::PropertyVisible, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    pub fn collection(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::CollectionVisible, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    pub fn action(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::ActionVisible, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    /// Picks the object/property/collection/action variant from the identifier.
    /// Parameters need their argument list; see [`VisibilityContext::action_argument`].
    pub fn for_feature(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Result<Self, InteractionError> {
        match identifier.feature_type {
            FeatureType::Object => Ok(Self::object(identifier, head, initiated_by, where_rendered)),
            FeatureType::Property => Ok(Self::property(identifier, head, initiated_by, where_rendered)),
            FeatureType::Collection => Ok(Self::collection(identifier, head, initiated_by, where_rendered)),
            FeatureType::Action => Ok(Self::action(identifier, head, initiated_by, where_rendered)),
            FeatureType::ActionParameter => Err(InteractionError::InvalidState(format!(
                "visibility of parameter {} requires the pending arguments",
                identifier
            ))),
        }
    }
}

impl UsabilityContext {
    pub fn property(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::PropertyUsable, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    pub fn collection(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::CollectionUsable, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    pub fn action(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Self {
        Self(InteractionContext::new(T::ActionUsable, identifier, head, initiated_by, where_rendered, ContextPayload::None))
    }

    pub fn for_feature(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, where_rendered: Where) -> Result<Self, InteractionError> {
        match identifier.feature_type {
            FeatureType::Property => Ok(Self::property(identifier, head, initiated_by, where_rendered)),
            FeatureType::Collection => Ok(Self::collection(identifier, head, initiated_by, where_rendered)),
            FeatureType::Action => Ok(Self::action(identifier, head, initiated_by, where_rendered)),
            FeatureType::Object | FeatureType::ActionParameter => Err(InteractionError::InvalidState(format!(
                "no usability context for {} {}",
                identifier.feature_type.as_str(),
                identifier
            ))),
        }
    }
}

impl ValidityContext {
    pub fn object(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy) -> Self {
        Self(InteractionContext::new(T::ObjectValidate, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::None))
    }

    /// Setting (or, with `None`, clearing) a property.
    pub fn property_modify(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, proposed: Option<ManagedObject>) -> Self {
        Self(InteractionContext::new(T::PropertyModify, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::Proposed(proposed)))
    }

    pub fn collection_add_to(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, element: ManagedObject) -> Self {
        Self(InteractionContext::new(T::CollectionAddTo, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::Proposed(Some(element))))
    }

    pub fn collection_remove_from(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, element: ManagedObject) -> Self {
        Self(InteractionContext::new(T::CollectionRemoveFrom, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::Proposed(Some(element))))
    }

    /// Validity of the whole argument set of an action.
    pub fn action_invocation(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, arguments: Vec<ManagedObject>) -> Self {
        Self(InteractionContext::new(
            T::ActionInvoke,
            identifier,
            head,
            initiated_by,
            Where::NotSpecified,
            ContextPayload::Arguments { arguments, position: None, proposed: None },
        ))
    }
}

impl InteractionContext {
    pub fn property_access(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, current: Option<ManagedObject>) -> Self {
        Self::new(T::PropertyRead, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::CurrentValue(current))
    }

    pub fn collection_access(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, current: Option<ManagedObject>) -> Self {
        Self::new(T::CollectionRead, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::CurrentValue(current))
    }

    pub fn object_title(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy) -> Self {
        Self::new(T::ObjectTitle, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::None)
    }

    pub fn parse_value(identifier: Identifier, head: InteractionHead, initiated_by: InteractionInitiatedBy, proposed: &str) -> Self {
        Self::new(T::ParseValue, identifier, head, initiated_by, Where::NotSpecified, ContextPayload::Text(proposed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::InteractionEventKind;
    use crate::domain::interaction::InteractionCategory;
    use crate::domain::object::{BeanSort, ObjectSpecification};
    use serde_json::json;
    use std::sync::Arc;

    fn customer() -> ManagedObject {
        let spec = Arc::new(ObjectSpecification::new("Customer", BeanSort::Entity));
        ManagedObject::new(spec, json!({"name": "Ada"}))
    }

    fn email() -> ManagedObject {
        let spec = Arc::new(ObjectSpecification::new("String", BeanSort::Value));
        ManagedObject::new(spec, json!("ada@example.com"))
    }

    #[test]
    fn test_property_modify_event_unwraps_proposed() {
        let id = Identifier::property("Customer", "email");
        let head = InteractionHead::regular(customer()).unwrap();
        let ctx = ValidityContext::property_modify(id.clone(), head, InteractionInitiatedBy::User, Some(email()));

        assert_eq!(ctx.category(), InteractionCategory::Validity);
        let event = ctx.create_interaction_event();
        assert_eq!(event.identifier, id);
        assert_eq!(event.source, Some(json!({"name": "Ada"})));
        assert_eq!(
            event.kind,
            InteractionEventKind::PropertyModify { proposed: Some(json!("ada@example.com")) }
        );
        assert!(event.mixed_in.is_none());
    }

    #[test]
    fn test_clearing_property_has_no_proposed() {
        let head = InteractionHead::regular(customer()).unwrap();
        let ctx = ValidityContext::property_modify(Identifier::property("Customer", "email"), head, InteractionInitiatedBy::User, None);
        assert!(ctx.proposed().is_none());
    }

    #[test]
    fn test_access_event_carries_current_value() {
        let head = InteractionHead::regular(customer()).unwrap();
        let ctx = InteractionContext::property_access(Identifier::property("Customer", "email"), head, InteractionInitiatedBy::Framework, Some(email()));
        assert!(ctx.is_framework_initiated());
        assert_eq!(ctx.category(), InteractionCategory::Access);
        assert_eq!(
            ctx.create_interaction_event().kind,
            InteractionEventKind::PropertyAccess { value: Some(json!("ada@example.com")) }
        );
    }

    #[test]
    fn test_parse_value_event_carries_text() {
        let head = InteractionHead::regular(customer()).unwrap();
        let ctx = InteractionContext::parse_value(Identifier::property("Customer", "email"), head, InteractionInitiatedBy::User, "ada@");
        assert_eq!(ctx.proposed_text(), Some("ada@"));
        assert_eq!(
            ctx.create_interaction_event().kind,
            InteractionEventKind::ParseValue { proposed: "ada@".to_string() }
        );
    }

    #[test]
    fn test_for_feature_rejects_parameters() {
        let action = Identifier::action("Customer", "placeOrder");
        let head = InteractionHead::regular(customer()).unwrap();
        assert!(VisibilityContext::for_feature(Identifier::parameter(&action, 0), head.clone(), InteractionInitiatedBy::User, Where::Anywhere).is_err());
        assert!(UsabilityContext::for_feature(Identifier::object("Customer"), head, InteractionInitiatedBy::User, Where::Anywhere).is_err());
    }

    #[test]
    fn test_unresolved_target_yields_no_source() {
        let spec = Arc::new(ObjectSpecification::new("Customer", BeanSort::Entity));
        let head = InteractionHead::regular(ManagedObject::unresolved(spec)).unwrap();
        let ctx = VisibilityContext::property(Identifier::property("Customer", "email"), head, InteractionInitiatedBy::User, Where::ObjectForms);
        assert_eq!(ctx.where_rendered(), Where::ObjectForms);
        assert!(ctx.create_interaction_event().source.is_none());
    }
}

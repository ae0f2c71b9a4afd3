// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Action Argument Contexts
//!
//! Per-parameter visibility, usability and validity. Each carries the full
//! pending argument list of the invocation attempt plus the parameter's
//! zero-based position, so rules can compare against sibling arguments that are
//! already bound. The validity variant additionally exposes the proposed value,
//! which is always the argument at `position`.

use super::{ContextPayload, InteractionContext, UsabilityContext, ValidityContext, VisibilityContext};
use crate::domain::errors::InteractionError;
use crate::domain::head::InteractionHead;
use crate::domain::identifier::Identifier;
use crate::domain::interaction::{InteractionContextType as T, InteractionInitiatedBy, Where};
use crate::domain::object::ManagedObject;

fn argument_payload(
    identifier: &Identifier,
    arguments: Vec<ManagedObject>,
    position: usize,
    with_proposed: bool,
) -> Result<ContextPayload, InteractionError> {
    if position >= arguments.len() {
        return Err(InteractionError::ParameterOutOfRange {
            identifier: identifier.clone(),
            position,
            count: arguments.len(),
        });
    }
    let proposed = if with_proposed {
        arguments.get(position).cloned()
    } else {
        None
    };
    Ok(ContextPayload::Arguments {
        arguments,
        position: Some(position),
        proposed,
    })
}

impl VisibilityContext {
    pub fn action_argument(
        identifier: Identifier,
        head: InteractionHead,
        arguments: Vec<ManagedObject>,
        position: usize,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Self, InteractionError> {
        let payload = argument_payload(&identifier, arguments, position, false)?;
        Ok(Self(InteractionContext::new(
            T::ActionParameterVisible,
            identifier,
            head,
            initiated_by,
            where_rendered,
            payload,
        )))
    }
}

impl UsabilityContext {
    pub fn action_argument(
        identifier: Identifier,
        head: InteractionHead,
        arguments: Vec<ManagedObject>,
        position: usize,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Self, InteractionError> {
        let payload = argument_payload(&identifier, arguments, position, false)?;
        Ok(Self(InteractionContext::new(
            T::ActionParameterUsable,
            identifier,
            head,
            initiated_by,
            where_rendered,
            payload,
        )))
    }
}

impl ValidityContext {
    pub fn action_argument(
        identifier: Identifier,
        head: InteractionHead,
        arguments: Vec<ManagedObject>,
        position: usize,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<Self, InteractionError> {
        let payload = argument_payload(&identifier, arguments, position, true)?;
        Ok(Self(InteractionContext::new(
            T::ActionProposedArgument,
            identifier,
            head,
            initiated_by,
            Where::NotSpecified,
            payload,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::InteractionEventKind;
    use crate::domain::object::{BeanSort, ObjectSpecification};
    use serde_json::json;
    use std::sync::Arc;

    fn value(v: serde_json::Value) -> ManagedObject {
        let spec = Arc::new(ObjectSpecification::new("Integer", BeanSort::Value));
        ManagedObject::new(spec, v)
    }

    fn head() -> InteractionHead {
        let spec = Arc::new(ObjectSpecification::new("Order", BeanSort::Entity));
        InteractionHead::regular(ManagedObject::new(spec, json!({"id": 7}))).unwrap()
    }

    fn param(index: usize) -> Identifier {
        Identifier::parameter(&Identifier::action("Order", "addLine"), index)
    }

    #[test]
    fn test_validity_exposes_position_and_proposed() {
        let args = vec![value(json!("widget")), value(json!(3)), value(json!(null))];
        let ctx = ValidityContext::action_argument(param(1), head(), args, 1, InteractionInitiatedBy::User).unwrap();

        assert_eq!(ctx.position(), Some(1));
        assert_eq!(ctx.proposed().and_then(|p| p.payload()), Some(&json!(3)));
        assert_eq!(ctx.argument(0).and_then(|a| a.payload()), Some(&json!("widget")));
        assert_eq!(ctx.arguments().len(), 3);
    }

    #[test]
    fn test_argument_event_round_trip() {
        let args = vec![value(json!("widget")), value(json!(3))];
        let ctx = ValidityContext::action_argument(param(0), head(), args, 0, InteractionInitiatedBy::User).unwrap();
        let event = ctx.create_interaction_event();

        assert_eq!(event.identifier, param(0));
        assert_eq!(event.source, Some(json!({"id": 7})));
        assert_eq!(
            event.kind,
            InteractionEventKind::ActionArgument {
                arguments: vec![json!("widget"), json!(3)],
                position: 0,
                proposed: Some(json!("widget")),
            }
        );
    }

    #[test]
    fn test_usability_has_no_proposed() {
        let args = vec![value(json!(1))];
        let ctx = UsabilityContext::action_argument(param(0), head(), args, 0, InteractionInitiatedBy::User, Where::ObjectForms).unwrap();
        assert_eq!(ctx.position(), Some(0));
        assert!(ctx.proposed().is_none());
    }

    #[test]
    fn test_position_out_of_range_is_rejected() {
        let args = vec![value(json!(1))];
        let err = VisibilityContext::action_argument(param(4), head(), args, 4, InteractionInitiatedBy::User, Where::Anywhere).unwrap_err();
        assert!(matches!(err, InteractionError::ParameterOutOfRange { position: 4, count: 1, .. }));
    }
}

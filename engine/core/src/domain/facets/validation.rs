// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Validating facets for proposed property values and action arguments.
//!
//! All of them inspect only [`crate::domain::context::InteractionContext::proposed`],
//! so contexts without a candidate value (e.g. whole-action invocation) are
//! never vetoed by them.

use regex::Regex;
use serde_json::Value;

use crate::domain::advisor::{Advice, Facet, ValidatingInteractionAdvisor};
use crate::domain::context::ValidityContext;
use crate::domain::interaction::InteractionContextType;

fn proposed_str(context: &ValidityContext) -> Option<&str> {
    context
        .proposed()
        .and_then(|p| p.payload())
        .and_then(Value::as_str)
}

#[derive(Debug, Clone, Default)]
pub struct MandatoryFacet;

impl MandatoryFacet {
    pub fn new() -> Self {
        Self
    }
}

impl Facet for MandatoryFacet {
    fn name(&self) -> &str {
        "MandatoryFacet"
    }

    fn as_validating(&self) -> Option<&dyn ValidatingInteractionAdvisor> {
        Some(self)
    }
}

impl ValidatingInteractionAdvisor for MandatoryFacet {
    fn invalidates(&self, context: &ValidityContext) -> Advice {
        if !matches!(
            context.context_type(),
            InteractionContextType::PropertyModify | InteractionContextType::ActionProposedArgument
        ) {
            return Ok(None);
        }
        let missing = match context.proposed().and_then(|p| p.payload()) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        Ok(missing.then(|| "Mandatory".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct MaxLengthFacet {
    max_length: usize,
}

impl MaxLengthFacet {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Facet for MaxLengthFacet {
    fn name(&self) -> &str {
        "MaxLengthFacet"
    }

    fn as_validating(&self) -> Option<&dyn ValidatingInteractionAdvisor> {
        Some(self)
    }
}

impl ValidatingInteractionAdvisor for MaxLengthFacet {
    fn invalidates(&self, context: &ValidityContext) -> Advice {
        match proposed_str(context) {
            Some(s) if s.chars().count() > self.max_length => Ok(Some(format!(
                "The value proposed exceeds the maximum length of {}",
                self.max_length
            ))),
            _ => Ok(None),
        }
    }
}

/// The whole proposed string must match `pattern`.
#[derive(Debug, Clone)]
pub struct RegExFacet {
    pattern: Regex,
    reason: Option<String>,
}

impl RegExFacet {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{})$", pattern))?,
            reason: None,
        })
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}

impl Facet for RegExFacet {
    fn name(&self) -> &str {
        "RegExFacet"
    }

    fn as_validating(&self) -> Option<&dyn ValidatingInteractionAdvisor> {
        Some(self)
    }
}

impl ValidatingInteractionAdvisor for RegExFacet {
    fn invalidates(&self, context: &ValidityContext) -> Advice {
        match proposed_str(context) {
            Some(s) if !self.pattern.is_match(s) => Ok(Some(
                self.reason
                    .clone()
                    .unwrap_or_else(|| "Doesn't match pattern".to_string()),
            )),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::head::InteractionHead;
    use crate::domain::identifier::Identifier;
    use crate::domain::interaction::InteractionInitiatedBy;
    use crate::domain::object::{BeanSort, ManagedObject, ObjectSpecification};
    use serde_json::json;
    use std::sync::Arc;

    fn modify(proposed: Option<Value>) -> ValidityContext {
        let spec = Arc::new(ObjectSpecification::new("String", BeanSort::Value));
        let head = InteractionHead::regular(ManagedObject::unspecified()).unwrap();
        ValidityContext::property_modify(
            Identifier::property("Customer", "email"),
            head,
            InteractionInitiatedBy::User,
            proposed.map(|v| ManagedObject::new(spec, v)),
        )
    }

    #[test]
    fn test_mandatory() {
        let facet = MandatoryFacet::new();
        assert_eq!(facet.invalidates(&modify(None)).unwrap(), Some("Mandatory".to_string()));
        assert_eq!(facet.invalidates(&modify(Some(json!("")))).unwrap(), Some("Mandatory".to_string()));
        assert_eq!(facet.invalidates(&modify(Some(json!(null)))).unwrap(), Some("Mandatory".to_string()));
        assert!(facet.invalidates(&modify(Some(json!("x")))).unwrap().is_none());
    }

    #[test]
    fn test_mandatory_ignores_invocation_context() {
        let head = InteractionHead::regular(ManagedObject::unspecified()).unwrap();
        let ctx = ValidityContext::action_invocation(Identifier::action("Customer", "archive"), head, InteractionInitiatedBy::User, vec![]);
        assert!(MandatoryFacet::new().invalidates(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_max_length() {
        let facet = MaxLengthFacet::new(3);
        assert!(facet.invalidates(&modify(Some(json!("abc")))).unwrap().is_none());
        assert_eq!(
            facet.invalidates(&modify(Some(json!("abcd")))).unwrap(),
            Some("The value proposed exceeds the maximum length of 3".to_string())
        );
        assert!(facet.invalidates(&modify(Some(json!(12345)))).unwrap().is_none());
    }

    #[test]
    fn test_regex_matches_whole_value() {
        let facet = RegExFacet::new(r"[a-z]+@[a-z]+\.com").unwrap().with_reason("Not an email");
        assert!(facet.invalidates(&modify(Some(json!("ada@example.com")))).unwrap().is_none());
        assert_eq!(
            facet.invalidates(&modify(Some(json!("x ada@example.com")))).unwrap(),
            Some("Not an email".to_string())
        );
        assert!(facet.invalidates(&modify(None)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(RegExFacet::new("(unclosed").is_err());
    }
}

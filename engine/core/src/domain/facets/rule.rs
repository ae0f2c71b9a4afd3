// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Closure-backed rules.
//!
//! Programmatic rules (the `hideXxx` / `disableXxx` / `validateXxx` style
//! supporting logic of a domain type) are registered as a [`RuleFacet`] with
//! one closure per capability it implements.

use std::sync::Arc;

use crate::domain::advisor::{
    Advice, DisablingInteractionAdvisor, Facet, FacetScope, HidingInteractionAdvisor,
    ValidatingInteractionAdvisor,
};
use crate::domain::context::{UsabilityContext, ValidityContext, VisibilityContext};

type HideFn = dyn Fn(&VisibilityContext) -> Advice + Send + Sync;
type DisableFn = dyn Fn(&UsabilityContext) -> Advice + Send + Sync;
type ValidateFn = dyn Fn(&ValidityContext) -> Advice + Send + Sync;

#[derive(Clone)]
pub struct RuleFacet {
    name: String,
    scope: FacetScope,
    hide: Option<Arc<HideFn>>,
    disable: Option<Arc<DisableFn>>,
    validate: Option<Arc<ValidateFn>>,
}

impl RuleFacet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scope: FacetScope::Any,
            hide: None,
            disable: None,
            validate: None,
        }
    }

    /// Implements all three capabilities and never objects.
    pub fn noop(name: &str) -> Self {
        Self::new(name)
            .hiding(|_| Ok(None))
            .disabling(|_| Ok(None))
            .validating(|_| Ok(None))
    }

    pub fn scoped(mut self, scope: FacetScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn hiding<F>(mut self, rule: F) -> Self
    where
        F: Fn(&VisibilityContext) -> Advice + Send + Sync + 'static,
    {
        self.hide = Some(Arc::new(rule));
        self
    }

    pub fn disabling<F>(mut self, rule: F) -> Self
    where
        F: Fn(&UsabilityContext) -> Advice + Send + Sync + 'static,
    {
        self.disable = Some(Arc::new(rule));
        self
    }

    pub fn validating<F>(mut self, rule: F) -> Self
    where
        F: Fn(&ValidityContext) -> Advice + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(rule));
        self
    }
}

impl std::fmt::Debug for RuleFacet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleFacet")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("hiding", &self.hide.is_some())
            .field("disabling", &self.disable.is_some())
            .field("validating", &self.validate.is_some())
            .finish()
    }
}

impl Facet for RuleFacet {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> FacetScope {
        self.scope
    }

    fn as_hiding(&self) -> Option<&dyn HidingInteractionAdvisor> {
        self.hide.as_ref().map(|_| self as &dyn HidingInteractionAdvisor)
    }

    fn as_disabling(&self) -> Option<&dyn DisablingInteractionAdvisor> {
        self.disable.as_ref().map(|_| self as &dyn DisablingInteractionAdvisor)
    }

    fn as_validating(&self) -> Option<&dyn ValidatingInteractionAdvisor> {
        self.validate.as_ref().map(|_| self as &dyn ValidatingInteractionAdvisor)
    }
}

impl HidingInteractionAdvisor for RuleFacet {
    fn hides(&self, context: &VisibilityContext) -> Advice {
        match &self.hide {
            Some(rule) => rule(context),
            None => Ok(None),
        }
    }
}

impl DisablingInteractionAdvisor for RuleFacet {
    fn disables(&self, context: &UsabilityContext) -> Advice {
        match &self.disable {
            Some(rule) => rule(context),
            None => Ok(None),
        }
    }
}

impl ValidatingInteractionAdvisor for RuleFacet {
    fn invalidates(&self, context: &ValidityContext) -> Advice {
        match &self.validate {
            Some(rule) => rule(context),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisor::AdvisorKind;
    use crate::domain::identifier::FeatureType;

    #[test]
    fn test_capabilities_follow_closures() {
        let rule = RuleFacet::new("disableArchive").disabling(|_| Ok(Some("Already archived".to_string())));
        assert!(rule.implements(AdvisorKind::Disabling));
        assert!(!rule.implements(AdvisorKind::Hiding));
        assert!(!rule.implements(AdvisorKind::Validating));
    }

    #[test]
    fn test_noop_implements_everything() {
        let rule = RuleFacet::noop("noop").scoped(FacetScope::Only(FeatureType::Action));
        assert!(rule.implements(AdvisorKind::Hiding));
        assert!(rule.implements(AdvisorKind::Disabling));
        assert!(rule.implements(AdvisorKind::Validating));
        assert_eq!(rule.scope(), FacetScope::Only(FeatureType::Action));
    }
}

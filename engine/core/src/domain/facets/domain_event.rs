// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use tracing::debug;

use crate::domain::advisor::{
    Advice, DisablingInteractionAdvisor, Facet, FacetScope, HidingInteractionAdvisor,
    ValidatingInteractionAdvisor,
};
use crate::domain::context::{InteractionContext, UsabilityContext, ValidityContext, VisibilityContext};
use crate::domain::domain_event::{DomainEventPoster, EventPhase, MemberDomainEvent};
use crate::domain::identifier::FeatureType;

pub const HIDDEN_BY_SUBSCRIBER: &str = "Hidden by subscriber";

/// Posts a [`MemberDomainEvent`] for every check on its feature and reports
/// subscriber vetoes. Subscriber failures propagate as advisor errors.
#[derive(Clone)]
pub struct DomainEventFacet {
    scope: FacetScope,
    poster: Arc<dyn DomainEventPoster>,
}

impl DomainEventFacet {
    pub fn new(feature_type: FeatureType, poster: Arc<dyn DomainEventPoster>) -> Self {
        Self {
            scope: FacetScope::Only(feature_type),
            poster,
        }
    }

    fn post(&self, phase: EventPhase, context: &InteractionContext) -> Result<MemberDomainEvent, crate::domain::advisor::AdvisorError> {
        let mut event = MemberDomainEvent::from_interaction(phase, &context.create_interaction_event());
        debug!("Posting {:?} domain event for {}", phase, event.identifier);
        self.poster.post(&mut event)?;
        Ok(event)
    }
}

impl std::fmt::Debug for DomainEventFacet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainEventFacet").field("scope", &self.scope).finish()
    }
}

impl Facet for DomainEventFacet {
    fn name(&self) -> &str {
        "DomainEventFacet"
    }

    fn scope(&self) -> FacetScope {
        self.scope
    }

    fn as_hiding(&self) -> Option<&dyn HidingInteractionAdvisor> {
        Some(self)
    }

    fn as_disabling(&self) -> Option<&dyn DisablingInteractionAdvisor> {
        Some(self)
    }

    fn as_validating(&self) -> Option<&dyn ValidatingInteractionAdvisor> {
        Some(self)
    }
}

impl HidingInteractionAdvisor for DomainEventFacet {
    fn hides(&self, context: &VisibilityContext) -> Advice {
        let event = self.post(EventPhase::Hide, context)?;
        Ok(event.is_hidden().then(|| HIDDEN_BY_SUBSCRIBER.to_string()))
    }
}

impl DisablingInteractionAdvisor for DomainEventFacet {
    fn disables(&self, context: &UsabilityContext) -> Advice {
        let event = self.post(EventPhase::Disable, context)?;
        Ok(event.disabled_reason().map(str::to_string))
    }
}

impl ValidatingInteractionAdvisor for DomainEventFacet {
    fn invalidates(&self, context: &ValidityContext) -> Advice {
        let event = self.post(EventPhase::Validate, context)?;
        Ok(event.invalidity_reason().map(str::to_string))
    }
}

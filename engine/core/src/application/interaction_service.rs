// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Interaction Service
//!
//! Facade used by callers that render, wrap or invoke domain objects. It looks
//! members up in the frozen [`Metamodel`], builds the [`InteractionHead`] (a
//! mixin head when the member is contributed by a mixin), builds the matching
//! context and folds the member's advisors through
//! [`crate::application::interaction_utils`].
//!
//! Every evaluation is counted (`interaction_evaluations_total`,
//! `interaction_vetoes_total`, `interaction_rule_faults_total`) and, when
//! `evaluation.publish_outcomes` is set, announced on the [`EventBus`] as an
//! [`InteractionEvaluated`] outcome.
//!
//! ## Invariants
//!
//! - [`InteractionInitiatedBy::PassThrough`] is always allowed; no advisor runs
//!   and nothing is counted or published.
//! - Action-level validity runs only once every argument passed its own
//!   parameter checks.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tracing::{info, trace, warn};

use crate::application::interaction_utils;
use crate::domain::advisor::FacetHolder;
use crate::domain::consent::Consent;
use crate::domain::context::{InteractionContext, UsabilityContext, ValidityContext, VisibilityContext};
use crate::domain::engine_config::EngineConfig;
use crate::domain::errors::InteractionError;
use crate::domain::events::InteractionEvaluated;
use crate::domain::head::{InteractionHead, MixinResolver};
use crate::domain::identifier::Identifier;
use crate::domain::interaction::{InteractionInitiatedBy, Where};
use crate::domain::member::{ActionParameter, ObjectMember};
use crate::domain::metamodel::Metamodel;
use crate::domain::object::{ManagedObject, ObjectSpecification};
use crate::domain::result::{InteractionResult, InteractionResultSet};
use crate::infrastructure::event_bus::EventBus;

const EVALUATIONS_TOTAL: &str = "interaction_evaluations_total";
const VETOES_TOTAL: &str = "interaction_vetoes_total";
const RULE_FAULTS_TOTAL: &str = "interaction_rule_faults_total";

pub struct InteractionService {
    metamodel: Arc<Metamodel>,
    event_bus: EventBus,
    config: EngineConfig,
    mixin_resolver: Option<Arc<dyn MixinResolver>>,
}

impl InteractionService {
    pub fn new(metamodel: Arc<Metamodel>, event_bus: EventBus, config: EngineConfig) -> Self {
        Self {
            metamodel,
            event_bus,
            config,
            mixin_resolver: None,
        }
    }

    pub fn with_mixin_resolver(mut self, resolver: Arc<dyn MixinResolver>) -> Self {
        self.mixin_resolver = Some(resolver);
        self
    }

    pub fn metamodel(&self) -> &Arc<Metamodel> {
        &self.metamodel
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Evaluation against an arbitrary facet holder
    // ========================================================================

    pub fn evaluate_visibility(
        &self,
        holder: &dyn FacetHolder,
        context: &VisibilityContext,
    ) -> Result<Consent, InteractionError> {
        if passes_through(context) {
            return Ok(Consent::Allowed);
        }
        Ok(self.visibility_result(holder, context)?.create_consent())
    }

    pub fn evaluate_usability(
        &self,
        holder: &dyn FacetHolder,
        context: &UsabilityContext,
    ) -> Result<Consent, InteractionError> {
        if passes_through(context) {
            return Ok(Consent::Allowed);
        }
        Ok(self.usability_result(holder, context)?.create_consent())
    }

    pub fn evaluate_validity(
        &self,
        holder: &dyn FacetHolder,
        context: &ValidityContext,
    ) -> Result<Consent, InteractionError> {
        if passes_through(context) {
            return Ok(Consent::Allowed);
        }
        Ok(self.validity_result(holder, context)?.create_consent())
    }

    fn visibility_result(
        &self,
        holder: &dyn FacetHolder,
        context: &VisibilityContext,
    ) -> Result<InteractionResult, InteractionError> {
        self.settle(context, interaction_utils::is_visible_result(holder, context))
    }

    fn usability_result(
        &self,
        holder: &dyn FacetHolder,
        context: &UsabilityContext,
    ) -> Result<InteractionResult, InteractionError> {
        self.settle(context, interaction_utils::is_usable_result(holder, context))
    }

    fn validity_result(
        &self,
        holder: &dyn FacetHolder,
        context: &ValidityContext,
    ) -> Result<InteractionResult, InteractionError> {
        self.settle(context, interaction_utils::is_valid_result(holder, context))
    }

    /// Counts the evaluation and publishes its outcome.
    fn settle(
        &self,
        context: &InteractionContext,
        result: Result<InteractionResult, InteractionError>,
    ) -> Result<InteractionResult, InteractionError> {
        let category = context.category();

        let result = result.inspect_err(|e| {
            if matches!(e, InteractionError::RuleFault { .. }) {
                counter!(RULE_FAULTS_TOTAL, "category" => category.as_str()).increment(1);
            }
            warn!("Evaluation of {} aborted: {}", context.identifier(), e);
        })?;

        counter!(EVALUATIONS_TOTAL, "category" => category.as_str()).increment(1);
        if result.is_vetoed() {
            counter!(VETOES_TOTAL, "category" => category.as_str()).increment(1);
            info!(
                identifier = %context.identifier(),
                advisor = result.advisor().unwrap_or_default(),
                "{} vetoed: {}",
                category.as_str(),
                result.reason().unwrap_or_default()
            );
        }

        if self.config.evaluation.publish_outcomes {
            self.event_bus.publish_outcome(InteractionEvaluated {
                identifier: context.identifier().clone(),
                category,
                vetoed: result.is_vetoed(),
                reason: result.reason().map(str::to_string),
                advisor: result.advisor().map(str::to_string),
                evaluated_at: Utc::now(),
            });
        }

        Ok(result)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn member(&self, identifier: &Identifier) -> Result<&Arc<ObjectMember>, InteractionError> {
        self.metamodel
            .member(identifier)
            .ok_or_else(|| InteractionError::UnknownMember(identifier.clone()))
    }

    /// Head for an interaction with `member` on `owner`; resolves the mixin
    /// instance when the member is contributed by one.
    ///
    /// `owner` must be an instance of the type that declares `member`.
    pub fn head_for(&self, member: &ObjectMember, owner: &ManagedObject) -> Result<InteractionHead, InteractionError> {
        let declaring_type = member.identifier().logical_type_name.as_str();
        match owner.spec() {
            Some(spec) if spec.logical_type_name() == declaring_type => {}
            Some(spec) => {
                return Err(InteractionError::InvalidState(format!(
                    "{} belongs to '{}' but the owner is a '{}'",
                    member.identifier(),
                    declaring_type,
                    spec.logical_type_name()
                )))
            }
            None => {
                return Err(InteractionError::InvalidState(format!(
                    "{} needs an owner of type '{}' but {} has no specification",
                    member.identifier(),
                    declaring_type,
                    owner.describe()
                )))
            }
        }

        let Some(mixin) = member.mixin_spec() else {
            return InteractionHead::regular(owner.clone());
        };

        let resolver = self
            .mixin_resolver
            .as_ref()
            .ok_or_else(|| InteractionError::MissingMixinResolver(member.identifier().clone()))?;
        let target = resolver.resolve(mixin, owner)?;
        trace!("Resolved mixin {} for {}", mixin.logical_type_name(), member.identifier());
        InteractionHead::mixin(owner.clone(), target)
    }

    fn specification_of(&self, object: &ManagedObject) -> Result<&Arc<ObjectSpecification>, InteractionError> {
        let spec = object
            .spec()
            .ok_or_else(|| InteractionError::InvalidState(format!("{} has no specification", object.describe())))?;
        self.metamodel
            .specification(spec.logical_type_name())
            .ok_or_else(|| InteractionError::UnknownSpecification(spec.logical_type_name().to_string()))
    }

    // ========================================================================
    // Objects
    // ========================================================================

    pub fn is_object_visible(
        &self,
        object: &ManagedObject,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Consent, InteractionError> {
        let spec = self.specification_of(object)?;
        let head = InteractionHead::regular(object.clone())?;
        let context = VisibilityContext::object(spec.identifier(), head, initiated_by, where_rendered);
        self.evaluate_visibility(&**spec, &context)
    }

    pub fn is_object_valid(
        &self,
        object: &ManagedObject,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<Consent, InteractionError> {
        let spec = self.specification_of(object)?;
        let head = InteractionHead::regular(object.clone())?;
        let context = ValidityContext::object(spec.identifier(), head, initiated_by);
        self.evaluate_validity(&**spec, &context)
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub fn is_member_visible(
        &self,
        identifier: &Identifier,
        owner: &ManagedObject,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(identifier)?;
        let head = self.head_for(member, owner)?;
        let context = VisibilityContext::for_feature(identifier.clone(), head, initiated_by, where_rendered)?;
        self.evaluate_visibility(&**member, &context)
    }

    pub fn is_member_usable(
        &self,
        identifier: &Identifier,
        owner: &ManagedObject,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(identifier)?;
        let head = self.head_for(member, owner)?;
        let context = UsabilityContext::for_feature(identifier.clone(), head, initiated_by, where_rendered)?;
        self.evaluate_usability(&**member, &context)
    }

    /// `proposed == None` clears the property.
    pub fn is_property_value_valid(
        &self,
        identifier: &Identifier,
        owner: &ManagedObject,
        proposed: Option<ManagedObject>,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(identifier)?;
        let head = self.head_for(member, owner)?;
        let context = ValidityContext::property_modify(identifier.clone(), head, initiated_by, proposed);
        self.evaluate_validity(&**member, &context)
    }

    pub fn is_collection_add_valid(
        &self,
        identifier: &Identifier,
        owner: &ManagedObject,
        element: ManagedObject,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(identifier)?;
        let head = self.head_for(member, owner)?;
        let context = ValidityContext::collection_add_to(identifier.clone(), head, initiated_by, element);
        self.evaluate_validity(&**member, &context)
    }

    pub fn is_collection_remove_valid(
        &self,
        identifier: &Identifier,
        owner: &ManagedObject,
        element: ManagedObject,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(identifier)?;
        let head = self.head_for(member, owner)?;
        let context = ValidityContext::collection_remove_from(identifier.clone(), head, initiated_by, element);
        self.evaluate_validity(&**member, &context)
    }

    // ========================================================================
    // Action parameters
    // ========================================================================

    fn parameter<'a>(
        &self,
        action: &'a ObjectMember,
        position: usize,
    ) -> Result<(&'a ActionParameter, Identifier), InteractionError> {
        let parameter = action.parameter(position).ok_or_else(|| InteractionError::ParameterOutOfRange {
            identifier: action.identifier().clone(),
            position,
            count: action.parameter_count(),
        })?;
        let identifier = parameter
            .identifier()
            .cloned()
            .unwrap_or_else(|| Identifier::parameter(action.identifier(), position));
        Ok((parameter, identifier))
    }

    pub fn is_parameter_visible(
        &self,
        action: &Identifier,
        position: usize,
        owner: &ManagedObject,
        pending_arguments: Vec<ManagedObject>,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(action)?;
        let (parameter, identifier) = self.parameter(member, position)?;
        let head = self.head_for(member, owner)?;
        let context =
            VisibilityContext::action_argument(identifier, head, pending_arguments, position, initiated_by, where_rendered)?;
        self.evaluate_visibility(parameter, &context)
    }

    pub fn is_parameter_usable(
        &self,
        action: &Identifier,
        position: usize,
        owner: &ManagedObject,
        pending_arguments: Vec<ManagedObject>,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(action)?;
        let (parameter, identifier) = self.parameter(member, position)?;
        let head = self.head_for(member, owner)?;
        let context =
            UsabilityContext::action_argument(identifier, head, pending_arguments, position, initiated_by, where_rendered)?;
        self.evaluate_usability(parameter, &context)
    }

    /// Validity of the argument at `position` given all pending arguments.
    pub fn is_argument_valid(
        &self,
        action: &Identifier,
        position: usize,
        owner: &ManagedObject,
        pending_arguments: Vec<ManagedObject>,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<Consent, InteractionError> {
        let member = self.member(action)?;
        let (parameter, identifier) = self.parameter(member, position)?;
        let head = self.head_for(member, owner)?;
        let context = ValidityContext::action_argument(identifier, head, pending_arguments, position, initiated_by)?;
        self.evaluate_validity(parameter, &context)
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Validates every argument, then (only if none vetoed) the invocation
    /// as a whole. The returned set holds one result per evaluation made.
    pub fn is_argument_set_valid(
        &self,
        action: &Identifier,
        owner: &ManagedObject,
        arguments: Vec<ManagedObject>,
        initiated_by: InteractionInitiatedBy,
    ) -> Result<InteractionResultSet, InteractionError> {
        let member = self.member(action)?;
        let mut results = InteractionResultSet::new();

        if initiated_by.is_pass_through() {
            trace!("Pass-through invocation of {}; skipping validation", action);
            return Ok(results);
        }

        if arguments.len() != member.parameter_count() {
            return Err(InteractionError::ArgumentCountMismatch {
                identifier: action.clone(),
                expected: member.parameter_count(),
                actual: arguments.len(),
            });
        }

        let head = self.head_for(member, owner)?;

        for position in 0..member.parameter_count() {
            let (parameter, identifier) = self.parameter(member, position)?;
            let context =
                ValidityContext::action_argument(identifier, head.clone(), arguments.clone(), position, initiated_by)?;
            results.add(self.validity_result(parameter, &context)?);
        }

        if results.is_vetoed() {
            return Ok(results);
        }

        let context = ValidityContext::action_invocation(action.clone(), head, initiated_by, arguments);
        results.add(self.validity_result(&**member, &context)?);
        Ok(results)
    }

    /// Full gate for invoking an action: visible, then usable, then a valid
    /// argument set. Stops at the first category that vetoes.
    pub fn check_invocation(
        &self,
        action: &Identifier,
        owner: &ManagedObject,
        arguments: Vec<ManagedObject>,
        initiated_by: InteractionInitiatedBy,
        where_rendered: Where,
    ) -> Result<Consent, InteractionError> {
        let visible = self.is_member_visible(action, owner, initiated_by, where_rendered)?;
        if visible.is_vetoed() {
            return Ok(visible);
        }

        let usable = self.is_member_usable(action, owner, initiated_by, where_rendered)?;
        if usable.is_vetoed() {
            return Ok(usable);
        }

        Ok(self
            .is_argument_set_valid(action, owner, arguments, initiated_by)?
            .create_consent())
    }
}

fn passes_through(context: &InteractionContext) -> bool {
    if context.initiated_by().is_pass_through() {
        trace!("Pass-through {} check on {}", context.category().as_str(), context.identifier());
        return true;
    }
    false
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Evaluation Driver
//!
//! Folds the advisors attached to a facet holder into one
//! [`InteractionResult`]:
//!
//! 1. seed the result with the public event manufactured from the context,
//! 2. enumerate the holder's advisors of the capability matching the context
//!    category, in declaration order,
//! 3. skip any whose scope does not admit the context's feature type,
//! 4. invoke each remaining advisor and record its reason,
//! 5. resolve the result.
//!
//! ## Invariants
//!
//! - Every compatible advisor runs, even after a veto. The first reason
//!   recorded is *the* reason; later ones are kept in
//!   [`InteractionResult::vetoes`].
//! - An advisor that fails stops the fold at once and surfaces as
//!   [`InteractionError::RuleFault`]. Failures are never turned into vetoes.
//! - No advisor is consulted for a context whose category has no capability
//!   (access, title, parse).

use tracing::{debug, trace, warn};

use crate::domain::advisor::{Advice, AdvisorKind, Facet, FacetHolder};
use crate::domain::consent::Consent;
use crate::domain::context::{InteractionContext, UsabilityContext, ValidityContext, VisibilityContext};
use crate::domain::errors::InteractionError;
use crate::domain::result::{InteractionResult, InteractionResultSet};

/// True when `facet` takes part in `context`: it implements the capability of
/// the context's category and its scope admits the context's feature type.
pub fn compatible(facet: &dyn Facet, context: &InteractionContext) -> bool {
    let Some(kind) = context.category().advisor_kind() else {
        return false;
    };
    facet.implements(kind) && facet.scope().admits(context.context_type().feature_type())
}

pub fn is_visible_result(
    holder: &dyn FacetHolder,
    context: &VisibilityContext,
) -> Result<InteractionResult, InteractionError> {
    fold(holder, AdvisorKind::Hiding, context, |facet| match facet.as_hiding() {
        Some(advisor) => advisor.hides(context),
        None => Ok(None),
    })
}

pub fn is_usable_result(
    holder: &dyn FacetHolder,
    context: &UsabilityContext,
) -> Result<InteractionResult, InteractionError> {
    fold(holder, AdvisorKind::Disabling, context, |facet| match facet.as_disabling() {
        Some(advisor) => advisor.disables(context),
        None => Ok(None),
    })
}

pub fn is_valid_result(
    holder: &dyn FacetHolder,
    context: &ValidityContext,
) -> Result<InteractionResult, InteractionError> {
    fold(holder, AdvisorKind::Validating, context, |facet| match facet.as_validating() {
        Some(advisor) => advisor.invalidates(context),
        None => Ok(None),
    })
}

/// Validates `context` against `holder` and appends the result to `results`.
pub fn is_valid_result_set(
    holder: &dyn FacetHolder,
    context: &ValidityContext,
    results: &mut InteractionResultSet,
) -> Result<(), InteractionError> {
    let result = is_valid_result(holder, context)?;
    results.add(result);
    Ok(())
}

pub fn is_visible(holder: &dyn FacetHolder, context: &VisibilityContext) -> Result<Consent, InteractionError> {
    Ok(is_visible_result(holder, context)?.create_consent())
}

pub fn is_usable(holder: &dyn FacetHolder, context: &UsabilityContext) -> Result<Consent, InteractionError> {
    Ok(is_usable_result(holder, context)?.create_consent())
}

pub fn is_valid(holder: &dyn FacetHolder, context: &ValidityContext) -> Result<Consent, InteractionError> {
    Ok(is_valid_result(holder, context)?.create_consent())
}

fn fold<F>(
    holder: &dyn FacetHolder,
    kind: AdvisorKind,
    context: &InteractionContext,
    mut invoke: F,
) -> Result<InteractionResult, InteractionError>
where
    F: FnMut(&dyn Facet) -> Advice,
{
    let mut result = InteractionResult::new(context.create_interaction_event());

    for facet in holder.facets().advisors(kind) {
        let facet = facet.as_ref();
        if !compatible(facet, context) {
            trace!("Skipping {} for {}: out of scope", facet.name(), context.identifier());
            continue;
        }

        debug!(
            advisor = facet.name(),
            identifier = %context.identifier(),
            "Consulting {:?} advisor",
            kind
        );

        let reason = invoke(facet).map_err(|source| {
            warn!("Advisor {} failed for {}: {}", facet.name(), context.identifier(), source);
            InteractionError::RuleFault {
                advisor: facet.name().to_string(),
                identifier: context.identifier().clone(),
                source,
            }
        })?;

        if let Some(reason) = &reason {
            debug!("{} vetoed {}: {}", facet.name(), context.identifier(), reason);
        }
        result.advise(reason, facet.name())?;
    }

    result.resolve();
    Ok(result)
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::advisor::{Advice, Facet, HidingInteractionAdvisor};
use crate::domain::context::VisibilityContext;
use crate::domain::interaction::Where;

/// Hides a feature wherever `where_hidden` includes the rendering location.
#[derive(Debug, Clone)]
pub struct HiddenFacet {
    where_hidden: Where,
}

impl HiddenFacet {
    pub fn new(where_hidden: Where) -> Self {
        Self { where_hidden }
    }
}

impl Facet for HiddenFacet {
    fn name(&self) -> &str {
        "HiddenFacet"
    }

    fn as_hiding(&self) -> Option<&dyn HidingInteractionAdvisor> {
        Some(self)
    }
}

impl HidingInteractionAdvisor for HiddenFacet {
    fn hides(&self, context: &VisibilityContext) -> Advice {
        if self.where_hidden.includes(context.where_rendered()) {
            Ok(Some("Hidden".to_string()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::head::InteractionHead;
    use crate::domain::identifier::Identifier;
    use crate::domain::interaction::InteractionInitiatedBy;
    use crate::domain::object::ManagedObject;

    fn context(where_rendered: Where) -> VisibilityContext {
        let head = InteractionHead::regular(ManagedObject::unspecified()).unwrap();
        VisibilityContext::property(Identifier::property("Customer", "notes"), head, InteractionInitiatedBy::User, where_rendered)
    }

    #[test]
    fn test_hidden_only_where_scoped() {
        let facet = HiddenFacet::new(Where::AllTables);
        assert_eq!(facet.hides(&context(Where::StandaloneTables)).unwrap(), Some("Hidden".to_string()));
        assert_eq!(facet.hides(&context(Where::ObjectForms)).unwrap(), None);
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::identifier::Identifier;
use crate::domain::member::ObjectMember;
use crate::domain::object::ObjectSpecification;

/// Frozen metamodel: specifications and members with their facets.
///
/// Built once by [`crate::application::metamodel_builder::MetamodelBuilder`] and
/// then shared read-only across all evaluations, so lookups at request time are
/// plain map reads.
#[derive(Debug, Default)]
pub struct Metamodel {
    specifications: HashMap<String, Arc<ObjectSpecification>>,
    members: HashMap<Identifier, Arc<ObjectMember>>,
}

impl Metamodel {
    pub(crate) fn new(
        specifications: HashMap<String, Arc<ObjectSpecification>>,
        members: HashMap<Identifier, Arc<ObjectMember>>,
    ) -> Self {
        Self {
            specifications,
            members,
        }
    }

    pub fn specification(&self, logical_type_name: &str) -> Option<&Arc<ObjectSpecification>> {
        self.specifications.get(logical_type_name)
    }

    pub fn member(&self, identifier: &Identifier) -> Option<&Arc<ObjectMember>> {
        self.members.get(identifier)
    }

    /// Members declared on (or contributed to) a type, sorted by name.
    pub fn members_of(&self, logical_type_name: &str) -> Vec<&Arc<ObjectMember>> {
        let mut members: Vec<_> = self
            .members
            .values()
            .filter(|m| m.identifier().logical_type_name == logical_type_name)
            .collect();
        members.sort_by(|a, b| a.identifier().member_name.cmp(&b.identifier().member_name));
        members
    }

    pub fn specification_count(&self) -> usize {
        self.specifications.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

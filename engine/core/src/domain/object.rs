// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Managed Objects
//!
//! [`ManagedObject`] is the engine-internal wrapper around a raw domain value.
//! Rules see the wrapper; public events only ever see the unwrapped payload
//! (see [`crate::domain::context::InteractionContext::create_interaction_event`]).
//!
//! A managed object may be:
//! - **unspecified**: no [`ObjectSpecification`] at all (empty slot),
//! - **unresolved**: specified but without payload (prototype checks, unbound mixins),
//! - **resolved**: specified and carrying a payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::advisor::{FacetHolder, FacetSet};
use crate::domain::identifier::Identifier;

/// Identity of a managed object for the lifetime of one wrapper (and its clones).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeanSort {
    Entity,
    ViewModel,
    Value,
    Mixin,
    Service,
    Unknown,
}

impl BeanSort {
    pub fn is_mixin(&self) -> bool {
        matches!(self, Self::Mixin)
    }
}

/// Metamodel of one domain type, with its object-level facets.
#[derive(Debug, Clone)]
pub struct ObjectSpecification {
    logical_type_name: String,
    bean_sort: BeanSort,
    facets: FacetSet,
}

impl ObjectSpecification {
    pub fn new(logical_type_name: &str, bean_sort: BeanSort) -> Self {
        Self {
            logical_type_name: logical_type_name.to_string(),
            bean_sort,
            facets: FacetSet::new(),
        }
    }

    pub fn logical_type_name(&self) -> &str {
        &self.logical_type_name
    }

    pub fn bean_sort(&self) -> BeanSort {
        self.bean_sort
    }

    pub fn is_mixin(&self) -> bool {
        self.bean_sort.is_mixin()
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::object(&self.logical_type_name)
    }

    pub(crate) fn facets_mut(&mut self) -> &mut FacetSet {
        &mut self.facets
    }
}

impl FacetHolder for ObjectSpecification {
    fn facets(&self) -> &FacetSet {
        &self.facets
    }
}

/// Engine-internal wrapper pairing a raw payload with its specification.
///
/// Equality is identity: two wrappers are equal iff they share an [`ObjectId`].
#[derive(Debug, Clone)]
pub struct ManagedObject {
    id: ObjectId,
    spec: Option<Arc<ObjectSpecification>>,
    payload: Option<Value>,
}

impl ManagedObject {
    pub fn new(spec: Arc<ObjectSpecification>, payload: Value) -> Self {
        Self {
            id: ObjectId::new(),
            spec: Some(spec),
            payload: Some(payload),
        }
    }

    /// A specified object without a bound payload.
    pub fn unresolved(spec: Arc<ObjectSpecification>) -> Self {
        Self {
            id: ObjectId::new(),
            spec: Some(spec),
            payload: None,
        }
    }

    pub fn unspecified() -> Self {
        Self {
            id: ObjectId::new(),
            spec: None,
            payload: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn spec(&self) -> Option<&Arc<ObjectSpecification>> {
        self.spec.as_ref()
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_specified(&self) -> bool {
        self.spec.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.payload.is_some()
    }

    pub fn is_mixin(&self) -> bool {
        self.spec.as_ref().map(|s| s.is_mixin()).unwrap_or(false)
    }

    /// Raw payload for public events; `Null` when unresolved.
    pub fn unwrap_payload(&self) -> Value {
        self.payload.clone().unwrap_or(Value::Null)
    }

    pub fn describe(&self) -> String {
        match &self.spec {
            Some(spec) => format!("{}({})", spec.logical_type_name(), self.id),
            None => format!("unspecified({})", self.id),
        }
    }
}

impl PartialEq for ManagedObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ManagedObject {}

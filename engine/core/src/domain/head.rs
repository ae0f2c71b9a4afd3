// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Interaction Head
//!
//! The `(owner, target)` pair of one interaction attempt. For plain members the
//! two are the same object; for members contributed by a mixin the target is the
//! mixin instance and the owner is the object it is mixed into.
//!
//! ## Invariants
//!
//! - The owner is never a mixin.
//! - A mixin target always carries a bound payload.
//!
//! Both are checked at construction and fail with
//! [`InteractionError::InvalidState`]; a violation means the metamodel was
//! built wrongly, not that the user did something disallowed.

use std::sync::Arc;

use crate::domain::errors::InteractionError;
use crate::domain::object::{ManagedObject, ObjectSpecification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionHead {
    owner: ManagedObject,
    target: ManagedObject,
}

impl InteractionHead {
    /// Head for a plain member: `target == owner`.
    pub fn regular(owner: ManagedObject) -> Result<Self, InteractionError> {
        let target = owner.clone();
        Self::new(owner, target)
    }

    /// Head for a member contributed by a mixin.
    pub fn mixin(owner: ManagedObject, target: ManagedObject) -> Result<Self, InteractionError> {
        Self::new(owner, target)
    }

    fn new(owner: ManagedObject, target: ManagedObject) -> Result<Self, InteractionError> {
        if owner.is_mixin() {
            return Err(InteractionError::InvalidState(format!(
                "owner {} is a mixin",
                owner.describe()
            )));
        }
        if target.is_mixin() && !target.is_resolved() {
            return Err(InteractionError::InvalidState(format!(
                "mixin target {} has no bound instance",
                target.describe()
            )));
        }
        Ok(Self { owner, target })
    }

    pub fn owner(&self) -> &ManagedObject {
        &self.owner
    }

    pub fn target(&self) -> &ManagedObject {
        &self.target
    }

    /// The owner, but only when this is a mixin interaction.
    pub fn mixed_in(&self) -> Option<&ManagedObject> {
        if self.owner == self.target {
            None
        } else {
            Some(&self.owner)
        }
    }

    pub fn is_mixin_interaction(&self) -> bool {
        self.mixed_in().is_some()
    }
}

/// Target-resolution layer: binds a mixin instance to its owner.
pub trait MixinResolver: Send + Sync {
    fn resolve(
        &self,
        mixin: &Arc<ObjectSpecification>,
        owner: &ManagedObject,
    ) -> Result<ManagedObject, InteractionError>;
}

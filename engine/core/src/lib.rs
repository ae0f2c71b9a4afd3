// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Interaction Engine Core
//!
//! Decides whether an attempted access to a domain object member is visible,
//! usable and valid by folding the verdicts of every rule ("facet") attached
//! to that member into a single [`domain::consent::Consent`].
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Consent evaluation for properties, collections, actions and action parameters

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;

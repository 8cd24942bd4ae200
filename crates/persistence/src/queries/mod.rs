// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit` — Audit event queries
//! - `challenge` — Challenge configuration lookups
//! - `goals` — Per-user goal targets
//! - `participants` — Enrollment lookups
//! - `points` — Points ledger totals and listings
//! - `tasks` — Task definitions and completion listings

pub mod audit;
pub mod challenge;
pub mod goals;
pub mod participants;
pub mod points;
pub mod tasks;

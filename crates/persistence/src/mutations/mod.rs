// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Mutations use Diesel DSL, with `last_insert_rowid()` reached through the
//! `PersistenceBackend` trait.
//!
//! ## Module Organization
//!
//! - `audit` — Audit event persistence
//! - `challenge` — Challenge lifecycle writes (create, end, update, day changes)
//! - `goals` — Goal target upserts
//! - `participants` — Enrollment seeding
//! - `points` — Append-only points ledger
//! - `tasks` — Task definitions and idempotent task completion
//!
//! Writes that must be atomic with their audit event or ledger entry run in
//! an immediate transaction so the write lock is taken before the first read.

pub mod audit;
pub mod challenge;
pub mod goals;
pub mod participants;
pub mod points;
pub mod tasks;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanflow — Core types, errors, and page-range partitioning shared across all
// crates. Nothing in this crate touches the filesystem.

pub mod config;
pub mod error;
pub mod helpers;
pub mod human_errors;
pub mod naming;
pub mod partition;
pub mod types;

pub use config::SplitterConfig;
pub use error::ScanflowError;
pub use human_errors::{Notification, NotificationLevel};
pub use types::*;

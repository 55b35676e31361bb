// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Vantage crates.
//!
//! Enabled via feature flags so the scheduler does not pull in the event bus by default.

#[cfg(feature = "event_bus_adapter")]
pub mod event_bus;

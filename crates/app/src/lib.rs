//! # catpoint-app
//!
//! Application layer: the alarm decision engine and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SecurityRepository`: sensors, arming status, alarm status
//!   - `ImageClassifier`: "does this frame contain a cat?"
//! - Define the **observer port** (`StatusListener`) that hosts implement
//! - Provide the **`DecisionEngine`**: the state machine over arming/alarm
//!   status, sensor mutations and observer dispatch
//! - Provide **in-process infrastructure** (status broadcaster) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `catpoint-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod decision_engine;
pub mod event_bus;
pub mod ports;

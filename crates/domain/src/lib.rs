//! # catpoint-domain
//!
//! Pure domain model for the catpoint home-security controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **statuses** (arming profile, alarm level)
//! - Define **Sensors** (intrusion detectors with a boolean `active` flag)
//! - Define **Camera frames** (raw images handed to the classifier)
//! - Define **Status events** (observer notifications as plain values)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod event;
pub mod frame;
pub mod sensor;
pub mod status;

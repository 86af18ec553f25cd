//! # catpoint-adapter-virtual
//!
//! Virtual/demo adapter that stands in for real hardware and a real image
//! recognition service.
//!
//! ## Provided pieces
//!
//! | Piece | Behaviour |
//! |-------|-----------|
//! | [`FakeImageClassifier`] | Confidence = mean byte value scaled to 0..=100 |
//! | [`demo_sensors`] | `Front Door` (door), `Back Window` (window), `Hallway` (motion) |
//!
//! ## Dependency rule
//!
//! Depends on `catpoint-app` (port traits) and `catpoint-domain` only.

mod classifier;
mod sensors;

pub use classifier::FakeImageClassifier;
pub use sensors::demo_sensors;

//! Continuous effects and the layer projector.
//!
//! ## Key Types
//!
//! - `FloatingEffect`: A recorded modification with layer and duration
//! - `Projector`: Trait computing current characteristics
//! - `LayerProjector`: Default projector
//! - `ProjectedView`: The computed battlefield

pub mod floating;
pub mod projector;

pub use floating::{Duration, FloatingEffect, Layer, Modification};
pub use projector::{LayerProjector, ProjectedObject, ProjectedView, Projector};

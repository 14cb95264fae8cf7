//! Apartment-suite scene definition and animation.
//!
//! Everything here is renderer-agnostic: a static floor-plan table, a camera,
//! and pure functions of elapsed time. The wgpu backend mirrors the surface
//! math in WGSL; this crate is the reference the shader is checked against.
//!
//! # Invariants
//! - Visual state is a pure function of elapsed seconds. Nothing is
//!   accumulated frame to frame, so there is no drift.
//! - Every floor-plan block has strictly positive dimensions.

pub mod animation;
pub mod camera;
pub mod layout;

pub use animation::{Surface, assembly_transform, shade, yaw_angle};
pub use camera::SuiteCamera;
pub use layout::{Block, FLOOR_PLAN, LayoutError};

//! wgpu render backend for the suite showcase.
//!
//! Draws the floor-plan blocks as instanced translucent boxes shaded by the
//! kinetic-gold WGSL program, plus an instanced edge-outline pass.
//!
//! # Invariants
//! - The renderer never owns animation state: pose and shading derive from
//!   the elapsed time passed into each frame.
//! - Shader math mirrors `suitespace_scene::animation` exactly.

mod gpu;
mod shaders;

pub use gpu::SceneRenderer;

//! Pure animation and surface-shading math.
//!
//! These functions are the CPU reference for the kinetic WGSL program in the
//! render backend: same inputs, same math, same constants. GLSL semantics are
//! used throughout (`fract` and `mod` are floor-based, `smoothstep` clamps
//! and accepts reversed edges).

use glam::{Mat4, Vec3};

/// Assembly spin rate about +Y, radians per second.
pub const ANGULAR_RATE: f32 = 0.15;
/// Static tilt about +X, radians.
pub const TILT: f32 = 0.2;
/// Grid cells per world unit.
pub const GRID_SCALE: f32 = 4.0;
/// Upward travel speed of the pulse band, world units per second.
pub const FLOW_SPEED: f32 = 2.0;
/// Vertical distance between consecutive pulse bands.
pub const REPEAT_HEIGHT: f32 = 5.0;

/// Kinetic gold accent, #FFD700.
pub const ACCENT: Vec3 = Vec3::new(1.0, 0.843, 0.0);
/// Deep black base, #050505.
pub const BASE: Vec3 = Vec3::new(0.0196, 0.0196, 0.0196);
/// Dark grey grid, #333333.
pub const GRID: Vec3 = Vec3::new(0.2, 0.2, 0.2);

/// Yaw about the vertical axis after `elapsed` seconds. Zero at mount,
/// continuous and monotonic.
pub fn yaw_angle(elapsed: f32) -> f32 {
    elapsed * ANGULAR_RATE
}

/// Model matrix for the whole suite: constant tilt outside the animated yaw.
///
/// Recomputed from elapsed time every frame rather than accumulated, so the
/// same elapsed value always yields the same pose.
pub fn assembly_transform(elapsed: f32) -> Mat4 {
    Mat4::from_rotation_x(TILT) * Mat4::from_rotation_y(yaw_angle(elapsed))
}

/// GLSL `fract`: always in `[0, 1)`, unlike `f32::fract` for negatives.
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `step`.
fn step(edge: f32, x: f32) -> f32 {
    if x >= edge { 1.0 } else { 0.0 }
}

/// GLSL `smoothstep`, reversed edges allowed (used for the falling edge).
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// View-angle edge brightening: strongest at grazing incidence.
pub fn fresnel(view_dir: Vec3, normal: Vec3) -> f32 {
    let facing = view_dir.dot(normal).max(0.0);
    (1.0 - facing) * (1.0 - facing)
}

/// Architectural grid mask: 1 on the thin band just below each cell boundary
/// in world X or Y, 0 strictly between lines.
pub fn grid_mask(world: Vec3) -> f32 {
    let gx = step(0.95, fract(world.x * GRID_SCALE));
    let gy = step(0.95, fract(world.y * GRID_SCALE));
    gx.max(gy)
}

/// Upward-traveling pulse band.
///
/// The wrapped flow coordinate repeats every [`REPEAT_HEIGHT`]; the band is
/// shaped by a rising edge over `0..0.8` and a falling edge over `2.5..0.8`,
/// so the value is exactly 0 outside `(0, 2.5)`.
pub fn pulse(world: Vec3, time: f32) -> f32 {
    let flow = (world.y - time * FLOW_SPEED + world.x * 0.3).rem_euclid(REPEAT_HEIGHT);
    smoothstep(0.0, 0.8, flow) * smoothstep(2.5, 0.8, flow)
}

/// Fast secondary flicker: thresholded high-frequency sine over world Y.
pub fn flicker(world: Vec3, time: f32) -> f32 {
    step(0.98, (world.y * 20.0 - time * 10.0).sin())
}

/// Shaded surface output: linear color and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub color: Vec3,
    pub alpha: f32,
}

/// Full surface composition at one world-space point.
///
/// Base stays near-black; grid lines blend toward the accent as the pulse and
/// flicker pass; the pulse adds direct and Fresnel glow on top. Opacity is
/// near zero except at grazing angles and inside the band, which reads as
/// data flowing through glass.
pub fn shade(world: Vec3, normal: Vec3, camera_pos: Vec3, time: f32) -> Surface {
    let view_dir = (camera_pos - world).normalize();
    let fresnel = fresnel(view_dir, normal);
    let grid = grid_mask(world);
    let pulse = pulse(world, time);
    let flicker = flicker(world, time);

    let active_grid = GRID.lerp(ACCENT, pulse * 1.5 + flicker * 0.8);
    let mut color = BASE.lerp(active_grid, grid);
    color += ACCENT * pulse * 0.35;
    color += ACCENT * fresnel * 0.8 * pulse;

    let alpha = 0.02 + fresnel * 0.1 + pulse * 0.3;
    Surface { color, alpha }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn yaw_starts_at_zero_and_is_linear() {
        assert_eq!(yaw_angle(0.0), 0.0);
        assert!((yaw_angle(1.0) - 0.15).abs() < EPS);
        assert!((yaw_angle(10.0) - 1.5).abs() < EPS);
        assert!(yaw_angle(2.0) > yaw_angle(1.0));
    }

    #[test]
    fn transform_at_zero_is_pure_tilt() {
        let m = assembly_transform(0.0);
        let expected = Mat4::from_rotation_x(TILT);
        assert!(m.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn fresnel_extremes() {
        let n = Vec3::Z;
        // Head-on view: no edge glow.
        assert_eq!(fresnel(Vec3::Z, n), 0.0);
        // Grazing view: full glow.
        assert!((fresnel(Vec3::X, n) - 1.0).abs() < EPS);
        // Back-facing view direction clamps to full glow, not beyond.
        assert!((fresnel(-Vec3::Z, n) - 1.0).abs() < EPS);
    }

    #[test]
    fn grid_line_sits_below_each_cell_boundary() {
        // Cell size is 1/GRID_SCALE = 0.25; the line is where fract >= 0.95.
        assert_eq!(grid_mask(Vec3::new(0.2475, 0.1, 0.0)), 1.0);
        assert_eq!(grid_mask(Vec3::new(0.1, 0.1, 0.0)), 0.0);
        // Either axis activates the mask.
        assert_eq!(grid_mask(Vec3::new(0.1, 0.2475, 0.0)), 1.0);
        // Holds away from the origin and for negative coordinates.
        assert_eq!(grid_mask(Vec3::new(3.2475, 0.1, 0.0)), 1.0);
        assert_eq!(grid_mask(Vec3::new(-0.0025, 0.1, 0.0)), 1.0);
    }

    #[test]
    fn pulse_band_window() {
        // With time = 0 and x = 0 the flow coordinate equals world Y.
        let at = |y: f32| pulse(Vec3::new(0.0, y, 0.0), 0.0);
        assert_eq!(at(0.0), 0.0);
        assert!((at(0.8) - 1.0).abs() < EPS); // plateau between the edges
        assert!(at(1.5) > 0.0);
        assert_eq!(at(2.5), 0.0);
        assert_eq!(at(3.0), 0.0);
        assert_eq!(at(4.9), 0.0);
    }

    #[test]
    fn pulse_is_periodic_in_repeat_height() {
        let p = Vec3::new(1.3, 0.7, 0.0);
        let shifted = p + Vec3::new(0.0, REPEAT_HEIGHT, 0.0);
        assert!((pulse(p, 2.4) - pulse(shifted, 2.4)).abs() < 1e-4);
        // Advancing time by one full band period also repeats.
        let period = REPEAT_HEIGHT / FLOW_SPEED;
        assert!((pulse(p, 0.3) - pulse(p, 0.3 + period)).abs() < 1e-4);
    }

    #[test]
    fn pulse_travels_upward() {
        // A point just above an active band becomes active as time advances.
        let p = Vec3::new(0.0, 2.6, 0.0);
        assert_eq!(pulse(p, 0.0), 0.0);
        assert!(pulse(p, 0.5) > 0.0);
    }

    #[test]
    fn flicker_is_binary() {
        let hot = Vec3::new(0.0, std::f32::consts::FRAC_PI_2 / 20.0, 0.0);
        assert_eq!(flicker(hot, 0.0), 1.0);
        assert_eq!(flicker(Vec3::ZERO, 0.0), 0.0);
    }

    #[test]
    fn alpha_stays_in_range() {
        let camera = Vec3::new(8.0, 8.0, 8.0);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..50 {
            for j in 0..50 {
                let world = Vec3::new(i as f32 * 0.13 - 3.0, j as f32 * 0.11, 0.4);
                let s = shade(world, Vec3::Z, camera, i as f32 * 0.37);
                min = min.min(s.alpha);
                max = max.max(s.alpha);
            }
        }
        assert!(min >= 0.02);
        assert!(max < 1.0);
    }

    #[test]
    fn quiet_surface_is_near_black_glass() {
        // Outside the band, facing the camera, off the grid: base color only.
        let world = Vec3::new(0.1, 3.0, 0.0);
        let camera = world + Vec3::Z * 10.0;
        let s = shade(world, Vec3::Z, camera, 0.0);
        assert_eq!(pulse(world, 0.0), 0.0);
        assert!(s.color.abs_diff_eq(BASE, 1e-3));
        assert!((s.alpha - 0.02).abs() < 1e-3);
    }
}

use glam::Vec3;

/// Exterior and interior wall height.
pub const WALL_HEIGHT: f32 = 1.2;
/// Wall thickness along the thin axis.
pub const WALL_THICKNESS: f32 = 0.05;

const WALL_EDGE: [f32; 3] = [0.4, 0.4, 0.4];
const FURNITURE_EDGE: [f32; 3] = [0.333, 0.333, 0.333];

/// One axis-aligned block of the suite: a wall segment or a furniture volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub label: &'static str,
    /// Center of the box in suite space.
    pub center: Vec3,
    /// Full extents along each axis.
    pub size: Vec3,
    /// Outline color for the edge pass.
    pub edge_color: [f32; 3],
}

/// The suite floor plan: hand-authored positions and sizes.
///
/// A 6x5 rectangular shell with a split entry on the south side, a
/// bedroom/bath partition, a living-room partition, and three abstracted
/// furniture volumes. Static configuration data, not geometry generation.
pub const FLOOR_PLAN: [Block; 10] = [
    Block {
        label: "back wall",
        center: Vec3::new(0.0, WALL_HEIGHT / 2.0, -2.5),
        size: Vec3::new(6.0, WALL_HEIGHT, WALL_THICKNESS),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "front wall west",
        center: Vec3::new(-2.0, WALL_HEIGHT / 2.0, 2.5),
        size: Vec3::new(2.0, WALL_HEIGHT, WALL_THICKNESS),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "front wall east",
        center: Vec3::new(2.0, WALL_HEIGHT / 2.0, 2.5),
        size: Vec3::new(2.0, WALL_HEIGHT, WALL_THICKNESS),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "west wall",
        center: Vec3::new(-3.0, WALL_HEIGHT / 2.0, 0.0),
        size: Vec3::new(WALL_THICKNESS, WALL_HEIGHT, 5.0),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "east wall",
        center: Vec3::new(3.0, WALL_HEIGHT / 2.0, 0.0),
        size: Vec3::new(WALL_THICKNESS, WALL_HEIGHT, 5.0),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "bedroom partition",
        center: Vec3::new(0.0, WALL_HEIGHT / 2.0, -1.0),
        size: Vec3::new(WALL_THICKNESS, WALL_HEIGHT, 3.0),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "living partition",
        center: Vec3::new(1.5, WALL_HEIGHT / 2.0, 0.5),
        size: Vec3::new(3.0, WALL_HEIGHT, WALL_THICKNESS),
        edge_color: WALL_EDGE,
    },
    Block {
        label: "bed",
        center: Vec3::new(-1.5, 0.2, -1.5),
        size: Vec3::new(1.8, 0.4, 2.2),
        edge_color: FURNITURE_EDGE,
    },
    Block {
        label: "sofa",
        center: Vec3::new(1.5, 0.25, 1.8),
        size: Vec3::new(2.5, 0.5, 0.8),
        edge_color: FURNITURE_EDGE,
    },
    Block {
        label: "kitchen island",
        center: Vec3::new(1.5, 0.45, -0.5),
        size: Vec3::new(2.0, 0.9, 0.8),
        edge_color: FURNITURE_EDGE,
    },
];

/// Layout validation failure.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("block '{label}' has non-positive size {size:?}")]
    DegenerateBlock { label: &'static str, size: Vec3 },
}

/// Check that every block is non-degenerate.
pub fn validate(blocks: &[Block]) -> Result<(), LayoutError> {
    for block in blocks {
        if block.size.min_element() <= 0.0 {
            return Err(LayoutError::DegenerateBlock {
                label: block.label,
                size: block.size,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_plan_is_valid() {
        assert_eq!(FLOOR_PLAN.len(), 10);
        validate(&FLOOR_PLAN).unwrap();
    }

    #[test]
    fn walls_sit_on_the_floor() {
        for block in FLOOR_PLAN.iter().filter(|b| b.label.contains("wall")) {
            assert_eq!(block.center.y, WALL_HEIGHT / 2.0, "{}", block.label);
            assert_eq!(block.size.y, WALL_HEIGHT, "{}", block.label);
        }
    }

    #[test]
    fn entry_gap_between_front_walls() {
        let west = FLOOR_PLAN.iter().find(|b| b.label == "front wall west").unwrap();
        let east = FLOOR_PLAN.iter().find(|b| b.label == "front wall east").unwrap();
        // Each front segment spans 2 units, leaving a 2-unit gap at x = 0.
        assert_eq!(west.center.x + west.size.x / 2.0, -1.0);
        assert_eq!(east.center.x - east.size.x / 2.0, 1.0);
    }

    #[test]
    fn degenerate_block_rejected() {
        let bad = [Block {
            label: "flat",
            center: Vec3::ZERO,
            size: Vec3::new(1.0, 0.0, 1.0),
            edge_color: WALL_EDGE,
        }];
        assert!(validate(&bad).is_err());
    }
}

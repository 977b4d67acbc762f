use glam::{Quat, Vec3};
use serde::Deserialize;

pub trait GroundProjector {
    fn project_to_ground(&self, position: Vec3) -> Vec3;
}

impl<F> GroundProjector for F
where
    F: Fn(Vec3) -> Vec3,
{
    fn project_to_ground(&self, position: Vec3) -> Vec3 {
        self(position)
    }
}

/// Horizontal ground plane at `height`; decals float `lift` above it to avoid z-fighting.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FlatGround {
    #[serde(default)]
    pub height: f32,
    #[serde(default = "FlatGround::default_lift")]
    pub lift: f32,
}

impl FlatGround {
    const fn default_lift() -> f32 {
        0.02
    }

    pub fn new(height: f32) -> Self {
        Self { height, lift: Self::default_lift() }
    }
}

impl Default for FlatGround {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl GroundProjector for FlatGround {
    fn project_to_ground(&self, position: Vec3) -> Vec3 {
        Vec3::new(position.x, self.height + self.lift, position.z)
    }
}

/// Rotation whose forward axis (+Z) points up, so a decal quad lies flat on the ground.
pub fn face_up_rotation() -> Quat {
    Quat::from_rotation_arc(Vec3::Z, Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ground_keeps_horizontal_position() {
        let ground = FlatGround { height: 1.5, lift: 0.0 };
        assert_eq!(ground.project_to_ground(Vec3::new(3.0, 9.0, -2.0)), Vec3::new(3.0, 1.5, -2.0));
    }

    #[test]
    fn face_up_points_forward_along_y() {
        let forward = face_up_rotation() * Vec3::Z;
        assert!((forward - Vec3::Y).length() < 1e-5);
    }
}

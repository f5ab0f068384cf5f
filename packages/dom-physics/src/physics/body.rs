use rapier2d::prelude::*;

use crate::core::Vec2;

/// Label stored in each body's user data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Static ground / side wall
    Wall,
    /// Dynamic body paired with a visual element
    Tracked,
}

impl BodyKind {
    const WALL: u128 = 1;
    const TRACKED: u128 = 2;

    pub fn to_user_data(self) -> u128 {
        match self {
            BodyKind::Wall => Self::WALL,
            BodyKind::Tracked => Self::TRACKED,
        }
    }

    pub fn from_user_data(data: u128) -> Option<Self> {
        match data {
            Self::WALL => Some(BodyKind::Wall),
            Self::TRACKED => Some(BodyKind::Tracked),
            _ => None,
        }
    }
}

/// Surface and mass properties of a dynamic body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
    /// Mass per square pixel
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.5,
            friction: 0.1,
            density: 0.001,
        }
    }
}

impl Material {
    /// Boundary surface: no bounce of its own and the same low friction as a
    /// card, so contacts against walls take the card's values.
    pub fn wall() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.1,
            density: 1.0,
        }
    }
}

/// Read-only view of a body for filtered queries.
#[derive(Clone, Copy, Debug)]
pub struct BodyInfo {
    pub handle: RigidBodyHandle,
    pub kind: Option<BodyKind>,
    pub is_static: bool,
    pub center: Vec2,
}

impl BodyInfo {
    pub(super) fn of(handle: RigidBodyHandle, body: &RigidBody) -> Self {
        let t = body.translation();
        Self {
            handle,
            kind: BodyKind::from_user_data(body.user_data),
            is_static: body.is_fixed(),
            center: Vec2::new(t.x, t.y),
        }
    }

    pub fn is_wall(&self) -> bool {
        self.is_static && self.kind == Some(BodyKind::Wall)
    }

    pub fn is_tracked(&self) -> bool {
        !self.is_static && self.kind == Some(BodyKind::Tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_user_data() {
        for kind in [BodyKind::Wall, BodyKind::Tracked] {
            assert_eq!(BodyKind::from_user_data(kind.to_user_data()), Some(kind));
        }
        assert_eq!(BodyKind::from_user_data(0), None);
    }

    #[test]
    fn default_material_matches_card_feel() {
        let m = Material::default();
        assert_eq!((m.restitution, m.friction, m.density), (0.5, 0.1, 0.001));
    }

    #[test]
    fn walls_never_raise_friction_above_a_card() {
        let wall = Material::wall();
        assert_eq!(wall.restitution, 0.0);
        assert!(wall.friction <= Material::default().friction);
    }
}

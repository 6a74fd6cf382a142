use nalgebra::Vector2;

/// The part of a [`Point`] the quadtree needs: mass and position.
///
/// Leaves store copies of these, so the tree never borrows the points it was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMass {
    pub mass: f32,
    pub position: Vector2<f32>,
}

impl PointMass {
    #[must_use]
    pub fn new(mass: f32, position: Vector2<f32>) -> Self {
        Self { mass, position }
    }
}

/// A point mass that moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub mass: f32,
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
}

impl Point {
    #[must_use]
    pub fn new(mass: f32, position: Vector2<f32>, velocity: Vector2<f32>) -> Self {
        assert!(mass > 0., "point mass has to be positive, got {mass}");
        Self {
            mass,
            position,
            velocity,
        }
    }

    /// A point at rest.
    #[must_use]
    pub fn at_rest(mass: f32, position: Vector2<f32>) -> Self {
        Self::new(mass, position, Vector2::zeros())
    }

    #[must_use]
    pub fn point_mass(&self) -> PointMass {
        PointMass::new(self.mass, self.position)
    }
}

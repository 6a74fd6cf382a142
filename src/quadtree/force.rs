use nalgebra::Vector2;

use super::{Quadtree, ROOT};
use crate::{gravity, Parameters, PointMass};

/// How many terms went into one acceleration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interactions {
    /// Point-to-point terms from leaves.
    pub exact: usize,
    /// Nodes replaced by their center of mass.
    pub approximated: usize,
}

impl Interactions {
    #[must_use]
    pub fn total(&self) -> usize {
        self.exact + self.approximated
    }
}

impl Quadtree {
    /// Acceleration the tree exerts on `target`.
    ///
    /// The tree has to be aggregated. It is only read, so this can run for many
    /// points at once. Targets outside of the tree's boundary feel no force, just
    /// like they exert none.
    #[must_use]
    pub fn acceleration(&self, target: &PointMass, parameters: &Parameters) -> Vector2<f32> {
        self.acceleration_with_stats(target, parameters).0
    }

    /// Like [`Quadtree::acceleration`], also counting the terms that were summed.
    #[must_use]
    pub fn acceleration_with_stats(
        &self,
        target: &PointMass,
        parameters: &Parameters,
    ) -> (Vector2<f32>, Interactions) {
        let mut acc = Vector2::zeros();
        let mut interactions = Interactions::default();

        if self.boundary().contains(&target.position) {
            self.accumulate(ROOT, target, parameters, &mut acc, &mut interactions);
        }

        (acc, interactions)
    }

    fn accumulate(
        &self,
        index: usize,
        target: &PointMass,
        parameters: &Parameters,
        acc: &mut Vector2<f32>,
        interactions: &mut Interactions,
    ) {
        let node = &self.nodes[index];
        // empty, or centered on the target itself
        if node.total_mass == 0. || node.center_of_mass == target.position {
            return;
        }

        if node.is_leaf() {
            for point in node.points() {
                // no self-interaction
                if point.position == target.position {
                    continue;
                }

                *acc += gravity::acceleration(
                    target.position,
                    point.mass,
                    point.position,
                    parameters.gravity_constant,
                    parameters.softening,
                );
                interactions.exact += 1;
            }
            return;
        }

        let distance =
            gravity::softened_distance(node.center_of_mass - target.position, parameters.softening);

        // node is far enough away
        if node.boundary.width() / distance < parameters.theta {
            *acc += gravity::acceleration(
                target.position,
                node.total_mass,
                node.center_of_mass,
                parameters.gravity_constant,
                parameters.softening,
            );
            interactions.approximated += 1;
            return;
        }

        // near field, go deeper into tree
        for &child in node.subnodes.iter() {
            self.accumulate(child, target, parameters, acc, interactions);
        }
    }
}

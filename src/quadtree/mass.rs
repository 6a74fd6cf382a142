use nalgebra::Vector2;

use super::{Occupant, Quadtree, ROOT};

impl Occupant {
    /// Total mass and center of mass of the stored points.
    fn mass_and_center(&self) -> (f32, Vector2<f32>) {
        match self {
            Occupant::Empty => (0., Vector2::zeros()),
            Occupant::Point(point) => (point.mass, point.position),
            Occupant::Bucket(points) => {
                weighted_center(points.iter().map(|p| (p.mass, p.position)))
            }
        }
    }
}

fn weighted_center(masses: impl Iterator<Item = (f32, Vector2<f32>)>) -> (f32, Vector2<f32>) {
    let (total_mass, weighted) = masses.fold(
        (0., Vector2::zeros()),
        |(m_acc, pos_acc), (m, pos): (f32, Vector2<f32>)| (m_acc + m, pos_acc + pos * m),
    );

    if total_mass > 0. {
        (total_mass, weighted / total_mass)
    } else {
        (0., Vector2::zeros())
    }
}

impl Quadtree {
    /// Fill in total mass and center of mass of every node, children first.
    ///
    /// Both only depend on the stored points, so calling this again on an
    /// unchanged tree gives the same values.
    pub fn aggregate(&mut self) {
        self.aggregate_at(ROOT);
    }

    fn aggregate_at(&mut self, index: usize) {
        let subnodes = self.nodes[index].subnodes;

        let (total_mass, center_of_mass) = if subnodes.is_leaf() {
            self.nodes[index].occupant.mass_and_center()
        } else {
            for &child in subnodes.iter() {
                self.aggregate_at(child);
            }
            weighted_center(subnodes.iter().map(|&child| {
                let child = &self.nodes[child];
                (child.total_mass, child.center_of_mass)
            }))
        };

        let node = &mut self.nodes[index];
        node.total_mass = total_mass;
        node.center_of_mass = center_of_mass;
    }
}

use std::ops::Deref;

use nalgebra::Vector2;

pub mod force;
pub mod mass;

pub use force::Interactions;

use crate::{Point, PointMass, Rect};

const ROOT: usize = 0;

/// Child indices into the arena, `usize::MAX` where a slot is empty.
///
/// Either all four slots are filled or none is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Subnodes([usize; 4]);

impl Subnodes {
    const NONE: usize = usize::MAX;

    fn first(first: usize) -> Self {
        Self([first, first + 1, first + 2, first + 3])
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.0.iter().all(|&i| i == Self::NONE)
    }
}

impl Default for Subnodes {
    fn default() -> Self {
        Self([Self::NONE; 4])
    }
}

impl Deref for Subnodes {
    type Target = [usize; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// What a leaf holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum Occupant {
    #[default]
    Empty,
    Point(PointMass),
    /// Several points in a leaf at maximum depth,
    /// usually because they sit on (nearly) the same spot.
    Bucket(Vec<PointMass>),
}

impl Occupant {
    pub(crate) fn points(&self) -> &[PointMass] {
        match self {
            Occupant::Empty => &[],
            Occupant::Point(point) => std::slice::from_ref(point),
            Occupant::Bucket(points) => points,
        }
    }
}

/// A cell of the quadtree.
#[derive(Clone, Debug)]
pub struct Node {
    pub boundary: Rect,
    pub total_mass: f32,
    /// Zero vector while `total_mass` is zero.
    pub center_of_mass: Vector2<f32>,
    pub(crate) occupant: Occupant,
    pub(crate) subnodes: Subnodes,
}

impl Node {
    fn new(boundary: Rect) -> Self {
        Self {
            boundary,
            total_mass: 0.,
            center_of_mass: Vector2::zeros(),
            occupant: Occupant::Empty,
            subnodes: Subnodes::default(),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.subnodes.is_leaf()
    }

    /// Snapshots stored in this node; empty for inner nodes.
    #[must_use]
    pub fn points(&self) -> &[PointMass] {
        self.occupant.points()
    }
}

/// A quadtree stored in one flat arena.
///
/// Nodes refer to their children by index, the root is always at index 0.
/// Clearing the arena frees the whole tree at once while keeping the allocation,
/// so one `Quadtree` can be rebuilt every tick.
#[derive(Clone, Debug)]
pub struct Quadtree {
    nodes: Vec<Node>,
    max_depth: usize,
    inserted: usize,
    dropped: usize,
}

impl Quadtree {
    /// An empty tree covering `boundary`.
    #[must_use]
    pub fn new(boundary: Rect, max_depth: usize) -> Self {
        Self {
            nodes: vec![Node::new(boundary)],
            max_depth,
            inserted: 0,
            dropped: 0,
        }
    }

    /// Build and aggregate a tree over `points`.
    #[must_use]
    pub fn from_points(points: &[Point], boundary: Rect, max_depth: usize) -> Self {
        let mut tree = Self::new(boundary, max_depth);
        tree.rebuild(points, boundary);
        tree
    }

    /// Throw away every node and build a fresh, aggregated tree over `points`.
    pub fn rebuild(&mut self, points: &[Point], boundary: Rect) {
        self.nodes.clear();
        self.nodes.push(Node::new(boundary));
        self.inserted = 0;
        self.dropped = 0;

        for point in points {
            self.insert(point.point_mass());
        }
        self.aggregate();

        log::debug!(
            "built quadtree with {} nodes, {} points inserted, {} dropped",
            self.nodes.len(),
            self.inserted,
            self.dropped
        );
    }

    /// Insert a snapshot of a point.
    ///
    /// Points outside the root boundary are dropped and `false` is returned.
    /// Masses and centers of mass are stale until [`Quadtree::aggregate`] runs.
    pub fn insert(&mut self, point: PointMass) -> bool {
        if !self.nodes[ROOT].boundary.contains(&point.position) {
            log::trace!("dropping point at {:?} outside of the world", point.position);
            self.dropped += 1;
            return false;
        }

        self.insert_at(ROOT, point, 0);
        self.inserted += 1;
        true
    }

    /// `point` has to lie within the boundary of node `index`.
    fn insert_at(&mut self, index: usize, point: PointMass, depth: usize) {
        let max_depth = self.max_depth;
        let node = &mut self.nodes[index];

        if node.is_leaf() {
            match std::mem::take(&mut node.occupant) {
                // Self is empty, store the point
                Occupant::Empty => {
                    node.occupant = Occupant::Point(point);
                    return;
                }
                Occupant::Bucket(mut points) => {
                    points.push(point);
                    node.occupant = Occupant::Bucket(points);
                    return;
                }
                // Self is full but may not be subdivided any further
                Occupant::Point(previous) if depth >= max_depth => {
                    log::trace!("maximum depth {max_depth} reached at {:?}", point.position);
                    node.occupant = Occupant::Bucket(vec![previous, point]);
                    return;
                }
                // Self is full, subdivide and move the previous point down
                Occupant::Point(previous) => {
                    self.subdivide(index);
                    self.insert_into_subnodes(index, previous, depth);
                }
            }
        }

        self.insert_into_subnodes(index, point, depth);
    }

    fn insert_into_subnodes(&mut self, index: usize, point: PointMass, depth: usize) {
        let subnodes = self.nodes[index].subnodes;

        // Every child checks containment for itself. Rounding of the quadrant edges can
        // leave a sliver covered by the parent but by no child, fall back to the center then.
        let child = subnodes
            .iter()
            .copied()
            .find(|&child| self.nodes[child].boundary.contains(&point.position))
            .unwrap_or_else(|| {
                subnodes[self.nodes[index].boundary.choose_quadrant(&point.position)]
            });

        self.insert_at(child, point, depth + 1);
    }

    fn subdivide(&mut self, index: usize) {
        let quadrants = self.nodes[index].boundary.quadrants();
        let first = self.nodes.len();
        self.nodes.extend(quadrants.into_iter().map(Node::new));
        self.nodes[index].subnodes = Subnodes::first(first);
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    #[must_use]
    pub fn boundary(&self) -> Rect {
        self.root().boundary
    }

    /// Children of `node`, or `None` for a leaf.
    #[must_use]
    pub fn subnodes(&self, node: &Node) -> Option<[&Node; 4]> {
        if node.is_leaf() {
            return None;
        }
        Some(node.subnodes.0.map(|i| &self.nodes[i]))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes, including empty leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true, there is always a root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Points accepted since the last rebuild.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Points outside the boundary since the last rebuild.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Depth of the deepest node, the root being at depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth_at(ROOT)
    }

    fn depth_at(&self, index: usize) -> usize {
        let node = &self.nodes[index];
        if node.is_leaf() {
            return 0;
        }
        1 + node
            .subnodes
            .iter()
            .map(|&child| self.depth_at(child))
            .max()
            .unwrap_or(0)
    }
}

//! # Quadtree Implementation
//!
//! This is an implementation of a point quadtree, as described in [the wikipedia
//! article](https://en.wikipedia.org/wiki/Quadtree), storing indexed points and answering
//! nearest neighbour queries.
//!
//! Neighbours are ordered by distance and then by index, so that a query gives exactly the same
//! answer as a linear scan which keeps the first (lowest index) minimum.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use nalgebra::Vector2;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Number of points per QuadTree
pub const CAPACITY: usize = 4;

/// Maximum subdivision depth. Nodes at this depth hold any number of points, which stops
/// coincident points from subdividing forever.
pub const MAX_DEPTH: usize = 24;

/// Margin added around the bounding box of the points when building a tree.
const BOUNDARY_MARGIN: f64 = 1.0;

/// Relative slack applied when pruning nodes, so rounding can never prune an equal-distance point.
const PRUNE_SLACK: f64 = 1e-12;

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// An axis aligned box, closed on the minimum edges and open on the maximum edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quad {
    min: Vector2<f64>,
    max: Vector2<f64>,
}

/// A point found by a nearest neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Index of the point as given on insertion
    pub index: usize,

    /// Euclidean distance from the query point
    pub dist: f64,
}

/// An implementation of a QuadTree
#[derive(Clone, Debug)]
pub struct QuadTree {
    /// The bounds of this node
    boundary: Quad,

    /// Depth of this node, the root is at 0
    depth: usize,

    /// Points stored in this node
    points: Vec<(usize, Vector2<f64>)>,

    /// North West child of the node
    north_west: Option<Box<QuadTree>>,

    /// North East child of the node
    north_east: Option<Box<QuadTree>>,

    /// South West child of the node
    south_west: Option<Box<QuadTree>>,

    /// South East child of the node
    south_east: Option<Box<QuadTree>>,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum QuadTreeError {
    #[error("The given point {0} was not in the bounds of the quadtree {1:?}")]
    PointNotInBounds(Vector2<f64>, Quad),

    #[error("Cannot build a quadtree from an empty set of points")]
    NoPoints,

    #[error("Cannot insert the non-finite point {0} into a quadtree")]
    NonFinitePoint(Vector2<f64>),
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Quad {
    /// Creates a new quad spanning `min` to `max`.
    pub fn new(min: Vector2<f64>, max: Vector2<f64>) -> Self {
        Self { min, max }
    }

    /// Creates a square quad containing all `points` with a margin on every side.
    pub fn bounding(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;

        let (mut min, mut max) = (*first, *first);
        for p in points.iter() {
            min = Vector2::new(min[0].min(p[0]), min[1].min(p[1]));
            max = Vector2::new(max[0].max(p[0]), max[1].max(p[1]));
        }

        // Square it off so subdivisions stay square
        let extent = max - min;
        let half_width = 0.5 * extent[0].max(extent[1]) + BOUNDARY_MARGIN;
        let centre = 0.5 * (min + max);
        let half = Vector2::new(half_width, half_width);

        Some(Self::new(centre - half, centre + half))
    }

    /// Returns `true` if `point` is inside this [`Quad`]
    pub fn contains(&self, point: &Vector2<f64>) -> bool {
        self.min[0] <= point[0]
            && point[0] < self.max[0]
            && self.min[1] <= point[1]
            && point[1] < self.max[1]
    }

    /// Returns the distance from `point` to the closest point of this [`Quad`], zero if the point
    /// is inside it.
    pub fn dist_to(&self, point: &Vector2<f64>) -> f64 {
        let dx = (self.min[0] - point[0]).max(point[0] - self.max[0]).max(0.0);
        let dy = (self.min[1] - point[1]).max(point[1] - self.max[1]).max(0.0);

        Vector2::new(dx, dy).norm()
    }

    /// Split into the north west, north east, south west and south east quarters.
    ///
    /// The quarters share their edges exactly, so every point in `self` is in exactly one of them.
    fn split(&self) -> [Quad; 4] {
        let mid = 0.5 * (self.min + self.max);

        [
            Quad::new(Vector2::new(self.min[0], mid[1]), Vector2::new(mid[0], self.max[1])),
            Quad::new(mid, self.max),
            Quad::new(self.min, mid),
            Quad::new(Vector2::new(mid[0], self.min[1]), Vector2::new(self.max[0], mid[1])),
        ]
    }
}

impl Neighbour {
    /// Returns `true` if `self` comes before `other`: closer, or as close with a lower index.
    pub fn precedes(&self, other: &Neighbour) -> bool {
        self.dist < other.dist || (self.dist == other.dist && self.index < other.index)
    }
}

impl QuadTree {
    pub fn new(boundary: Quad) -> Self {
        Self::with_depth(boundary, 0)
    }

    fn with_depth(boundary: Quad, depth: usize) -> Self {
        Self {
            boundary,
            depth,
            points: Vec::new(),
            north_west: None,
            north_east: None,
            south_west: None,
            south_east: None,
        }
    }

    /// Build a tree containing all `points`, indexed by their position in the slice.
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, QuadTreeError> {
        if let Some(p) = points.iter().find(|p| !(p[0].is_finite() && p[1].is_finite())) {
            return Err(QuadTreeError::NonFinitePoint(*p));
        }

        let boundary = Quad::bounding(points).ok_or(QuadTreeError::NoPoints)?;
        let mut tree = Self::new(boundary);

        for (i, p) in points.iter().enumerate() {
            tree.insert(i, *p)?;
        }

        Ok(tree)
    }

    /// Insert a point into the QuadTree.
    pub fn insert(&mut self, index: usize, point: Vector2<f64>) -> Result<(), QuadTreeError> {
        // Check if it's in the tree
        if !self.boundary.contains(&point) {
            return Err(QuadTreeError::PointNotInBounds(point, self.boundary));
        }

        // If there's a space in the tree and its's not been divided add it to the points list
        if self.north_west.is_none() && (self.points.len() < CAPACITY || self.depth >= MAX_DEPTH)
        {
            self.points.push((index, point));
            return Ok(());
        }

        // Otherwise subdivide if needed
        if self.north_west.is_none() {
            self.subdivide();
        }

        // And add the point to the quad it falls in
        for child in self.children_mut() {
            if child.boundary.contains(&point) {
                return child.insert(index, point);
            }
        }

        Err(QuadTreeError::PointNotInBounds(point, self.boundary))
    }

    /// Find the two points closest to `point`.
    ///
    /// Returns `None` if the tree holds fewer than two points.
    pub fn nearest_two(&self, point: &Vector2<f64>) -> Option<(Neighbour, Neighbour)> {
        let mut best = (None, None);
        self.search(point, &mut best);

        match best {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    fn search(&self, point: &Vector2<f64>, best: &mut (Option<Neighbour>, Option<Neighbour>)) {
        // Nothing in this node can beat the current second best
        if let Some(ref second) = best.1 {
            if self.boundary.dist_to(point) > second.dist * (1.0 + PRUNE_SLACK) {
                return;
            }
        }

        for (index, p) in self.points.iter() {
            let candidate = Neighbour {
                index: *index,
                dist: (p - point).norm(),
            };

            match (best.0, best.1) {
                (None, _) => best.0 = Some(candidate),
                (Some(first), _) if candidate.precedes(&first) => {
                    best.1 = best.0;
                    best.0 = Some(candidate);
                }
                (_, None) => best.1 = Some(candidate),
                (_, Some(second)) if candidate.precedes(&second) => best.1 = Some(candidate),
                _ => (),
            }
        }

        // Visit the children closest first so the bound tightens quickly
        let mut children: Vec<&QuadTree> = self.children().collect();
        children.sort_by(|a, b| {
            a.boundary
                .dist_to(point)
                .partial_cmp(&b.boundary.dist_to(point))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for child in children {
            child.search(point, best);
        }
    }

    fn children(&self) -> impl Iterator<Item = &QuadTree> + '_ {
        self.north_west
            .iter()
            .chain(self.north_east.iter())
            .chain(self.south_west.iter())
            .chain(self.south_east.iter())
            .map(|c| &**c)
    }

    fn children_mut(&mut self) -> impl Iterator<Item = &mut QuadTree> + '_ {
        self.north_west
            .iter_mut()
            .chain(self.north_east.iter_mut())
            .chain(self.south_west.iter_mut())
            .chain(self.south_east.iter_mut())
            .map(|c| &mut **c)
    }

    fn subdivide(&mut self) {
        let [nw, ne, sw, se] = self.boundary.split();
        let depth = self.depth + 1;

        self.north_west = Some(Box::new(QuadTree::with_depth(nw, depth)));
        self.north_east = Some(Box::new(QuadTree::with_depth(ne, depth)));
        self.south_west = Some(Box::new(QuadTree::with_depth(sw, depth)));
        self.south_east = Some(Box::new(QuadTree::with_depth(se, depth)));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn brute_force(points: &[Vector2<f64>], point: &Vector2<f64>) -> (usize, usize) {
        let dists: Vec<f64> = points.iter().map(|p| (p - point).norm()).collect();

        let mut first = 0;
        for i in 0..dists.len() {
            if dists[i] < dists[first] {
                first = i;
            }
        }
        let mut second = if first == 0 { 1 } else { 0 };
        for i in 0..dists.len() {
            if i != first && dists[i] < dists[second] {
                second = i;
            }
        }

        (first, second)
    }

    #[test]
    fn test_quad_split_partitions() {
        let quad = Quad::new(Vector2::new(0.0, 0.0), Vector2::new(2.0, 2.0));
        let mid = Vector2::new(1.0, 1.0);

        let containing = quad.split().iter().filter(|q| q.contains(&mid)).count();
        assert_eq!(containing, 1);
        assert_eq!(quad.dist_to(&Vector2::new(1.0, 1.0)), 0.0);
        assert_eq!(quad.dist_to(&Vector2::new(5.0, 6.0)), 5.0);
    }

    #[test]
    fn test_nearest_two_matches_linear_scan() {
        // A spiral so the points spread over several levels of the tree
        let points: Vec<Vector2<f64>> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.1;
                Vector2::new(t * t.cos(), t * t.sin())
            })
            .collect();
        let tree = QuadTree::from_points(&points).unwrap();

        for qx in -20..20 {
            for qy in -20..20 {
                let q = Vector2::new(qx as f64 * 0.97, qy as f64 * 1.03);
                let (a, b) = tree.nearest_two(&q).unwrap();
                assert_eq!((a.index, b.index), brute_force(&points, &q));
            }
        }
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        // Four points equidistant from the origin, plus duplicates
        let points = vec![
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(-1.0, 0.0),
            Vector2::new(0.0, -1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 0.0),
        ];
        let tree = QuadTree::from_points(&points).unwrap();

        let (a, b) = tree.nearest_two(&Vector2::new(0.0, 0.0)).unwrap();
        assert_eq!((a.index, b.index), (0, 1));

        let (a, b) = tree.nearest_two(&Vector2::new(2.0, 0.0)).unwrap();
        assert_eq!((a.index, b.index), (0, 4));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            QuadTree::from_points(&[]),
            Err(QuadTreeError::NoPoints)
        ));
        assert!(matches!(
            QuadTree::from_points(&[Vector2::new(std::f64::NAN, 0.0)]),
            Err(QuadTreeError::NonFinitePoint(_))
        ));

        let tree = QuadTree::from_points(&[Vector2::new(0.0, 0.0)]).unwrap();
        assert!(tree.nearest_two(&Vector2::new(0.0, 0.0)).is_none());
    }
}

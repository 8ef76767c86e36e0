//! # Nearest waypoint locator
//!
//! Finds the closest and second closest waypoints of the trajectory to the vehicle. The whole
//! trajectory is considered on every call, there is no search window around the previous step's
//! result. On a track which comes close to crossing itself this can pick a pair of waypoints
//! that are not neighbours on the trajectory, which is a known limitation of the scoring scheme.
//!
//! Two strategies are available which always give the same answer:
//!  - `Exhaustive`: a linear scan over every waypoint, O(n) per call.
//!  - `QuadTree`: a quadtree built once over the waypoints, pruning most of them.
//!
//! Ties go to the lowest waypoint index in both cases.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use crate::traj::Trajectory;
use util::quadtree::{QuadTree, QuadTreeError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The two waypoints closest to a position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct NearestPair {
    /// Index of the closest waypoint
    pub closest_index: usize,

    /// Index of the second closest waypoint, never equal to `closest_index`
    pub second_closest_index: usize,
}

/// Finds nearest waypoint pairs on a single trajectory.
#[derive(Debug, Clone)]
pub struct Locator {
    kind: LocatorKind,

    /// Index over the trajectory's waypoints, only built for `LocatorKind::QuadTree`
    tree: Option<QuadTree>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Nearest waypoint search strategy.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    Exhaustive,
    QuadTree,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LocatorKind {
    fn default() -> Self {
        LocatorKind::Exhaustive
    }
}

impl Locator {
    /// Create a locator for the given trajectory.
    ///
    /// The same trajectory must be passed to every call to [`Locator::locate`].
    pub fn new(kind: LocatorKind, traj: &Trajectory) -> Result<Self, QuadTreeError> {
        let tree = match kind {
            LocatorKind::Exhaustive => None,
            LocatorKind::QuadTree => {
                debug!("Building quadtree over {} waypoints", traj.len());
                Some(QuadTree::from_points(&traj.positions())?)
            }
        };

        Ok(Self { kind, tree })
    }

    /// The strategy in use.
    pub fn kind(&self) -> LocatorKind {
        self.kind
    }

    /// Find the closest and second closest waypoints to `position`.
    pub fn locate(&self, traj: &Trajectory, position: &Vector2<f64>) -> NearestPair {
        match self.tree {
            Some(ref tree) => match tree.nearest_two(position) {
                Some((first, second)) => NearestPair {
                    closest_index: first.index,
                    second_closest_index: second.index,
                },
                // Trajectories always have two points, but fall back to the scan regardless
                None => locate(traj, position),
            },
            None => locate(traj, position),
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the closest and second closest waypoints to `position` by scanning every waypoint.
///
/// The closest waypoint is the first minimum of the distances. The second closest is the first
/// minimum once the closest has been excluded, so indices remain stable.
pub fn locate(traj: &Trajectory, position: &Vector2<f64>) -> NearestPair {
    let dists: Vec<f64> = traj
        .waypoints()
        .iter()
        .map(|w| (w.position_m - position).norm())
        .collect();

    let closest_index = first_min_index(&dists, None);
    let second_closest_index = first_min_index(&dists, Some(closest_index));

    NearestPair {
        closest_index,
        second_closest_index,
    }
}

/// Index of the first minimum of `dists`, treating the `exclude` index as infinitely far away.
fn first_min_index(dists: &[f64], exclude: Option<usize>) -> usize {
    let mut best: Option<(usize, f64)> = None;

    for (i, d) in dists.iter().enumerate() {
        if Some(i) == exclude {
            continue;
        }

        match best {
            Some((_, best_d)) if !(*d < best_d) => (),
            _ => best = Some((i, *d)),
        }
    }

    best.map(|(i, _)| i).unwrap_or(0)
}

//! Side classification of rectangle contacts
//!
//! Given two overlapping rectangles, decide which face of the *subject* is
//! in contact. The classifier works from a 4-slot corner mask:
//!
//! 1. Each subject corner found inside the candidate (inclusive, honouring
//!    the candidate's infinite edges) sets its own slot and records how far
//!    it penetrates on each axis.
//! 2. Each candidate corner found inside the subject sets the *opposite*
//!    slot (`3 - i`), i.e. the subject corner that faces it.
//! 3. Two slots sharing an edge name the side directly. Anything else is
//!    settled by the axis with the smaller penetration and the centres.
//! 4. Sides facing an infinite edge of the candidate are flipped, so a body
//!    is always pushed back into the level and never out through its border.
//!
//! [`CollisionWorld::advanced_check`] then combines the masks of every
//! contact to settle ambiguous cases: two adjacent floor tiles read as one
//! flat floor, and an inner corner (three slots) redirects per-tile sides
//! away from the seam.
//!
//! Screen coordinates: y grows downward, `Up` is toward smaller y.

use bitflags::bitflags;

use crate::foundation::collections::ShapeHandle;
use crate::foundation::math::Vec2;
use super::collision::{InfiniteEdge, RectGeometry};
use super::query::QueryFilter;
use super::world::CollisionWorld;

/// Face of the querying shape in contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Top face, toward smaller y
    Up,
    /// Bottom face, toward larger y
    Down,
    /// Left face
    Left,
    /// Right face
    Right,
    /// Undetermined
    #[default]
    None,
}

impl Side {
    /// Opposite face
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// `Up` or `Down`
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// `Left` or `Right`
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

bitflags! {
    /// Corner slots of the subject rectangle
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        /// Slot 0
        const TOP_LEFT = 1 << 0;
        /// Slot 1
        const TOP_RIGHT = 1 << 1;
        /// Slot 2
        const BOTTOM_LEFT = 1 << 2;
        /// Slot 3
        const BOTTOM_RIGHT = 1 << 3;

        /// Top edge
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        /// Bottom edge
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        /// Left edge
        const LEFT = Self::TOP_LEFT.bits() | Self::BOTTOM_LEFT.bits();
        /// Right edge
        const RIGHT = Self::TOP_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

impl Corners {
    /// Flag for a corner slot (0 = TL, 1 = TR, 2 = BL, 3 = BR)
    pub fn slot(index: usize) -> Self {
        match index {
            0 => Self::TOP_LEFT,
            1 => Self::TOP_RIGHT,
            2 => Self::BOTTOM_LEFT,
            _ => Self::BOTTOM_RIGHT,
        }
    }

    /// Number of set slots
    pub fn count(self) -> u32 {
        self.bits().count_ones()
    }

    /// Side named by an edge pair, `None` for any other mask
    pub fn edge_side(self) -> Option<Side> {
        if self == Self::TOP {
            Some(Side::Up)
        } else if self == Self::BOTTOM {
            Some(Side::Down)
        } else if self == Self::LEFT {
            Some(Side::Left)
        } else if self == Self::RIGHT {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Classification of one subject/candidate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairContact {
    /// Contact side from the subject's perspective
    pub side: Side,
    /// Corner slots in contact
    pub corners: Corners,
}

/// One detected contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// The other shape
    pub collider: ShapeHandle,
    /// Contact side from the querying shape's perspective
    pub side: Side,
}

/// Result of [`CollisionWorld::advanced_check`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactReport {
    /// Side settled from all contacts together, `None` if ambiguous
    pub side: Side,
    /// Every contact, in layer order
    pub collisions: Vec<Collision>,
}

impl ContactReport {
    /// Whether nothing was hit
    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Number of contacts
    pub fn len(&self) -> usize {
        self.collisions.len()
    }

    /// Iterate over contacts
    pub fn iter(&self) -> std::slice::Iter<'_, Collision> {
        self.collisions.iter()
    }

    /// Whether any contact is on `side`
    pub fn has_side(&self, side: Side) -> bool {
        self.collisions.iter().any(|collision| collision.side == side)
    }
}

/// Classify the contact between two rectangles from `subject`'s perspective.
///
/// Returns `None` when no corner of either lies in the other and the subject
/// does not cross the candidate vertically.
pub fn classify(subject: &RectGeometry, candidate: &RectGeometry) -> Option<PairContact> {
    let mut corners = Corners::empty();
    let mut penetration: Option<Vec2> = None;

    for (index, corner) in subject.corners().into_iter().enumerate() {
        if !candidate.contains_extended(corner) {
            continue;
        }
        corners |= Corners::slot(index);

        let top = index < 2;
        let right = index % 2 == 1;
        let depth = Vec2::new(
            if right { corner.x - candidate.min.x } else { candidate.max.x - corner.x },
            if top { candidate.max.y - corner.y } else { corner.y - candidate.min.y },
        );
        penetration = Some(penetration.map_or(depth, |p| p.inf(&depth)));
    }

    for (index, corner) in candidate.corners().into_iter().enumerate() {
        if subject.contains(corner) {
            corners |= Corners::slot(3 - index);
        }
    }

    let side = if corners.is_empty() {
        if !subject.crosses_vertically(candidate) {
            return None;
        }
        vertical_side(subject, candidate)
    } else {
        match corners.edge_side() {
            Some(side) => side,
            None => match penetration {
                Some(p) if p.x < p.y => horizontal_side(subject, candidate),
                _ => vertical_side(subject, candidate),
            },
        }
    };

    Some(PairContact {
        side: facing_infinite(side, candidate),
        corners,
    })
}

fn horizontal_side(subject: &RectGeometry, candidate: &RectGeometry) -> Side {
    if subject.center().x > candidate.center().x {
        Side::Left
    } else {
        Side::Right
    }
}

fn vertical_side(subject: &RectGeometry, candidate: &RectGeometry) -> Side {
    if subject.center().y > candidate.center().y {
        Side::Up
    } else {
        Side::Down
    }
}

/// Flip a side that would push the subject out through an infinite edge
fn facing_infinite(side: Side, candidate: &RectGeometry) -> Side {
    match side {
        Side::Up if candidate.infinite_y == InfiniteEdge::Right => Side::Down,
        Side::Down if candidate.infinite_y == InfiniteEdge::Left => Side::Up,
        Side::Left if candidate.infinite_x == InfiniteEdge::Right => Side::Right,
        Side::Right if candidate.infinite_x == InfiniteEdge::Left => Side::Left,
        other => other,
    }
}

/// Whether the first two colliders present one continuous face to `side`
fn faces_aligned(side: Side, first: &RectGeometry, second: &RectGeometry, tolerance: f32) -> bool {
    let (a, b) = match side {
        Side::Up => (first.bottom(), second.bottom()),
        Side::Down => (first.top(), second.top()),
        Side::Left => (first.right(), second.right()),
        Side::Right => (first.left(), second.left()),
        Side::None => return false,
    };
    approx::abs_diff_eq!(a, b, epsilon = tolerance)
}

/// Redirect a per-collider side at an inner corner, given the global mask
/// with exactly one slot missing
fn inner_corner_side(global: Corners, side: Side) -> Side {
    let missing = Corners::all().difference(global);
    match side {
        Side::Down if missing == Corners::BOTTOM_RIGHT => Side::Left,
        Side::Right if missing == Corners::BOTTOM_RIGHT => Side::Up,
        Side::Down if missing == Corners::BOTTOM_LEFT => Side::Right,
        Side::Left if missing == Corners::BOTTOM_LEFT => Side::Up,
        Side::Left if missing == Corners::TOP_LEFT => Side::Down,
        Side::Up if missing == Corners::TOP_LEFT => Side::Right,
        Side::Right if missing == Corners::TOP_RIGHT => Side::Down,
        Side::Up if missing == Corners::TOP_RIGHT => Side::Left,
        other => other,
    }
}

impl CollisionWorld {
    /// Every rectangle the subject touches on its primary layer, each with
    /// its contact side, plus a global side settled from all of them.
    ///
    /// Non-rectangle subjects and candidates are ignored.
    pub fn advanced_check<'f>(&self, subject: ShapeHandle, filter: impl Into<QueryFilter<'f>>) -> ContactReport {
        let mut report = ContactReport::default();
        let Some(shape) = self.get(subject) else {
            log::warn!("advanced_check with stale handle {:?}", subject);
            return report;
        };
        let layer = shape.layer();
        let Some(subject_rect) = self.subject_geometry(subject).and_then(|g| g.as_rect().copied()) else {
            return report;
        };

        let filter = filter.into();
        let mut global = Corners::empty();
        let mut hit_rects = Vec::new();

        for (handle, candidate) in self.candidates(subject, layer, &filter) {
            let Some(rect) = candidate.rect() else { continue };
            let Some(contact) = classify(&subject_rect, &rect) else { continue };

            global |= contact.corners;
            report.collisions.push(Collision { collider: handle, side: contact.side });
            hit_rects.push(rect);
        }

        match global.count() {
            2 if report.collisions.len() >= 2 => {
                if let Some(side) = global.edge_side() {
                    let tolerance = self.config().edge_alignment_tolerance;
                    if faces_aligned(side, &hit_rects[0], &hit_rects[1], tolerance) {
                        report.side = side;
                    }
                }
            }
            3 => {
                for collision in &mut report.collisions {
                    collision.side = inner_corner_side(global, collision.side);
                }
            }
            _ => {}
        }

        log::trace!(
            "advanced_check {:?}: {} contact(s), corners {:?}, side {:?}",
            subject,
            report.len(),
            global,
            report.side
        );
        report
    }

    /// Contact side between two specific rectangles, whatever their layers
    pub fn advanced_check_with(&self, subject: ShapeHandle, other: ShapeHandle) -> Side {
        self.advanced_check_with_corners(subject, other).0
    }

    /// Contact side and corner mask between two specific rectangles
    ///
    /// Returns `(Side::None, Corners::empty())` when they do not touch,
    /// either is inactive or not a rectangle, or `subject == other`.
    pub fn advanced_check_with_corners(&self, subject: ShapeHandle, other: ShapeHandle) -> (Side, Corners) {
        let none = (Side::None, Corners::empty());
        if subject == other {
            return none;
        }
        let (Some(a), Some(b)) = (self.get(subject), self.get(other)) else {
            return none;
        };
        if !(a.active && b.active) {
            return none;
        }
        let (Some(a), Some(b)) = (a.rect(), b.rect()) else {
            return none;
        };

        classify(&a, &b).map_or(none, |contact| (contact.side, contact.corners))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> RectGeometry {
        RectGeometry::from_position_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_edge_pairs_map_to_sides() {
        let subject = rect(0.0, 0.0, 10.0, 10.0);

        let below = classify(&subject, &rect(0.0, 5.0, 10.0, 10.0)).unwrap();
        assert_eq!(below.corners, Corners::BOTTOM);
        assert_eq!(below.side, Side::Down);

        let above = classify(&subject, &rect(0.0, -5.0, 10.0, 10.0)).unwrap();
        assert_eq!(above.side, Side::Up);

        let left = classify(&subject, &rect(-5.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(left.corners, Corners::LEFT);
        assert_eq!(left.side, Side::Left);

        let right = classify(&subject, &rect(5.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(right.side, Side::Right);
    }

    #[test]
    fn test_touching_edges_still_classify() {
        let subject = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!subject.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));

        let beside = classify(&subject, &rect(10.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(beside.corners, Corners::RIGHT);
        assert_eq!(beside.side, Side::Right);

        // Half a tile under the subject, edges flush
        let under = classify(&subject, &rect(5.0, 10.0, 10.0, 10.0)).unwrap();
        assert_eq!(under.corners, Corners::BOTTOM_RIGHT);
        assert_eq!(under.side, Side::Down);

        assert!(classify(&subject, &rect(11.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn test_single_corner_uses_smaller_penetration() {
        let subject = rect(0.0, 0.0, 10.0, 10.0);

        // Shallow in y, deep in x: resting on a ledge
        let ledge = classify(&subject, &rect(6.0, 9.0, 20.0, 20.0)).unwrap();
        assert_eq!(ledge.corners.count(), 1);
        assert_eq!(ledge.side, Side::Down);

        // Shallow in x, deep in y: brushing a wall
        let wall = classify(&subject, &rect(9.0, 4.0, 20.0, 20.0)).unwrap();
        assert_eq!(wall.side, Side::Right);
    }

    #[test]
    fn test_tall_subject_crossing_thin_slab() {
        let pole = rect(10.0, 0.0, 5.0, 30.0);
        let slab = rect(0.0, 10.0, 30.0, 5.0);
        let contact = classify(&pole, &slab).unwrap();
        assert!(contact.corners.is_empty());
        assert_eq!(contact.side, Side::Up);

        // The slab sees no corners and does not cross the pole vertically
        assert!(classify(&slab, &pole).is_none());
    }

    #[test]
    fn test_infinite_edge_flips_side() {
        // Standing under a floor block that extends infinitely upward:
        // the subject must be pushed down, never up through the level edge
        let subject = rect(0.0, 8.0, 10.0, 10.0);
        let ceiling = rect(0.0, 0.0, 10.0, 10.0).with_infinite(InfiniteEdge::Center, InfiniteEdge::Left);
        assert_eq!(classify(&subject, &ceiling).unwrap().side, Side::Up);

        let floor_below = rect(0.0, 8.0, 10.0, 10.0).with_infinite(InfiniteEdge::Center, InfiniteEdge::Left);
        let above = rect(0.0, 0.0, 10.0, 10.0);
        // Subject above the block reads Down, which faces the infinite top edge
        assert_eq!(classify(&above, &floor_below).unwrap().side, Side::Up);

        let left_wall = rect(0.0, 0.0, 10.0, 10.0).with_infinite(InfiniteEdge::Left, InfiniteEdge::Center);
        let touching_from_left = rect(-5.0, 0.0, 10.0, 10.0);
        assert_eq!(classify(&touching_from_left, &left_wall).unwrap().side, Side::Left);
    }

    #[test]
    fn test_inner_corner_remap() {
        let global = Corners::TOP_LEFT | Corners::TOP_RIGHT | Corners::BOTTOM_LEFT;
        assert_eq!(inner_corner_side(global, Side::Down), Side::Left);
        assert_eq!(inner_corner_side(global, Side::Right), Side::Up);
        assert_eq!(inner_corner_side(global, Side::Left), Side::Left);

        let global = Corners::all().difference(Corners::TOP_RIGHT);
        assert_eq!(inner_corner_side(global, Side::Up), Side::Left);
        assert_eq!(inner_corner_side(global, Side::Right), Side::Down);
    }

    #[test]
    fn test_faces_aligned_uses_tolerance() {
        let a = rect(0.0, 10.0, 10.0, 10.0);
        let b = rect(10.0, 11.5, 10.0, 10.0);
        assert!(faces_aligned(Side::Down, &a, &b, 2.0));
        assert!(!faces_aligned(Side::Down, &a, &b, 1.0));
        assert!(!faces_aligned(Side::None, &a, &b, 100.0));
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Up.opposite(), Side::Down);
        assert_eq!(Side::None.opposite(), Side::None);
        assert!(Side::Left.is_horizontal());
        assert!(Side::Down.is_vertical());
        assert_eq!(Corners::slot(3), Corners::BOTTOM_RIGHT);
        assert_eq!(Corners::TOP.edge_side(), Some(Side::Up));
        assert_eq!((Corners::TOP_LEFT | Corners::BOTTOM_RIGHT).edge_side(), None);
    }
}

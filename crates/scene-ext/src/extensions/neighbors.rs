// extensions/neighbors.rs
//
// Nearest / farthest neighbor queries over anything with a position.
// Pure reads: candidates and their positions are never touched.
//
// Usage:
//   let target = find_nearest_global(&player, scene.iter());
//   let far = NeighborQuery::farthest().local().within(2.0, 50.0).run(&player, &enemies);
//   let closest = player.nearest(&pickups);

use glam::Vec3;
use crate::api::config::{QueryConfig, DEFAULT_MAX_DISTANCE, DEFAULT_MIN_DISTANCE};
use crate::api::types::Space;

/// Something placed in a scene that a neighbor query can read.
pub trait Spatial {
    /// Position in world space.
    fn global_position(&self) -> Vec3;

    /// Position relative to the parent.
    fn local_position(&self) -> Vec3;

    /// False once the object has been freed or queued for deletion.
    fn is_valid(&self) -> bool {
        true
    }

    /// Whether the object is currently attached to the scene tree.
    fn is_inside_tree(&self) -> bool;

    /// Identity check used to skip the query origin. Reference equality by default.
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }

    /// Position in the requested space.
    fn position_in(&self, space: Space) -> Vec3 {
        match space {
            Space::Global => self.global_position(),
            Space::Local => self.local_position(),
        }
    }
}

/// Which end of the distance ordering a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extremum {
    #[default]
    Nearest,
    Farthest,
}

impl Extremum {
    /// Whether `distance` strictly beats the current best.
    #[inline]
    fn improves(self, distance: f32, best: f32) -> bool {
        match self {
            Extremum::Nearest => distance < best,
            Extremum::Farthest => distance > best,
        }
    }
}

/// Inclusive distance bounds. `min <= max` is expected but not checked;
/// an inverted range simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub min: f32,
    pub max: f32,
}

impl DistanceRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min && distance <= self.max
    }
}

impl Default for DistanceRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DISTANCE, DEFAULT_MAX_DISTANCE)
    }
}

impl From<QueryConfig> for DistanceRange {
    fn from(config: QueryConfig) -> Self {
        Self::new(config.min_distance, config.max_distance)
    }
}

/// Whether `candidate` may be returned for a query around `origin`.
#[inline]
pub fn is_eligible<E: Spatial + ?Sized>(origin: &E, candidate: &E) -> bool {
    candidate.is_valid() && candidate.is_inside_tree() && !origin.is_same(candidate)
}

/// Find the nearest or farthest eligible candidate within `range`.
///
/// Single pass. The first eligible in-range candidate seeds the result; later
/// ones replace it only on a strict improvement, so ties go to the earlier one.
/// Returns `None` when nothing qualifies.
pub fn find_extremal<'a, E, I>(
    origin: &E,
    candidates: I,
    range: DistanceRange,
    mode: Extremum,
    space: Space,
) -> Option<&'a E>
where
    E: Spatial + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let from = origin.position_in(space);
    let mut best: Option<(&'a E, f32)> = None;

    for candidate in candidates {
        if !is_eligible(origin, candidate) {
            continue;
        }

        let distance = from.distance(candidate.position_in(space));
        if !range.contains(distance) {
            continue;
        }

        match best {
            Some((_, best_distance)) if !mode.improves(distance, best_distance) => {}
            _ => best = Some((candidate, distance)),
        }
    }

    if let Some((_, distance)) = best {
        log::trace!("{:?} neighbor ({:?}) at distance {}", mode, space, distance);
    }
    best.map(|(candidate, _)| candidate)
}

/// Nearest candidate by global position, default range.
pub fn find_nearest_global<'a, E, I>(origin: &E, candidates: I) -> Option<&'a E>
where
    E: Spatial + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    find_extremal(origin, candidates, DistanceRange::default(), Extremum::Nearest, Space::Global)
}

/// Farthest candidate by global position, default range.
pub fn find_farthest_global<'a, E, I>(origin: &E, candidates: I) -> Option<&'a E>
where
    E: Spatial + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    find_extremal(origin, candidates, DistanceRange::default(), Extremum::Farthest, Space::Global)
}

/// Nearest candidate by local position, default range.
pub fn find_nearest_local<'a, E, I>(origin: &E, candidates: I) -> Option<&'a E>
where
    E: Spatial + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    find_extremal(origin, candidates, DistanceRange::default(), Extremum::Nearest, Space::Local)
}

/// Farthest candidate by local position, default range.
pub fn find_farthest_local<'a, E, I>(origin: &E, candidates: I) -> Option<&'a E>
where
    E: Spatial + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    find_extremal(origin, candidates, DistanceRange::default(), Extremum::Farthest, Space::Local)
}

/// Reusable query settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeighborQuery {
    pub mode: Extremum,
    pub space: Space,
    pub range: DistanceRange,
}

impl NeighborQuery {
    pub fn nearest() -> Self {
        Self::default()
    }

    pub fn farthest() -> Self {
        Self {
            mode: Extremum::Farthest,
            ..Self::default()
        }
    }

    /// Start from configured range defaults.
    pub fn from_config(mode: Extremum, config: &QueryConfig) -> Self {
        Self {
            mode,
            space: Space::Global,
            range: (*config).into(),
        }
    }

    // -- Builder methods --

    pub fn global(mut self) -> Self {
        self.space = Space::Global;
        self
    }

    pub fn local(mut self) -> Self {
        self.space = Space::Local;
        self
    }

    pub fn within(mut self, min: f32, max: f32) -> Self {
        self.range = DistanceRange::new(min, max);
        self
    }

    pub fn run<'a, E, I>(&self, origin: &E, candidates: I) -> Option<&'a E>
    where
        E: Spatial + ?Sized + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        find_extremal(origin, candidates, self.range, self.mode, self.space)
    }
}

/// Query methods available on every [`Spatial`].
pub trait SpatialExt: Spatial {
    fn nearest<'a, I>(&self, candidates: I) -> Option<&'a Self>
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        find_nearest_global(self, candidates)
    }

    fn farthest<'a, I>(&self, candidates: I) -> Option<&'a Self>
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        find_farthest_global(self, candidates)
    }

    fn nearest_local<'a, I>(&self, candidates: I) -> Option<&'a Self>
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        find_nearest_local(self, candidates)
    }

    fn farthest_local<'a, I>(&self, candidates: I) -> Option<&'a Self>
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        find_farthest_local(self, candidates)
    }
}

impl<T: Spatial + ?Sized> SpatialExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal spatial point with reference identity.
    #[derive(Debug)]
    struct Marker {
        name: &'static str,
        global: Vec3,
        local: Vec3,
        valid: bool,
        attached: bool,
    }

    impl Marker {
        fn at(name: &'static str, x: f32, y: f32, z: f32) -> Self {
            Self {
                name,
                global: Vec3::new(x, y, z),
                local: Vec3::new(x, y, z),
                valid: true,
                attached: true,
            }
        }

        fn with_local(mut self, x: f32, y: f32, z: f32) -> Self {
            self.local = Vec3::new(x, y, z);
            self
        }
    }

    impl Spatial for Marker {
        fn global_position(&self) -> Vec3 {
            self.global
        }
        fn local_position(&self) -> Vec3 {
            self.local
        }
        fn is_valid(&self) -> bool {
            self.valid
        }
        fn is_inside_tree(&self) -> bool {
            self.attached
        }
    }

    fn name_of(found: Option<&Marker>) -> Option<&'static str> {
        found.map(|m| m.name)
    }

    #[test]
    fn nearest_and_farthest_respect_min_distance() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [
            Marker::at("a", 1.0, 0.0, 0.0),
            Marker::at("b", 2.0, 0.0, 0.0),
            Marker::at("c", -0.5, 0.0, 0.0),
        ];
        let range = DistanceRange::new(0.6, 9999.0);

        let nearest = find_extremal(&origin, &candidates, range, Extremum::Nearest, Space::Global);
        let farthest = find_extremal(&origin, &candidates, range, Extremum::Farthest, Space::Global);

        assert_eq!(name_of(nearest), Some("a"));
        assert_eq!(name_of(farthest), Some("b"));
    }

    #[test]
    fn origin_is_skipped_when_in_candidates() {
        let markers = [
            Marker::at("origin", 0.0, 0.0, 0.0),
            Marker::at("a", 3.0, 0.0, 0.0),
        ];
        let origin = &markers[0];
        assert_eq!(name_of(find_nearest_global(origin, &markers)), Some("a"));
    }

    #[test]
    fn out_of_range_candidates_are_never_returned() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [
            Marker::at("too_close", 0.5, 0.0, 0.0),
            Marker::at("too_far", 20.0, 0.0, 0.0),
        ];
        let query = NeighborQuery::nearest().within(1.0, 10.0);
        assert!(query.run(&origin, &candidates).is_none());
        assert!(NeighborQuery::farthest().within(1.0, 10.0).run(&origin, &candidates).is_none());
    }

    #[test]
    fn bounds_are_inclusive() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [Marker::at("edge", 0.0, 5.0, 0.0)];
        let found = NeighborQuery::nearest().within(5.0, 5.0).run(&origin, &candidates);
        assert_eq!(name_of(found), Some("edge"));
    }

    #[test]
    fn empty_or_ineligible_candidates_give_none() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let none: [Marker; 0] = [];
        assert!(find_nearest_global(&origin, &none).is_none());

        let mut freed = Marker::at("freed", 1.0, 0.0, 0.0);
        freed.valid = false;
        let mut detached = Marker::at("detached", 2.0, 0.0, 0.0);
        detached.attached = false;
        let candidates = [freed, detached];

        assert!(find_nearest_global(&origin, &candidates).is_none());
        assert!(find_farthest_global(&origin, &candidates).is_none());
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [
            Marker::at("first", 2.0, 0.0, 0.0),
            Marker::at("second", 0.0, 2.0, 0.0),
            Marker::at("third", 0.0, 0.0, -2.0),
        ];
        assert_eq!(name_of(find_nearest_global(&origin, &candidates)), Some("first"));
        assert_eq!(name_of(find_farthest_global(&origin, &candidates)), Some("first"));
    }

    #[test]
    fn results_are_extremal_among_eligible() {
        let origin = Marker::at("origin", 1.0, 1.0, 1.0);
        let candidates = [
            Marker::at("p0", 4.0, 1.0, 1.0),
            Marker::at("p1", 1.0, -2.0, 5.0),
            Marker::at("p2", 0.0, 1.5, 1.0),
            Marker::at("p3", 9.0, 9.0, 9.0),
            Marker::at("p4", 1.2, 1.0, 0.7),
        ];
        let dist = |m: &Marker| origin.global.distance(m.global);

        let nearest = find_nearest_global(&origin, &candidates).unwrap();
        let farthest = find_farthest_global(&origin, &candidates).unwrap();
        for candidate in &candidates {
            assert!(dist(nearest) <= dist(candidate));
            assert!(dist(farthest) >= dist(candidate));
        }
        assert_eq!(nearest.name, "p4");
        assert_eq!(farthest.name, "p3");
    }

    #[test]
    fn local_variant_reads_local_positions() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [
            Marker::at("globally_near", 1.0, 0.0, 0.0).with_local(8.0, 0.0, 0.0),
            Marker::at("locally_near", 6.0, 0.0, 0.0).with_local(2.0, 0.0, 0.0),
        ];
        assert_eq!(name_of(find_nearest_global(&origin, &candidates)), Some("globally_near"));
        assert_eq!(name_of(find_nearest_local(&origin, &candidates)), Some("locally_near"));
        assert_eq!(name_of(find_farthest_local(&origin, &candidates)), Some("globally_near"));
    }

    #[test]
    fn extension_methods_match_free_functions() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [
            Marker::at("a", 1.0, 0.0, 0.0),
            Marker::at("b", 5.0, 0.0, 0.0),
        ];
        assert_eq!(name_of(origin.nearest(&candidates)), Some("a"));
        assert_eq!(name_of(origin.farthest(&candidates)), Some("b"));
        assert_eq!(name_of(origin.nearest_local(&candidates)), Some("a"));
        assert_eq!(name_of(origin.farthest_local(&candidates)), Some("b"));
    }

    #[test]
    fn config_range_feeds_query() {
        let config = QueryConfig { min_distance: 0.0, max_distance: 3.0 };
        let query = NeighborQuery::from_config(Extremum::Farthest, &config);
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [
            Marker::at("a", 1.0, 0.0, 0.0),
            Marker::at("b", 2.5, 0.0, 0.0),
            Marker::at("c", 4.0, 0.0, 0.0),
        ];
        assert_eq!(name_of(query.run(&origin, &candidates)), Some("b"));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let origin = Marker::at("origin", 0.0, 0.0, 0.0);
        let candidates = [Marker::at("a", 1.0, 0.0, 0.0)];
        assert!(NeighborQuery::nearest().within(5.0, 1.0).run(&origin, &candidates).is_none());
    }
}

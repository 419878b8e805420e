//! Entity identifiers and the free-identifier pool that allocates them.
//!
//! An [`Entity`] is nothing more than a positive integer handle: the ECS does not
//! attach a generation to it the way many archetype-based engines do. Reuse safety
//! is instead the caller's responsibility (mirrored by every other ECS operation in
//! this crate never panicking on a stale id - lookups simply report "not present").
//!
//! Two values are reserved and never handed out by [`IdPool`]:
//! - [`Entity::NULL`] (`-1`), a sentinel the caller may use for "no entity".
//! - [`Entity::SINGLETON`] (`-2`), the entity that hosts globally-unique components.

use std::fmt;

/// An entity identifier.
///
/// Backed by an `i32` so that the reserved sentinel values `-1` and `-2` can be
/// represented alongside ordinary positive ids. [`IdPool`] never issues `0`, `-1`
/// or `-2`, so `0 < id` is a sufficient liveness precondition for ids it allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(i32);

impl Entity {
    /// Sentinel meaning "no entity". Never stored in any world.
    pub const NULL: Entity = Entity(-1);

    /// The singleton entity that hosts globally-unique components.
    pub const SINGLETON: Entity = Entity(-2);

    /// Wrap a raw id. Only meant for ids returned by [`IdPool::reserve`] or the two
    /// reserved sentinels; constructing arbitrary values is allowed but the result
    /// is meaningless to a [`crate::world::World`] that never allocated it.
    #[inline]
    pub const fn from_raw(id: i32) -> Self {
        Self(id)
    }

    /// The raw underlying id.
    #[inline]
    pub const fn raw(&self) -> i32 {
        self.0
    }

    /// Index this entity would use into a `Vec`-backed structure.
    ///
    /// [`IdPool`] never issues `0`, so ordinary entities (`raw() > 0`) map to
    /// their raw id unchanged. [`Entity::SINGLETON`] is remapped to slot `0`
    /// instead of its raw (negative) value, so that the same per-type
    /// [`crate::component::Storage`]/[`crate::sparse_set::SparseSet`] used for
    /// ordinary entities can also hold singleton components, in range and
    /// without colliding with any id an `IdPool` can hand out.
    /// [`Entity::NULL`] is never stored and has no meaningful index.
    #[inline]
    pub fn index(&self) -> usize {
        if *self == Self::SINGLETON { 0 } else { self.0 as usize }
    }

    #[inline]
    pub(crate) const fn is_reserved(&self) -> bool {
        self.0 == Self::NULL.0 || self.0 == Self::SINGLETON.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Entity::NULL {
            write!(f, "Entity(NULL)")
        } else if *self == Entity::SINGLETON {
            write!(f, "Entity(SINGLETON)")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}

/// A half-open interval `[left, right)` of currently-free ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    left: i32,
    right: i32,
}

impl Interval {
    #[inline]
    const fn len(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    const fn is_empty(&self) -> bool {
        self.left >= self.right
    }

    #[inline]
    const fn contains(&self, id: i32) -> bool {
        self.left <= id && id < self.right
    }
}

/// A free-identifier allocator over the positive integers.
///
/// Maintains a sorted list of free `[left, right)` intervals. `reserve` always
/// returns the smallest free id; `release` returns an id to the pool, splitting
/// whichever interval it would have belonged to.
///
/// # Design note
///
/// This is deliberately *not* generation-based: two different live entities
/// never share a raw id at the same time, but the same raw id may be reissued
/// after release without any way to distinguish the old holder from the new one.
/// That tracking, if ever needed, belongs to the caller (see [`crate::world::World`],
/// which never reads a stale id because it only ever sees ids it currently holds live).
#[derive(Debug, Clone)]
pub struct IdPool {
    /// Free intervals, kept sorted by `left` and non-overlapping.
    free: Vec<Interval>,
    /// Exclusive upper bound on issuable ids.
    max: i32,
}

impl IdPool {
    /// Default upper bound: every entity id ultimately indexes into a
    /// [`crate::sparse_set::SparseSet`]-backed [`crate::component::Storage`], so the
    /// pool is capped at the same [`crate::sparse_set::MAX_CAPACITY`] those sets enforce.
    pub const DEFAULT_MAX: i32 = crate::sparse_set::MAX_CAPACITY as i32;

    /// Construct a pool with the default upper bound, starting from id `1`.
    #[inline]
    pub fn new() -> Self {
        Self::with_max(Self::DEFAULT_MAX)
    }

    /// Construct a pool whose issuable ids lie in `[1, max)`.
    ///
    /// # Panics
    /// Panics in debug builds if `max <= 1` (there would be nothing to allocate).
    pub fn with_max(max: i32) -> Self {
        debug_assert!(max > 1, "IdPool max must leave room for at least one id");
        Self {
            free: vec![Interval { left: 1, right: max }],
            max,
        }
    }

    /// Reserve the smallest free id.
    ///
    /// Returns `0` (a value this pool never otherwise issues) if the pool is
    /// exhausted - i.e. `max - 1` ids are already outstanding.
    pub fn reserve(&mut self) -> i32 {
        let Some(first) = self.free.first_mut() else {
            return 0;
        };
        let id = first.left;
        first.left += 1;
        if first.is_empty() {
            self.free.remove(0);
        }
        id
    }

    /// Return `id` to the pool, making it available for a future [`reserve`](Self::reserve).
    ///
    /// Releasing an id that is already free is tolerated: the interval list is
    /// simply re-split and re-sorted, which is a no-op for ids already marked free.
    /// Releasing an id outside `[1, max)` is also a no-op - callers should only
    /// release ids they previously reserved from this same pool, but a reserved
    /// sentinel or out-of-range value passed in by mistake cannot corrupt the
    /// free list or be handed back out by a later [`reserve`](Self::reserve).
    pub fn release(&mut self, id: i32) {
        if id <= 0 || id >= self.max {
            return;
        }

        // Find the interval id would fall into if it were still allocated, i.e.
        // the gap between two free intervals (or before the first / after the last).
        let pos = self
            .free
            .iter()
            .position(|iv| iv.left > id)
            .unwrap_or(self.free.len());

        let left_bound = if pos == 0 { i32::MIN } else { self.free[pos - 1].right };
        let right_bound = if pos == self.free.len() { self.max } else { self.free[pos].left };

        if left_bound <= id && id < right_bound && !(left_bound..right_bound).is_empty() {
            // id sits inside an already-allocated gap; split it out as its own interval.
            let mut new_intervals = Vec::with_capacity(2);
            if left_bound < id {
                new_intervals.push(Interval { left: left_bound, right: id });
            }
            new_intervals.push(Interval { left: id, right: id + 1 });
            if id + 1 < right_bound {
                new_intervals.push(Interval { left: id + 1, right: right_bound });
            }
            self.free.splice(pos..pos, new_intervals);
        }

        self.merge_adjacent();
    }

    /// Merge neighbouring intervals that have become contiguous after a release.
    fn merge_adjacent(&mut self) {
        self.free.sort_by_key(|iv| iv.left);
        let mut merged: Vec<Interval> = Vec::with_capacity(self.free.len());
        for iv in self.free.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.right >= iv.left {
                    last.right = last.right.max(iv.right);
                    continue;
                }
            }
            merged.push(iv);
        }
        self.free = merged;
    }

    /// Total count of ids currently available for reservation.
    pub fn free_count(&self) -> i64 {
        self.free.iter().map(|iv| iv.len() as i64).sum()
    }

    /// Mark `id` as taken without having gone through [`reserve`](Self::reserve) -
    /// used by [`crate::world::World::insert`] when the caller supplies its own
    /// entity id, so a later `reserve` never hands out the same value. A no-op
    /// if `id` is already outside the free list (already occupied, or out of
    /// `[1, max)`).
    pub fn occupy(&mut self, id: i32) {
        if id <= 0 || id >= self.max {
            return;
        }
        let Some(i) = self.free.iter().position(|iv| iv.contains(id)) else {
            return;
        };
        let iv = self.free.remove(i);
        let mut pos = i;
        if iv.left < id {
            self.free.insert(pos, Interval { left: iv.left, right: id });
            pos += 1;
        }
        if id + 1 < iv.right {
            self.free.insert(pos, Interval { left: id + 1, right: iv.right });
        }
    }
}

impl Default for IdPool {
    fn default() -> Self {
        Self::new()
    }
}

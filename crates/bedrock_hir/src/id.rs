//! Generic, pointerless id types indexing into the HIR's node tables.
//!
//! Every concrete id ([`ScopeId`], [`DefId`], ...) is `Id<Marker>` for a
//! zero-sized marker type, so distinct id kinds cannot be confused at the
//! type level even though they all compile down to a `u32`. `0` is reserved
//! as "no id" throughout, matching the convention `bedrock_base::FileId`
//! already uses.

use std::marker::PhantomData;

const NONE: u32 = 0;

pub struct Id<T> {
    value: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: u32) -> Self {
        Id { value, _marker: PhantomData }
    }

    pub fn val(self) -> u32 {
        self.value
    }

    pub fn is_none(self) -> bool {
        self.value == NONE
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}
impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<T> Eq for Id<T> {}
impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

/// An optional id, reusing `0` as the "absent" sentinel so `OptId<T>` costs
/// nothing more than a bare `Id<T>`.
pub struct OptId<T>(Id<T>);

impl<T> OptId<T> {
    pub fn none() -> Self {
        OptId(Id::new(NONE))
    }

    pub fn some(id: Id<T>) -> Self {
        OptId(id)
    }

    pub fn has_value(self) -> bool {
        !self.0.is_none()
    }

    pub fn as_id(self) -> Option<Id<T>> {
        if self.has_value() {
            Some(self.0)
        } else {
            None
        }
    }
}

impl<T> Clone for OptId<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for OptId<T> {}

impl<T> From<Option<Id<T>>> for OptId<T> {
    fn from(value: Option<Id<T>>) -> Self {
        match value {
            Some(id) => OptId::some(id),
            None => OptId::none(),
        }
    }
}

/// A contiguous run of ids of the same kind, for node tables that were
/// appended in a single batch (a scope's members, a file's importees).
pub struct IdSlice<T> {
    first: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> IdSlice<T> {
    pub fn new(first: Id<T>, len: u32) -> Self {
        IdSlice { first: first.val(), len, _marker: PhantomData }
    }

    pub fn empty() -> Self {
        IdSlice { first: NONE, len: 0, _marker: PhantomData }
    }

    pub fn len(self) -> u32 {
        self.len
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    pub fn get(self, i: u32) -> Id<T> {
        Id::new(self.first + i)
    }

    pub fn iter(self) -> impl Iterator<Item = Id<T>> {
        (0..self.len).map(move |i| Id::new(self.first + i))
    }
}

impl<T> Clone for IdSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for IdSlice<T> {}

pub struct ScopeMarker;
pub struct ScopeAnonMarker;
pub struct DefMarker;
pub struct DiagnosticMarker;

pub type ScopeId = Id<ScopeMarker>;
pub type ScopeAnonId = Id<ScopeAnonMarker>;
pub type DefId = Id<DefMarker>;
pub type DiagnosticId = Id<DiagnosticMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_sentinel_round_trips() {
        let absent: OptId<DefMarker> = OptId::none();
        assert!(!absent.has_value());
        assert_eq!(absent.as_id(), None);
    }

    #[test]
    fn id_slice_iterates_contiguous_range() {
        let first: Id<DefMarker> = Id::new(5);
        let slice = IdSlice::new(first, 3);
        let ids: Vec<u32> = slice.iter().map(Id::val).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn distinct_marker_types_are_distinct_at_the_type_level() {
        let def_id: DefId = Id::new(1);
        let scope_id: ScopeId = Id::new(1);
        assert_eq!(def_id.val(), scope_id.val());
    }
}

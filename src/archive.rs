//! Paginated, identity-scoped archives and the accessors over them.
//!
//! An archive is addressed by the name of the sub-state it lives in and
//! a resolved [`ArchiveId`].  The [`ArchiveAccessor`] trait is the read
//! side that [`ArchiveLoader`](crate::loader::ArchiveLoader) relies on,
//! while [`ArchiveHandler`] adds the command factories it dispatches
//! from.  Both are normally supplied by the surrounding data layer;
//! [`ArchiveState`] together with [`ArchiveStateHandler`] is a complete
//! reference implementation of that layer.

use std::{collections::HashMap, fmt, marker::PhantomData};

use serde::{Deserialize, Serialize};

/// The resolved identifier of an archive within its sub-state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ArchiveId(String);

impl ArchiveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArchiveId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ArchiveId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ArchiveId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// The full key of an archive: sub-state name plus resolved identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArchiveKey {
    pub substate: &'static str,
    pub id: ArchiveId,
}

impl fmt::Display for ArchiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.substate, self.id)
    }
}

/// Selects a sub-state out of the full store snapshot.
///
/// The name is what distinguishes two archives with the same resolved
/// identifier living in different sub-states.
pub struct Substate<St, S> {
    name: &'static str,
    select: fn(&St) -> &S,
}

impl<St, S> Substate<St, S> {
    pub fn new(name: &'static str, select: fn(&St) -> &S) -> Self {
        Self { name, select }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn select<'s>(&self, state: &'s St) -> &'s S {
        (self.select)(state)
    }
}

impl<St, S> Clone for Substate<St, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<St, S> Copy for Substate<St, S> {}

impl<St, S> fmt::Debug for Substate<St, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Substate").field("name", &self.name).finish()
    }
}

/// Pure reads over a sub-state snapshot.
///
/// Implementations must answer consistently for the same key within one
/// snapshot.
pub trait ArchiveAccessor {
    type Substate;
    type Item;

    /// The items of the archive in page order, empty if the key is
    /// unknown.
    fn get_archive<'s>(&self, substate: &'s Self::Substate, id: &ArchiveId) -> &'s [Self::Item];

    fn is_archive_loading(&self, substate: &Self::Substate, id: &ArchiveId) -> bool;

    fn has_more(&self, substate: &Self::Substate, id: &ArchiveId) -> bool;

    fn is_loading_more(&self, substate: &Self::Substate, id: &ArchiveId) -> bool;
}

/// An [`ArchiveAccessor`] that also knows how to build the commands
/// loading the archives it reads.
pub trait ArchiveHandler: ArchiveAccessor {
    type Command;

    fn fetch_archive(&self, id: &ArchiveId) -> Self::Command;

    fn fetch_more(&self, substate: &'static str, id: &ArchiveId, page: u32) -> Self::Command;
}

/// A single archive.
#[derive(Clone, Debug, PartialEq)]
pub struct Archive<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub has_more: bool,
    pub loading_more: bool,
    /// The last page received, zero before the first one arrives.
    pub page: u32,
}

impl<T> Default for Archive<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            has_more: false,
            loading_more: false,
            page: 0,
        }
    }
}

/// Reference sub-state holding every archive of one kind of item.
///
/// Archives are created lazily on the first reducer call touching their
/// key and are never removed.  Every failure clears the in-flight flag
/// it belongs to, so a failed fetch never leaves an archive stuck.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveState<T> {
    archives: HashMap<ArchiveId, Archive<T>>,
}

impl<T> Default for ArchiveState<T> {
    fn default() -> Self {
        Self {
            archives: HashMap::new(),
        }
    }
}

impl<T> ArchiveState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ArchiveId) -> Option<&Archive<T>> {
        self.archives.get(id)
    }

    fn entry(&mut self, id: &ArchiveId) -> &mut Archive<T> {
        self.archives.entry(id.clone()).or_default()
    }

    /// A first-page fetch has been dispatched.
    pub fn begin_fetch(&mut self, id: &ArchiveId) {
        self.entry(id).loading = true;
    }

    /// A subsequent-page fetch has been dispatched.
    pub fn begin_fetch_more(&mut self, id: &ArchiveId) {
        self.entry(id).loading_more = true;
    }

    /// Page `page` arrived.  Page 1 replaces the items, later pages are
    /// appended in order.
    pub fn receive_page(&mut self, id: &ArchiveId, page: u32, items: Vec<T>, has_more: bool) {
        let archive = self.entry(id);
        if page <= 1 {
            archive.items = items;
        } else {
            archive.items.extend(items);
        }
        archive.page = page;
        archive.has_more = has_more;
        archive.loading = false;
        archive.loading_more = false;
    }

    /// A fetch for this archive failed.
    pub fn fail(&mut self, id: &ArchiveId) {
        let archive = self.entry(id);
        archive.loading = false;
        archive.loading_more = false;
    }
}

/// Commands produced by [`ArchiveStateHandler`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArchiveCommand {
    Fetch {
        id: ArchiveId,
    },
    FetchMore {
        substate: String,
        id: ArchiveId,
        page: u32,
    },
}

/// The handler reading [`ArchiveState`] and producing [`ArchiveCommand`].
pub struct ArchiveStateHandler<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> ArchiveStateHandler<T> {
    pub fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> Default for ArchiveStateHandler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ArchiveStateHandler<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArchiveStateHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveStateHandler").finish()
    }
}

impl<T> ArchiveAccessor for ArchiveStateHandler<T> {
    type Substate = ArchiveState<T>;
    type Item = T;

    fn get_archive<'s>(&self, substate: &'s ArchiveState<T>, id: &ArchiveId) -> &'s [T] {
        substate
            .get(id)
            .map(|archive| archive.items.as_slice())
            .unwrap_or_default()
    }

    fn is_archive_loading(&self, substate: &ArchiveState<T>, id: &ArchiveId) -> bool {
        substate.get(id).is_some_and(|archive| archive.loading)
    }

    fn has_more(&self, substate: &ArchiveState<T>, id: &ArchiveId) -> bool {
        substate.get(id).is_some_and(|archive| archive.has_more)
    }

    fn is_loading_more(&self, substate: &ArchiveState<T>, id: &ArchiveId) -> bool {
        substate.get(id).is_some_and(|archive| archive.loading_more)
    }
}

impl<T> ArchiveHandler for ArchiveStateHandler<T> {
    type Command = ArchiveCommand;

    fn fetch_archive(&self, id: &ArchiveId) -> ArchiveCommand {
        ArchiveCommand::Fetch { id: id.clone() }
    }

    fn fetch_more(&self, substate: &'static str, id: &ArchiveId, page: u32) -> ArchiveCommand {
        ArchiveCommand::FetchMore {
            substate: substate.to_string(),
            id: id.clone(),
            page,
        }
    }
}

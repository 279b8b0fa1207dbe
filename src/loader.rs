//! Attaches paginated archive loading to a view.
//!
//! An [`ArchiveLoader`] is built once per kind of view from a handler,
//! a [`Substate`] selector and an [`Identifier`].  On every committed
//! render the host calls [`ArchiveLoader::reconcile`] with the props of
//! the previous commit (if any) and the current ones; the commands it
//! returns are to be dispatched to the store.  The props handed to the
//! wrapped view are derived through [`ArchiveLoader::view`].
//!
//! The identifier is resolved afresh on each of these calls, so the
//! archive consulted always matches the current props.  Items are never
//! read for any other key, which means a view that switched identifier
//! while the fetch for the old one is still in flight shows the (likely
//! empty, loading) archive of the new identifier rather than stale items.

use crate::{
    archive::{ArchiveHandler, ArchiveId, ArchiveKey, Substate},
    identifier::Identifier,
};

pub struct ArchiveLoader<St, P, H>
where
    H: ArchiveHandler,
{
    handler: H,
    substate: Substate<St, H::Substate>,
    id: Identifier<P>,
}

/// The props derived for the wrapped view from one state snapshot.
pub struct ArchiveView<'a, H>
where
    H: ArchiveHandler,
{
    handler: &'a H,
    substate: &'static str,
    id: Option<ArchiveId>,
    pub posts: &'a [H::Item],
    pub loading: bool,
    pub has_more: bool,
    pub loading_more: bool,
}

impl<St, P, H> ArchiveLoader<St, P, H>
where
    H: ArchiveHandler,
{
    pub fn new(handler: H, substate: Substate<St, H::Substate>, id: impl Into<Identifier<P>>) -> Self {
        Self {
            handler,
            substate,
            id: id.into(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn substate(&self) -> &Substate<St, H::Substate> {
        &self.substate
    }

    pub fn resolve(&self, props: &P) -> Option<ArchiveId> {
        self.id.resolve(props)
    }

    /// Derive the view props for `props` out of the `state` snapshot.
    pub fn view<'a>(&'a self, state: &'a St, props: &P) -> ArchiveView<'a, H> {
        let substate = self.substate.select(state);
        let id = self.resolve(props);
        let (posts, loading, has_more, loading_more): (&[H::Item], _, _, _) = match &id {
            Some(id) => (
                self.handler.get_archive(substate, id),
                self.handler.is_archive_loading(substate, id),
                self.handler.has_more(substate, id),
                self.handler.is_loading_more(substate, id),
            ),
            None => (&[], false, false, false),
        };
        ArchiveView {
            handler: &self.handler,
            substate: self.substate.name(),
            id,
            posts,
            loading,
            has_more,
            loading_more,
        }
    }

    /// Returns the commands to dispatch after a commit.
    ///
    /// A load is requested when the view is freshly mounted (no
    /// `previous` props), or when the resolved identifier differs from
    /// the one resolved for `previous`, and only if the archive for the
    /// current key has no items and no load in flight.
    pub fn reconcile(&self, state: &St, previous: Option<&P>, current: &P) -> Vec<H::Command> {
        let view = self.view(state, current);
        let Some(id) = view.id() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                substate = self.substate.name(),
                "archive identifier unresolved, not loading"
            );
            return Vec::new();
        };
        if let Some(previous) = previous {
            if self.resolve(previous).as_ref() == Some(id) {
                return Vec::new();
            }
        }
        if !view.posts.is_empty() || view.loading {
            return Vec::new();
        }
        #[cfg(feature = "tracing")]
        if let Some(key) = view.key() {
            tracing::debug!(%key, "dispatching archive fetch");
        }
        view.on_load().into_iter().collect()
    }
}

impl<'a, H> ArchiveView<'a, H>
where
    H: ArchiveHandler,
{
    /// The identifier these props were derived for.
    pub fn id(&self) -> Option<&ArchiveId> {
        self.id.as_ref()
    }

    pub fn key(&self) -> Option<ArchiveKey> {
        self.id.as_ref().map(|id| ArchiveKey {
            substate: self.substate,
            id: id.clone(),
        })
    }

    /// The command loading the first page, if the identifier resolved.
    pub fn on_load(&self) -> Option<H::Command> {
        self.id.as_ref().map(|id| self.handler.fetch_archive(id))
    }

    /// The command loading `page`, if the identifier resolved.
    pub fn on_load_more(&self, page: u32) -> Option<H::Command> {
        self.id
            .as_ref()
            .map(|id| self.handler.fetch_more(self.substate, id, page))
    }
}

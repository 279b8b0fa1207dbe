use std::{fmt, sync::Arc};

use crate::archive::ArchiveId;

/// How the archive identifier for a view is obtained.
///
/// Either a fixed value, or derived from the props the view receives so
/// that one loader may serve many logical resources.  A derived
/// identifier may legitimately be unresolved (`None`) for some props.
pub enum Identifier<P> {
    Constant(ArchiveId),
    Derived(Arc<dyn Fn(&P) -> Option<ArchiveId> + Send + Sync>),
}

impl<P> Identifier<P> {
    pub fn constant(id: impl Into<ArchiveId>) -> Self {
        Self::Constant(id.into())
    }

    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&P) -> Option<ArchiveId> + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }

    /// Resolve against the latest props.
    pub fn resolve(&self, props: &P) -> Option<ArchiveId> {
        match self {
            Self::Constant(id) => Some(id.clone()),
            Self::Derived(f) => f(props),
        }
    }
}

impl<P> Clone for Identifier<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(id) => Self::Constant(id.clone()),
            Self::Derived(f) => Self::Derived(f.clone()),
        }
    }
}

impl<P> fmt::Debug for Identifier<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(id) => f.debug_tuple("Constant").field(id).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl<P> From<ArchiveId> for Identifier<P> {
    fn from(id: ArchiveId) -> Self {
        Self::Constant(id)
    }
}

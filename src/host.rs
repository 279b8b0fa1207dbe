//! Glue for the runtime hosting the views.
//!
//! Commands flow to the store through a [`Dispatcher`], the sending
//! half of an unbounded channel whose receiving half belongs to the
//! store.  The hosts remember the props of the previous commit so that
//! reconciliation can be driven by simply calling `commit` after every
//! render.

use std::fmt;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::{
    app::MediaId,
    archive::ArchiveHandler,
    editable::{gate, AppCommand, AppDetailsProps, EditState, EditableCoordinator, SubView, ViewGate},
    error::UploadError,
    loader::{ArchiveLoader, ArchiveView},
    upload::{IconUploader, MediaCommands, UploadFile},
};

/// The command-dispatch channel into the store.
pub struct Dispatcher<C> {
    sender: UnboundedSender<C>,
}

impl<C> Dispatcher<C> {
    pub fn channel() -> (Self, UnboundedReceiver<C>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Enqueue `command`.  Returns whether the store is still there to
    /// receive it; a store that went away makes this a no-op.
    pub fn dispatch(&self, command: C) -> bool {
        match self.sender.send(command) {
            Ok(()) => true,
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("store is gone, command dropped");
                false
            }
        }
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = C>) {
        for command in commands {
            if !self.dispatch(command) {
                break;
            }
        }
    }
}

impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// Hosts one view enhanced by an [`ArchiveLoader`].
pub struct ArchiveHost<St, P, H>
where
    H: ArchiveHandler,
{
    loader: ArchiveLoader<St, P, H>,
    dispatcher: Dispatcher<H::Command>,
    previous: Option<P>,
}

impl<St, P, H> ArchiveHost<St, P, H>
where
    P: Clone,
    H: ArchiveHandler,
{
    pub fn new(loader: ArchiveLoader<St, P, H>, dispatcher: Dispatcher<H::Command>) -> Self {
        Self {
            loader,
            dispatcher,
            previous: None,
        }
    }

    /// Reconcile after a render with `props` against `state` and
    /// dispatch the resulting commands.
    pub fn commit(&mut self, state: &St, props: &P) {
        let commands = self
            .loader
            .reconcile(state, self.previous.as_ref(), props);
        self.dispatcher.dispatch_all(commands);
        self.previous = Some(props.clone());
    }

    pub fn view<'a>(&'a self, state: &'a St, props: &P) -> ArchiveView<'a, H> {
        self.loader.view(state, props)
    }

    /// Request `page` for the archive `props` currently resolve to.
    pub fn load_more(&self, state: &St, props: &P, page: u32) {
        if let Some(command) = self.loader.view(state, props).on_load_more(page) {
            self.dispatcher.dispatch(command);
        }
    }
}

/// Hosts one app details view: the editable coordinator plus the icon
/// upload workflow.
pub struct AppDetailsHost {
    coordinator: EditableCoordinator,
    uploader: IconUploader,
    dispatcher: Dispatcher<AppCommand>,
    previous: Option<AppDetailsProps>,
}

impl AppDetailsHost {
    pub fn new(dispatcher: Dispatcher<AppCommand>) -> Self {
        Self {
            coordinator: EditableCoordinator::new(),
            uploader: IconUploader::new(),
            dispatcher,
            previous: None,
        }
    }

    pub fn commit(&mut self, props: &AppDetailsProps) {
        let commands = self
            .coordinator
            .reconcile(self.previous.as_ref(), props);
        self.dispatcher.dispatch_all(commands);
        self.previous = Some(props.clone());
    }

    pub fn state(&self, props: &AppDetailsProps) -> EditState {
        self.coordinator.state(props)
    }

    pub fn gate(&self, props: &AppDetailsProps, view: SubView) -> ViewGate {
        gate(props, view)
    }

    pub fn uploader(&self) -> &IconUploader {
        &self.uploader
    }

    /// Replace the icon of the app in the last committed props.
    ///
    /// Only the app identifier is captured; the returned future does not
    /// borrow the host, so further commits can happen while it runs.
    pub fn on_upload_icon<'c, C>(
        &self,
        commands: &'c C,
        file: UploadFile,
    ) -> Option<impl std::future::Future<Output = Result<MediaId, UploadError>> + 'c>
    where
        C: MediaCommands + ?Sized,
    {
        let app = self.previous.as_ref()?.app.as_ref()?.id;
        let uploader = self.uploader.clone();
        Some(async move { uploader.on_upload_icon(commands, app, file).await })
    }
}

impl fmt::Debug for AppDetailsHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDetailsHost")
            .field("coordinator", &self.coordinator)
            .field("uploader", &self.uploader)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

//! Replacing an app's icon: upload the file, then point the app's
//! featured media at the upload.
//!
//! The busy state is a reactive signal, so a Leptos view can read it
//! directly:
//!
//! ```
//! use leptos::prelude::*;
//! use leptos_app_console::upload::IconUploader;
//!
//! let uploader = IconUploader::new();
//! let uploading = uploader.uploading_icon();
//! assert!(!uploading.get_untracked());
//! ```

use std::{fmt, future::Future};

use leptos::prelude::*;

use crate::{
    app::{AppId, AppUpdate, MediaId},
    error::{CommandError, UploadError},
};

/// A file picked by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// The commands the surrounding application provides for media.
///
/// The returned futures run on the UI event loop and need not be `Send`.
pub trait MediaCommands {
    /// Upload `file`, resolving to the identifier of the new media item.
    fn upload(&self, file: UploadFile) -> impl Future<Output = Result<MediaId, CommandError>>;

    /// Persist a partial update of an app.
    fn save(&self, update: AppUpdate) -> impl Future<Output = Result<(), CommandError>>;
}

/// Owns the `uploading` flag of one details view.
///
/// Concurrent uploads are not deduplicated; the flag clears as soon as
/// any of them settles.
#[derive(Clone)]
pub struct IconUploader {
    uploading: ArcRwSignal<bool>,
}

// Clears the flag however the chain ends, including the future being
// dropped before it settles.
struct Busy(ArcRwSignal<bool>);

impl Busy {
    fn start(signal: &ArcRwSignal<bool>) -> Self {
        signal.set(true);
        Self(signal.clone())
    }
}

impl Drop for Busy {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl IconUploader {
    pub fn new() -> Self {
        Self {
            uploading: ArcRwSignal::new(false),
        }
    }

    pub fn uploading_icon(&self) -> ArcReadSignal<bool> {
        self.uploading.read_only()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.get_untracked()
    }

    /// Upload `file` and make it the featured media of the app `app`.
    ///
    /// The save is only attempted once the upload succeeded, so on any
    /// error the app still references its previous media.  Nothing is
    /// retried.
    pub async fn on_upload_icon<C>(
        &self,
        commands: &C,
        app: AppId,
        file: UploadFile,
    ) -> Result<MediaId, UploadError>
    where
        C: MediaCommands + ?Sized,
    {
        let _busy = Busy::start(&self.uploading);

        let media = commands.upload(file).await.map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(%app, error = %e, "icon upload failed");
            UploadError::Upload(e)
        })?;

        commands
            .save(AppUpdate::new(app).featured_media(media.clone()))
            .await
            .map_err(|source| {
                #[cfg(feature = "tracing")]
                tracing::warn!(%app, %media, error = %source, "saving uploaded icon failed");
                UploadError::Save {
                    media: media.clone(),
                    source,
                }
            })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%app, %media, "icon replaced");
        Ok(media)
    }
}

impl Default for IconUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IconUploader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconUploader")
            .field("uploading", &self.is_uploading())
            .finish()
    }
}

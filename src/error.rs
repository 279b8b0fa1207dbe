use thiserror::Error;

use crate::app::MediaId;

/// Failure reported by an external collaborator while carrying out a
/// command on behalf of this crate, typically the REST transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("rejected by server ({code}): {message}")]
    Rejected { code: String, message: String },
}

/// Failure of the icon upload chain.
///
/// Either variant means the featured media of the app was left as it
/// was; a `Save` failure still carries the identifier of the media that
/// was uploaded but never attached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("upload failed: {0}")]
    Upload(#[source] CommandError),
    #[error("saving featured media {media} failed: {source}")]
    Save {
        media: MediaId,
        #[source]
        source: CommandError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown edit action: {0}")]
pub struct UnknownEditAction(pub String);

//! This crate provides the load orchestration core behind the app details
//! views of an application-directory admin console built with Leptos.
//! Rendering a single app and its settings, credentials, visibility and
//! display sub-views is straightforward; what is not is deciding, from a
//! shifting combination of loading flags, permissions and the shape of
//! the data at hand, whether and when a fetch has to be issued, while
//! never issuing the same fetch twice and never leaving a busy indicator
//! stuck after a failure.
//!
//! ## Architecture
//!
//! Views never reach for a global store.  They are handed a read-only
//! snapshot of the state plus a [`Dispatcher`](host::Dispatcher) to send
//! commands with, and every piece of orchestration logic is a plain
//! reconciliation function: given the props of the previous commit (or
//! `None` on mount) and the current props, it returns the commands to
//! dispatch.  The store processes those commands serially and the next
//! snapshot closes the loop.
//!
//! - [`loader`] attaches paginated loading of an [`archive`] to a view,
//!   addressing the archive through a [`Substate`](archive::Substate)
//!   selector and an [`Identifier`](identifier::Identifier) that may be
//!   derived from the view's props.
//! - [`editable`] decides when the editable representation of an
//!   [`App`](app::App) has to be fetched, and gates the edit sub-views
//!   while it is missing.
//! - [`upload`] replaces the icon of an app by uploading a file and then
//!   saving the new featured media, exposing one reactive busy flag.
//! - [`host`] remembers previous props and drives the above on commit.
//!
//! # Example
//!
//! A listing of the apps owned by a user, keyed by the user id found in
//! the props:
//!
//! ```
//! use leptos_app_console::{
//!     archive::{ArchiveCommand, ArchiveId, ArchiveState, ArchiveStateHandler, Substate},
//!     identifier::Identifier,
//!     loader::ArchiveLoader,
//! };
//!
//! struct State {
//!     apps: ArchiveState<String>,
//! }
//!
//! struct Props {
//!     user: u64,
//! }
//!
//! let loader = ArchiveLoader::new(
//!     ArchiveStateHandler::new(),
//!     Substate::new("apps", |state: &State| &state.apps),
//!     Identifier::derived(|props: &Props| Some(ArchiveId::from(props.user))),
//! );
//!
//! let mut state = State { apps: ArchiveState::new() };
//! let props = Props { user: 42 };
//!
//! // On mount nothing is loaded yet, so the first page is requested.
//! let commands = loader.reconcile(&state, None, &props);
//! assert_eq!(commands, vec![ArchiveCommand::Fetch { id: "42".into() }]);
//!
//! // The store reduces the command, and later receives the page.
//! state.apps.begin_fetch(&"42".into());
//! assert!(loader.view(&state, &props).loading);
//! state.apps.receive_page(&"42".into(), 1, vec!["jetpack".to_string()], true);
//!
//! let view = loader.view(&state, &props);
//! assert_eq!(view.posts, ["jetpack".to_string()]);
//! assert!(view.has_more);
//! assert_eq!(
//!     view.on_load_more(2),
//!     Some(ArchiveCommand::FetchMore {
//!         substate: "apps".to_string(),
//!         id: "42".into(),
//!         page: 2,
//!     }),
//! );
//! ```
//!
//! # Feature Flags
#![cfg_attr(
    feature = "document-features",
    cfg_attr(doc, doc = ::document_features::document_features!())
)]

pub mod app;
pub mod archive;
pub mod editable;
pub mod error;
pub mod host;
pub mod identifier;
pub mod loader;
pub mod upload;


pub use error::{CommandError, UploadError};

//! Decides when an app's editable representation has to be fetched.
//!
//! The read-only representation of an app lacks the raw content needed
//! by the edit forms.  [`needs_editable_fetch`] is the pure predicate
//! saying the editable representation is missing while an edit is being
//! asked for, and [`EditableCoordinator`] turns that predicate into at
//! most one [`AppCommand::LoadForEdit`] per eligibility window: the
//! command fires when the predicate becomes true, and can only fire
//! again after the predicate was observed false in between (the fetch
//! resolved, failed, or the edit was abandoned) or the app changed.
//!
//! The same predicate gates rendering of the edit sub-views through
//! [`gate`], so no form is ever shown against incomplete data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    app::{App, AppId},
    error::UnknownEditAction,
};

/// The edit a caller is asking for, usually derived from the route.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EditAction {
    EditSettings,
    Credentials,
    Display,
    Visibility,
}

impl EditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditSettings => "edit-settings",
            Self::Credentials => "credentials",
            Self::Display => "display",
            Self::Visibility => "visibility",
        }
    }

    pub fn sub_view(&self) -> SubView {
        match self {
            Self::EditSettings => SubView::AppSettings,
            Self::Credentials => SubView::Credentials,
            Self::Display => SubView::DisplaySettings,
            Self::Visibility => SubView::Visibility,
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditAction {
    type Err = UnknownEditAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit-settings" => Ok(Self::EditSettings),
            "credentials" => Ok(Self::Credentials),
            "display" => Ok(Self::Display),
            "visibility" => Ok(Self::Visibility),
            other => Err(UnknownEditAction(other.to_string())),
        }
    }
}

/// The sub-views of the app details view.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SubView {
    Main,
    Credentials,
    AppSettings,
    DisplaySettings,
    Visibility,
}

impl SubView {
    pub const ALL: [SubView; 5] = [
        SubView::Main,
        SubView::Credentials,
        SubView::AppSettings,
        SubView::DisplaySettings,
        SubView::Visibility,
    ];

    /// Whether this sub-view shows a form editing the app.
    pub fn requires_editable(&self) -> bool {
        !matches!(self, Self::Main)
    }
}

/// The sub-views offered in the navigation; only editors get anything
/// beyond the plain view.
pub fn sub_views(can_edit: bool) -> &'static [SubView] {
    if can_edit {
        &SubView::ALL
    } else {
        &[SubView::Main]
    }
}

/// Props of the app details view that the coordinator reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppDetailsProps {
    pub app: Option<App>,
    /// The base representation is being fetched.
    pub loading: bool,
    pub saving: bool,
    pub can_edit: bool,
    pub pending_edit_action: Option<EditAction>,
}

/// Commands issued by the coordinator.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppCommand {
    /// Fetch the read-only representation.
    Load,
    /// Fetch the editable representation.
    LoadForEdit,
}

/// Whether the editable representation must be fetched before the
/// pending edit can be shown.  Free of side effects.
pub fn needs_editable_fetch(props: &AppDetailsProps) -> bool {
    !props.loading
        && props.can_edit
        && props.pending_edit_action.is_some()
        && props
            .app
            .as_ref()
            .is_some_and(|app| !app.content.is_editable())
}

/// Where a details view stands with respect to the editable
/// representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditState {
    /// Editing is not possible or not asked for.
    NotApplicable,
    Unloaded,
    Loading,
    LoadedReadOnly,
    LoadingEditable,
    LoadedEditable,
}

/// What a sub-view should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewGate {
    Loading,
    NotFound,
    /// The editable representation is still missing.
    Placeholder,
    Ready,
}

pub fn gate(props: &AppDetailsProps, view: SubView) -> ViewGate {
    if props.loading {
        ViewGate::Loading
    } else if props.app.is_none() {
        ViewGate::NotFound
    } else if view.requires_editable() && needs_editable_fetch(props) {
        ViewGate::Placeholder
    } else {
        ViewGate::Ready
    }
}

/// Per view instance state for issuing the editable fetch.
#[derive(Clone, Debug, Default)]
pub struct EditableCoordinator {
    fired: bool,
    app: Option<AppId>,
}

impl EditableCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the editable fetch was issued within the current
    /// eligibility window.
    pub fn fired(&self) -> bool {
        self.fired
    }

    /// Returns the commands to dispatch after a commit.
    ///
    /// `previous` is `None` on mount.  Commits whose props are equal to
    /// the previous ones are not re-evaluated.
    pub fn reconcile(
        &mut self,
        previous: Option<&AppDetailsProps>,
        current: &AppDetailsProps,
    ) -> Vec<AppCommand> {
        let mut commands = Vec::new();
        match previous {
            None => {
                *self = Self::default();
                if current.app.is_none() && !current.loading {
                    commands.push(AppCommand::Load);
                }
            }
            Some(previous) if previous == current => return commands,
            Some(_) => (),
        }

        let app = current.app.as_ref().map(|app| app.id);
        if app != self.app {
            self.app = app;
            self.fired = false;
        }

        if needs_editable_fetch(current) {
            if !self.fired {
                self.fired = true;
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    app = ?self.app,
                    action = ?current.pending_edit_action,
                    "requesting editable representation"
                );
                commands.push(AppCommand::LoadForEdit);
            }
        } else {
            self.fired = false;
        }
        commands
    }

    pub fn state(&self, props: &AppDetailsProps) -> EditState {
        if !props.can_edit || props.pending_edit_action.is_none() {
            return EditState::NotApplicable;
        }
        if props.loading {
            return EditState::Loading;
        }
        match &props.app {
            None => EditState::Unloaded,
            Some(app) if app.content.is_editable() => EditState::LoadedEditable,
            Some(app) if self.fired && self.app == Some(app.id) => EditState::LoadingEditable,
            Some(_) => EditState::LoadedReadOnly,
        }
    }
}

use leptos_app_console::{
    archive::{ArchiveCommand, ArchiveId, ArchiveState, ArchiveStateHandler, Substate},
    identifier::Identifier,
    loader::ArchiveLoader,
};

#[derive(Default)]
struct State {
    archive_a: ArchiveState<&'static str>,
    archive_b: ArchiveState<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
struct Props {
    user: Option<u64>,
}

type Loader = ArchiveLoader<State, Props, ArchiveStateHandler<&'static str>>;

fn archive_a(id: Identifier<Props>) -> Loader {
    ArchiveLoader::new(
        ArchiveStateHandler::new(),
        Substate::new("archiveA", |state: &State| &state.archive_a),
        id,
    )
}

fn by_user() -> Identifier<Props> {
    Identifier::derived(|props: &Props| props.user.map(ArchiveId::from))
}

fn fetch(id: &str) -> ArchiveCommand {
    ArchiveCommand::Fetch { id: id.into() }
}

#[test]
fn mount_without_entry_fetches_once() {
    let loader = archive_a(Identifier::constant("42"));
    let mut state = State::default();
    let props = Props { user: None };

    assert_eq!(loader.reconcile(&state, None, &props), vec![fetch("42")]);

    // the store marks it in flight; the view is loading with no posts
    state.archive_a.begin_fetch(&"42".into());
    let view = loader.view(&state, &props);
    assert!(view.loading);
    assert!(view.posts.is_empty());
    assert!(!view.has_more);
    assert!(!view.loading_more);

    // re-renders never fetch again
    for _ in 0..5 {
        assert!(loader.reconcile(&state, Some(&props), &props).is_empty());
    }
}

#[test]
fn mount_with_load_in_flight_does_not_fetch() {
    let loader = archive_a(Identifier::constant("42"));
    let mut state = State::default();
    state.archive_a.begin_fetch(&"42".into());

    let props = Props { user: None };
    assert!(loader.reconcile(&state, None, &props).is_empty());
    assert!(loader.reconcile(&state, Some(&props), &props).is_empty());
}

#[test]
fn mount_with_items_does_not_fetch() {
    let loader = archive_a(Identifier::constant("42"));
    let mut state = State::default();
    state
        .archive_a
        .receive_page(&"42".into(), 1, vec!["jetpack"], false);

    assert!(loader.reconcile(&state, None, &Props { user: None }).is_empty());
}

#[test]
fn unresolved_identifier_does_not_fetch() {
    let loader = archive_a(by_user());
    let state = State::default();
    let props = Props { user: None };

    assert!(loader.reconcile(&state, None, &props).is_empty());
    let view = loader.view(&state, &props);
    assert!(view.id().is_none());
    assert!(view.on_load().is_none());
    assert!(view.on_load_more(2).is_none());
}

#[test]
fn identifier_resolved_from_latest_props() {
    let loader = archive_a(by_user());
    let mut state = State::default();
    state
        .archive_a
        .receive_page(&"1".into(), 1, vec!["jetpack"], false);

    let first = Props { user: Some(1) };
    let second = Props { user: Some(2) };

    assert!(loader.reconcile(&state, None, &first).is_empty());
    assert_eq!(loader.view(&state, &first).posts, ["jetpack"]);

    // switching the view to another user loads that user's archive and
    // never shows the items of the previous one
    assert_eq!(loader.reconcile(&state, Some(&first), &second), vec![fetch("2")]);
    state.archive_a.begin_fetch(&"2".into());
    let view = loader.view(&state, &second);
    assert_eq!(view.id(), Some(&ArchiveId::from("2")));
    assert!(view.posts.is_empty());
    assert!(view.loading);
}

#[test]
fn substates_are_distinct() {
    let loader_b = ArchiveLoader::new(
        ArchiveStateHandler::new(),
        Substate::new("archiveB", |state: &State| &state.archive_b),
        Identifier::<Props>::constant("42"),
    );
    let mut state = State::default();
    state
        .archive_a
        .receive_page(&"42".into(), 1, vec!["jetpack"], false);

    let props = Props { user: None };
    assert!(loader_b.view(&state, &props).posts.is_empty());
    assert_eq!(loader_b.reconcile(&state, None, &props), vec![fetch("42")]);
}

#[test]
fn load_more_targets_current_key() {
    let loader = archive_a(by_user());
    let mut state = State::default();
    state
        .archive_a
        .receive_page(&"7".into(), 1, vec!["jetpack", "akismet"], true);

    let props = Props { user: Some(7) };
    let view = loader.view(&state, &props);
    assert_eq!(view.key().map(|key| key.to_string()), Some("archiveA/7".to_string()));
    assert!(view.has_more);
    assert_eq!(view.posts, ["jetpack", "akismet"]);
    assert_eq!(
        view.on_load_more(2),
        Some(ArchiveCommand::FetchMore {
            substate: "archiveA".to_string(),
            id: "7".into(),
            page: 2,
        })
    );

    state.archive_a.begin_fetch_more(&"7".into());
    let view = loader.view(&state, &props);
    assert!(view.loading_more);
    assert!(!view.loading);
}

#[test]
fn failed_load_can_be_retried_on_remount() {
    let loader = archive_a(Identifier::constant("42"));
    let mut state = State::default();
    let props = Props { user: None };

    assert_eq!(loader.reconcile(&state, None, &props), vec![fetch("42")]);
    state.archive_a.begin_fetch(&"42".into());
    state.archive_a.fail(&"42".into());

    let view = loader.view(&state, &props);
    assert!(!view.loading);
    // the loader itself does not retry...
    assert!(loader.reconcile(&state, Some(&props), &props).is_empty());
    // ...but a fresh mount evaluates again
    assert_eq!(loader.reconcile(&state, None, &props), vec![fetch("42")]);
}

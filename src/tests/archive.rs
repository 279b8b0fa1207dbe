use crate::archive::{Archive, ArchiveId, ArchiveState};

#[test]
fn archives_created_lazily() {
    let mut state = ArchiveState::<u32>::new();
    let id = ArchiveId::from("42");
    assert!(state.get(&id).is_none());

    state.begin_fetch(&id);
    assert_eq!(
        state.get(&id),
        Some(&Archive {
            loading: true,
            ..Default::default()
        })
    );
}

#[test]
fn pages_append_in_order() {
    let mut state = ArchiveState::new();
    let id = ArchiveId::from("42");

    state.begin_fetch(&id);
    state.receive_page(&id, 1, vec![1, 2], true);
    state.begin_fetch_more(&id);
    assert!(state.get(&id).is_some_and(|archive| archive.loading_more));
    state.receive_page(&id, 2, vec![3], false);

    let archive = state.get(&id).expect("archive was created");
    assert_eq!(archive.items, [1, 2, 3]);
    assert_eq!(archive.page, 2);
    assert!(!archive.has_more);
    assert!(!archive.loading_more);

    // a fresh first page replaces everything
    state.receive_page(&id, 1, vec![9], true);
    assert_eq!(state.get(&id).map(|archive| archive.items.clone()), Some(vec![9]));
}

#[test]
fn failure_clears_in_flight_flags() {
    let mut state = ArchiveState::<u32>::new();
    let id = ArchiveId::from("42");

    state.begin_fetch(&id);
    state.begin_fetch_more(&id);
    state.fail(&id);

    let archive = state.get(&id).expect("archive was created");
    assert!(!archive.loading);
    assert!(!archive.loading_more);
}

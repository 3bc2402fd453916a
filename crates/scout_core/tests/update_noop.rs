use scout_core::{update, AppState, Msg};

#[test]
fn closing_details_that_were_never_opened_changes_nothing() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::DetailsClosed);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, state);
}

#[test]
fn load_more_and_retry_without_a_session_do_nothing() {
    let (state, effects) = update(AppState::new(), Msg::LoadMoreRequested);
    assert!(effects.is_empty());
    let (mut state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

use bulletin_store::{AsyncPhase, Operation, RequestState, RequestStatus};
use pretty_assertions::assert_eq;

#[test]
fn starts_idle_without_error() {
    let state = RequestState::default();
    assert_eq!(state.status, RequestStatus::Idle);
    assert_eq!(state.error, None);
    assert!(state.can_start());
}

#[test]
fn pending_then_fulfilled() {
    let mut state = RequestState::default();
    state.on_pending();
    assert!(state.is_pending());
    assert!(!state.can_start());

    state.on_fulfilled();
    assert_eq!(state.status, RequestStatus::Succeeded);
    assert!(!state.can_start());
}

#[test]
fn rejected_records_message() {
    let mut state = RequestState::default();
    state.on_pending();
    state.on_rejected("network down");
    assert_eq!(state.status, RequestStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("network down"));
    assert!(state.can_start());
}

#[test]
fn pending_clears_previous_error() {
    let mut state = RequestState::default();
    state.on_rejected("boom");
    state.on_pending();
    assert_eq!(
        state,
        RequestState {
            status: RequestStatus::Pending,
            error: None
        }
    );
}

#[test]
fn apply_follows_phase() {
    let mut state = RequestState::default();
    state.apply(&AsyncPhase::<()>::Pending);
    assert_eq!(state.status, RequestStatus::Pending);
    state.apply(&AsyncPhase::Fulfilled(42));
    assert_eq!(state.status, RequestStatus::Succeeded);
    state.apply(&AsyncPhase::<u8>::Rejected("late".into()));
    assert_eq!(state.status, RequestStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("late"));
}

#[test]
fn operation_and_phase_names() {
    assert_eq!(Operation::FetchPosts.to_string(), "posts/fetchPosts");
    assert_eq!(Operation::AddNewPost.as_str(), "posts/addNewPost");
    assert_eq!(Operation::FetchUsers.as_str(), "users/fetchUsers");
    assert_eq!(
        Operation::FetchNotifications.as_str(),
        "notifications/fetchNotifications"
    );
    assert_eq!(AsyncPhase::<()>::Pending.name(), "pending");
    assert_eq!(AsyncPhase::Fulfilled(()).name(), "fulfilled");
    assert_eq!(AsyncPhase::<()>::Rejected(String::new()).name(), "rejected");
}

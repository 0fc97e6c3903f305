//! Users store. The server owns users; every successful fetch replaces the
//! whole table.

use crate::error::StoreResult;
use crate::request::{AsyncPhase, Operation, RequestState};
use bulletin_entity::{EntityAdapter, EntityTable};
use bulletin_model::User;
use std::sync::Arc;

/// Users keep server order.
pub const USERS_ADAPTER: EntityAdapter<User> = EntityAdapter::new();

/// State of the users slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersState {
    pub table: Arc<EntityTable<User>>,
    pub request: RequestState,
}

/// Transitions of the users slice.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersAction {
    FetchUsers(AsyncPhase<Vec<User>>),
}

impl UsersAction {
    /// Stable action type string, e.g. `users/fetchUsers/pending`.
    #[must_use]
    pub fn action_type(&self) -> String {
        match self {
            UsersAction::FetchUsers(phase) => format!("{}/{}", Operation::FetchUsers, phase.name()),
        }
    }
}

/// Applies `action`, returning the next state.
pub fn reduce(state: &Arc<UsersState>, action: UsersAction) -> StoreResult<Arc<UsersState>> {
    match action {
        UsersAction::FetchUsers(phase) => {
            let mut next = UsersState::clone(state);
            next.request.apply(&phase);
            if let AsyncPhase::Fulfilled(users) = phase {
                USERS_ADAPTER.set_all(Arc::make_mut(&mut next.table), users);
            }
            Ok(Arc::new(next))
        }
    }
}

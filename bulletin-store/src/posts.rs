//! Posts store: the post table, its fetch and create trackers, and the
//! post mutations.

use crate::error::StoreResult;
use crate::request::{AsyncPhase, Operation, RequestState};
use bulletin_entity::{EntityAdapter, EntityTable};
use bulletin_model::{Post, PostPatch};
use bulletin_types::{PostId, ReactionKind};
use std::cmp::Ordering;
use std::sync::Arc;

/// Posts are kept newest first.
pub const POSTS_ADAPTER: EntityAdapter<Post> = EntityAdapter::sorted(newest_first);

fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date)
}

/// State of the posts slice.
///
/// The table sits behind its own `Arc`: transitions that only move a
/// request tracker keep it, so views keyed on the table stay valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsState {
    pub table: Arc<EntityTable<Post>>,
    /// Tracks `fetch_posts`. This is the slice's `status`/`error`.
    pub request: RequestState,
    /// Tracks `add_new_post`.
    pub create_request: RequestState,
}

/// Transitions of the posts slice.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsAction {
    /// Full list fetch; results are merged, never replacing local posts.
    FetchPosts(AsyncPhase<Vec<Post>>),
    /// Create; the server-assigned post is inserted on success.
    AddNewPost(AsyncPhase<Post>),
    ReactionAdded {
        post_id: PostId,
        reaction: ReactionKind,
    },
    PostUpdated {
        post_id: PostId,
        title: String,
        content: String,
    },
}

impl PostsAction {
    /// Stable action type string, e.g. `posts/reactionAdded`.
    #[must_use]
    pub fn action_type(&self) -> String {
        match self {
            PostsAction::FetchPosts(phase) => format!("{}/{}", Operation::FetchPosts, phase.name()),
            PostsAction::AddNewPost(phase) => format!("{}/{}", Operation::AddNewPost, phase.name()),
            PostsAction::ReactionAdded { .. } => "posts/reactionAdded".to_string(),
            PostsAction::PostUpdated { .. } => "posts/postUpdated".to_string(),
        }
    }
}

/// Applies `action`, returning the next state.
///
/// The prior state is never modified. When the action changes nothing (an
/// update aimed at an absent post) the same `Arc` is returned.
pub fn reduce(state: &Arc<PostsState>, action: PostsAction) -> StoreResult<Arc<PostsState>> {
    match action {
        PostsAction::FetchPosts(phase) => {
            let mut next = PostsState::clone(state);
            next.request.apply(&phase);
            if let AsyncPhase::Fulfilled(posts) = phase {
                POSTS_ADAPTER.upsert_many(Arc::make_mut(&mut next.table), posts);
            }
            Ok(Arc::new(next))
        }
        PostsAction::AddNewPost(phase) => {
            let mut next = PostsState::clone(state);
            if let AsyncPhase::Fulfilled(post) = &phase {
                POSTS_ADAPTER.add_one(Arc::make_mut(&mut next.table), post.clone())?;
            }
            next.create_request.apply(&phase);
            Ok(Arc::new(next))
        }
        PostsAction::ReactionAdded { post_id, reaction } => {
            if !state.table.contains(&post_id) {
                return Ok(Arc::clone(state));
            }
            let mut next = PostsState::clone(state);
            POSTS_ADAPTER.update_with(Arc::make_mut(&mut next.table), &post_id, |post| {
                post.reactions.increment(reaction);
            });
            Ok(Arc::new(next))
        }
        PostsAction::PostUpdated {
            post_id,
            title,
            content,
        } => {
            if !state.table.contains(&post_id) {
                return Ok(Arc::clone(state));
            }
            let mut next = PostsState::clone(state);
            let changes = PostPatch {
                title: Some(title),
                content: Some(content),
                ..Default::default()
            };
            POSTS_ADAPTER.update_one(Arc::make_mut(&mut next.table), &post_id, &changes);
            Ok(Arc::new(next))
        }
    }
}

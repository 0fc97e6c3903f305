#![allow(dead_code)]

use bulletin_entity::{Entity, EntityAdapter};

/// Minimal entity used across the table tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub rank: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub rank: Option<i64>,
}

impl Entity for Note {
    type Id = u32;
    type Patch = NotePatch;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn apply(&mut self, patch: &NotePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(body) = &patch.body {
            self.body = body.clone();
        }
        if let Some(rank) = patch.rank {
            self.rank = rank;
        }
    }

    fn to_patch(&self) -> NotePatch {
        NotePatch {
            title: Some(self.title.clone()),
            body: Some(self.body.clone()),
            rank: Some(self.rank),
        }
    }

    fn from_patch(id: u32, patch: NotePatch) -> Option<Self> {
        Some(Self {
            id,
            title: patch.title?,
            body: patch.body?,
            rank: patch.rank?,
        })
    }
}

pub fn note(id: u32, rank: i64) -> Note {
    Note {
        id,
        title: format!("note {id}"),
        body: String::new(),
        rank,
    }
}

/// Highest rank first.
pub fn by_rank_desc(a: &Note, b: &Note) -> std::cmp::Ordering {
    b.rank.cmp(&a.rank)
}

pub fn sorted_adapter() -> EntityAdapter<Note> {
    EntityAdapter::sorted(by_rank_desc)
}

use derive_new::new;
use serde::Serialize;

/// Identity of a stored entity. Issued by the store, never reused.
pub type EntityId = u64;

/// Matches only the canonical decimal rendering, so "01" and "+1" are not user 1.
pub fn parse_entity_id(raw: &str) -> Option<EntityId> {
    raw.parse::<EntityId>()
        .ok()
        .filter(|id| id.to_string() == raw)
}

#[derive(Clone, Debug, PartialEq, Serialize, new)]
pub struct User {
    pub(crate) id: EntityId,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) age: Option<i32>,
    /// Forward references to posts. Not kept in sync with `Post::author_id`.
    #[serde(skip)]
    pub(crate) posts: Vec<EntityId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub(crate) id: EntityId,
    pub(crate) title: String,
    pub(crate) content: String,
    /// Author reference as given at creation; may name no user.
    pub(crate) author_id: String,
}

use crate::db::Storage;
use crate::model::{Post, User};
use async_graphql::{Context, Object, Result, ID};

#[Object]
/// A post written by a user
impl Post {
    /// The ID of the post
    async fn id(&self) -> ID {
        self.id.into()
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn content(&self) -> &str {
        &self.content
    }

    /// The author ID the post was created with, whether or not it names a user
    async fn author_id(&self) -> ID {
        self.author_id.clone().into()
    }

    /// The user that wrote the post
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let db = ctx.data::<Storage>()?.lock().await;
        db.resolve_author(self).map_or_else(
            || Err(async_graphql::Error::new("User not found")),
            |u| Ok(u.clone()),
        )
    }
}

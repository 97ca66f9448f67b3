use crate::db::Storage;
use crate::model::{Post, User};
use async_graphql::{Context, Object, Result, ID};

#[Object]
/// A user who writes posts
impl User {
    /// The ID of the user
    async fn id(&self) -> ID {
        self.id.into()
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn email(&self) -> &str {
        &self.email
    }

    /// The user's age, if they gave one
    async fn age(&self) -> Option<i32> {
        self.age
    }

    /// Posts listed on the user record
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let db = ctx.data::<Storage>()?.lock().await;
        Ok(db.resolve_posts(self).into_iter().cloned().collect())
    }

    /// Posts whose author is this user
    async fn authored_posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let db = ctx.data::<Storage>()?.lock().await;
        Ok(db.posts_by_author(self).into_iter().cloned().collect())
    }
}

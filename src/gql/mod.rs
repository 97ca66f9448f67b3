mod simple_broker;

mod post;
mod user;

pub use simple_broker::SimpleBroker;

use crate::db::Storage;
use crate::gateway::{NewPost, NewUser};
use crate::model::{parse_entity_id, Post, User};
use async_graphql::{Context, Object, Result, Schema, Subscription, ID};
use futures::{Stream, StreamExt};

pub type ApiSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

pub type PostBroker = SimpleBroker<Post>;

pub fn build_schema(storage: Storage) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(storage)
        .data(PostBroker::default())
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let db = ctx.data::<Storage>()?.lock().await;
        Ok(db.list_users().to_vec())
    }

    /// A single user, or null if no user has this ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let db = ctx.data::<Storage>()?.lock().await;
        Ok(parse_entity_id(&id).and_then(|id| db.find_user_by_id(id)).cloned())
    }

    /// All posts by any user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let db = ctx.data::<Storage>()?.lock().await;
        Ok(db.list_posts().to_vec())
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Post>> {
        let db = ctx.data::<Storage>()?.lock().await;
        Ok(parse_entity_id(&id).and_then(|id| db.find_post_by_id(id)).cloned())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a post. The author is not checked to exist.
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        author_id: ID,
    ) -> Result<Post> {
        let post = {
            let mut db = ctx.data::<Storage>()?.lock().await;
            db.create_post(NewPost::new(title, content, author_id.as_str().to_owned()))
        };

        ctx.data::<PostBroker>()?.publish(post.clone()).await;

        Ok(post)
    }

    /// Create a user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        age: Option<i32>,
    ) -> Result<User> {
        let mut db = ctx.data::<Storage>()?.lock().await;
        Ok(db.create_user(NewUser::new(Some(name), Some(email), age))?)
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Posts as they are created, optionally only those by one author
    async fn post_created(
        &self,
        ctx: &Context<'_>,
        author_id: Option<ID>,
    ) -> Result<impl Stream<Item = Post>> {
        let posts = ctx.data::<PostBroker>()?.subscribe().await;
        Ok(posts.filter(move |post| {
            let author_same = author_id
                .as_ref()
                .map_or_else(|| true, |id| id.as_str() == post.author_id);
            async move { author_same }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Db;
    use serde_json::{json, Value};

    fn data(response: &async_graphql::Response) -> Value {
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        serde_json::to_value(&response.data).unwrap()
    }

    #[actix_rt::test]
    async fn user_posts_resolve_from_seed() {
        let schema = build_schema(Db::seeded().into_storage());
        let res = schema
            .execute(r#"{ user(id: "1") { id name posts { id title content } } }"#)
            .await;
        assert_eq!(
            data(&res),
            json!({
                "user": {
                    "id": "1",
                    "name": "Alice",
                    "posts": [{ "id": "1", "title": "First Post", "content": "Hello World!" }]
                }
            })
        );
    }

    #[actix_rt::test]
    async fn unknown_or_malformed_user_id_is_null() {
        let schema = build_schema(Db::seeded().into_storage());
        let res = schema
            .execute(
                r#"{ a: user(id: "99") { id } b: user(id: "abc") { id }
                     c: user(id: "01") { id } d: user(id: "+2") { id } e: post(id: "01") { id } }"#,
            )
            .await;
        assert_eq!(
            data(&res),
            json!({ "a": null, "b": null, "c": null, "d": null, "e": null })
        );
    }

    #[actix_rt::test]
    async fn posts_resolve_authors() {
        let schema = build_schema(Db::seeded().into_storage());
        let res = schema.execute("{ posts { id author { name } } }").await;
        assert_eq!(
            data(&res),
            json!({
                "posts": [
                    { "id": "1", "author": { "name": "Alice" } },
                    { "id": "2", "author": { "name": "Bob" } }
                ]
            })
        );
    }

    #[actix_rt::test]
    async fn create_post_is_visible_but_not_on_author_list() {
        let storage = Db::seeded().into_storage();
        let schema = build_schema(storage.clone());
        let res = schema
            .execute(r#"mutation { createPost(title: "T", content: "C", authorId: "1") { id author { id } } }"#)
            .await;
        assert_eq!(
            data(&res),
            json!({ "createPost": { "id": "3", "author": { "id": "1" } } })
        );

        let res = schema
            .execute(r#"{ user(id: "1") { posts { id } authoredPosts { id } } }"#)
            .await;
        assert_eq!(
            data(&res),
            json!({
                "user": {
                    "posts": [{ "id": "1" }],
                    "authoredPosts": [{ "id": "1" }, { "id": "3" }]
                }
            })
        );
        assert_eq!(storage.lock().await.list_users()[0].posts, vec![1]);
    }

    #[actix_rt::test]
    async fn dangling_author_is_a_field_error() {
        let schema = build_schema(Db::seeded().into_storage());
        let res = schema
            .execute(r#"mutation { createPost(title: "T", content: "C", authorId: "99") { id author { id } } }"#)
            .await;
        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].message, "User not found");

        let res = schema.execute(r#"{ post(id: "3") { title authorId } }"#).await;
        assert_eq!(
            data(&res),
            json!({ "post": { "title": "T", "authorId": "99" } })
        );
    }

    #[actix_rt::test]
    async fn create_post_admits_non_numeric_author() {
        let schema = build_schema(Db::seeded().into_storage());
        let res = schema
            .execute(r#"mutation { createPost(title: "T", content: "C", authorId: "abc") { id authorId } }"#)
            .await;
        assert_eq!(
            data(&res),
            json!({ "createPost": { "id": "3", "authorId": "abc" } })
        );

        let res = schema.execute(r#"{ posts { id } }"#).await;
        assert_eq!(
            data(&res),
            json!({ "posts": [{ "id": "1" }, { "id": "2" }, { "id": "3" }] })
        );

        let res = schema.execute(r#"{ post(id: "3") { author { id } } }"#).await;
        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].message, "User not found");
    }

    #[actix_rt::test]
    async fn create_user_validates_and_assigns_next_id() {
        let schema = build_schema(Db::seeded().into_storage());
        let res = schema
            .execute(r#"mutation { createUser(name: "", email: "c@x.com") { id } }"#)
            .await;
        assert_eq!(res.errors[0].message, "Необходимы name и email");

        let res = schema
            .execute(r#"mutation { createUser(name: "Carol", email: "c@x.com", age: 41) { id age posts { id } } }"#)
            .await;
        assert_eq!(
            data(&res),
            json!({ "createUser": { "id": "3", "age": 41, "posts": [] } })
        );
    }

    #[actix_rt::test]
    async fn created_posts_reach_matching_subscribers() {
        let schema = build_schema(Db::seeded().into_storage());
        let mut stream = Box::pin(
            schema.execute_stream(r#"subscription { postCreated(authorId: "2") { id title } }"#),
        );

        // the stream is polled first, so it subscribes before the mutations run
        let (event, _) = futures::join!(stream.next(), async {
            schema
                .execute(r#"mutation { createPost(title: "skip", content: "", authorId: "1") { id } }"#)
                .await;
            schema
                .execute(r#"mutation { createPost(title: "Bob again", content: "", authorId: "2") { id } }"#)
                .await;
        });

        let event = event.unwrap();
        assert_eq!(
            data(&event),
            json!({ "postCreated": { "id": "4", "title": "Bob again" } })
        );
    }
}

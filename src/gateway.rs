// Write path for new entities. Callers hold the `Storage` lock for the whole
// call, so id assignment and the append happen as one step.

use crate::db::Db;
use crate::error::{ApiError, ApiResult};
use crate::model::{Post, User};
use derive_new::new;

#[derive(Debug, new)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

#[derive(Debug, new)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

impl Db {
    /// Admits a user once `name` and `email` are both non-empty.
    /// A rejected request leaves the store untouched.
    pub fn create_user(&mut self, new_user: NewUser) -> ApiResult<User> {
        let (name, email) = match (present(new_user.name), present(new_user.email)) {
            (Some(name), Some(email)) => (name, email),
            _ => return Err(ApiError::MissingNameOrEmail),
        };
        let user = User::new(self.issue_user_id(), name, email, new_user.age, Vec::new());
        self.append_user(user.clone());
        log::debug!("created user {}", user.id);
        Ok(user)
    }

    /// Admits a post without validating its fields or its author.
    ///
    /// The author's `posts` list is not updated; only `author_id` links the
    /// post back to its user.
    pub fn create_post(&mut self, new_post: NewPost) -> Post {
        let post = Post::new(
            self.issue_post_id(),
            new_post.title,
            new_post.content,
            new_post.author_id,
        );
        if self.resolve_author(&post).is_none() {
            log::warn!(
                "post {} references unknown author {}",
                post.id,
                post.author_id
            );
        }
        self.append_post(post.clone());
        log::debug!("created post {}", post.id);
        post
    }
}

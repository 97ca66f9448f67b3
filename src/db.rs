use crate::model::{parse_entity_id, EntityId, Post, User};
use futures::lock::Mutex;
use std::sync::Arc;

// In-memory "database" shared by the GraphQL and REST surfaces

pub struct Db {
    users: Vec<User>,
    posts: Vec<Post>,
    next_user_id: EntityId,
    next_post_id: EntityId,
}

pub type Storage = Arc<Mutex<Db>>;

impl Default for Db {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            posts: Vec::new(),
            next_user_id: 1,
            next_post_id: 1,
        }
    }
}

impl Db {
    /// Alice and Bob, each owning one post.
    pub fn seeded() -> Self {
        let mut db = Self::default();
        db.append_user(User::new(
            1,
            "Alice".into(),
            "alice@example.com".into(),
            None,
            vec![1],
        ));
        db.append_user(User::new(
            2,
            "Bob".into(),
            "bob@example.com".into(),
            None,
            vec![2],
        ));
        db.append_post(Post::new(
            1,
            "First Post".into(),
            "Hello World!".into(),
            "1".into(),
        ));
        db.append_post(Post::new(
            2,
            "GraphQL Guide".into(),
            "Learn GraphQL in 5 mins".into(),
            "2".into(),
        ));
        db
    }

    pub fn into_storage(self) -> Storage {
        Arc::new(Mutex::new(self))
    }

    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    pub fn list_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find_user_by_id(&self, id: EntityId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_post_by_id(&self, id: EntityId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Appends without checking for duplicate ids. The id counter is moved
    /// past `user.id` so it is never issued again.
    pub fn append_user(&mut self, user: User) {
        self.next_user_id = self.next_user_id.max(user.id + 1);
        self.users.push(user);
    }

    pub fn append_post(&mut self, post: Post) {
        self.next_post_id = self.next_post_id.max(post.id + 1);
        self.posts.push(post);
    }

    pub(crate) fn issue_user_id(&mut self) -> EntityId {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }

    pub(crate) fn issue_post_id(&mut self) -> EntityId {
        let id = self.next_post_id;
        self.next_post_id += 1;
        id
    }

    // Relational reads. Linear scans; the dataset is tiny.

    /// The user whose id equals `post.author_id`, if one exists.
    pub fn resolve_author(&self, post: &Post) -> Option<&User> {
        parse_entity_id(&post.author_id).and_then(|id| self.find_user_by_id(id))
    }

    /// Posts listed in `user.posts`, in post-collection order.
    pub fn resolve_posts(&self, user: &User) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| user.posts.contains(&p.id))
            .collect()
    }

    /// Posts whose `author_id` is `user.id`, in post-collection order.
    pub fn posts_by_author(&self, user: &User) -> Vec<&Post> {
        let author_id = user.id.to_string();
        self.posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .collect()
    }
}

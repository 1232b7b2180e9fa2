//! In-memory repositories and a recording publisher for service tests

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use social_common::JwtService;
use social_core::{
    CommentPreview, CommentRepository, CommentStats, Comment, DomainError, DomainEvent,
    EventPublisher, ExploreSort, Follow, FollowRepository, LikeRepository, Message,
    MessageRepository, Notification, NotificationDetails, NotificationRepository, Page, Post,
    PostPreview, PostRepository, PostStats, ProfileStats, ReadReceipt, RepoResult, Snowflake,
    SnowflakeGenerator, User, UserPreview, UserRepository,
};

use super::context::ServiceContext;

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    posts: Vec<Post>,
    /// Insertion order is like order
    post_likes: Vec<(Snowflake, Snowflake)>,
    comments: Vec<Comment>,
    comment_likes: HashSet<(Snowflake, Snowflake)>,
    /// Insertion order is edge order
    follows: Vec<Follow>,
    notifications: Vec<Notification>,
    messages: Vec<Message>,
}

impl State {
    fn user(&self, id: Snowflake) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| u.id == id)
    }

    fn preview(&self, id: Snowflake) -> Option<UserPreview> {
        self.user(id).map(|u| UserPreview {
            id: u.id,
            username: u.username.clone(),
            avatar: u.avatar.clone(),
        })
    }

    fn post_stats(&self, post: &Post, viewer: Option<Snowflake>) -> PostStats {
        let likes = self.post_likes.iter().filter(|(p, _)| *p == post.id);
        PostStats {
            post: post.clone(),
            likes_count: likes.clone().count() as i64,
            comments_count: self.comments.iter().filter(|c| c.post_id == post.id).count() as i64,
            liked: viewer.map(|v| likes.clone().any(|(_, u)| *u == v)),
        }
    }

    fn details(&self, n: &Notification) -> NotificationDetails {
        let post = n
            .post_id
            .and_then(|id| self.posts.iter().find(|p| p.id == id))
            .and_then(|p| {
                Some(PostPreview {
                    id: p.id,
                    image: p.image.clone(),
                    author: self.preview(p.author_id)?,
                })
            });
        let comment = n
            .comment_id
            .and_then(|id| self.comments.iter().find(|c| c.id == id))
            .map(|c| CommentPreview {
                id: c.id,
                text: c.text.clone(),
                post_id: c.post_id,
            });

        NotificationDetails {
            notification: n.clone(),
            from_user: self.preview(n.from_user_id),
            post,
            comment,
        }
    }

    fn edge_page(&self, edges: Vec<(Snowflake, Snowflake)>, page: Page) -> Vec<User> {
        // (cursor key, user) pairs, newest edge first
        let start = page
            .before
            .and_then(|b| edges.iter().position(|(key, _)| *key == b))
            .map_or(0, |i| i + 1);
        edges
            .iter()
            .skip(start)
            .take(usize::try_from(page.limit).unwrap_or(0))
            .filter_map(|(_, id)| self.user(*id).cloned())
            .collect()
    }
}

fn mark(messages: &mut [Message], viewer: Snowflake, pred: impl Fn(&Message) -> bool) -> ReadReceipt {
    let mut receipt = ReadReceipt::default();
    for message in messages.iter_mut().filter(|m| pred(m) && !m.is_read_by(viewer)) {
        receipt.matched += 1;
        receipt.modified += 1;
        message.read_by.push(viewer);
    }
    receipt
}

/// Every repository trait over one shared in-memory state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    /// When set, notification inserts fail
    pub fail_notifications: Mutex<bool>,
}

impl MemoryStore {
    pub fn notifications_for(&self, user_id: Snowflake) -> Vec<Notification> {
        self.state
            .lock()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().messages.len()
    }

    pub fn follow_count(&self) -> usize {
        self.state.lock().follows.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().user(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(ids.iter().filter_map(|id| state.user(*id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn exists_by_email_or_username(&self, email: &str, username: &str) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state.users.iter().any(|(u, _)| {
            u.email.eq_ignore_ascii_case(email) || u.username.eq_ignore_ascii_case(username)
        }))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.users.iter().any(|(u, _)| {
            u.email.eq_ignore_ascii_case(&user.email)
                || u.username.eq_ignore_ascii_case(&user.username)
        }) {
            return Err(DomainError::UserAlreadyExists);
        }
        state.users.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .users
            .iter()
            .any(|(u, _)| u.id != user.id && u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(DomainError::UsernameTaken);
        }
        let slot = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        slot.0 = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, h)| h.clone()))
    }

    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let needle = query.to_lowercase();
        let state = self.state.lock();
        let mut users: Vec<User> = state
            .users
            .iter()
            .map(|(u, _)| u)
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.full_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        users.sort_by_key(|u| u.username.to_lowercase());
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }

    async fn profile_stats(&self, id: Snowflake) -> RepoResult<ProfileStats> {
        let state = self.state.lock();
        Ok(ProfileStats {
            posts: state.posts.iter().filter(|p| p.author_id == id).count() as i64,
            followers: state.follows.iter().filter(|f| f.following_id == id).count() as i64,
            following: state.follows.iter().filter(|f| f.follower_id == id).count() as i64,
        })
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.state.lock().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_with_stats(
        &self,
        id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<PostStats>> {
        let state = self.state.lock();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.post_stats(p, viewer)))
    }

    async fn list(&self, page: Page, viewer: Option<Snowflake>) -> RepoResult<Vec<PostStats>> {
        let state = self.state.lock();
        let mut posts: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| page.before.map_or(true, |b| p.id < b))
            .collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.id));
        Ok(posts
            .into_iter()
            .take(usize::try_from(page.limit).unwrap_or(0))
            .map(|p| state.post_stats(p, viewer))
            .collect())
    }

    async fn list_by_author(
        &self,
        author_id: Snowflake,
        page: Page,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Vec<PostStats>> {
        let all = PostRepository::list(self, Page::new(i64::MAX, page.before), viewer).await?;
        Ok(all
            .into_iter()
            .filter(|s| s.post.author_id == author_id)
            .take(usize::try_from(page.limit).unwrap_or(0))
            .collect())
    }

    async fn explore(&self, sort: ExploreSort, offset: i64, limit: i64) -> RepoResult<Vec<PostStats>> {
        let mut all = PostRepository::list(self, Page::first(i64::MAX), None).await?;
        let offset = match sort {
            ExploreSort::Trending => {
                all.sort_by_key(|s| std::cmp::Reverse((s.likes_count, s.post.id)));
                offset
            }
            ExploreSort::New => offset,
            ExploreSort::Random => 0,
        };
        Ok(all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.state.lock().posts.push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(DomainError::PostNotFound(post.id))?;
        *slot = post.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.posts.iter().any(|p| p.id == id) {
            return Err(DomainError::PostNotFound(id));
        }
        let comment_ids: HashSet<Snowflake> = state
            .comments
            .iter()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        state.posts.retain(|p| p.id != id);
        state.post_likes.retain(|(p, _)| *p != id);
        state.comments.retain(|c| c.post_id != id);
        state.comment_likes.retain(|(c, _)| !comment_ids.contains(c));
        state.notifications.retain(|n| n.post_id != Some(id));
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn create(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.post_likes.contains(&(post_id, user_id)) {
            return Ok(false);
        }
        state.post_likes.push((post_id, user_id));
        Ok(true)
    }

    async fn delete(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let before = state.post_likes.len();
        state.post_likes.retain(|l| *l != (post_id, user_id));
        Ok(state.post_likes.len() < before)
    }

    async fn exists(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().post_likes.contains(&(post_id, user_id)))
    }

    async fn count(&self, post_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.post_likes.iter().filter(|(p, _)| *p == post_id).count() as i64)
    }

    async fn likers(&self, post_id: Snowflake, limit: i64) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .post_likes
            .iter()
            .rev()
            .filter(|(p, _)| *p == post_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .filter_map(|(_, u)| state.user(*u).cloned())
            .collect())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.state.lock().comments.push(comment.clone());
        Ok(())
    }

    async fn list_for_post(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
        page: Page,
    ) -> RepoResult<Vec<CommentStats>> {
        let state = self.state.lock();
        let mut comments: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && page.before.map_or(true, |b| c.id < b))
            .collect();
        comments.sort_by_key(|c| std::cmp::Reverse(c.id));
        Ok(comments
            .into_iter()
            .take(usize::try_from(page.limit).unwrap_or(0))
            .map(|c| CommentStats {
                comment: c.clone(),
                likes_count: state.comment_likes.iter().filter(|(id, _)| *id == c.id).count()
                    as i64,
                liked: viewer.is_some_and(|v| state.comment_likes.contains(&(c.id, v))),
            })
            .collect())
    }

    async fn count_for_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.comments.iter().filter(|c| c.post_id == post_id).count() as i64)
    }

    async fn add_like(&self, comment_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().comment_likes.insert((comment_id, user_id)))
    }

    async fn remove_like(&self, comment_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().comment_likes.remove(&(comment_id, user_id)))
    }

    async fn count_likes(&self, comment_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.comment_likes.iter().filter(|(c, _)| *c == comment_id).count() as i64)
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn create(&self, follow: &Follow) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.follows.iter().any(|f| {
            f.follower_id == follow.follower_id && f.following_id == follow.following_id
        }) {
            return Ok(false);
        }
        state.follows.push(follow.clone());
        Ok(true)
    }

    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let before = state.follows.len();
        state
            .follows
            .retain(|f| !(f.follower_id == follower_id && f.following_id == following_id));
        Ok(state.follows.len() < before)
    }

    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state
            .follows
            .iter()
            .any(|f| f.follower_id == follower_id && f.following_id == following_id))
    }

    async fn followers(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        let edges = state
            .follows
            .iter()
            .rev()
            .filter(|f| f.following_id == user_id)
            .map(|f| (f.follower_id, f.follower_id))
            .collect();
        Ok(state.edge_page(edges, page))
    }

    async fn following(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        let edges = state
            .follows
            .iter()
            .rev()
            .filter(|f| f.follower_id == user_id)
            .map(|f| (f.following_id, f.following_id))
            .collect();
        Ok(state.edge_page(edges, page))
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        if *self.fail_notifications.lock() {
            return Err(DomainError::DatabaseError("notifications unavailable".to_string()));
        }
        self.state.lock().notifications.push(notification.clone());
        Ok(())
    }

    async fn find_details(&self, id: Snowflake) -> RepoResult<Option<NotificationDetails>> {
        let state = self.state.lock();
        Ok(state
            .notifications
            .iter()
            .find(|n| n.id == id)
            .map(|n| state.details(n)))
    }

    async fn list_for_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<NotificationDetails>> {
        let state = self.state.lock();
        let mut items: Vec<&Notification> = state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && page.before.map_or(true, |b| n.id < b))
            .collect();
        items.sort_by_key(|n| std::cmp::Reverse(n.id));
        Ok(items
            .into_iter()
            .take(usize::try_from(page.limit).unwrap_or(0))
            .map(|n| state.details(n))
            .collect())
    }

    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        match state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let mut modified = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            modified += 1;
        }
        Ok(modified)
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.state.lock().messages.push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.state.lock().messages.iter().find(|m| m.id == id).cloned())
    }

    async fn find_for_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Message>> {
        let state = self.state.lock();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect())
    }

    async fn find_conversation(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>> {
        let state = self.state.lock();
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.involves(a) && m.involves(b))
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages)
    }

    async fn mark_thread_read(&self, viewer_id: Snowflake, peer_id: Snowflake) -> RepoResult<ReadReceipt> {
        let mut state = self.state.lock();
        Ok(mark(&mut state.messages, viewer_id, |m| {
            m.sender_id == peer_id && m.peer_id == viewer_id
        }))
    }

    async fn mark_read(&self, viewer_id: Snowflake, message_id: Snowflake) -> RepoResult<ReadReceipt> {
        let mut state = self.state.lock();
        Ok(mark(&mut state.messages, viewer_id, |m| m.id == message_id))
    }
}

/// Publisher that remembers every event it was asked to deliver
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<(Snowflake, DomainEvent)>>,
}

impl RecordingPublisher {
    pub fn events_for(&self, user_id: Snowflake) -> Vec<DomainEvent> {
        self.events
            .lock()
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, e)| e.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish_to_user(&self, user_id: Snowflake, event: DomainEvent) -> usize {
        self.events.lock().push((user_id, event));
        1
    }
}

pub struct TestContext {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_like_repo(|store| store as Arc<dyn LikeRepository>)
    }

    /// Same in-memory store, but likes go through the repository `wrap` returns
    pub fn with_like_repo(
        wrap: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn LikeRepository>,
    ) -> Self {
        let store = Arc::new(MemoryStore::default());
        let publisher = Arc::new(RecordingPublisher::default());
        let ctx = ServiceContext::builder()
            .user_repo(store.clone())
            .post_repo(store.clone())
            .like_repo(wrap(store.clone()))
            .comment_repo(store.clone())
            .follow_repo(store.clone())
            .notification_repo(store.clone())
            .message_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-that-is-long-enough",
                900,
                604_800,
            )))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .publisher(publisher.clone())
            .build()
            .expect("complete context");

        Self {
            ctx,
            store,
            publisher,
        }
    }

    /// Insert a user directly, bypassing registration
    pub async fn user(&self, username: &str) -> User {
        let user = User::new(
            self.ctx.generate_id(),
            format!("{username}@example.com"),
            username.to_string(),
            username.to_uppercase(),
        );
        UserRepository::create(self.store.as_ref(), &user, "not-a-real-hash")
            .await
            .expect("insert user");
        user
    }

    pub async fn post(&self, author: &User, description: &str) -> Post {
        let post = Post::new(self.ctx.generate_id(), author.id, description.to_string(), None);
        PostRepository::create(self.store.as_ref(), &post)
            .await
            .expect("insert post");
        post
    }

    /// Let detached secondary-effect tasks run to completion
    pub async fn settle(&self) {
        for _ in 0..64 {
            tokio::task::yield_now().await;
        }
    }
}

use gridql_core::LocalSource;
use std::sync::Arc;

use crate::posts::Post;

#[derive(Clone)]
pub struct ServerState {
    posts: Arc<LocalSource<Post>>,
    default_limit: usize,
}

impl ServerState {
    pub fn new(posts: LocalSource<Post>, default_limit: usize) -> Self { Self { posts: Arc::new(posts), default_limit } }

    pub fn posts(&self) -> &LocalSource<Post> { &self.posts }

    pub fn default_limit(&self) -> usize { self.default_limit }
}

use anyhow::Result;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use gridql::SortMode;
use gridql_core::{DataSource, LocalSource};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};

use crate::config::{ServerConfig, DEFAULT_BIND_ADDRESS, DEFAULT_LIMIT};
use crate::dataset;
use crate::error::ApiError;
use crate::hello::hello;
use crate::posts::{self, Post, PostsQuery, PostsResponse};
use crate::state::ServerState;

pub struct Server {
    bind_address: String,
    state: ServerState,
}

impl Server {
    pub fn builder() -> ServerBuilder { ServerBuilder::default() }

    pub fn router(&self) -> Router { router(self.state.clone()) }

    pub async fn run(self) -> Result<()> {
        let app = self.router().layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .into_inner(),
        );

        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
        info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

        Ok(())
    }
}

#[derive(Default)]
pub struct ServerBuilder {
    bind_address: Option<String>,
    posts: Option<Vec<Post>>,
    default_limit: Option<usize>,
}

impl ServerBuilder {
    pub fn bind_address(mut self, addr: impl Into<String>) -> Self {
        self.bind_address = Some(addr.into());
        self
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Applies a config, loading its dataset file if one is named.
    pub fn with_config(mut self, config: &ServerConfig) -> Result<Self> {
        self.bind_address = Some(config.bind_address.clone());
        self.default_limit = Some(config.default_limit);
        if let Some(path) = &config.dataset {
            self.posts = Some(dataset::load(path)?);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Server> {
        let bind_address = self.bind_address.unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let default_limit = self.default_limit.unwrap_or(DEFAULT_LIMIT);
        anyhow::ensure!(default_limit > 0, "default_limit must be greater than zero");

        let records = self.posts.unwrap_or_else(dataset::builtin);
        info!("serving {} posts", records.len());
        let source = LocalSource::new(posts::schema(), records).with_sort_mode(SortMode::Collated);

        Ok(Server { bind_address, state: ServerState::new(source, default_limit) })
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new().route("/", get(hello)).route("/posts", get(get_posts).post(post_posts)).with_state(state)
}

async fn get_posts(State(state): State<ServerState>, Query(query): Query<PostsQuery>) -> Result<Json<PostsResponse>, ApiError> {
    run_query(&state, query).await
}

async fn post_posts(State(state): State<ServerState>, Json(query): Json<PostsQuery>) -> Result<Json<PostsResponse>, ApiError> {
    run_query(&state, query).await
}

async fn run_query(state: &ServerState, query: PostsQuery) -> Result<Json<PostsResponse>, ApiError> {
    let request = query.request(state.default_limit())?;
    debug!("posts query: {:?}", request);
    let page = state.posts().fetch(&request).await?;
    Ok(Json(page.into()))
}

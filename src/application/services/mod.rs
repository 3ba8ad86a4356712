// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::posts::PostCommandService,
        ports::{assets::AssetStore, security::TokenVerifier, time::Clock, util::SlugGenerator},
        queries::posts::PostQueryService,
    },
    domain::post::{PostReadRepository, PostWriteRepository, services::PostSlugService},
};

/// Composition root for the application layer. Every collaborator is
/// injected here; nothing reaches for ambient state.
pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    token_verifier: Arc<dyn TokenVerifier>,
}

impl ApplicationServices {
    pub fn new(
        post_write_repo: Arc<dyn PostWriteRepository>,
        post_read_repo: Arc<dyn PostReadRepository>,
        asset_store: Arc<dyn AssetStore>,
        token_verifier: Arc<dyn TokenVerifier>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_service = Arc::new(PostSlugService::new(
            Arc::clone(&post_read_repo),
            Arc::clone(&slugger),
        ));

        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&post_write_repo),
            Arc::clone(&post_read_repo),
            slug_service,
            Arc::clone(&asset_store),
            Arc::clone(&clock),
        ));

        let post_queries = Arc::new(PostQueryService::new(Arc::clone(&post_read_repo)));

        Self {
            post_commands,
            post_queries,
            token_verifier,
        }
    }

    pub fn token_verifier(&self) -> Arc<dyn TokenVerifier> {
        Arc::clone(&self.token_verifier)
    }
}

// tests/support/helpers.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use quill_core::application::dto::AuthenticatedUser;
use quill_core::application::ports::assets::ImagePayload;
use quill_core::application::services::ApplicationServices;
use quill_core::domain::post::{Post, PostContent, PostId, PostSlug, PostTitle};
use quill_core::domain::user::{Author, UserId, Username};
use quill_core::infrastructure::util::DefaultSlugGenerator;
use quill_core::presentation::http::{routes::build_router, state::HttpState};

use super::mocks::{InMemoryPostStore, RecordingAssetStore, StaticTokenVerifier, TickingClock};

/// Everything a test needs: the wired services plus handles on the doubles
/// so assertions can look inside the store and the asset host.
pub struct TestHarness {
    pub store: Arc<InMemoryPostStore>,
    pub assets: Arc<RecordingAssetStore>,
    pub services: Arc<ApplicationServices>,
}

pub fn author(id: i64, username: &str) -> Author {
    Author {
        id: UserId::new(id).unwrap(),
        username: Username::new(username).unwrap(),
        display_name: None,
        created_at: TickingClock::epoch() - Duration::days(30),
    }
}

pub fn actor(id: i64, username: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: username.to_string(),
    }
}

pub fn image(file_name: &str) -> ImagePayload {
    ImagePayload {
        file_name: file_name.to_string(),
        bytes: bytes::Bytes::from_static(&[0x89, 0x50, 0x4e, 0x47]),
    }
}

pub fn seeded_post(id: i64, title: &str, slug: &str, author_id: i64, at: DateTime<Utc>) -> Post {
    Post {
        id: PostId::new(id).unwrap(),
        title: PostTitle::new(title).unwrap(),
        slug: PostSlug::new(slug).unwrap(),
        content: PostContent::new(format!("body of {title}")).unwrap(),
        published: true,
        image: None,
        author_id: UserId::new(author_id).unwrap(),
        created_at: at,
        updated_at: at,
    }
}

/// Services wired against in-memory doubles. Users 1 (alice) and 2 (bob)
/// exist; tokens "alice-token" and "bob-token" authenticate them.
pub fn harness() -> TestHarness {
    let store = Arc::new(InMemoryPostStore::new());
    store.add_author(author(1, "alice"));
    store.add_author(author(2, "bob"));

    let assets = Arc::new(RecordingAssetStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new(vec![
        ("alice-token", actor(1, "alice")),
        ("bob-token", actor(2, "bob")),
    ]));

    let write_repo: Arc<dyn quill_core::domain::post::PostWriteRepository> = store.clone();
    let read_repo: Arc<dyn quill_core::domain::post::PostReadRepository> = store.clone();
    let asset_store: Arc<dyn quill_core::application::ports::assets::AssetStore> = assets.clone();

    let services = Arc::new(ApplicationServices::new(
        write_repo,
        read_repo,
        asset_store,
        verifier,
        Arc::new(TickingClock::new()),
        Arc::new(DefaultSlugGenerator),
    ));

    TestHarness {
        store,
        assets,
        services,
    }
}

pub fn make_test_router() -> (axum::Router, TestHarness) {
    let harness = harness();
    let state = HttpState {
        services: Arc::clone(&harness.services),
    };
    (build_router(state), harness)
}

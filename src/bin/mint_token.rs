//! Operator utility: mint a signed bearer token for an existing user.
//!
//! Usage: `mint_token <user-id> [ttl-seconds]` with `AUTH_TOKEN_SECRET` set.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use quill_core::infrastructure::security::token::sign_token;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let user_id: i64 = args
        .next()
        .context("usage: mint_token <user-id> [ttl-seconds]")?
        .parse()
        .context("user id must be an integer")?;
    let ttl_secs: i64 = match args.next() {
        Some(raw) => raw.parse().context("ttl must be an integer")?,
        None => 3600,
    };

    let secret = std::env::var("AUTH_TOKEN_SECRET").context("AUTH_TOKEN_SECRET is not set")?;
    let expires_at = Utc::now() + Duration::seconds(ttl_secs);

    println!("{}", sign_token(secret.as_bytes(), user_id, expires_at));
    Ok(())
}

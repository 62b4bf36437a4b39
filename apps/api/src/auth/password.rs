use anyhow::{Context, Result};
use tokio::sync::OnceCell;

const BCRYPT_COST: u32 = 10;

static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

/// Runs on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task panicked")?
        .context("password hashing failed")
}

/// Returns `false` for a wrong password and for a hash bcrypt cannot parse.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task panicked")?;
    Ok(verified.unwrap_or(false))
}

/// Runs a full bcrypt verification against a throwaway hash and discards the
/// result. Used when the username is unknown so that path costs the same as
/// a wrong password.
pub async fn verify_dummy(password: &str) -> Result<()> {
    let hash = DUMMY_HASH
        .get_or_try_init(|| hash_password("folio-dummy-password"))
        .await?;
    verify_password(password, hash).await?;
    Ok(())
}

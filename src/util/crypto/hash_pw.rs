use anyhow::Result;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};

pub async fn hash_pw(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut rand_08::rngs::OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|password_hash| password_hash.to_string())
            .map_err(|e| anyhow::anyhow!(e))
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::hash_pw;
    use crate::util::crypto::verify_pw::verify_pw;

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hash = hash_pw("correct horse battery".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_pw("correct horse battery", &hash).await.unwrap());
        assert!(!verify_pw("wrong horse battery", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_fresh_salt() {
        let a = hash_pw("password123".to_string()).await.unwrap();
        let b = hash_pw("password123".to_string()).await.unwrap();
        assert_ne!(a, b);
    }
}

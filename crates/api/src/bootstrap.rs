//! First-run staff account.
//!
//! A fresh database has no principal who can reach the admin area. When
//! configured, startup creates one `SUPERADMIN` with a password.

use alumni_core::roles::Role;
use alumni_db::models::user::{CreateUser, User};
use alumni_db::Store;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};

const DEFAULT_BOOTSTRAP_NAME: &str = "Admin";

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl BootstrapAdmin {
    /// Load the account from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `BOOTSTRAP_ADMIN_EMAIL`    | no       | --      |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | no       | --      |
    /// | `BOOTSTRAP_ADMIN_NAME`     | no       | `Admin` |
    ///
    /// Returns `None` unless both email and password are set.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            email: var("BOOTSTRAP_ADMIN_EMAIL")?.trim().to_lowercase(),
            password: var("BOOTSTRAP_ADMIN_PASSWORD")?,
            name: var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| DEFAULT_BOOTSTRAP_NAME.into()),
        })
    }
}

/// Create the bootstrap account unless a principal with its email exists.
///
/// Returns the new account, or `None` if nothing was created.
pub async fn ensure_admin(store: &dyn Store, admin: &BootstrapAdmin) -> AppResult<Option<User>> {
    if store.find_user_by_email(&admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Bootstrap admin already exists");
        return Ok(None);
    }

    validate_password_strength(&admin.password).map_err(AppError::validation)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = store
        .create_user(
            &CreateUser {
                name: Some(admin.name.clone()),
                email: admin.email.clone(),
                password_hash: Some(password_hash),
                role: Role::Superadmin,
                is_profile_complete: true,
                image: None,
            },
            None,
        )
        .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use alumni_db::MemoryStore;

    use super::*;
    use crate::auth::password::verify_password;

    fn admin() -> BootstrapAdmin {
        BootstrapAdmin {
            email: "root@example.org".into(),
            password: "change-me-now".into(),
            name: "Root".into(),
        }
    }

    #[tokio::test]
    async fn creates_superadmin_once() {
        let store = MemoryStore::new();

        let created = ensure_admin(&store, &admin()).await.unwrap().unwrap();
        assert_eq!(created.role, Role::Superadmin);
        assert!(created.is_profile_complete);
        let hash = created.password_hash.as_deref().unwrap();
        assert!(verify_password("change-me-now", hash).unwrap());

        assert!(ensure_admin(&store, &admin()).await.unwrap().is_none());
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let store = MemoryStore::new();
        let weak = BootstrapAdmin {
            password: "short".into(),
            ..admin()
        };
        assert!(ensure_admin(&store, &weak).await.is_err());
        assert!(store.list_users().await.unwrap().is_empty());
    }
}

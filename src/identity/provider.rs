//! Resolves a bearer token to a role-tagged [`Caller`].

use std::sync::Arc;

use super::token::{Claims, JwtConfig, issue_token, validate_token};
use crate::domain::{Caller, Role, UserId};
use crate::error::BookingError;
use crate::persistence::PartyDirectory;

/// Identity & role provider.
///
/// Verifies tokens with the configured [`JwtConfig`] and looks up the
/// caller's domain profile in the [`PartyDirectory`].
#[derive(Debug, Clone)]
pub struct IdentityProvider {
    jwt: JwtConfig,
    directory: Arc<dyn PartyDirectory>,
}

impl IdentityProvider {
    /// Creates a provider over the given signing config and directory.
    #[must_use]
    pub fn new(jwt: JwtConfig, directory: Arc<dyn PartyDirectory>) -> Self {
        Self { jwt, directory }
    }

    /// Verifies `token` and resolves it to a [`Caller`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] for an invalid token and
    /// [`BookingError::Forbidden`] when the claimed role has no profile.
    pub async fn resolve(&self, token: &str) -> Result<Caller, BookingError> {
        let claims = validate_token(token, &self.jwt)?;
        self.resolve_claims(&claims).await
    }

    /// Resolves already-verified claims to a [`Caller`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] when the claimed role has no
    /// matching profile in the directory.
    pub async fn resolve_claims(&self, claims: &Claims) -> Result<Caller, BookingError> {
        let user_id = UserId::from_uuid(claims.sub);
        let Some(role) = Role::from_claim(&claims.role) else {
            tracing::debug!(%user_id, role = %claims.role, "caller holds no booking role");
            return Ok(Caller::Unprivileged { user_id });
        };

        let missing = || {
            BookingError::Forbidden(format!(
                "no {} profile is registered for this account",
                role.as_str()
            ))
        };

        let caller = match role {
            Role::Client => {
                let client = self
                    .directory
                    .client_for_user(user_id)
                    .await?
                    .ok_or_else(missing)?;
                Caller::Client {
                    user_id,
                    client_id: client.id,
                }
            }
            Role::TroupeLeader => {
                let leader = self
                    .directory
                    .troupe_leader_for_user(user_id)
                    .await?
                    .ok_or_else(missing)?;
                Caller::TroupeLeader {
                    user_id,
                    leader_id: leader.id,
                    troupe_id: leader.troupe_id,
                }
            }
            Role::Clown => {
                let clown = self
                    .directory
                    .clown_for_user(user_id)
                    .await?
                    .ok_or_else(missing)?;
                Caller::Clown {
                    user_id,
                    clown_id: clown.id,
                    troupe_id: clown.troupe_id,
                }
            }
        };
        Ok(caller)
    }

    /// Mints a token for `user_id` with the given role name.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Internal`] if signing fails.
    pub fn issue_token(&self, user_id: UserId, role: &str) -> Result<String, BookingError> {
        issue_token(user_id, role, &self.jwt)
    }
}

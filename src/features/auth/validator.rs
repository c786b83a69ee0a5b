use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

/// Namespace under which the identity provider puts application claims
const CUSTOM_CLAIMS_NAMESPACE: &str = "https://kguardian.app/claims";

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(rename = "accountId", default)]
    account_id: Option<String>,
    #[serde(rename = "sessionUid", default)]
    session_uid: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    fn custom_claims(&self) -> Option<CustomClaims> {
        self.extra
            .get(CUSTOM_CLAIMS_NAMESPACE)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    fn into_user(self) -> Result<AuthenticatedUser, AppError> {
        // Token exchange tokens carry no 'kind'
        if let Some(kind) = &self.kind {
            if kind != "AccessToken" {
                return Err(AppError::Auth("Token is not an access token".to_string()));
            }
        }

        let roles = self.custom_claims().map(|c| c.roles).unwrap_or_default();
        let account_id = self.account_id.unwrap_or_else(|| self.sub.clone());

        Ok(AuthenticatedUser {
            account_id,
            sub: self.sub,
            session_uid: self.session_uid,
            roles,
        })
    }
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        token_data.claims.into_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(value: serde_json::Value) -> Claims {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_claims_into_user_reads_roles_from_namespace() {
        let user = claims(serde_json::json!({
            "sub": "user-1",
            "kind": "AccessToken",
            "sessionUid": "session-1",
            "https://kguardian.app/claims": { "roles": ["security_officer"] }
        }))
        .into_user()
        .unwrap();

        assert_eq!(user.sub, "user-1");
        assert_eq!(user.account_id, "user-1");
        assert_eq!(user.session_uid.as_deref(), Some("session-1"));
        assert!(user.has_staff_access());
    }

    #[test]
    fn test_claims_into_user_without_custom_claims() {
        let user = claims(serde_json::json!({ "sub": "user-2", "accountId": "acct-2" }))
            .into_user()
            .unwrap();

        assert_eq!(user.account_id, "acct-2");
        assert!(user.roles.is_empty());
        assert!(!user.has_staff_access());
    }

    #[test]
    fn test_claims_into_user_rejects_non_access_tokens() {
        let result = claims(serde_json::json!({ "sub": "user-3", "kind": "IdToken" })).into_user();
        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}

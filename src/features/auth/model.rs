use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_SECURITY_OFFICER, ROLE_SUPER_ADMIN};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub account_id: String,
    pub sub: String,
    /// Session UID (only present for interactive OIDC flows, not for token exchange)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_uid: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPER_ADMIN)
    }

    pub fn is_security_officer(&self) -> bool {
        self.has_role(ROLE_SECURITY_OFFICER)
    }

    /// Staff can read any incident, not only their own
    pub fn has_staff_access(&self) -> bool {
        self.is_super_admin() || self.is_security_officer()
    }

    /// Whether this user may read an incident reported by `reporter`
    pub fn can_view_incident_of(&self, reporter: &str) -> bool {
        self.sub == reporter || self.has_staff_access()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}

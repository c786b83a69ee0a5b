use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::AuthenticatedUser;

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub account_id: String,
    pub sub: String,
    pub session_uid: Option<String>,
    pub roles: Vec<String>,
    /// Whether the user can read every incident (security staff)
    pub is_staff: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        let is_staff = user.has_staff_access();
        Self {
            account_id: user.account_id,
            sub: user.sub,
            session_uid: user.session_uid,
            roles: user.roles,
            is_staff,
        }
    }
}

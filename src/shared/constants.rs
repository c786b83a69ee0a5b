// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - full access
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Security officer role - can read every incident on campus
pub const ROLE_SECURITY_OFFICER: &str = "security_officer";

// =============================================================================
// MEDIA
// =============================================================================

/// Maximum evidence media size in bytes (10MB)
pub const MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024;

/// Request body cap on routes taking media. Parts over `MAX_MEDIA_SIZE`
/// are drained and rejected as too large, up to this size.
pub const MAX_UPLOAD_BODY_SIZE: usize = 5 * MAX_MEDIA_SIZE;

// =============================================================================
// DASHBOARD
// =============================================================================

/// Number of locations shown in the top-locations chart
pub const TOP_LOCATIONS_LIMIT: usize = 5;

/// Number of rows in the recent incidents table
pub const RECENT_INCIDENTS_LIMIT: usize = 5;

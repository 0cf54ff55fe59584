pub mod claims;
pub mod extractors;
pub mod jwt;
pub mod password;
pub mod utils;

pub use claims::{CallerIdentity, Claims, RefreshClaims};
pub use extractors::{AuthenticatedUser, MaybeAuthenticated};
pub use jwt::JwtService;
pub use utils::require_admin;

pub mod claims;
pub mod extractor;
pub mod jwt;

pub use claims::{Claims, UserRole};
pub use extractor::{require_teacher, AuthenticatedUser};
pub use jwt::JwtService;

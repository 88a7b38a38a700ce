//! Authentication primitives: JWT issuance/verification and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtManager};
pub use password::{hash_password, verify_password};

//! Authentication and session management

pub mod middleware;
pub mod models;
pub mod password;
pub mod secret;
pub mod session;
pub mod token;

pub use middleware::CurrentUser;
pub use models::{NewUser, User, UserInfo};
pub use secret::SecretRotator;
pub use session::SessionManager;
pub use token::{Claims, TokenCodec};

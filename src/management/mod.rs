mod auth;

pub use auth::AccessToken;
pub use auth::TOKEN_SAFETY_MARGIN_MS;
pub use auth::TokenManager;

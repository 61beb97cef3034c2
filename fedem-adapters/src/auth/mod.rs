pub mod jwt;

pub use jwt::{
    AccessTokenClaims, JwtConfig, TokenAuthError, authenticate_request, extract_bearer_token,
    generate_access_token, validate_access_token,
};

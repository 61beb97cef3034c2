use chrono::Utc;
use fedem_core::{AuthenticatedUser, Email, User, Username};
use http::{HeaderMap, header::AUTHORIZATION};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub ttl_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Claims carried by the short-lived access token. Validity is proven by
/// signature and expiry alone; nothing is tracked server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: Uuid,
    pub email: String,
    pub username: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl TryFrom<AccessTokenClaims> for AuthenticatedUser {
    type Error = TokenAuthError;

    fn try_from(claims: AccessTokenClaims) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(claims.email))
            .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;
        let username = Username::parse(claims.username)
            .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email,
            username,
        })
    }
}

/// Create a signed access token for this user.
pub fn generate_access_token(user: &User, config: &JwtConfig) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.ttl_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create token duration".to_string()),
    )?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let claims = AccessTokenClaims {
        sub: user.id,
        email: user.email.as_ref().expose_secret().clone(),
        username: user.username.as_ref().to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now.timestamp(),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.expose_secret().as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

/// Check signature, expiry, issuer and audience against the configured
/// values.
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AccessTokenClaims, TokenAuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)
}

/// Pull the bearer token out of the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| TokenAuthError::InvalidToken)?;
    value
        .strip_prefix("Bearer ")
        .ok_or(TokenAuthError::InvalidToken)
}

/// Bearer authentication for protected routes: extract, validate, and turn
/// the claims into an [`AuthenticatedUser`].
pub fn authenticate_request(
    headers: &HeaderMap,
    config: &JwtConfig,
) -> Result<AuthenticatedUser, TokenAuthError> {
    let token = extract_bearer_token(headers)?;
    let claims = validate_access_token(token, config)?;
    AuthenticatedUser::try_from(claims)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use http::HeaderValue;

    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: Secret::from("secret".to_string()),
            ttl_seconds: 900,
            issuer: "SlimPath".to_string(),
            audience: "user".to_string(),
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: Username::parse("alice".to_string()).unwrap(),
            email: Email::try_from(Secret::from("alice@x.com".to_string())).unwrap(),
            is_authorized: false,
            is_admin: false,
            refresh_token: None,
            refresh_token_expiry: None,
            reset_password_token: None,
            reset_password_expiry: None,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_to_the_same_identity() {
        let config = jwt_config();
        let user = test_user();

        let token = generate_access_token(&user, &config).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = validate_access_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn expiry_is_fifteen_minutes_out() {
        let config = jwt_config();
        let token = generate_access_token(&test_user(), &config).unwrap();
        let claims = validate_access_token(&token, &config).unwrap();

        let expected = Utc::now() + Duration::seconds(900);
        assert!((claims.exp - expected.timestamp()).abs() <= 2);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = jwt_config();
        let token = generate_access_token(&test_user(), &config).unwrap();

        let other = JwtConfig {
            secret: Secret::from("other".to_string()),
            ..config
        };
        assert!(matches!(
            validate_access_token(&token, &other),
            Err(TokenAuthError::TokenError(_))
        ));
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let config = jwt_config();
        let token = generate_access_token(&test_user(), &config).unwrap();

        let other = JwtConfig {
            audience: "operator".to_string(),
            ..config
        };
        assert!(validate_access_token(&token, &other).is_err());
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(TokenAuthError::MissingToken)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(TokenAuthError::InvalidToken)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn authenticate_request_yields_the_token_identity() {
        let config = jwt_config();
        let user = test_user();
        let token = generate_access_token(&user, &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let authenticated = authenticate_request(&headers, &config).unwrap();
        assert_eq!(authenticated.user_id, user.id);
    }
}

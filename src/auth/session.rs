use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::users;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Signing material and lifetime for session tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    /// Mark the cookie `Secure` (production only, so local http still works).
    pub secure_cookie: bool,
}

impl From<&AppConfig> for SessionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            secret: config.auth_secret.clone(),
            ttl_hours: config.session_ttl_hours,
            secure_cookie: config.is_production(),
        }
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id.
    pub sub: String,
    pub email: String,
    /// `ADMIN` or `USER`.
    pub role: String,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
}

/// Sign an HS256 session token for `user`.
pub fn issue_token(
    user: &users::Model,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        exp: now + config.ttl_hours * 3600,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded claims.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Candidate session tokens in the order they are tried: the `session`
/// cookie first, then a bearer header.
pub fn tokens_from_request(req: &HttpRequest) -> Vec<String> {
    let cookie = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    cookie.into_iter().chain(bearer).collect()
}

/// The first candidate token that validates, as claims.
pub fn claims_from_request(req: &HttpRequest, config: &SessionConfig) -> Option<Claims> {
    tokens_from_request(req)
        .into_iter()
        .find_map(|token| match validate_token(&token, config) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                None
            }
        })
}

pub fn session_cookie(token: &str, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookie)
        .max_age(time::Duration::hours(config.ttl_hours))
        .finish()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::Roles;
    use actix_web::test::TestRequest;

    fn config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx".into(),
            ttl_hours: 1,
            secure_cookie: false,
        }
    }

    fn admin() -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: "user-1".into(),
            email: "owner@example.com".into(),
            name: Some("Owner".into()),
            password: "hash".into(),
            role: Roles::Admin,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_carries_role_and_identity() {
        let token = issue_token(&admin(), &config()).unwrap();
        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token(&admin(), &config()).unwrap();
        let other = SessionConfig {
            secret: "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx".into(),
            ..config()
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = SessionConfig {
            ttl_hours: -1,
            ..config()
        };
        let token = issue_token(&admin(), &expired).unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn cookie_is_tried_before_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(tokens_from_request(&req), vec!["from-cookie", "from-header"]);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(tokens_from_request(&req), vec!["from-header"]);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        assert!(tokens_from_request(&req).is_empty());
    }

    #[test]
    fn stale_cookie_falls_back_to_bearer_header() {
        let token = issue_token(&admin(), &config()).unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "stale"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();

        let claims = claims_from_request(&req, &config()).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn no_valid_token_yields_no_claims() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "stale"))
            .insert_header(("Authorization", "Bearer also-stale"))
            .to_http_request();
        assert!(claims_from_request(&req, &config()).is_none());
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("tok", &config());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));

        let cleared = clear_session_cookie();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
    }
}

//! Logged-in member extraction.
//!
//! Tokens are issued and verified by the authentication layer in front of
//! this service. What reaches us is `Authorization: Bearer <payload>`, where
//! the payload is the base64-encoded JSON of the member.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::favorites::MemberId;

use super::routes::AppError;

/// Errors reading the member from a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    Missing,

    #[error("Authorization header is not a bearer token")]
    NotBearer,

    #[error("token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is not a member: {0}")]
    Payload(#[from] serde_json::Error),
}

/// The member making the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginMember {
    pub id: MemberId,
    pub email: String,
    pub age: i64,
}

impl LoginMember {
    /// Decode a member from an `Authorization` header value.
    pub fn from_authorization(value: &str) -> Result<Self, AuthError> {
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::NotBearer)?;

        let payload = STANDARD.decode(token)?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// Encode this member as a bearer header value.
    pub fn to_authorization(&self) -> Result<String, AuthError> {
        let payload = serde_json::to_vec(self)?;
        Ok(format!("Bearer {}", STANDARD.encode(payload)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for LoginMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::Missing)?
            .to_str()
            .map_err(|_| AuthError::NotBearer)?;

        Ok(LoginMember::from_authorization(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> LoginMember {
        LoginMember {
            id: 1,
            email: "test@test.com".to_string(),
            age: 10,
        }
    }

    #[test]
    fn decodes_bearer_payload() {
        let header = member().to_authorization().unwrap();
        assert!(header.starts_with("Bearer "));
        assert_eq!(LoginMember::from_authorization(&header).unwrap(), member());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = LoginMember::from_authorization("Basic dXNlcjpwYXNz").unwrap_err();
        assert!(matches!(err, AuthError::NotBearer));

        let err = LoginMember::from_authorization("Bearer ").unwrap_err();
        assert!(matches!(err, AuthError::NotBearer));
    }

    #[test]
    fn rejects_bad_base64() {
        let err = LoginMember::from_authorization("Bearer not*base64").unwrap_err();
        assert!(matches!(err, AuthError::Encoding(_)));
    }

    #[test]
    fn rejects_non_member_payload() {
        let header = format!("Bearer {}", STANDARD.encode(br#"{"sub": "x"}"#));
        let err = LoginMember::from_authorization(&header).unwrap_err();
        assert!(matches!(err, AuthError::Payload(_)));
    }

    #[tokio::test]
    async fn extracts_from_request() {
        let header = member().to_authorization().unwrap();
        let request = axum::http::Request::builder()
            .header(header::AUTHORIZATION, header)
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let extracted = LoginMember::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, member());
    }

    #[tokio::test]
    async fn missing_header_rejected() {
        let request = axum::http::Request::builder().body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let err = LoginMember::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }
}

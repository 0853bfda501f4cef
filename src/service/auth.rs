//! Bearer-token check against the shared client id
//!
//! Clients send `Authorization: Bearer <base64(client_id)>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingHeader,

    #[error("Not authenticated")]
    UnsupportedScheme,

    #[error("Invalid Authorization header")]
    MalformedHeader,

    #[error("Invalid bearer token")]
    InvalidToken,
}

impl AuthError {
    /// HTTP status for the rejection
    pub fn status(self) -> u16 {
        match self {
            AuthError::MissingHeader | AuthError::UnsupportedScheme => 401,
            AuthError::MalformedHeader | AuthError::InvalidToken => 400,
        }
    }

    /// Whether the response should carry a `WWW-Authenticate` challenge
    pub fn challenges(self) -> bool {
        self.status() == 401
    }
}

/// Authorization header value a client should send
pub fn bearer_header(client_id: &str) -> String {
    format!("Bearer {}", STANDARD.encode(client_id))
}

/// Check an `Authorization` header value
pub fn authenticate(header: Option<&str>, client_id: &str) -> Result<(), AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;

    let mut parts = header.split(' ');
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedHeader);
    };
    if scheme != "Bearer" {
        return Err(AuthError::UnsupportedScheme);
    }

    let decoded = STANDARD.decode(token).map_err(|_| AuthError::MalformedHeader)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader)?;
    if decoded != client_id {
        return Err(AuthError::InvalidToken);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token() {
        let header = bearer_header("shared-secret");
        assert_eq!(header, "Bearer c2hhcmVkLXNlY3JldA==");
        assert_eq!(authenticate(Some(&header), "shared-secret"), Ok(()));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(authenticate(None, "s"), Err(AuthError::MissingHeader));
        assert_eq!(
            authenticate(Some("Basic dXNlcjpwdw=="), "s"),
            Err(AuthError::UnsupportedScheme)
        );
        assert_eq!(authenticate(Some("Bearer"), "s"), Err(AuthError::MalformedHeader));
        assert_eq!(authenticate(Some("Bearer a b"), "s"), Err(AuthError::MalformedHeader));
        assert_eq!(authenticate(Some("Bearer !!notbase64"), "s"), Err(AuthError::MalformedHeader));
        assert_eq!(
            authenticate(Some(&bearer_header("other")), "shared-secret"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_raw_secret_is_not_a_token() {
        // The token must be the encoded id, not the id itself
        assert!(authenticate(Some("Bearer shared-secret"), "shared-secret").is_err());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingHeader.status(), 401);
        assert!(AuthError::UnsupportedScheme.challenges());
        assert_eq!(AuthError::InvalidToken.status(), 400);
        assert!(!AuthError::MalformedHeader.challenges());
    }
}

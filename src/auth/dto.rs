use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for email login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for re-checking the caller's current password.
#[derive(Debug, Deserialize)]
pub struct CheckPasswordRequest {
    pub password: String,
}

/// Request body for a password reset by an authenticated caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub email: String,
    pub token: String,
}

/// Token introspection payload for the `/me` endpoint.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_password_request_uses_camel_case() {
        let req: ResetPasswordRequest = serde_json::from_str(
            r#"{"currentPassword":"old-pw","newPassword":"new-pw"}"#,
        )
        .unwrap();
        assert_eq!(req.current_password, "old-pw");
        assert_eq!(req.new_password, "new-pw");
    }

    #[test]
    fn auth_response_serializes_email_and_token() {
        let json = serde_json::to_string(&AuthResponse {
            email: "kid@example.com".into(),
            token: "jwt".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"email":"kid@example.com","token":"jwt"}"#);
    }
}

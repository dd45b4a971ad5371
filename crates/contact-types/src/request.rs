//! Contact request as sent by the form and as received by the relay.

use serde::{Deserialize, Serialize};

use crate::InputError;

/// User-editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete contact request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(alias = "verificationToken")]
    pub token: String,
}

/// Relay-side parse target. Every field is optional so that an incomplete
/// body reaches the missing-input path instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Accepted spelling of `token`. When both are sent, a non-empty `token` wins.
    #[serde(default, rename = "verificationToken")]
    pub verification_token: Option<String>,
}

impl ContactSubmission {
    /// Absent and empty-string fields are both treated as missing.
    pub fn into_request(self) -> Result<ContactRequest, InputError> {
        fn required(value: Option<String>, field: &'static str) -> Result<String, InputError> {
            value
                .filter(|v| !v.is_empty())
                .ok_or(InputError::Missing(field))
        }

        Ok(ContactRequest {
            name: required(self.name, "name")?,
            email: required(self.email, "email")?,
            message: required(self.message, "message")?,
            token: required(
                self.token
                    .filter(|t| !t.is_empty())
                    .or(self.verification_token),
                "token",
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ContactSubmission {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_submission_converts() {
        let request = parse(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello",
            "token": "valid-token"
        }))
        .into_request()
        .unwrap();
        assert_eq!(request.name, "Ada");
        assert_eq!(request.token, "valid-token");
    }

    #[test]
    fn test_verification_token_alias() {
        let request = parse(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello",
            "verificationToken": "abc"
        }))
        .into_request()
        .unwrap();
        assert_eq!(request.token, "abc");
    }

    #[test]
    fn test_both_token_spellings_prefer_token() {
        let request = parse(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello",
            "token": "primary",
            "verificationToken": "secondary"
        }))
        .into_request()
        .unwrap();
        assert_eq!(request.token, "primary");

        let request = parse(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello",
            "token": "",
            "verificationToken": "secondary"
        }))
        .into_request()
        .unwrap();
        assert_eq!(request.token, "secondary");
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let full = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello",
            "token": "t"
        });
        for field in ["name", "email", "message", "token"] {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            let err = parse(body).into_request().unwrap_err();
            assert_eq!(err, InputError::Missing(field));
        }
    }

    #[test]
    fn test_empty_string_is_missing() {
        let err = parse(json!({
            "name": "",
            "email": "ada@example.com",
            "message": "Hello",
            "token": "t"
        }))
        .into_request()
        .unwrap_err();
        assert_eq!(err, InputError::Missing("name"));
    }

    #[test]
    fn test_request_serializes_token_field() {
        let request = ContactRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
            token: "t".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["token"], "t");
        assert!(value.get("verificationToken").is_none());
    }
}

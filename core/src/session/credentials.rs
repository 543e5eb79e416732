use std::fmt;

use reqwest::RequestBuilder;

/// Credentials attached to a session.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    Anonymous,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        username: String,
        access_token: String,
    },
}

impl Credentials {
    pub fn basic(username: &str, password: &str) -> Self {
        Credentials::Basic {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn bearer(username: &str, access_token: &str) -> Self {
        Credentials::Bearer {
            username: username.to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Credentials::Anonymous => None,
            Credentials::Basic { username, .. } | Credentials::Bearer { username, .. } => {
                Some(username.as_str())
            }
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credentials::Anonymous)
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Anonymous => request,
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::Bearer { access_token, .. } => request.bearer_auth(access_token),
        }
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Bearer { username, .. } => f
                .debug_struct("Bearer")
                .field("username", username)
                .field("access_token", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let basic = format!("{:?}", Credentials::basic("admin", "hunter2"));
        let bearer = format!("{:?}", Credentials::bearer("admin", "eyJhbGciOi"));

        assert!(basic.contains("admin"));
        assert!(!basic.contains("hunter2"));
        assert!(!bearer.contains("eyJhbGciOi"));
    }

    #[test]
    fn apply_sets_authorization_header() {
        let client = reqwest::Client::new();
        let cases = vec![
            (Credentials::basic("admin", "secret"), Some("Basic YWRtaW46c2VjcmV0")),
            (Credentials::bearer("admin", "token123"), Some("Bearer token123")),
            (Credentials::Anonymous, None),
        ];

        for (credentials, expected) in cases {
            // Act
            let request = credentials
                .apply(client.get("https://cloud.example.com"))
                .build()
                .unwrap();

            // Assert
            let header = request
                .headers()
                .get("Authorization")
                .map(|value| value.to_str().unwrap().to_string());
            assert_eq!(header.as_deref(), expected, "credentials {:?}", credentials);
        }
    }
}

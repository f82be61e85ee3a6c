//! Login credentials and where they come from.
//!
//! A [`Credentials`] value is checked when it is built: the username is
//! non-empty and the server address parses as a URL with a host. The
//! collaborator only ever sees well-formed input.
//!
//! Environment variables:
//!
//! | Variable          | Field      |
//! |-------------------|------------|
//! | `FIDGET_USERNAME` | username   |
//! | `FIDGET_PASSWORD` | password   |
//! | `FIDGET_SERVER`   | server URL |

use std::fmt;

use url::Url;

use crate::CredentialsError;

/// Username, password, and the server to log in to.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    server: Url,
}

impl Credentials {
    pub const USERNAME_VAR: &'static str = "FIDGET_USERNAME";
    pub const PASSWORD_VAR: &'static str = "FIDGET_PASSWORD";
    pub const SERVER_VAR: &'static str = "FIDGET_SERVER";

    /// Builds credentials from explicit values.
    ///
    /// A bare host such as `s1.example.net` is accepted and read as
    /// `https://s1.example.net/`.
    ///
    /// # Errors
    /// - [`CredentialsError::Empty`] if `username` is empty
    /// - [`CredentialsError::InvalidServerUrl`] if `server` doesn't parse
    ///   or has no host
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        server: &str,
    ) -> Result<Self, CredentialsError> {
        let username = username.into();
        if username.is_empty() {
            return Err(CredentialsError::Empty("username"));
        }

        Ok(Self {
            username,
            password: password.into(),
            server: parse_server(server)?,
        })
    }

    /// Reads credentials from the `FIDGET_*` environment variables.
    ///
    /// # Errors
    /// [`CredentialsError::Missing`] for an unset variable, otherwise as
    /// [`Credentials::new`].
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Credentials::from_env`], with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).ok_or(CredentialsError::Missing(name));

        let username = var(Self::USERNAME_VAR)?;
        let password = var(Self::PASSWORD_VAR)?;
        let server = var(Self::SERVER_VAR)?;
        Self::new(username, password, &server)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn server(&self) -> &Url {
        &self.server
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server", &self.server.as_str())
            .finish()
    }
}

fn parse_server(address: &str) -> Result<Url, CredentialsError> {
    let invalid = |source: url::ParseError| CredentialsError::InvalidServerUrl {
        address: address.to_owned(),
        source,
    };

    let url = match Url::parse(address) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{address}")).map_err(invalid)?
        }
        Err(e) => return Err(invalid(e)),
    };

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(url::ParseError::EmptyHost));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_new_bare_host_gets_https_scheme() {
        let credentials = Credentials::new("alice", "secret", "s1.example.net").unwrap();
        assert_eq!(credentials.server().as_str(), "https://s1.example.net/");
    }

    #[test]
    fn test_new_keeps_explicit_scheme() {
        let credentials =
            Credentials::new("alice", "secret", "http://localhost:8080").unwrap();
        assert_eq!(credentials.server().scheme(), "http");
        assert_eq!(credentials.server().port(), Some(8080));
    }

    #[test]
    fn test_new_empty_username_returns_empty() {
        let err = Credentials::new("", "secret", "s1.example.net").unwrap_err();
        assert!(matches!(err, CredentialsError::Empty("username")));
    }

    #[test]
    fn test_new_unparseable_server_returns_invalid_url() {
        let err = Credentials::new("alice", "secret", "https://").unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidServerUrl { .. }));
    }

    #[test]
    fn test_from_lookup_all_present_builds_credentials() {
        let lookup = lookup_from(&[
            ("FIDGET_USERNAME", "alice"),
            ("FIDGET_PASSWORD", "secret"),
            ("FIDGET_SERVER", "s1.example.net"),
        ]);
        let credentials = Credentials::from_lookup(lookup).unwrap();
        assert_eq!(credentials.username(), "alice");
        assert_eq!(credentials.password(), "secret");
    }

    #[test]
    fn test_from_lookup_missing_password_names_variable() {
        let lookup = lookup_from(&[
            ("FIDGET_USERNAME", "alice"),
            ("FIDGET_SERVER", "s1.example.net"),
        ]);
        let err = Credentials::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, CredentialsError::Missing("FIDGET_PASSWORD")));
        assert_eq!(
            err.to_string(),
            "environment variable FIDGET_PASSWORD is not set"
        );
    }

    #[test]
    fn test_debug_never_prints_password() {
        let credentials = Credentials::new("alice", "hunter2", "s1.example.net").unwrap();
        let debug = format!("{credentials:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}

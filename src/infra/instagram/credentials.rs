//! Session credentials forwarded to Instagram.
//!
//! The values come from a logged-in browser session and are opaque to this
//! crate: they are joined into the `Cookie` header verbatim and never
//! interpreted.

use schemars::JsonSchema;
use serde::Deserialize;

use super::error::{InstagramError, Result};

/// The session cookies Instagram expects on GraphQL requests.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    #[serde(default)]
    pub sessionid: Option<String>,
    #[serde(default)]
    pub ds_user_id: Option<String>,
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub csrftoken: Option<String>,
}

impl Credentials {
    #[allow(dead_code)]
    pub fn new(
        sessionid: impl Into<String>,
        ds_user_id: impl Into<String>,
        mid: impl Into<String>,
        csrftoken: impl Into<String>,
    ) -> Self {
        Self {
            sessionid: Some(sessionid.into()),
            ds_user_id: Some(ds_user_id.into()),
            mid: Some(mid.into()),
            csrftoken: Some(csrftoken.into()),
        }
    }

    /// Fail with the first missing cookie name, if any.
    pub fn ensure_complete(&self) -> Result<()> {
        for (name, value) in self.entries() {
            if value.is_none() {
                return Err(InstagramError::MissingCredential(name));
            }
        }
        Ok(())
    }

    /// `Cookie` header value, in the order Instagram's own web client sends.
    /// Absent cookies are sent empty.
    pub fn cookie_header(&self) -> String {
        self.entries()
            .map(|(name, value)| format!("{name}={}", value.map_or("", String::as_str)))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn entries(&self) -> impl Iterator<Item = (&'static str, Option<&String>)> {
        [
            ("sessionid", self.sessionid.as_ref()),
            ("ds_user_id", self.ds_user_id.as_ref()),
            ("mid", self.mid.as_ref()),
            ("csrftoken", self.csrftoken.as_ref()),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_joins_all_cookies_in_order() {
        let credentials = Credentials::new("s3ss", "1234", "m1d", "csrf");
        assert_eq!(
            credentials.cookie_header(),
            "sessionid=s3ss; ds_user_id=1234; mid=m1d; csrftoken=csrf"
        );
    }

    #[test]
    fn absent_cookies_are_sent_empty() {
        let credentials = Credentials {
            sessionid: Some("s3ss".to_string()),
            ..Credentials::default()
        };
        assert_eq!(
            credentials.cookie_header(),
            "sessionid=s3ss; ds_user_id=; mid=; csrftoken="
        );
    }

    #[test]
    fn ensure_complete_names_the_first_missing_cookie() {
        let credentials = Credentials {
            sessionid: Some("s3ss".to_string()),
            ds_user_id: None,
            mid: Some("m1d".to_string()),
            csrftoken: Some("csrf".to_string()),
        };
        let err = credentials.ensure_complete().unwrap_err();
        assert!(matches!(
            err,
            InstagramError::MissingCredential("ds_user_id")
        ));
    }

    #[test]
    fn complete_credentials_pass_validation() {
        assert!(Credentials::new("a", "b", "c", "d").ensure_complete().is_ok());
    }
}

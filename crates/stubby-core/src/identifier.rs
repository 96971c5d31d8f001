use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A short identifier used as the last path segment of a redirect URL.
///
/// Identifiers are produced by a generator and checked for uniqueness by the
/// repository; the type itself does not validate its contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins the identifier onto `base_url` with exactly one `/` in between.
    ///
    /// ```
    /// use stubby_core::Identifier;
    ///
    /// let id = Identifier::new("abc12");
    /// assert_eq!(id.to_url("http://localhost:8888/r/"), "http://localhost:8888/r/abc12");
    /// ```
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

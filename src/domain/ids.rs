//! Domain identifier types with validation
//!
//! Newtype wrappers keep the service's job identifiers and the exporting
//! user's identifier from being mixed up with arbitrary strings.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier the remote service assigns to an import job
///
/// # Examples
///
/// ```
/// use depot::domain::ids::JobId;
/// use std::str::FromStr;
///
/// let job_id = JobId::from_str("J1").unwrap();
/// assert_eq!(job_id.as_str(), "J1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Creates a new JobId, rejecting blank identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the job ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Numeric identifier of the user the dataset is exported for
///
/// The workflow environment only hands over the user's e-mail address, which
/// carries the id as a numeric suffix on the local part:
/// `<name>.<digits>@<domain>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Extracts the user id from an e-mail address
    ///
    /// # Examples
    ///
    /// ```
    /// use depot::domain::ids::UserId;
    ///
    /// let user = UserId::from_email("jdoe.67546@example.org").unwrap();
    /// assert_eq!(user.as_str(), "67546");
    /// assert!(UserId::from_email("jdoe@example.org").is_err());
    /// ```
    pub fn from_email(email: &str) -> Result<Self, String> {
        let email = email.trim();
        let re = Regex::new(r"^.+\.(\d+)@[^@]+$").unwrap();
        match re.captures(email) {
            Some(cap) => Ok(Self(cap[1].to_string())),
            None => Err(format!(
                "The user email {email} is not valid for the use of this tool"
            )),
        }
    }

    /// Returns the user id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! AWS access key credentials
//!
//! Keys can be given explicitly or resolved through the standard AWS chain
//! (environment variables, `~/.aws/config` and `~/.aws/credentials` profiles,
//! SSO, container and instance roles), which `aws-config` walks for us.

use std::fmt;

use aws_credential_types::provider::ProvideCredentials;

use crate::error::{Error, Result};

/// Access key pair with an optional session token
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Credentials and default region resolved from the AWS configuration chain
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub credentials: AwsCredentials,
    /// Region configured for the profile, if any
    pub region: Option<String>,
}

/// Resolve credentials through the AWS chain, optionally for a named profile
pub async fn resolve(profile: Option<&str>) -> Result<ResolvedCredentials> {
    let loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    let config = if let Some(profile) = profile {
        loader.profile_name(profile).load().await
    } else {
        loader.load().await
    };

    let provider = config
        .credentials_provider()
        .ok_or_else(|| Error::Credentials("no credentials provider configured".to_string()))?;

    let resolved = provider
        .provide_credentials()
        .await
        .map_err(|e| Error::Credentials(e.to_string()))?;

    tracing::info!(
        profile = profile.unwrap_or("default"),
        access_key_id = resolved.access_key_id(),
        "resolved AWS credentials"
    );

    Ok(ResolvedCredentials {
        credentials: AwsCredentials::new(
            resolved.access_key_id(),
            resolved.secret_access_key(),
            resolved.session_token().map(str::to_string),
        ),
        region: config.region().map(|r| r.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_accessors() {
        let creds = AwsCredentials::new("AKID", "SECRET", Some("TOKEN".to_string()));
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.secret_access_key(), "SECRET");
        assert_eq!(creds.session_token(), Some("TOKEN"));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = AwsCredentials::new("AKID", "SECRET", Some("TOKEN".to_string()));
        let debug = format!("{creds:?}");
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("SECRET"));
        assert!(!debug.contains("TOKEN"));
    }

    #[test]
    fn test_credentials_without_session_token() {
        let creds = AwsCredentials::new("AKID", "SECRET", None);
        assert!(creds.session_token().is_none());
        assert!(format!("{creds:?}").contains("session_token: None"));
    }
}

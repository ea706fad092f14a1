//! API credential resolution.
//!
//! The platform uses two credential scopes: an account-level key for
//! tenant management, statistics and IP operations, and a sub-account
//! key for domain and email operations. Both are resolved once at
//! process start; environment variables take precedence over the
//! compiled-in fallback constants.
//!
//! Keys are opaque bearer tokens. They are sent as request headers by
//! the API client and must never appear in logs or console output, so
//! `Credentials` redacts both values in its `Debug` representation.

use std::env;
use std::fmt;

/// Environment variable holding the account-scope API key.
pub const ACCOUNT_API_KEY_ENV: &str = "ACCOUNT_API_KEY";

/// Environment variable holding the sub-account-scope API key.
pub const SUBACCOUNT_API_KEY_ENV: &str = "SUBACCOUNT_API_KEY";

// Fallback constants, used only when the environment variables are unset.
// Replace these with real keys for ad-hoc local runs.
const FALLBACK_ACCOUNT_API_KEY: &str = "YOUR_ACCOUNT_API_KEY_HERE";
const FALLBACK_SUBACCOUNT_API_KEY: &str = "YOUR_SUBACCOUNT_API_KEY_HERE";

/// The two opaque API keys for one run.
#[derive(Clone)]
pub struct Credentials {
    account_key: String,
    sub_account_key: String,
}

impl Credentials {
    /// Resolve credentials from the environment, falling back to the
    /// compiled-in placeholder constants.
    pub fn resolve() -> Self {
        Self::from_sources(
            env::var(ACCOUNT_API_KEY_ENV).ok(),
            env::var(SUBACCOUNT_API_KEY_ENV).ok(),
        )
    }

    /// Build credentials from explicit values.
    pub fn from_keys(account_key: impl Into<String>, sub_account_key: impl Into<String>) -> Self {
        Self {
            account_key: account_key.into(),
            sub_account_key: sub_account_key.into(),
        }
    }

    fn from_sources(account: Option<String>, sub_account: Option<String>) -> Self {
        Self {
            account_key: account.unwrap_or_else(|| FALLBACK_ACCOUNT_API_KEY.to_string()),
            sub_account_key: sub_account.unwrap_or_else(|| FALLBACK_SUBACCOUNT_API_KEY.to_string()),
        }
    }

    /// The account-scope API key.
    pub fn account_key(&self) -> &str {
        &self.account_key
    }

    /// The sub-account-scope API key.
    pub fn sub_account_key(&self) -> &str {
        &self.sub_account_key
    }

    /// True when either key is still a placeholder. A run with
    /// placeholder keys proceeds anyway: the affected calls fail with
    /// 401 and are recorded like any other step failure.
    pub fn is_placeholder(&self) -> bool {
        self.account_key == FALLBACK_ACCOUNT_API_KEY
            || self.sub_account_key == FALLBACK_SUBACCOUNT_API_KEY
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_key", &"[REDACTED]")
            .field("sub_account_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_take_precedence_over_fallbacks() {
        let creds = Credentials::from_sources(
            Some("acct-from-env".to_string()),
            Some("sub-from-env".to_string()),
        );
        assert_eq!(creds.account_key(), "acct-from-env");
        assert_eq!(creds.sub_account_key(), "sub-from-env");
        assert!(!creds.is_placeholder());
    }

    #[test]
    fn missing_env_falls_back_to_constants() {
        let creds = Credentials::from_sources(None, None);
        assert_eq!(creds.account_key(), FALLBACK_ACCOUNT_API_KEY);
        assert_eq!(creds.sub_account_key(), FALLBACK_SUBACCOUNT_API_KEY);
        assert!(creds.is_placeholder());
    }

    #[test]
    fn partial_env_only_overrides_that_scope() {
        let creds = Credentials::from_sources(Some("acct-key".to_string()), None);
        assert_eq!(creds.account_key(), "acct-key");
        assert_eq!(creds.sub_account_key(), FALLBACK_SUBACCOUNT_API_KEY);
        assert!(creds.is_placeholder());
    }

    #[test]
    fn debug_redacts_both_keys() {
        let creds = Credentials::from_keys("secret-account", "secret-sub");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-account"));
        assert!(!debug.contains("secret-sub"));
    }
}

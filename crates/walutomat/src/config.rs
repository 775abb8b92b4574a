use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fmt;

use thiserror::Error;

pub const API_KEY_VAR: &str = "WALUTOMAT_API_KEY";
pub const SANDBOX_VAR: &str = "WALUTOMAT_SANDBOX";

pub const BASE_URL_PROD: &str = "https://api.walutomat.pl/api/v2.0.0";
pub const BASE_URL_SANDBOX: &str = "https://api.walutomat.dev/api/v2.0.0";

/// Matched after lowercasing only. Anything else, including padded
/// values, selects production.
const SANDBOX_TOKENS: [&str; 3] = ["true", "1", "yes"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WALUTOMAT_API_KEY is not set or empty")]
    MissingCredential,
    #[error("{0} is not valid UTF-8")]
    NotUnicode(&'static str),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: &'static str,
    api_key: String,
    sandbox: bool,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, sandbox: bool) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::MissingCredential);
        }

        let base_url = if sandbox {
            BASE_URL_SANDBOX
        } else {
            BASE_URL_PROD
        };

        Ok(Self {
            base_url,
            api_key,
            sandbox,
        })
    }

    /// Builds the configuration from an environment snapshot.
    pub fn resolve(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = env
            .get(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let sandbox = env
            .get(SANDBOX_VAR)
            .is_some_and(|value| is_sandbox_token(value));

        Self::new(api_key.as_str(), sandbox)
    }

    /// Snapshots the process environment once and resolves it.
    ///
    /// Unrelated entries that are not UTF-8 are skipped; a non-UTF-8
    /// `WALUTOMAT_*` value fails with `NotUnicode`.
    pub fn from_process_env() -> Result<Self, ConfigError> {
        Self::from_os_vars(env::vars_os())
    }

    fn from_os_vars(
        vars: impl IntoIterator<Item = (OsString, OsString)>,
    ) -> Result<Self, ConfigError> {
        let mut snapshot = HashMap::new();

        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    snapshot.insert(key, value);
                }
                Err(_) => {
                    if let Some(var) = [API_KEY_VAR, SANDBOX_VAR].into_iter().find(|v| *v == key) {
                        return Err(ConfigError::NotUnicode(var));
                    }
                }
            }
        }

        Self::resolve(&snapshot)
    }

    pub fn base_url(&self) -> &str {
        self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn environment_name(&self) -> &'static str {
        if self.sandbox { "Sandbox" } else { "Production" }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .finish()
    }
}

fn is_sandbox_token(value: &str) -> bool {
    let lowered = value.to_lowercase();
    SANDBOX_TOKENS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_or_empty_key_fails() {
        let cases = [
            env_of(&[]),
            env_of(&[(API_KEY_VAR, "")]),
            env_of(&[(SANDBOX_VAR, "true")]),
            env_of(&[(API_KEY_VAR, ""), (SANDBOX_VAR, "1")]),
        ];

        for env in cases {
            assert_eq!(
                ClientConfig::resolve(&env),
                Err(ConfigError::MissingCredential)
            );
        }
    }

    #[test]
    fn test_truthy_tokens_select_sandbox() {
        for token in ["true", "TRUE", "True", "tRuE", "1", "yes", "Yes", "YES"] {
            let config =
                ClientConfig::resolve(&env_of(&[(API_KEY_VAR, "k"), (SANDBOX_VAR, token)]))
                    .unwrap();
            assert!(config.sandbox(), "{:?} should enable sandbox", token);
            assert_eq!(config.base_url(), BASE_URL_SANDBOX);
        }
    }

    #[test]
    fn test_everything_else_selects_production() {
        for token in [
            "false", "no", "0", "enabled", "on", "y", "TRUE ", " 1", "yes\n", "",
        ] {
            let config =
                ClientConfig::resolve(&env_of(&[(API_KEY_VAR, "k"), (SANDBOX_VAR, token)]))
                    .unwrap();
            assert!(!config.sandbox(), "{:?} should not enable sandbox", token);
            assert_eq!(config.base_url(), BASE_URL_PROD);
        }

        let config = ClientConfig::resolve(&env_of(&[(API_KEY_VAR, "k")])).unwrap();
        assert!(!config.sandbox());
        assert_eq!(config.environment_name(), "Production");
    }

    #[test]
    fn test_base_urls_are_distinct() {
        let prod = ClientConfig::new("k", false).unwrap();
        let sandbox = ClientConfig::new("k", true).unwrap();
        assert_ne!(prod.base_url(), sandbox.base_url());
        assert_eq!(sandbox.environment_name(), "Sandbox");
    }

    fn os_vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn test_os_vars_resolve_like_a_map() {
        let config =
            ClientConfig::from_os_vars(os_vars(&[(API_KEY_VAR, "k"), (SANDBOX_VAR, "Yes")]))
                .unwrap();
        assert!(config.sandbox());
        assert_eq!(config.api_key(), "k");

        assert_eq!(
            ClientConfig::from_os_vars(os_vars(&[("PATH", "/usr/bin")])),
            Err(ConfigError::MissingCredential)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_values() {
        use std::os::unix::ffi::OsStringExt;

        let invalid = || OsString::from_vec(vec![0x66, 0xff, 0x6f]);

        let mut vars = os_vars(&[(SANDBOX_VAR, "1")]);
        vars.push((OsString::from(API_KEY_VAR), invalid()));
        assert_eq!(
            ClientConfig::from_os_vars(vars),
            Err(ConfigError::NotUnicode(API_KEY_VAR))
        );

        let mut vars = os_vars(&[(API_KEY_VAR, "k")]);
        vars.push((OsString::from(SANDBOX_VAR), invalid()));
        assert_eq!(
            ClientConfig::from_os_vars(vars),
            Err(ConfigError::NotUnicode(SANDBOX_VAR))
        );

        let mut vars = os_vars(&[(API_KEY_VAR, "k")]);
        vars.push((OsString::from("UNRELATED"), invalid()));
        vars.push((invalid(), OsString::from("x")));
        assert!(ClientConfig::from_os_vars(vars).is_ok());
    }

    #[test]
    fn test_key_is_kept_and_redacted_in_debug() {
        let config = ClientConfig::new("secret-key", false).unwrap();
        assert_eq!(config.api_key(), "secret-key");

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}

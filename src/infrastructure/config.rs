use super::remote::RemoteBackend;
use super::store::FileBackend;
use crate::domain::DomainClient;
use std::env;

/// Which backend to run against, resolved from the process environment.
///
/// `PAY265_API_URL` + `PAY265_API_KEY` select the remote provider;
/// otherwise `PAY265_STORE` names a local JSON store file. Neither being
/// set is a startup-fatal configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    Remote { url: String, api_key: String },
    File { path: String },
}

impl BackendConfig {
    pub fn from_env() -> Result<BackendConfig, String> {
        Self::resolve(
            env::var("PAY265_API_URL").ok(),
            env::var("PAY265_API_KEY").ok(),
            env::var("PAY265_STORE").ok(),
        )
    }

    fn resolve(
        url: Option<String>,
        api_key: Option<String>,
        store: Option<String>,
    ) -> Result<BackendConfig, String> {
        let url = url.filter(|s| !s.is_empty());
        let api_key = api_key.filter(|s| !s.is_empty());
        let store = store.filter(|s| !s.is_empty());
        match (url, api_key) {
            (Some(url), Some(api_key)) => Ok(BackendConfig::Remote { url, api_key }),
            (Some(_), None) | (None, Some(_)) => {
                Err("PAY265_API_URL and PAY265_API_KEY must be set together".to_string())
            }
            (None, None) => store.map(|path| BackendConfig::File { path }).ok_or_else(|| {
                "no backend configured: set PAY265_API_URL and PAY265_API_KEY, or PAY265_STORE"
                    .to_string()
            }),
        }
    }

    pub fn build(self) -> Result<Box<dyn DomainClient>, String> {
        match self {
            BackendConfig::Remote { url, api_key } => {
                Ok(Box::new(RemoteBackend::new(&url, &api_key)?))
            }
            BackendConfig::File { path } => Ok(Box::new(FileBackend::open(&path)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_takes_precedence() {
        let config = BackendConfig::resolve(
            Some("https://demo.example.co".to_string()),
            Some("anon".to_string()),
            Some("store.json".to_string()),
        )
        .unwrap();
        assert_eq!(
            config,
            BackendConfig::Remote {
                url: "https://demo.example.co".to_string(),
                api_key: "anon".to_string(),
            }
        );
    }

    #[test]
    fn test_file_store_fallback() {
        let config =
            BackendConfig::resolve(None, None, Some("store.json".to_string())).unwrap();
        assert_eq!(
            config,
            BackendConfig::File {
                path: "store.json".to_string()
            }
        );
    }

    #[test]
    fn test_partial_remote_config_is_fatal() {
        assert!(BackendConfig::resolve(
            Some("https://demo.example.co".to_string()),
            None,
            Some("store.json".to_string())
        )
        .is_err());
        assert!(BackendConfig::resolve(None, Some("anon".to_string()), None).is_err());
    }

    #[test]
    fn test_nothing_configured_is_fatal() {
        assert!(BackendConfig::resolve(None, None, None).is_err());
        // Empty strings count as unset.
        assert!(BackendConfig::resolve(
            Some(String::new()),
            Some(String::new()),
            Some(String::new())
        )
        .is_err());
    }
}

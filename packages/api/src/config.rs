//! Backend endpoint configuration from environment variables.

use crate::error::Error;

/// Connection settings for the hosted project.
///
/// The key is the *public* (anonymous) project key: it only identifies the
/// project and is safe to embed in the page. Row access is governed on the
/// hosted side.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the hosted project, e.g. `https://xyzcompany.example.co`.
    pub url: String,
    /// Public project key sent with every request.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read `CORRAL_BACKEND_URL` and `CORRAL_ANON_KEY`.
    ///
    /// On wasm the values are baked in at compile time, so they must be set
    /// when the page bundle is built; natively they come from the process
    /// environment, with `.env` support.
    pub fn from_env() -> Result<Self, Error> {
        #[cfg(target_arch = "wasm32")]
        {
            let url = option_env!("CORRAL_BACKEND_URL").ok_or(Error::Config("CORRAL_BACKEND_URL"))?;
            let anon_key = option_env!("CORRAL_ANON_KEY").ok_or(Error::Config("CORRAL_ANON_KEY"))?;
            Ok(Self::new(url, anon_key))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            let url = std::env::var("CORRAL_BACKEND_URL")
                .map_err(|_| Error::Config("CORRAL_BACKEND_URL"))?;
            let anon_key = std::env::var("CORRAL_ANON_KEY")
                .map_err(|_| Error::Config("CORRAL_ANON_KEY"))?;
            Ok(Self::new(url, anon_key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = BackendConfig::new("https://project.example.co/", "public-key");
        assert_eq!(config.url, "https://project.example.co");
        assert_eq!(config.anon_key, "public-key");
    }
}

// Runtime settings, read from the environment with sensible defaults.

/// Settings shared by the API and CLI bins.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Execute endpoint of the remote execution service.
    pub piston_url: String,
    /// Language identifier submitted with every run. Fixed per deployment.
    pub language: String,
    /// Language version submitted with every run.
    pub language_version: String,
    /// Address the API bin listens on.
    pub bind_addr: String,
    /// Optional JSON catalog overriding the compiled-in one.
    pub catalog_path: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            piston_url: std::env::var("CODEQUEST_PISTON_URL")
                .unwrap_or_else(|_| "https://emkc.org/api/v2/piston/execute".to_string()),
            language: std::env::var("CODEQUEST_LANGUAGE").unwrap_or_else(|_| "c++".to_string()),
            language_version: std::env::var("CODEQUEST_LANGUAGE_VERSION")
                .unwrap_or_else(|_| "10.2.0".to_string()),
            bind_addr: std::env::var("CODEQUEST_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            catalog_path: std::env::var("CODEQUEST_CATALOG_PATH").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_filled_in() {
        // Env vars are process-global; only assert on ones the test suite
        // never sets.
        let settings = Settings::from_env();
        assert!(!settings.piston_url.is_empty());
        assert_eq!(settings.language, "c++");
    }
}

// SPDX-License-Identifier: Apache-2.0

/// Runtime configuration for the HTTP layer. Populated from `GDSALES_*`
/// environment variables in `main.rs`; tests construct it directly.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub auth_secret: String,
    pub token_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 256 * 1024,
            auth_secret: String::new(),
            token_ttl_secs: 8 * 60 * 60,
        }
    }
}

/// Rejects configurations that cannot serve requests safely. Called once at
/// startup; the error message is printed and the process exits.
pub fn validate_startup_config(config: &ApiConfig) -> Result<(), String> {
    if config.auth_secret.len() < 16 {
        return Err("GDSALES_AUTH_SECRET must be set to at least 16 bytes".to_string());
    }
    if config.max_body_bytes == 0 {
        return Err("GDSALES_MAX_BODY_BYTES must be non-zero".to_string());
    }
    if config.token_ttl_secs == 0 {
        return Err("GDSALES_TOKEN_TTL_SECS must be non-zero".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_without_a_secret() {
        let config = ApiConfig::default();
        assert!(validate_startup_config(&config).is_err());
    }

    #[test]
    fn config_with_secret_passes() {
        let config = ApiConfig {
            auth_secret: "0123456789abcdef0123456789abcdef".to_string(),
            ..ApiConfig::default()
        };
        assert!(validate_startup_config(&config).is_ok());
    }
}

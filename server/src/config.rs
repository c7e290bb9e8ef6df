use anyhow::{Context, Result};
use platform_db::StoreSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Read `.env` (when present) and the process environment.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err).context("failed to read .env"),
        }

        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        Ok(Self {
            store: StoreSettings::from_env(),
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://localhost:5173 , ,https://crm.example.com");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "https://crm.example.com"]
        );
    }
}

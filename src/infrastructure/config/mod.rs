use serde::Deserialize;
use std::env;

/// Default request body limit for uploads and synthesis forms (16 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub google_tts_tld: String,
    pub aws_region: String,
    // Uploads
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which synthesis backend narrates the text
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

impl TtsProvider {
    fn parse(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "google" => Ok(TtsProvider::Google),
            "polly" => Ok(TtsProvider::Polly),
            other => Err(format!("unknown TTS_PROVIDER '{}', expected google or polly", other)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: Environment::parse(
                &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            ),
            log_format: LogFormat::parse(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
            tts_provider: TtsProvider::parse(
                &env::var("TTS_PROVIDER").unwrap_or_else(|_| "google".to_string()),
            )?,
            google_tts_tld: env::var("GOOGLE_TTS_TLD").unwrap_or_else(|_| "com".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            max_upload_bytes: match env::var("MAX_UPLOAD_BYTES") {
                Ok(value) => value.parse()?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
            tts_provider: TtsProvider::Google,
            google_tts_tld: "com".to_string(),
            aws_region: "eu-west-1".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("malformed payload in #{element}: {source}")]
    MalformedPayload {
        element: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload in #{element} is not a JSON array")]
    PayloadNotArray { element: String },

    #[error("record {index} in #{element} is not a JSON object")]
    RecordNotObject { element: String, index: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid preview config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PreviewResult<T> = Result<T, PreviewError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown social platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown policy kind: {0}")]
    UnknownPolicyKind(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

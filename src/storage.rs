use crate::errors::AppError;
use crate::models::SessionData;
use std::path::Path;
use tokio::fs;
use tracing::error;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

impl SessionData {
    pub fn token(&self) -> Option<&str> {
        self.values
            .get(TOKEN_KEY)
            .map(String::as_str)
            .filter(|token| !token.is_empty())
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.values.insert(TOKEN_KEY.to_string(), token.into());
    }

    pub fn clear_token(&mut self) -> bool {
        self.values.remove(TOKEN_KEY).is_some()
    }
}

pub async fn load_session(path: &Path) -> SessionData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse session file: {err}");
                SessionData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
        Err(err) => {
            error!("failed to read session file: {err}");
            SessionData::default()
        }
    }
}

pub async fn persist_session(path: &Path, data: &SessionData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

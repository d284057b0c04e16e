use crate::api::ApiClient;
use crate::config::DayBoundary;
use crate::errors::AppError;
use crate::models::SessionData;
use crate::storage::persist_session;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub day_boundary: DayBoundary,
    pub session_path: PathBuf,
    pub session: Arc<Mutex<SessionData>>,
}

impl AppState {
    pub fn new(
        api: ApiClient,
        day_boundary: DayBoundary,
        session_path: PathBuf,
        session: SessionData,
    ) -> Self {
        Self {
            api,
            day_boundary,
            session_path,
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// API client carrying the current session token. Without a token the
    /// client sends requests unauthenticated.
    pub async fn client(&self) -> ApiClient {
        let session = self.session.lock().await;
        self.api.with_token(session.token().map(str::to_string))
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.lock().await.token().is_some()
    }

    pub async fn sign_in(&self, token: &str) -> Result<(), AppError> {
        let mut session = self.session.lock().await;
        session.set_token(token);
        persist_session(&self.session_path, &session).await
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        let mut session = self.session.lock().await;
        if session.clear_token() {
            persist_session(&self.session_path, &session).await?;
        }
        Ok(())
    }
}

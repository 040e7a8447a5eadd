use serde::Deserialize;
use tokio::task::{spawn_blocking, JoinError};

/// How a handler body is scheduled once the request has been parsed.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// Run on the async task that accepted the request.
    #[default]
    Cooperative,
    /// Hand the call to the blocking thread pool and await its result.
    Blocking,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("handler worker failed")]
    Worker(#[from] JoinError),
}

impl Dispatch {
    pub async fn run<F, T>(self, f: F) -> Result<T, DispatchError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match self {
            Dispatch::Cooperative => Ok(f()),
            Dispatch::Blocking => Ok(spawn_blocking(f).await?),
        }
    }
}

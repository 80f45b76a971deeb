use crate::client::{ClientError, ClientResult};

/// Lifecycle of one data fetch.
#[derive(Debug)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(ClientError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<ClientResult<T>> for FetchState<T> {
    fn from(result: ClientResult<T>) -> Self {
        match result {
            Ok(data) => FetchState::Loaded(data),
            Err(err) => FetchState::Failed(err),
        }
    }
}

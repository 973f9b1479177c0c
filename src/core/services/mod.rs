pub mod entry_service;
pub mod forecast_service;
pub mod summary_service;

pub use entry_service::{EntryService, StateEntry};
pub use forecast_service::ForecastService;
pub use summary_service::{CashFlowRow, SummaryService};

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl From<ServiceError> for FinanceError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Finance(inner) => inner,
            ServiceError::Invalid(message) => FinanceError::InvalidInput(message),
            ServiceError::NotFound(message) => FinanceError::NotFound(message),
        }
    }
}

//! Per-entity list adapters and review actions built on the list controller.

use thiserror::Error;

use crate::remote::RemoteError;

pub mod applications;
pub mod controls;
pub mod review;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

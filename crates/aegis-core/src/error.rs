//! Error types for the Aegis onboarding engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("email required")] MissingEmail,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    #[error("no escalated case for {0}")] NotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AegisError {
    #[error(transparent)] Input(#[from] InputError),
    #[error(transparent)] Case(#[from] CaseError),
}

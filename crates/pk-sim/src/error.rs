use pk_core::PkError;
use pk_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("session configuration error: {0}")]
    Config(#[from] PkError),

    #[error("vehicle lifecycle error: {0}")]
    Vehicle(#[from] VehicleError),

    /// Grid occupancy and vehicle bookkeeping disagree.  Always a kernel
    /// defect, never caused by caller input.
    #[error("occupancy invariant violated: {0}")]
    Invariant(String),
}

pub type SimResult<T> = Result<T, SimError>;

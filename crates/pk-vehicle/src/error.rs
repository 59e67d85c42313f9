use pk_core::VehicleId;
use thiserror::Error;

use crate::Phase;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("{vehicle}: cannot {op} while {phase}")]
    IllegalTransition {
        vehicle: VehicleId,
        phase:   Phase,
        op:      &'static str,
    },

    #[error("{0}: waypoint path is empty")]
    EmptyPath(VehicleId),
}

pub type VehicleResult<T> = Result<T, VehicleError>;

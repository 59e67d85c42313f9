//! Vehicle lifecycle phase.

/// Where a vehicle is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Created, waiting for a slot decision.
    #[default]
    Pending,
    /// Slot assigned, following the inbound route.
    Approaching,
    /// In the slot, dwell timer running.
    Parked,
    /// Dwell elapsed, following the outbound route.
    Departing,
    /// Left the lot.  Terminal.
    Gone,
}

impl Phase {
    /// `true` while the vehicle follows a waypoint path.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, Phase::Approaching | Phase::Departing)
    }

    /// `true` for the phases in which the vehicle's slot is occupied.
    #[inline]
    pub fn holds_slot(self) -> bool {
        matches!(self, Phase::Approaching | Phase::Parked | Phase::Departing)
    }

    /// Label for CSV columns and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Pending     => "pending",
            Phase::Approaching => "approaching",
            Phase::Parked      => "parked",
            Phase::Departing   => "departing",
            Phase::Gone        => "gone",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

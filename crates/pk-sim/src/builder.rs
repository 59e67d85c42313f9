//! Fluent builder for constructing a [`Session`].

use std::collections::BTreeMap;

use pk_core::{LotConfig, SimClock, SimRng, VehicleId};
use pk_lot::{Grid, LotLayout};
use tracing::info;

use crate::{ArrivalProcess, Metrics, Session, SimResult};

/// Fluent builder for [`Session`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                          |
/// |---------------|----------------------------------|
/// | `.layout(l)`  | `LotLayout::default()`           |
/// | `.rng(r)`     | `SimRng::new(config.seed)`       |
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionBuilder::new(config)
///     .rng(SimRng::new(7))
///     .build()?;
/// ```
pub struct SessionBuilder {
    config: LotConfig,
    layout: Option<LotLayout>,
    rng:    Option<SimRng>,
}

impl SessionBuilder {
    pub fn new(config: LotConfig) -> Self {
        Self { config, layout: None, rng: None }
    }

    /// Override the lot geometry.
    pub fn layout(mut self, layout: LotLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Inject the random source.  Without this, the session seeds its own
    /// from `config.seed`.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration and return an empty session at tick 0
    /// with no pending vehicle.
    pub fn build(self) -> SimResult<Session> {
        self.config.validate()?;

        let mut rng = self.rng.unwrap_or_else(|| SimRng::new(self.config.seed));
        let arrivals = ArrivalProcess::new(&self.config, &mut rng);

        info!(
            rows = self.config.rows,
            cols = self.config.cols,
            cap = self.config.max_cars_per_episode,
            "session built"
        );

        Ok(Session {
            layout:   self.layout.unwrap_or_default(),
            grid:     Grid::new(self.config.rows, self.config.cols),
            vehicles: BTreeMap::new(),
            pending:  None,
            next_id:  VehicleId(0),
            clock:    SimClock::new(self.config.tick_secs),
            arrivals,
            metrics:  Metrics::new(),
            rng,
            config:   self.config,
        })
    }
}

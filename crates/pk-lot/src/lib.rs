//! `pk-lot` — the occupancy grid and the geometry vehicles drive through.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`grid`]   | `Grid` — one occupancy bit per slot, pure data + accessors  |
//! | [`layout`] | `LotLayout` — slot centres and inbound/outbound routes      |
//!
//! Neither type references vehicles.  Vehicles hold a `Slot` coordinate and
//! the session keeps the two in agreement.

pub mod grid;
pub mod layout;


pub use grid::Grid;
pub use layout::LotLayout;

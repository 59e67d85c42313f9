//! State-vector encoding.

use pk_sim::Session;

/// Number of scalars after the occupancy bits: occupancy fraction, pending
/// flag, normalised time.
pub const EXTRA_FEATURES: usize = 3;

/// Length of the state vector for a `rows × cols` lot.
#[inline]
pub fn state_size(rows: usize, cols: usize) -> usize {
    rows * cols + EXTRA_FEATURES
}

/// Encode `session` as a fixed-length vector:
///
/// 1. one `0.0`/`1.0` per slot, row-major;
/// 2. occupancy fraction in `[0, 1]`;
/// 3. `1.0` if a vehicle is pending, else `0.0`;
/// 4. `(now mod time_window) / time_window`.
pub fn encode_state(session: &Session, time_window: f64) -> Vec<f32> {
    let grid = session.grid();
    let mut state = Vec::with_capacity(state_size(grid.rows(), grid.cols()));
    state.extend(grid.cells().iter().map(|&occupied| if occupied { 1.0 } else { 0.0 }));
    state.push(grid.occupancy_fraction() as f32);
    state.push(if session.pending().is_some() { 1.0 } else { 0.0 });
    state.push((session.now().rem_euclid(time_window) / time_window) as f32);
    state
}

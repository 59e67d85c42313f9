//! Shaped reward for slot choices.

/// Reward for an action that names an occupied or nonexistent slot.
pub const INVALID_ACTION_PENALTY: f64 = -10.0;

const BASE_REWARD: f64 = 10.0;
const COLUMN_PENALTY: f64 = 0.5;
const BALANCE_WEIGHT: f64 = 0.5;
const ROW_COMPLETION_BONUS: f64 = 5.0;

/// Reward for parking in column `col` of a row that held `row_occupied`
/// vehicles before this assignment.
///
/// ```text
/// 10 − 0.5·col + 0.5·(cols − row_occupied) + (5 if row_occupied == cols − 1)
/// ```
///
/// Slots nearer the entrance, emptier rows, and the assignment that fills a
/// row score higher.  Pure: identical inputs always give identical rewards.
pub fn shaped_reward(col: usize, cols: usize, row_occupied: usize) -> f64 {
    let mut reward = BASE_REWARD - COLUMN_PENALTY * col as f64
        + BALANCE_WEIGHT * cols.saturating_sub(row_occupied) as f64;
    if row_occupied + 1 == cols {
        reward += ROW_COMPLETION_BONUS;
    }
    reward
}

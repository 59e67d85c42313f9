//! Tests for pk-env.

use pk_core::{LotConfig, SimRng, Slot};

use crate::{
    DeclinePolicy, Env, EnvConfig, INVALID_ACTION_PENALTY, NearestPolicy, ParkingEnv, Policy,
    RandomPolicy, run_episode, shaped_reward,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn env(rows: usize, cols: usize, cap: u32) -> ParkingEnv {
    ParkingEnv::new(EnvConfig::new(rows, cols, cap)).unwrap()
}

fn occupied(env: &ParkingEnv, row: usize, col: usize) -> bool {
    !env.session().unwrap().grid().is_free(Slot::new(row, col))
}

// ── Reward ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reward_tests {
    use super::*;

    #[test]
    fn closer_and_emptier_scores_higher() {
        assert_eq!(shaped_reward(0, 2, 0), 11.0);
        assert_eq!(shaped_reward(0, 10, 0), 15.0);
        assert_eq!(shaped_reward(9, 10, 0), 10.5);
        assert!(shaped_reward(0, 10, 3) < shaped_reward(0, 10, 0));
    }

    #[test]
    fn completing_a_row_earns_bonus() {
        // 10 - 0.5*1 + 0.5*(2-1) + 5
        assert_eq!(shaped_reward(1, 2, 1), 15.0);
        assert_eq!(shaped_reward(4, 5, 4), 10.0 - 2.0 + 0.5 + 5.0);
    }

    #[test]
    fn reward_is_pure() {
        for col in 0..6 {
            for before in 0..6 {
                assert_eq!(shaped_reward(col, 6, before), shaped_reward(col, 6, before));
            }
        }
    }
}

// ── Step protocol ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn single_vehicle_episode() {
        let mut env = env(2, 2, 1);
        let state = env.reset();
        assert_eq!(state.len(), 7);
        assert_eq!(state[5], 1.0, "a vehicle is pending after reset");

        let step = env.step(0);
        assert_eq!(step.reward, 11.0);
        assert!(step.done);
        assert!(occupied(&env, 0, 0));
        assert_eq!(step.state[0], 1.0);
        assert_eq!(step.state[4], 0.25);
        assert_eq!(step.state[5], 0.0);
        assert_eq!(step.info.parked, 1);
        assert_eq!(step.info.occupancy_percent, 25.0);

        let again = env.step(2);
        assert_eq!(again.reward, 0.0);
        assert!(again.done);
        assert_eq!(again.state, step.state);
        assert_eq!(env.session().unwrap().metrics().failed, 0);
    }

    #[test]
    fn occupied_slot_is_penalised() {
        let mut env = env(2, 2, 3);
        env.reset();
        assert_eq!(env.step(0).reward, 11.0);

        let step = env.step(0);
        assert_eq!(step.reward, INVALID_ACTION_PENALTY);
        assert!(!step.done);
        let session = env.session().unwrap();
        assert_eq!(session.grid().occupied_count(), 1);
        assert_eq!(session.vehicles().filter(|v| v.slot() == Some(Slot::new(0, 0))).count(), 1);
        assert_eq!(session.metrics().failed, 1);
        assert_eq!(step.info.failed, 1);
        assert_eq!(step.info.episode_return, 1.0);
    }

    #[test]
    fn row_completion_in_env() {
        let mut env = env(2, 2, 5);
        env.reset();
        assert_eq!(env.step(0).reward, 11.0);
        assert_eq!(env.step(1).reward, 15.0);
    }

    #[test]
    fn out_of_range_action_is_scored_not_fatal() {
        let mut env = env(2, 2, 5);
        env.reset();
        let step = env.step(99);
        assert_eq!(step.reward, INVALID_ACTION_PENALTY);
        assert!(!step.done);
        assert_eq!(env.session().unwrap().now(), 1.0);
        assert_eq!(env.session().unwrap().grid().occupied_count(), 0);
    }

    #[test]
    fn step_before_reset_is_terminal() {
        let mut env = env(3, 4, 5);
        assert_eq!(env.state(), vec![0.0; 15]);
        assert!(env.available_actions().is_empty());
        let step = env.step(0);
        assert!(step.done);
        assert_eq!(step.reward, 0.0);
        assert!(env.session().is_none());
    }

    #[test]
    fn terminates_after_cap_steps() {
        let cap = 12;
        let mut env = env(3, 3, cap);
        let mut rng = SimRng::new(4);
        env.reset();
        let mut steps = 0;
        loop {
            // Any action at all, valid or not.
            let step = env.step(rng.gen_range(0..12));
            steps += 1;
            if step.done {
                break;
            }
            assert!(steps < cap, "still running after {steps} steps");
        }
        assert_eq!(steps, cap);
    }

    #[test]
    fn slots_free_when_dwell_elapses() {
        let mut env = env(1, 1, 100);
        env.reset();
        // 10 + 0.5*1 + 5: a one-slot row is completed by its first vehicle.
        assert_eq!(env.step(0).reward, 15.5);
        assert!(env.available_actions().is_empty());
        let mut freed = false;
        for _ in 0..40 {
            if !env.available_actions().is_empty() {
                freed = true;
                break;
            }
            env.step(0);
        }
        assert!(freed, "a parked vehicle never left");
        assert_eq!(env.session().unwrap().metrics().departed, 1);
    }

    #[test]
    fn state_tracks_time_window() {
        let mut cfg = EnvConfig::new(2, 2, 10);
        cfg.time_window = 4.0;
        let mut env = ParkingEnv::new(cfg).unwrap();
        env.reset();
        env.step(99);
        let step = env.step(99);
        assert_eq!(step.state[6], 0.5);
        assert_eq!(env.state_size(), 7);
        assert_eq!(env.action_size(), 4);
    }

    #[test]
    fn reset_starts_fresh_episode() {
        let mut env = env(2, 2, 3);
        env.reset();
        env.step(0);
        env.step(0);
        let state = env.reset();
        assert_eq!(&state[..4], &[0.0; 4]);
        assert_eq!(env.episode_return(), 0.0);
        assert_eq!(env.episodes(), 2);
        assert_eq!(env.session().unwrap().spawned(), 1);
        assert_eq!(env.available_actions(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn invalid_time_window_rejected() {
        let cfg = EnvConfig { time_window: 0.0, ..EnvConfig::default() };
        assert!(ParkingEnv::new(cfg).is_err());
        let cfg = EnvConfig { lot: LotConfig { rows: 0, ..LotConfig::default() }, time_window: 1.0 };
        assert!(ParkingEnv::new(cfg).is_err());
    }

    #[test]
    fn display_renders_grid() {
        let mut env = env(2, 2, 3);
        assert_eq!(env.to_string(), "Not started\n");
        env.reset();
        env.step(0);
        let text = env.to_string();
        assert!(text.contains("Occupancy: 25.0%"), "{text}");
        assert!(text.contains("■□\n□□\n"), "{text}");
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn same_seed_same_rewards() {
        let play = || {
            let mut env = env(3, 5, 30);
            let mut rng = SimRng::new(8);
            let mut rewards = Vec::new();
            for _ in 0..3 {
                let summary = run_episode(&mut env, &mut RandomPolicy, &mut rng);
                rewards.push(summary);
            }
            rewards
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn identical_preconditions_identical_reward() {
        let mut a = env(2, 3, 10);
        let mut b = env(2, 3, 10);
        a.reset();
        b.reset();
        for action in [0, 4, 1] {
            assert_eq!(a.step(action).reward, b.step(action).reward);
        }
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use pk_sim::{NoopObserver, SessionBuilder};

    use super::*;
    use crate::PolicyDispatcher;

    #[test]
    fn nearest_prefers_low_column_then_row() {
        let mut rng = SimRng::new(0);
        let mut p = NearestPolicy::new(3).unwrap();
        // 1=(0,1) 2=(0,2) 3=(1,0) 4=(1,1)
        assert_eq!(p.choose(&[], &[1, 2, 3, 4], &mut rng), Some(3));
        assert_eq!(p.choose(&[], &[4, 1], &mut rng), Some(1));
        assert_eq!(p.choose(&[], &[], &mut rng), None);
    }

    #[test]
    fn nearest_rejects_zero_columns() {
        assert!(NearestPolicy::new(0).is_err());
    }

    #[test]
    fn random_picks_an_available_action() {
        let mut rng = SimRng::new(0);
        let available = [2, 5, 7];
        for _ in 0..100 {
            let a = RandomPolicy.choose(&[], &available, &mut rng).unwrap();
            assert!(available.contains(&a));
        }
        assert_eq!(RandomPolicy.choose(&[], &[], &mut rng), None);
    }

    #[test]
    fn nearest_episode_never_fails() {
        let mut env = env(3, 5, 15);
        let summary = run_episode(&mut env, &mut NearestPolicy::new(5).unwrap(), &mut SimRng::new(1));
        assert!(summary.steps > 0);
        assert!(summary.steps <= 15);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.parked, summary.steps);
        assert_eq!(summary.success_rate, 1.0);
    }

    #[test]
    fn decline_ends_episode_immediately() {
        let mut env = env(3, 5, 15);
        let summary = run_episode(&mut env, &mut DeclinePolicy, &mut SimRng::new(1));
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.parked, 0);
        assert_eq!(summary.total_reward, 0.0);
    }

    #[test]
    fn policy_dispatcher_drives_free_running_session() {
        let config = LotConfig { rows: 3, cols: 4, max_cars_per_episode: 10, ..LotConfig::default() };
        let mut session = SessionBuilder::new(config).build().unwrap();
        let mut dispatcher = PolicyDispatcher::new(NearestPolicy::new(4).unwrap(), SimRng::new(2));
        session.run(200_000, &mut dispatcher, &mut NoopObserver).unwrap();

        assert!(session.is_finished());
        assert_eq!(session.metrics().parked, 10);
        assert_eq!(session.metrics().failed, 0);
        assert_eq!(session.metrics().departed, 10);
    }
}

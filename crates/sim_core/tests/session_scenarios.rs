use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::domain::{Layer, LayerSet, Step};
use sim_core::{ClickOutcome, SimulationController, SimulationSnapshot, TickOutcome};

const INTERVAL: Duration = Duration::from_secs(2);

struct Session {
    controller: SimulationController,
    now: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            controller: SimulationController::new(INTERVAL),
            now: Instant::now(),
        }
    }

    fn click(&mut self, layer: Layer) -> ClickOutcome {
        self.controller.handle_layer_click(layer, self.now)
    }

    /// Lets one step interval pass and returns any tick it produced.
    fn wait_one_interval(&mut self) -> Vec<TickOutcome> {
        self.now += INTERVAL;
        self.controller.advance(self.now)
    }

    fn snapshot(&self) -> SimulationSnapshot {
        self.controller.snapshot()
    }

    fn complete(&mut self, layer: Layer) {
        assert_eq!(self.click(layer), ClickOutcome::Started);
        for _ in 0..4 {
            self.wait_one_interval();
        }
        assert!(!self.snapshot().is_animating);
    }
}

fn layers(list: &[Layer]) -> LayerSet {
    list.iter().copied().collect()
}

#[test]
fn perception_walkthrough_unlocks_network() {
    let mut session = Session::new();
    assert_eq!(session.click(Layer::Perception), ClickOutcome::Started);

    let mut steps = vec![session.snapshot().step];
    for _ in 0..3 {
        session.wait_one_interval();
        let snapshot = session.snapshot();
        assert!(snapshot.is_animating);
        steps.push(snapshot.step);
    }
    let indices: Vec<u8> = steps.iter().map(|step| step.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    session.wait_one_interval();
    let snapshot = session.snapshot();
    assert!(!snapshot.is_animating);
    assert_eq!(snapshot.score, 10);
    assert_eq!(
        snapshot.unlocked_layers,
        layers(&[Layer::Perception, Layer::Network])
    );
    assert_eq!(
        snapshot.achievements,
        vec![
            "Network Layer Unlocked!".to_string(),
            "Perception Master".to_string()
        ]
    );
}

#[test]
fn locked_middleware_click_changes_nothing() {
    let mut session = Session::new();
    session.complete(Layer::Perception);

    let before = session.snapshot();
    assert_eq!(session.click(Layer::Middleware), ClickOutcome::IgnoredLocked);
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.controller.pending_tick(), None);
}

#[test]
fn network_sequence_blocks_other_clicks_while_running() {
    let mut session = Session::new();
    session.complete(Layer::Perception);

    assert_eq!(session.click(Layer::Network), ClickOutcome::Started);
    let running = session.snapshot();
    assert_eq!(running.active_layer, Some(Layer::Network));
    assert_eq!(running.step, Step::FIRST);
    assert!(running.is_animating);

    assert_eq!(
        session.click(Layer::Perception),
        ClickOutcome::IgnoredAnimating
    );
    assert_eq!(session.snapshot(), running);
}

#[test]
fn second_perception_completion_adds_points_only() {
    let mut session = Session::new();
    session.complete(Layer::Perception);
    session.complete(Layer::Network);
    let before = session.snapshot();

    session.complete(Layer::Perception);
    let after = session.snapshot();
    assert_eq!(after.score, before.score + 10);
    assert_eq!(after.achievements, before.achievements);
    assert_eq!(after.unlocked_layers, before.unlocked_layers);
}

#[test]
fn dismissing_achievements_pops_from_the_end() {
    let mut session = Session::new();
    assert_eq!(session.controller.dismiss_latest_achievement(), None);
    assert!(session.snapshot().achievements.is_empty());

    session.complete(Layer::Perception);
    assert_eq!(
        session.controller.dismiss_latest_achievement(),
        Some("Perception Master".to_string())
    );
    assert_eq!(
        session.snapshot().latest_achievement(),
        Some("Network Layer Unlocked!")
    );
}

#[test]
fn random_event_streams_preserve_session_invariants() {
    for seed in 0..64u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::new();
        let mut previous = session.snapshot();

        for _ in 0..200 {
            let roll = rng.gen_range(0..10);
            let pre_click = session.snapshot();
            match roll {
                0..=3 => {
                    let layer = Layer::ALL[rng.gen_range(0..Layer::ALL.len())];
                    let outcome = session.click(layer);
                    if pre_click.is_animating || !pre_click.is_unlocked(layer) {
                        assert_ne!(outcome, ClickOutcome::Started, "seed {seed}");
                        assert_eq!(session.snapshot(), pre_click, "seed {seed}");
                    }
                }
                4 => {
                    session.controller.dismiss_latest_achievement();
                }
                _ => {
                    session.now += Duration::from_millis(rng.gen_range(0..3000));
                    for outcome in session.controller.advance(session.now) {
                        if let TickOutcome::Completed(completion) = outcome {
                            assert_eq!(completion.points_awarded, 10, "seed {seed}");
                        }
                    }
                }
            }

            let current = session.snapshot();
            assert!(current.is_unlocked(Layer::Perception), "seed {seed}");
            assert!(
                current.unlocked_layers.is_superset(&previous.unlocked_layers),
                "seed {seed}"
            );
            assert!(current.score >= previous.score, "seed {seed}");
            assert_eq!(current.score % 10, 0, "seed {seed}");
            if current.is_animating {
                assert!(current.active_layer.is_some(), "seed {seed}");
                assert!(session.controller.pending_tick().is_some(), "seed {seed}");
            } else {
                assert!(session.controller.pending_tick().is_none(), "seed {seed}");
            }
            previous = current;
        }
    }
}

#[test]
fn unlocks_follow_the_fixed_progression() {
    let mut session = Session::new();
    let mut expected = vec![Layer::Perception];
    for layer in Layer::ALL {
        session.complete(layer);
        if let Some(next) = layer.successor() {
            expected.push(next);
        }
        assert_eq!(
            session.snapshot().unlocked_layers.iter().collect::<Vec<_>>(),
            expected
        );
    }
}

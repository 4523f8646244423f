use super::*;
use shared::domain::{Layer, Step};
use std::time::{Duration, Instant};

const INTERVAL: Duration = Duration::from_secs(2);

fn run_to_completion(state: &mut SimulationState) -> Completion {
    loop {
        match state.step_forward() {
            TickOutcome::Advanced(_) => continue,
            TickOutcome::Completed(completion) => return completion,
            other => panic!("sequence stalled with {other:?}"),
        }
    }
}

#[test]
fn fresh_state_has_only_perception_unlocked() {
    let state = SimulationState::new();
    assert_eq!(state.active_layer(), None);
    assert_eq!(state.step(), Step::FIRST);
    assert!(!state.is_animating());
    assert_eq!(state.score(), 0);
    assert_eq!(
        state.unlocked_layers().iter().collect::<Vec<_>>(),
        vec![Layer::Perception]
    );
    assert!(state.achievements().is_empty());
}

#[test]
fn select_checks_animation_before_lock() {
    let mut state = SimulationState::new();
    assert_eq!(state.select(Layer::Perception), ClickOutcome::Started);
    assert_eq!(state.select(Layer::Middleware), ClickOutcome::IgnoredAnimating);
    assert_eq!(state.select(Layer::Perception), ClickOutcome::IgnoredAnimating);
}

#[test]
fn reselecting_the_idle_active_layer_is_ignored() {
    let mut state = SimulationState::new();
    state.select(Layer::Perception);
    run_to_completion(&mut state);

    let before = state.clone();
    assert_eq!(
        state.select(Layer::Perception),
        ClickOutcome::IgnoredAlreadyActive
    );
    assert_eq!(state, before);
}

#[test]
fn step_forward_when_idle_changes_nothing() {
    let mut state = SimulationState::new();
    let before = state.clone();
    assert_eq!(state.step_forward(), TickOutcome::Idle);
    assert_eq!(state, before);
}

#[test]
fn application_completion_unlocks_nothing_further() {
    let mut state = SimulationState::new();
    for layer in Layer::ALL {
        assert_eq!(state.select(layer), ClickOutcome::Started);
        let completion = run_to_completion(&mut state);
        assert_eq!(completion.newly_unlocked, layer.successor());
    }

    assert_eq!(state.score(), 40);
    assert_eq!(state.unlocked_layers().len(), 4);
    assert_eq!(
        state.achievements(),
        [
            "Network Layer Unlocked!",
            "Perception Master",
            "Middleware Layer Unlocked!",
            "Network Master",
            "Application Layer Unlocked!",
            "Middleware Master",
            "Application Master",
        ]
    );
}

#[test]
fn repeat_completion_scores_without_new_achievements() {
    let mut state = SimulationState::new();
    state.select(Layer::Perception);
    run_to_completion(&mut state);
    state.select(Layer::Network);
    run_to_completion(&mut state);
    state.select(Layer::Perception);
    let repeat = run_to_completion(&mut state);

    assert!(repeat.new_achievements.is_empty());
    assert_eq!(repeat.points_awarded, 10);
    assert_eq!(state.score(), 30);
}

#[test]
fn dismissed_mastery_label_is_awarded_again() {
    let mut state = SimulationState::new();
    state.select(Layer::Perception);
    run_to_completion(&mut state);
    state.select(Layer::Network);
    run_to_completion(&mut state);

    // Drop "Network Master" and "Middleware Layer Unlocked!", then "Perception Master".
    state.dismiss_latest_achievement();
    state.dismiss_latest_achievement();
    state.dismiss_latest_achievement();
    assert_eq!(state.achievements(), ["Network Layer Unlocked!"]);

    state.select(Layer::Perception);
    let repeat = run_to_completion(&mut state);
    assert_eq!(repeat.newly_unlocked, None);
    assert_eq!(repeat.new_achievements, vec!["Perception Master".to_string()]);
}

#[test]
fn controller_click_arms_the_step_timer() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);
    assert_eq!(controller.next_deadline(), None);

    assert!(controller.handle_layer_click(Layer::Perception, start).started());
    assert_eq!(controller.next_deadline(), Some(start + INTERVAL));
}

#[test]
fn ignored_clicks_leave_the_timer_alone() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);

    assert_eq!(
        controller.handle_layer_click(Layer::Network, start),
        ClickOutcome::IgnoredLocked
    );
    assert_eq!(controller.pending_tick(), None);

    controller.handle_layer_click(Layer::Perception, start);
    let armed = controller.pending_tick();
    controller.handle_layer_click(Layer::Perception, start + Duration::from_millis(700));
    assert_eq!(controller.pending_tick(), armed);
}

#[test]
fn advance_waits_for_the_deadline() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);
    controller.handle_layer_click(Layer::Perception, start);

    assert!(controller
        .advance(start + INTERVAL - Duration::from_millis(1))
        .is_empty());
    assert_eq!(
        controller.advance(start + INTERVAL),
        vec![TickOutcome::Advanced(Step::new(1).expect("step"))]
    );
    assert_eq!(controller.next_deadline(), Some(start + INTERVAL * 2));
}

#[test]
fn advance_catches_up_on_a_late_frame_and_stops_at_completion() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);
    controller.handle_layer_click(Layer::Perception, start);

    let outcomes = controller.advance(start + INTERVAL * 10);
    assert_eq!(outcomes.len(), 4);
    assert!(matches!(outcomes.last(), Some(TickOutcome::Completed(_))));
    assert_eq!(controller.pending_tick(), None);
    assert_eq!(controller.state().score(), 10);
}

#[test]
fn stale_token_from_an_earlier_sequence_is_discarded() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);
    controller.handle_layer_click(Layer::Perception, start);
    let first_token = controller.pending_tick().expect("armed").token;

    let mut now = start;
    while controller.state().is_animating() {
        now += INTERVAL;
        let expiry = controller.pending_tick().expect("armed");
        controller.fire(expiry.token, now);
    }

    controller.handle_layer_click(Layer::Network, now);
    let before = controller.snapshot();
    assert_eq!(controller.fire(first_token, now + INTERVAL), TickOutcome::Stale);
    assert_eq!(controller.snapshot(), before);
}

#[test]
fn manual_tick_rearms_from_the_given_instant() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);
    controller.handle_layer_click(Layer::Perception, start);

    let later = start + Duration::from_millis(300);
    assert_eq!(
        controller.tick(later),
        TickOutcome::Advanced(Step::new(1).expect("step"))
    );
    assert_eq!(controller.next_deadline(), Some(later + INTERVAL));
}

#[test]
fn apply_routes_each_event_kind() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);

    assert_eq!(
        controller.apply(ControllerEvent::AchievementDismissed, start),
        EventOutcome::Dismissed(None)
    );
    assert_eq!(
        controller.apply(ControllerEvent::Tick, start),
        EventOutcome::Tick(TickOutcome::Idle)
    );
    assert_eq!(
        controller.apply(ControllerEvent::LayerClicked(Layer::Perception), start),
        EventOutcome::Click(ClickOutcome::Started)
    );
}

#[test]
fn snapshot_serializes_with_layer_ids() {
    let start = Instant::now();
    let mut controller = SimulationController::new(INTERVAL);
    controller.handle_layer_click(Layer::Perception, start);

    let json = serde_json::to_value(controller.snapshot()).expect("serialize");
    assert_eq!(json["active_layer"], "perception");
    assert_eq!(json["step"], 0);
    assert_eq!(json["is_animating"], true);
    assert_eq!(json["unlocked_layers"], serde_json::json!(["perception"]));
}

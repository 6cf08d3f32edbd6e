//! End-to-end round scenarios against the pure state machine.

use strictly_rps_core::{
    Effect, Event, HandLandmark, LANDMARK_COUNT, Landmark, Move, Phase, RoundId, RoundMachine,
    RoundOutcome, Score, Snapshot, Timer,
};

const WRIST_Y: f32 = 420.0;

fn pose(index: bool, middle: bool, ring: bool, pinky: bool) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(320.0, WRIST_Y); LANDMARK_COUNT];
    for (tip, up) in HandLandmark::FINGERTIPS.iter().zip([index, middle, ring, pinky]) {
        let lift = if up { 120.0 } else { 10.0 };
        points[tip.to_index()] = Landmark::new(320.0, WRIST_Y - lift);
    }
    points
}

/// Interprets effects the way a driver would, with scripted detection and AI draw.
fn play_round(
    machine: &mut RoundMachine,
    detection: Option<Vec<Landmark>>,
    ai_move: Move,
) -> (Snapshot, Vec<Effect>) {
    let mut detection = Some(detection);
    let mut log = Vec::new();
    let mut pending = machine.handle(Event::Start).effects;
    let mut last = machine.snapshot();

    while let Some(effect) = pending.first().copied() {
        pending.remove(0);
        log.push(effect);
        let event = match effect {
            Effect::StartTimer { round, timer, .. } => Event::TimerElapsed { round, timer },
            Effect::RequestDetection { round } => Event::Detected {
                round,
                detection: detection.take().expect("one detection per round"),
            },
            Effect::DrawAiMove { round } => Event::AiMoveDrawn { round, ai_move },
            Effect::Celebrate { .. } => continue,
        };
        let transition = machine.handle(event);
        last = transition.snapshot;
        pending.extend(transition.effects);
    }
    (last, log)
}

fn ready_machine() -> RoundMachine {
    let mut machine = RoundMachine::default();
    machine.handle(Event::DetectorReady(true));
    machine
}

fn position<F: Fn(&Effect) -> bool>(log: &[Effect], f: F) -> usize {
    log.iter().position(f).expect("effect present")
}

#[test]
fn test_rock_beats_scissors() {
    let mut machine = ready_machine();
    let (snapshot, log) = play_round(
        &mut machine,
        Some(pose(false, false, false, false)),
        Move::Scissors,
    );

    assert_eq!(snapshot.phase(), Phase::Idle);
    let round = snapshot.round().unwrap();
    assert_eq!(round.player_move(), Some(Move::Rock));
    assert_eq!(round.ai_move(), Some(Move::Scissors));
    assert_eq!(round.outcome(), Some(RoundOutcome::Win));
    assert_eq!(snapshot.score().player_wins(), 1);
    assert_eq!(snapshot.score().ai_wins(), 0);
    assert!(log.iter().any(|e| matches!(e, Effect::Celebrate { .. })));
}

#[test]
fn test_paper_against_paper_ties() {
    let mut machine = ready_machine();
    let (snapshot, log) = play_round(
        &mut machine,
        Some(pose(true, true, true, true)),
        Move::Paper,
    );

    let round = snapshot.round().unwrap();
    assert_eq!(round.player_move(), Some(Move::Paper));
    assert_eq!(round.outcome(), Some(RoundOutcome::Tie));
    assert_eq!(snapshot.score(), Score::new());
    assert!(!log.iter().any(|e| matches!(e, Effect::Celebrate { .. })));
}

#[test]
fn test_no_hand_ends_round_without_scoring() {
    let mut machine = ready_machine();
    let (snapshot, log) = play_round(&mut machine, None, Move::Rock);

    assert_eq!(snapshot.phase(), Phase::Idle);
    assert_eq!(snapshot.round().unwrap().outcome(), Some(RoundOutcome::NoHand));
    assert_eq!(snapshot.score(), Score::new());
    assert!(!log.iter().any(|e| matches!(e, Effect::DrawAiMove { .. })));
}

#[test]
fn test_scissors_loses_to_rock() {
    let mut machine = ready_machine();
    let (snapshot, _) = play_round(
        &mut machine,
        Some(pose(true, true, false, false)),
        Move::Rock,
    );

    let round = snapshot.round().unwrap();
    assert_eq!(round.player_move(), Some(Move::Scissors));
    assert_eq!(round.outcome(), Some(RoundOutcome::Lose));
    assert_eq!(snapshot.score().ai_wins(), 1);
    assert_eq!(snapshot.score().player_wins(), 0);
}

#[test]
fn test_capture_precedes_draw_precedes_scoring() {
    let mut machine = ready_machine();
    let (_, log) = play_round(&mut machine, Some(pose(false, false, false, false)), Move::Scissors);

    let capture = position(&log, |e| matches!(e, Effect::RequestDetection { .. }));
    let reveal = position(&log, |e| {
        matches!(e, Effect::StartTimer { timer: Timer::Reveal, .. })
    });
    let draw = position(&log, |e| matches!(e, Effect::DrawAiMove { .. }));
    let celebrate = position(&log, |e| matches!(e, Effect::Celebrate { .. }));
    assert!(capture < reveal && reveal < draw && draw < celebrate);
}

#[test]
fn test_score_accumulates_across_rounds_and_resets() {
    let mut machine = ready_machine();
    let rounds = [
        (pose(false, false, false, false), Move::Scissors), // win
        (pose(true, true, true, true), Move::Rock),         // win
        (pose(true, true, false, false), Move::Rock),       // lose
        (pose(true, true, true, true), Move::Paper),        // tie
    ];
    for (points, ai) in rounds {
        play_round(&mut machine, Some(points), ai);
    }
    assert_eq!(machine.score().player_wins(), 2);
    assert_eq!(machine.score().ai_wins(), 1);

    let t = machine.handle(Event::Reset);
    assert_eq!(t.snapshot.score(), Score::new());
    assert_eq!(t.snapshot.phase(), Phase::Idle);
    assert!(t.snapshot.round().is_none());
}

#[test]
fn test_round_ids_increase() {
    let mut machine = ready_machine();
    let (first, _) = play_round(&mut machine, None, Move::Rock);
    let (second, _) = play_round(&mut machine, None, Move::Rock);
    assert_eq!(first.round().unwrap().id(), RoundId(1));
    assert_eq!(second.round().unwrap().id(), RoundId(2));
}

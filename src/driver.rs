//! Runs the round state machine on the tokio event loop.
//!
//! The driver owns the machine and interprets its effects: timers become
//! spawned sleeps, detection requests go to a dedicated detector task, and
//! AI draws come from the driver's RNG. Every resulting snapshot is
//! published to the presenter channel.

use crate::config::GameConfig;
use crate::source::KeypointSource;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use strictly_rps_core::{
    Effect, Event, GestureClassifier, Move, RoundId, RoundMachine, Score, Snapshot,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Commands from the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a round.
    Start,
    /// Zero the score and abandon any round in flight.
    Reset,
    /// Stop the driver.
    Shutdown,
}

/// Messages sent from the driver to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// State changed.
    Snapshot(Snapshot),
    /// Player won a round.
    Celebrate(RoundId),
}

/// Owns a [`RoundMachine`] and performs its effects.
pub struct RoundDriver<S> {
    machine: RoundMachine,
    source: S,
    rng: StdRng,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl<S> RoundDriver<S>
where
    S: KeypointSource + 'static,
{
    /// Creates a driver from its parts.
    pub fn new(
        machine: RoundMachine,
        source: S,
        rng: StdRng,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            machine,
            source,
            rng,
            events,
        }
    }

    /// Creates a driver configured from `config`.
    ///
    /// Uses the configured seed when present, entropy otherwise.
    pub fn from_config(
        config: &GameConfig,
        source: S,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let machine = RoundMachine::new(
            GestureClassifier::new(*config.classifier()),
            config.timing().to_timing(),
        );
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        Self::new(machine, source, rng, events)
    }

    /// Runs until [`Command::Shutdown`] or the command channel closes.
    ///
    /// Returns the final score.
    #[instrument(skip_all, fields(source = %self.source.name()))]
    pub async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) -> Result<Score> {
        let Self {
            mut machine,
            source,
            mut rng,
            events,
        } = self;

        let ready = source.is_ready();
        let (completions_tx, mut completions) = mpsc::unbounded_channel();
        let (detect_tx, detect_rx) = mpsc::unbounded_channel();
        let detector = spawn_detector(source, detect_rx, completions_tx.clone());

        let mut effects = EffectRunner {
            rng: &mut rng,
            completions: &completions_tx,
            detections: &detect_tx,
            events: &events,
        };

        info!(ready, "Round driver started");
        effects.dispatch(&mut machine, Event::DetectorReady(ready))?;

        loop {
            let event = tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Start) => Event::Start,
                    Some(Command::Reset) => Event::Reset,
                    Some(Command::Shutdown) | None => break,
                },
                Some(event) = completions.recv() => event,
            };
            effects.dispatch(&mut machine, event)?;
        }

        drop(effects);
        drop(detect_tx);
        if let Err(e) = detector.await {
            warn!(error = %e, "Detector task failed");
        }

        let score = machine.score();
        info!(%score, "Round driver stopped");
        Ok(score)
    }
}

/// Borrowed handles used while interpreting effects.
struct EffectRunner<'a> {
    rng: &'a mut StdRng,
    completions: &'a mpsc::UnboundedSender<Event>,
    detections: &'a mpsc::UnboundedSender<RoundId>,
    events: &'a mpsc::UnboundedSender<GameEvent>,
}

impl EffectRunner<'_> {
    /// Feeds `event` to the machine, then performs effects until none remain.
    ///
    /// AI draws are resolved inline so the reveal happens in the same turn of
    /// the event loop as the reveal timer.
    fn dispatch(&mut self, machine: &mut RoundMachine, event: Event) -> Result<()> {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let transition = machine.handle(event);
            self.events.send(GameEvent::Snapshot(transition.snapshot))?;

            for effect in transition.effects {
                match effect {
                    Effect::StartTimer {
                        round,
                        timer,
                        after,
                    } => {
                        debug!(%round, %timer, ?after, "Starting timer");
                        let completions = self.completions.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(after).await;
                            // Closed channel means the driver has stopped.
                            let _ = completions.send(Event::TimerElapsed { round, timer });
                        });
                    }
                    Effect::RequestDetection { round } => {
                        debug!(%round, "Requesting detection");
                        self.detections.send(round)?;
                    }
                    Effect::DrawAiMove { round } => {
                        let ai_move = Move::ALL[self.rng.gen_range(0..Move::ALL.len())];
                        debug!(%round, %ai_move, "AI move drawn");
                        queue.push_back(Event::AiMoveDrawn { round, ai_move });
                    }
                    Effect::Celebrate { round } => {
                        self.events.send(GameEvent::Celebrate(round))?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Serves detection requests one at a time from `source`.
///
/// Source errors are logged and reported as an empty detection.
fn spawn_detector<S>(
    mut source: S,
    mut requests: mpsc::UnboundedReceiver<RoundId>,
    results: mpsc::UnboundedSender<Event>,
) -> JoinHandle<()>
where
    S: KeypointSource + 'static,
{
    tokio::spawn(async move {
        while let Some(round) = requests.recv().await {
            let detection = match source.detect().await {
                Ok(detection) => detection,
                Err(e) => {
                    warn!(%round, error = %e, "Detection failed, treating as no hand");
                    None
                }
            };
            if results.send(Event::Detected { round, detection }).is_err() {
                break;
            }
        }
        debug!("Detector task exiting");
    })
}

//! Headless play: run a fixed number of rounds and collect the results.

use crate::config::GameConfig;
use crate::driver::{Command, GameEvent, RoundDriver};
use crate::source::KeypointSource;
use anyhow::{Context, Result, bail};
use derive_getters::Getters;
use derive_new::new;
use strictly_rps_core::{Classification, Move, Phase, RoundId, RoundOutcome, Score};
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// What happened in one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct RoundSummary {
    /// Round generation.
    round: RoundId,
    /// Classified player gesture.
    player: Option<Classification>,
    /// AI move, for decided rounds.
    ai_move: Option<Move>,
    /// Final outcome.
    outcome: RoundOutcome,
}

impl std::fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let player = self
            .player
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        let ai = self.ai_move.map_or_else(|| "-".to_string(), |m| m.to_string());
        write!(f, "Round {}: {} vs {} → {}", self.round, player, ai, self.outcome)
    }
}

/// Results of a headless session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionReport {
    /// Finished rounds, in order.
    rounds: Vec<RoundSummary>,
    /// Final score.
    score: Score,
    /// Number of celebration cues received.
    celebrations: usize,
}

/// Plays `rounds` rounds back to back against `source`.
///
/// Each round starts as soon as the previous one has returned to idle.
#[instrument(skip(config, source))]
pub async fn play_rounds<S>(
    config: &GameConfig,
    source: S,
    rounds: usize,
) -> Result<SessionReport>
where
    S: KeypointSource + 'static,
{
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let driver = RoundDriver::from_config(config, source, event_tx);
    let handle = tokio::spawn(driver.run(command_rx));

    let mut summaries = Vec::with_capacity(rounds);
    let mut celebrations = 0;
    let mut in_flight = false;
    let mut stopping = false;

    while let Some(event) = event_rx.recv().await {
        let snapshot = match event {
            GameEvent::Snapshot(snapshot) => snapshot,
            GameEvent::Celebrate(round) => {
                info!(%round, "🎉");
                celebrations += 1;
                continue;
            }
        };

        match snapshot.phase() {
            Phase::Finished if in_flight => {
                let Some(round) = snapshot.round() else {
                    bail!("Finished phase without a round");
                };
                let Some(outcome) = round.outcome() else {
                    bail!("Finished round {} has no outcome", round.id());
                };
                let summary =
                    RoundSummary::new(round.id(), round.player(), round.ai_move(), outcome);
                info!(%summary, score = %snapshot.score(), "Round finished");
                summaries.push(summary);
                in_flight = false;
            }
            Phase::Idle if !in_flight && !stopping => {
                if !snapshot.can_start() {
                    command_tx.send(Command::Shutdown).ok();
                    bail!("Detector not ready");
                }
                if summaries.len() < rounds {
                    command_tx.send(Command::Start)?;
                    in_flight = true;
                } else {
                    command_tx.send(Command::Shutdown)?;
                    stopping = true;
                }
            }
            _ => {}
        }
    }

    let score = handle.await.context("Round driver panicked")??;
    Ok(SessionReport {
        rounds: summaries,
        score,
        celebrations,
    })
}

use log::debug;

use crate::config;
use crate::hero::pool::{HandlePool, Revoke};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerEvent {
    ClickAdvance,
    AnimationStarted,
    AnimationCompleted,
}

/// What the view has to do in response to an accepted event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run the swap animation towards the new cursor.
    StartSwap,
    /// Start playback of the next-video element.
    PlayNext,
    /// Repoint the main video at the new cursor, continuing from the transition clip.
    Handoff,
}

/// Next index in the 1..=total cycle.
pub fn successor(index: usize, total: usize) -> usize {
    (index % total) + 1
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sequencer {
    pub total: usize,
    pub cursor: usize,
    pub phase: Phase,
    /// Bumped on every accepted click so effects keyed on it re-run even when
    /// the cursor wraps back to a value it had before.
    pub generation: u32,
}

impl Sequencer {
    pub fn new(total: usize) -> Self {
        Self {
            total: total.max(1),
            cursor: 1,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn upcoming(&self) -> usize {
        successor(self.cursor, self.total)
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    /// Applies `event`. Returns the effect to perform, or `None` if the event
    /// is not accepted in the current phase. Clicks during a running swap are
    /// dropped.
    pub fn handle(&mut self, event: SequencerEvent) -> Option<Effect> {
        match (self.phase, event) {
            (Phase::Idle, SequencerEvent::ClickAdvance) => {
                self.cursor = successor(self.cursor, self.total);
                self.phase = Phase::Transitioning;
                self.generation = self.generation.wrapping_add(1);
                Some(Effect::StartSwap)
            }
            (Phase::Transitioning, SequencerEvent::AnimationStarted) => Some(Effect::PlayNext),
            (Phase::Transitioning, SequencerEvent::AnimationCompleted) => {
                self.phase = Phase::Idle;
                Some(Effect::Handoff)
            }
            (phase, event) => {
                debug!("Ignoring {:?} while {:?}", event, phase);
                None
            }
        }
    }
}

/// Source for the main video after a swap: the clip at `cursor`, seeked to where
/// the transition clip stopped. `None` if that clip is not loaded.
pub fn handoff_src<R: Revoke>(pool: &HandlePool<R>, cursor: usize, current_time: f64) -> Option<String> {
    pool.get(cursor)
        .map(|url| format!("{}#t={}", url, current_time + config::HANDOFF_EPSILON_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::pool::tests::RecordingRevoker;

    fn click_and_finish(seq: &mut Sequencer) {
        assert_eq!(seq.handle(SequencerEvent::ClickAdvance), Some(Effect::StartSwap));
        assert_eq!(seq.handle(SequencerEvent::AnimationStarted), Some(Effect::PlayNext));
        assert_eq!(seq.handle(SequencerEvent::AnimationCompleted), Some(Effect::Handoff));
    }

    #[test]
    fn successor_wraps_around() {
        assert_eq!(successor(4, 4), 1);
        for i in 1..4 {
            assert_eq!(successor(i, 4), i + 1);
        }
        assert_eq!(successor(1, 1), 1);
    }

    #[test]
    fn starts_idle_at_first_clip() {
        let seq = Sequencer::new(4);
        assert_eq!(seq.cursor, 1);
        assert_eq!(seq.upcoming(), 2);
        assert_eq!(seq.phase, Phase::Idle);
    }

    #[test]
    fn clicks_cycle_through_all_clips() {
        let mut seq = Sequencer::new(4);
        let mut seen = Vec::new();
        for _ in 0..4 {
            click_and_finish(&mut seq);
            seen.push(seq.cursor);
        }
        assert_eq!(seen, vec![2, 3, 4, 1]);
        assert_eq!(seq.upcoming(), 2);
    }

    #[test]
    fn click_enters_transitioning() {
        let mut seq = Sequencer::new(4);
        seq.handle(SequencerEvent::ClickAdvance);
        assert!(seq.is_transitioning());
        assert_eq!(seq.cursor, 2);
    }

    #[test]
    fn clicks_during_transition_are_ignored() {
        let mut seq = Sequencer::new(4);
        seq.handle(SequencerEvent::ClickAdvance);
        assert_eq!(seq.handle(SequencerEvent::ClickAdvance), None);
        assert_eq!(seq.cursor, 2);
        assert_eq!(seq.generation, 1);
    }

    #[test]
    fn animation_events_while_idle_are_ignored() {
        let mut seq = Sequencer::new(4);
        assert_eq!(seq.handle(SequencerEvent::AnimationStarted), None);
        assert_eq!(seq.handle(SequencerEvent::AnimationCompleted), None);
        assert_eq!(seq, Sequencer::new(4));
    }

    #[test]
    fn completing_a_swap_returns_to_idle_and_accepts_clicks_again() {
        let mut seq = Sequencer::new(4);
        click_and_finish(&mut seq);
        assert_eq!(seq.phase, Phase::Idle);
        assert_eq!(seq.handle(SequencerEvent::ClickAdvance), Some(Effect::StartSwap));
        assert_eq!(seq.cursor, 3);
        assert_eq!(seq.generation, 2);
    }

    #[test]
    fn handoff_seeks_past_the_transition_clip() {
        let mut pool = HandlePool::with_revoker(RecordingRevoker::default());
        pool.insert(2, "blob:two".into());

        assert_eq!(handoff_src(&pool, 2, 0.0).as_deref(), Some("blob:two#t=0.038"));

        let src = handoff_src(&pool, 2, 1.5).unwrap();
        let (url, offset) = src.split_once("#t=").unwrap();
        assert_eq!(url, "blob:two");
        assert!((offset.parse::<f64>().unwrap() - 1.538).abs() < 1e-9);
    }

    #[test]
    fn handoff_is_skipped_without_a_handle() {
        let mut pool = HandlePool::with_revoker(RecordingRevoker::default());
        pool.insert(1, "blob:one".into());
        assert_eq!(handoff_src(&pool, 3, 2.0), None);
    }
}

// Simulated rendering host - plays a Playback against a virtual clock and
// reports each card's "transition finished" in finish-time order

use crate::reveal::{NotifyOutcome, Playback, RevealScheduler};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishEvent {
    pub generation: u64,
    pub index: usize,
    /// Seconds after playback start
    pub at: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedHost {
    events: Vec<FinishEvent>,
    delivered: usize,
    elapsed: f64,
}

impl SimulatedHost {
    /// Schedule every transition of `playback`
    pub fn play(playback: &Playback) -> Self {
        let mut events: Vec<FinishEvent> = playback
            .transitions
            .iter()
            .map(|transition| FinishEvent {
                generation: playback.generation,
                index: transition.index,
                at: transition.finish_time(),
            })
            .collect();
        // Stable: equal finish times keep playback order
        events.sort_by(|a, b| a.at.total_cmp(&b.at));

        Self {
            events,
            delivered: 0,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn pending(&self) -> usize {
        self.events.len() - self.delivered
    }

    pub fn is_finished(&self) -> bool {
        self.pending() == 0
    }

    /// Move the clock forward and return the events that fired on the way
    pub fn advance_to(&mut self, elapsed: f64) -> Vec<FinishEvent> {
        self.elapsed = self.elapsed.max(elapsed);
        let start = self.delivered;
        while self.delivered < self.events.len() && self.events[self.delivered].at <= self.elapsed {
            self.delivered += 1;
        }
        self.events[start..self.delivered].to_vec()
    }

    /// Deliver events to the scheduler up to `elapsed`. Stops early when the
    /// scheduler starts a new generation, since the rest are then stale.
    pub fn deliver_until(&mut self, scheduler: &mut RevealScheduler, elapsed: f64) -> Vec<NotifyOutcome> {
        let mut outcomes = Vec::new();
        for event in self.advance_to(elapsed) {
            let outcome = scheduler.notify_finished(event.generation, event.index);
            outcomes.push(outcome);
            if scheduler.generation() != event.generation {
                break;
            }
        }
        outcomes
    }

    /// Deliver everything that is left
    pub fn run_to_end(&mut self, scheduler: &mut RevealScheduler) -> Vec<NotifyOutcome> {
        self.deliver_until(scheduler, f64::INFINITY)
    }
}

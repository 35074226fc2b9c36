use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// A repeating timer that fires at a fixed interval.
///
/// Each tick emits the current [`Instant`]. The `id` string distinguishes
/// concurrent timers. Missed ticks are skipped rather than bunched, so a
/// stalled loop does not replay a burst of stale animation frames.
///
/// ```rust,ignore
/// let frames = subscribe(Every::new(Duration::from_millis(16), "card-frames"))
///     .map(Msg::Frame);
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// A string identifier used to distinguish this timer from others.
    pub id: &'static str,
}

impl Every {
    /// Create a new repeating timer with the given interval and identifier.
    pub fn new(interval: Duration, id: &'static str) -> Self {
        Self { interval, id }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let mut interval = tokio::time::interval(self.interval.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let stream =
            tokio_stream::wrappers::IntervalStream::new(interval).map(|tick| tick.into_std());
        Box::pin(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_depends_on_name_only() {
        let a = Every::new(Duration::from_millis(16), "frames");
        let b = Every::new(Duration::from_millis(33), "frames");
        let c = Every::new(Duration::from_millis(16), "other");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[tokio::test]
    async fn every_emits_ticks() {
        let mut stream = Every::new(Duration::from_millis(1), "test").stream();
        let first = stream.next().await;
        let second = stream.next().await;
        match (first, second) {
            (Some(a), Some(b)) => assert!(b >= a),
            _ => panic!("timer stream ended early"),
        }
    }
}

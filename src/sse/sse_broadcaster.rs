use crate::db::Poll;
use crate::sse::models::PollEvent;
use tokio::sync::broadcast;

const MAX_CAPACITY: usize = 65_536;

/// Stateless fan-out over whoever is subscribed at the moment of the call.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<PollEvent>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let bounded = capacity.clamp(1, MAX_CAPACITY);
        if bounded != capacity {
            warn!("broadcast capacity {capacity} out of range, using {bounded}");
        }
        let (tx, _rx) = broadcast::channel(bounded);
        Broadcaster { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PollEvent> {
        self.tx.subscribe()
    }

    pub fn observers(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Pushes the full record, admin id included, to every observer.
    pub fn poll_updated(&self, poll: &Poll) -> usize {
        self.send(PollEvent::PollUpdated(poll.clone()))
    }

    pub fn poll_stopped(&self, poll_id: &str) -> usize {
        self.send(PollEvent::PollStopped(poll_id.to_string()))
    }

    fn send(&self, event: PollEvent) -> usize {
        let name = event.name();
        // no receivers is not an error here
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!("broadcast {name} to {delivered} observer(s)");
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::PollOption;
    use chrono::Utc;

    fn poll() -> Poll {
        Poll {
            poll_id: "p_1".to_string(),
            admin_id: "a_1".to_string(),
            question: "Q?".to_string(),
            options: vec![
                PollOption {
                    text: "a".to_string(),
                    votes: 0,
                },
                PollOption {
                    text: "b".to_string(),
                    votes: 0,
                },
            ],
            show_results: false,
            end_time: None,
            is_stopped: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sending_without_observers_is_fine() {
        let broadcaster = Broadcaster::new(8);
        assert_eq!(broadcaster.observers(), 0);
        assert_eq!(broadcaster.poll_stopped("p_1"), 0);
    }

    #[tokio::test]
    async fn out_of_range_capacity_is_clamped() {
        for capacity in [0, usize::MAX] {
            let broadcaster = Broadcaster::new(capacity);
            let mut rx = broadcaster.subscribe();
            assert_eq!(broadcaster.poll_stopped("p_1"), 1);
            assert_eq!(
                rx.recv().await.unwrap(),
                PollEvent::PollStopped("p_1".to_string())
            );
        }
    }

    #[tokio::test]
    async fn every_observer_gets_every_event() {
        let broadcaster = Broadcaster::new(8);
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        let poll = poll();

        assert_eq!(broadcaster.poll_updated(&poll), 2);
        assert_eq!(broadcaster.poll_stopped("p_1"), 2);

        for rx in [&mut first, &mut second] {
            assert_eq!(rx.recv().await.unwrap(), PollEvent::PollUpdated(poll.clone()));
            assert_eq!(
                rx.recv().await.unwrap(),
                PollEvent::PollStopped("p_1".to_string())
            );
        }
    }

    #[tokio::test]
    async fn late_subscribers_see_only_new_events() {
        let broadcaster = Broadcaster::new(8);
        let _early = broadcaster.subscribe();
        broadcaster.poll_stopped("p_old");

        let mut late = broadcaster.subscribe();
        broadcaster.poll_stopped("p_new");

        assert_eq!(
            late.recv().await.unwrap(),
            PollEvent::PollStopped("p_new".to_string())
        );
    }
}

// Timer-driven effects: staggered slot reveals after a draw and the name
// roulette before each turn.
//
// Every event carries the draw generation it was scheduled under. The event
// loop drops events whose generation no longer matches the session, so an
// aborted task that already queued an event cannot leak into a newer draw.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use rdraft_core::config::RevealConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// Time to reveal the next hidden slot.
    SlotRevealed { generation: u64 },
    /// One roulette frame for `turn_index`. The settled frame is last.
    Roulette {
        generation: u64,
        turn_index: usize,
        name: String,
        settled: bool,
    },
}

impl RevealEvent {
    pub fn generation(&self) -> u64 {
        match self {
            RevealEvent::SlotRevealed { generation } => *generation,
            RevealEvent::Roulette { generation, .. } => *generation,
        }
    }
}

pub struct RevealScheduler {
    tx: mpsc::Sender<RevealEvent>,
    slot_interval: Duration,
    roulette_ticks: u32,
    roulette_interval: Duration,
    reveal_task: Option<JoinHandle<()>>,
    roulette_task: Option<JoinHandle<()>>,
}

impl RevealScheduler {
    pub fn new(config: &RevealConfig, tx: mpsc::Sender<RevealEvent>) -> Self {
        RevealScheduler {
            tx,
            slot_interval: config.slot_interval(),
            roulette_ticks: config.roulette_ticks,
            roulette_interval: config.roulette_interval(),
            reveal_task: None,
            roulette_task: None,
        }
    }

    pub fn roulette_ticks(&self) -> u32 {
        self.roulette_ticks
    }

    /// Emit `count` reveal ticks, one per slot interval. Replaces any pending
    /// reveal and roulette.
    pub fn schedule_reveals(&mut self, generation: u64, count: usize) {
        self.cancel_all();
        let tx = self.tx.clone();
        let interval = self.slot_interval;
        self.reveal_task = Some(tokio::spawn(async move {
            for _ in 0..count {
                tokio::time::sleep(interval).await;
                if tx.send(RevealEvent::SlotRevealed { generation }).await.is_err() {
                    return;
                }
            }
        }));
        info!("Scheduled {} reveals (gen: {})", count, generation);
    }

    /// Play pre-picked roulette `frames`, then settle on `settled`.
    pub fn schedule_roulette(
        &mut self,
        generation: u64,
        turn_index: usize,
        frames: Vec<String>,
        settled: String,
    ) {
        self.cancel_roulette();
        let tx = self.tx.clone();
        let interval = self.roulette_interval;
        self.roulette_task = Some(tokio::spawn(async move {
            for name in frames {
                tokio::time::sleep(interval).await;
                let frame = RevealEvent::Roulette {
                    generation,
                    turn_index,
                    name,
                    settled: false,
                };
                if tx.send(frame).await.is_err() {
                    return;
                }
            }
            let _ = tx
                .send(RevealEvent::Roulette {
                    generation,
                    turn_index,
                    name: settled,
                    settled: true,
                })
                .await;
        }));
        debug!("Scheduled roulette for turn {} (gen: {})", turn_index, generation);
    }

    pub fn cancel_roulette(&mut self) {
        if let Some(handle) = self.roulette_task.take() {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        if let Some(handle) = self.reveal_task.take() {
            handle.abort();
            debug!("Cancelled pending reveals");
        }
        self.cancel_roulette();
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RevealConfig {
        RevealConfig {
            slot_interval_ms: 1000,
            roulette_ticks: 3,
            roulette_interval_ms: 60,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_arrive_one_interval_apart() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = RevealScheduler::new(&config(), tx);
        let start = tokio::time::Instant::now();
        scheduler.schedule_reveals(4, 3);

        for i in 1..=3u64 {
            let event = rx.recv().await.unwrap();
            assert_eq!(event, RevealEvent::SlotRevealed { generation: 4 });
            assert!(start.elapsed() >= Duration::from_millis(1000 * i));
        }
        drop(scheduler);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_aborts_the_previous_draw() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = RevealScheduler::new(&config(), tx);
        scheduler.schedule_reveals(1, 5);
        scheduler.schedule_reveals(2, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.generation(), 2);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn roulette_ends_on_the_settled_name() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = RevealScheduler::new(&config(), tx);
        scheduler.schedule_roulette(
            7,
            1,
            vec!["A".into(), "C".into(), "A".into()],
            "B".into(),
        );

        let mut names = Vec::new();
        loop {
            match rx.recv().await.unwrap() {
                RevealEvent::Roulette { name, settled, turn_index, .. } => {
                    assert_eq!(turn_index, 1);
                    names.push(name);
                    if settled {
                        break;
                    }
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert_eq!(names, vec!["A", "C", "A", "B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_silences_everything() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = RevealScheduler::new(&config(), tx);
        scheduler.schedule_reveals(1, 3);
        scheduler.schedule_roulette(1, 0, vec!["A".into()], "A".into());
        scheduler.cancel_all();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}

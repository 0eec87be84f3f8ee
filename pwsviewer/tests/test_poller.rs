use async_trait::async_trait;
use pwsviewer::{ListSource, Scheduler, SyncPoller};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Source de liste contrôlée par le test
struct FakeSource {
    names: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl FakeSource {
    fn new(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            names: Mutex::new(names.iter().map(|s| s.to_string()).collect()),
            failing: Mutex::new(false),
        })
    }

    fn set_names(&self, names: &[&str]) {
        *self.names.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
    }

    fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl ListSource for FakeSource {
    async fn list_names(&self) -> anyhow::Result<Vec<String>> {
        if *self.failing.lock().unwrap() {
            anyhow::bail!("simulated fetch failure");
        }
        Ok(self.names.lock().unwrap().clone())
    }
}

fn make_poller(source: Arc<FakeSource>) -> (Scheduler, SyncPoller) {
    let scheduler = Scheduler::new(Duration::from_secs(10));
    let poller = SyncPoller::new(
        scheduler.clone(),
        source as Arc<dyn ListSource>,
        Duration::from_secs(60),
    );
    (scheduler, poller)
}

#[tokio::test]
async fn test_first_tick_starts_playback() {
    let source = FakeSource::new(&["a.png", "b.png"]);
    let (scheduler, poller) = make_poller(source);

    assert!(scheduler.is_idle());
    poller.tick().await;
    assert!(!scheduler.is_idle());
}

#[tokio::test]
async fn test_reordered_list_is_not_a_change() {
    let source = FakeSource::new(&["a.png", "b.png", "c.png"]);
    let (scheduler, poller) = make_poller(source.clone());

    poller.tick().await;
    let queue_before = scheduler.queue_snapshot();
    assert!(!queue_before.is_empty());

    // Même ensemble dans un autre ordre : la file reste intacte
    source.set_names(&["c.png", "a.png", "b.png"]);
    poller.tick().await;
    assert_eq!(scheduler.queue_snapshot(), queue_before);
}

#[tokio::test]
async fn test_membership_change_forces_rebuild() {
    let source = FakeSource::new(&["a.png", "b.png", "c.png"]);
    let (scheduler, poller) = make_poller(source.clone());

    poller.tick().await;
    assert!(!scheduler.queue_snapshot().is_empty());

    source.set_names(&["a.png", "d.png"]);
    poller.tick().await;

    // File abandonnée : reconstruite au prochain advance sur le nouveau pool
    assert!(scheduler.queue_snapshot().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_retried_next_tick() {
    let source = FakeSource::new(&["a.png"]);
    source.set_failing(true);
    let (scheduler, poller) = make_poller(source.clone());

    // L'échec est avalé, rien ne démarre
    poller.tick().await;
    assert!(scheduler.is_idle());

    // Le tick suivant réussit et démarre la lecture
    source.set_failing(false);
    poller.tick().await;
    assert!(!scheduler.is_idle());
}

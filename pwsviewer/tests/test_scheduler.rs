use pwsviewer::{Scheduler, SlideEvent};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::broadcast;

const DWELL: Duration = Duration::from_secs(10);

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Vide le canal d'évènements et retourne les slides reçus
fn drain(rx: &mut broadcast::Receiver<SlideEvent>) -> Vec<String> {
    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event.slide.name);
    }
    seen
}

#[tokio::test]
async fn test_idle_until_first_list() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    assert!(scheduler.is_idle());
    assert!(scheduler.current().is_none());

    // Une liste vide ne démarre rien
    scheduler.on_list_changed(Vec::new());
    assert!(scheduler.is_idle());
    assert!(drain(&mut rx).is_empty());

    // La première liste non vide démarre la lecture
    scheduler.on_list_changed(names(&["a.png"]));
    assert!(!scheduler.is_idle());
    assert_eq!(drain(&mut rx), vec!["a.png".to_string()]);
}

#[tokio::test]
async fn test_full_cycle_shows_every_member_exactly_once() {
    let pool = names(&["a.png", "b.png", "c.png", "d.png", "e.png"]);
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(pool.clone());
    for _ in 0..pool.len() - 1 {
        scheduler.advance();
    }

    let shown = drain(&mut rx);
    assert_eq!(shown.len(), pool.len());

    let shown_set: HashSet<&String> = shown.iter().collect();
    let pool_set: HashSet<&String> = pool.iter().collect();
    assert_eq!(shown_set, pool_set, "one cycle must cover the whole pool");
}

#[tokio::test]
async fn test_no_repeat_across_cycle_boundaries() {
    let pool = names(&["a.png", "b.png", "c.png"]);
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(pool.clone());
    for _ in 0..29 {
        scheduler.advance();
    }

    let shown = drain(&mut rx);
    assert_eq!(shown.len(), 30);

    for pair in shown.windows(2) {
        assert_ne!(
            pair[0], pair[1],
            "the same name must never show twice in a row"
        );
    }
}

#[tokio::test]
async fn test_single_item_pool_may_repeat() {
    // Avec un seul média, la répétition est inévitable et acceptée
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["only.png"]));
    scheduler.advance();
    scheduler.advance();

    assert_eq!(drain(&mut rx).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_image_advances_after_dwell() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["solo.png"]));
    assert_eq!(drain(&mut rx).len(), 1);

    // Rien avant la fin du dwell
    tokio::time::advance(DWELL - Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    assert!(drain(&mut rx).is_empty());

    // L'avance automatique part à l'échéance
    tokio::time::advance(Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
    assert_eq!(drain(&mut rx).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_video_waits_for_ended_report() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["clip.mp4"]));
    assert_eq!(drain(&mut rx), vec!["clip.mp4".to_string()]);

    // Aucune minuterie pour une vidéo : le temps peut filer sans avance
    tokio::time::advance(Duration::from_secs(3600)).await;
    tokio::task::yield_now().await;
    assert!(drain(&mut rx).is_empty());

    // La fin réelle de lecture déclenche l'avance
    scheduler.on_media_ended("clip.mp4");
    assert_eq!(drain(&mut rx).len(), 1);
}

#[tokio::test]
async fn test_media_error_skips_immediately() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["bad.mp4", "good.mp4"]));
    let first = drain(&mut rx).pop().unwrap();

    scheduler.on_media_error(&first);
    let second = drain(&mut rx).pop().unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_stale_reports_are_ignored() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["v1.mp4", "v2.mp4"]));
    let first = drain(&mut rx).pop().unwrap();

    // Rapport pour un nom qui n'est pas à l'écran : ignoré
    scheduler.on_media_ended("other.mp4");
    assert!(drain(&mut rx).is_empty());

    scheduler.on_media_ended(&first);
    assert_eq!(drain(&mut rx).len(), 1);

    // Rapport en double (le slide a déjà changé) : ignoré aussi
    scheduler.on_media_ended(&first);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_manual_advance_cancels_pending_dwell_timer() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["a.png", "b.png", "c.png"]));
    assert_eq!(drain(&mut rx).len(), 1);

    // Avance manuelle : la minuterie du premier slide doit être annulée
    scheduler.advance();
    assert_eq!(drain(&mut rx).len(), 1);

    // À l'échéance commune, seule la minuterie du slide courant part :
    // une minuterie périmée non annulée produirait un double saut
    tokio::time::advance(DWELL).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
    assert_eq!(drain(&mut rx).len(), 1);
}

#[tokio::test]
async fn test_sync_tick_with_same_set_keeps_queue() {
    let scheduler = Scheduler::new(DWELL);

    scheduler.on_list_changed(names(&["a.png", "b.png", "c.png", "d.png"]));
    let queue_before = scheduler.queue_snapshot();
    assert_eq!(queue_before.len(), 3);

    // Même ensemble, ordre différent : pas un changement pour le viewer
    scheduler.on_sync_tick(names(&["d.png", "c.png", "b.png", "a.png"]));
    assert_eq!(scheduler.queue_snapshot(), queue_before);
}

#[tokio::test]
async fn test_sync_tick_with_changed_set_discards_queue() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["a.png", "b.png"]));
    drain(&mut rx);

    scheduler.on_sync_tick(names(&["c.png"]));
    assert!(scheduler.queue_snapshot().is_empty());

    // Le slide courant finit son affichage ; l'avance suivante ne peut
    // servir que le nouveau pool
    scheduler.advance();
    assert_eq!(drain(&mut rx), vec!["c.png".to_string()]);
}

#[tokio::test]
async fn test_empty_pool_returns_to_idle() {
    let scheduler = Scheduler::new(DWELL);
    let mut rx = scheduler.subscribe();

    scheduler.on_list_changed(names(&["a.png"]));
    drain(&mut rx);

    scheduler.on_sync_tick(Vec::new());
    scheduler.advance();

    assert!(scheduler.is_idle());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_reset_returns_to_idle() {
    let scheduler = Scheduler::new(DWELL);

    scheduler.on_list_changed(names(&["a.png", "b.png"]));
    assert!(!scheduler.is_idle());

    scheduler.reset();
    assert!(scheduler.is_idle());
    assert!(scheduler.queue_snapshot().is_empty());
}

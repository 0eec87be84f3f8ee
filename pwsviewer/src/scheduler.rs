//! Scheduler : machine à états de lecture du diaporama

use chrono::{DateTime, Utc};
use pwsmedia::MediaKind;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Le média actuellement à l'écran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Slide {
    pub name: String,
    #[schema(value_type = String)]
    pub kind: MediaKind,
}

/// Transition de slide diffusée aux abonnés (SSE, tests)
#[derive(Debug, Clone)]
pub struct SlideEvent {
    pub slide: Slide,
    pub timestamp: DateTime<Utc>,
}

/// État interne, protégé par un seul verrou
///
/// `timer_generation` croît à chaque transition ; une minuterie de dwell
/// capture la génération courante à l'armement et ne déclenche l'avance
/// que si elle est toujours d'actualité. Une minuterie annulée ne peut
/// donc jamais produire d'avance périmée (double saut).
struct SchedulerInner {
    known: Vec<String>,
    queue: VecDeque<String>,
    current: Option<Slide>,
    last_shown: Option<String>,
    timer: Option<JoinHandle<()>>,
    timer_generation: u64,
}

/// Séquenceur de lecture
///
/// `Idle` tant qu'aucune liste n'est connue, puis `Playing` en boucle.
/// Toutes les transitions sont des méthodes nommées et synchrones ; les
/// minuteries tokio ne font que rappeler [`Scheduler::advance`] via leur
/// garde de génération. Clonable : tous les clones partagent le même état.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    dwell: Duration,
    events: broadcast::Sender<SlideEvent>,
}

impl Scheduler {
    /// Crée un séquenceur inactif
    ///
    /// `dwell` est la durée d'affichage d'une image avant avance
    /// automatique. Les vidéos ne sont pas minutées : leur avance vient
    /// de [`Scheduler::on_media_ended`] / [`Scheduler::on_media_error`].
    pub fn new(dwell: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                known: Vec::new(),
                queue: VecDeque::new(),
                current: None,
                last_shown: None,
                timer: None,
                timer_generation: 0,
            })),
            dwell,
            events: broadcast::channel(64).0,
        }
    }

    /// Souscrit aux transitions de slide
    pub fn subscribe(&self) -> broadcast::Receiver<SlideEvent> {
        self.events.subscribe()
    }

    /// Le slide actuellement affiché, ou `None` si inactif
    pub fn current(&self) -> Option<Slide> {
        self.inner.lock().unwrap().current.clone()
    }

    /// Vrai tant qu'aucun média n'est à l'écran
    pub fn is_idle(&self) -> bool {
        self.inner.lock().unwrap().current.is_none()
    }

    /// Instantané de la file de lecture restante (diagnostic et tests)
    pub fn queue_snapshot(&self) -> Vec<String> {
        self.inner.lock().unwrap().queue.iter().cloned().collect()
    }

    /// Remplace la liste connue (l'ensemble a changé)
    ///
    /// La file en cours est abandonnée : les noms disparus n'y traînent
    /// plus et les nouveaux deviennent éligibles dès la prochaine
    /// recharge. Le slide courant termine son affichage normalement.
    /// Depuis `Idle`, une liste non vide démarre la lecture.
    pub fn on_list_changed(&self, names: Vec<String>) {
        let start = {
            let mut inner = self.inner.lock().unwrap();
            debug!(count = names.len(), "Known media list replaced");
            inner.known = names;
            inner.queue.clear();
            inner.current.is_none() && !inner.known.is_empty()
        };

        if start {
            self.advance();
        }
    }

    /// Tick du SyncPoller : nouvelle liste faisant foi
    ///
    /// Comparaison d'ensembles insensible à l'ordre : seul un changement
    /// de contenu compte. Un simple réordonnancement est ignoré — le
    /// viewer joue mélangé de toute façon.
    pub fn on_sync_tick(&self, names: Vec<String>) {
        let changed = {
            let inner = self.inner.lock().unwrap();
            set_key(&names) != set_key(&inner.known)
        };

        if changed {
            self.on_list_changed(names);
        }
    }

    /// Avance au média suivant
    ///
    /// Annule toute minuterie en attente, recharge la file si elle est
    /// épuisée (nouveau mélange complet de la liste connue), puis affiche
    /// la tête de file. Pool vide : retour à `Idle`.
    pub fn advance(&self) {
        self.advance_guarded(None);
    }

    /// La page viewer signale la fin naturelle d'une lecture vidéo
    ///
    /// Ignoré si `name` n'est plus le slide courant (rapport périmé d'un
    /// client en retard) : la minuterie et l'évènement de fin ne peuvent
    /// jamais avancer deux fois le même slot.
    pub fn on_media_ended(&self, name: &str) {
        self.advance_if_current(name);
    }

    /// La page viewer signale un échec de chargement ou de lecture
    ///
    /// Le spectacle continue : on saute immédiatement au suivant, sans
    /// nouvelle tentative.
    pub fn on_media_error(&self, name: &str) {
        warn!(name = %name, "Media failed to load or play, skipping");
        self.advance_if_current(name);
    }

    /// Retour complet à `Idle` (liste oubliée, minuterie annulée)
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.timer_generation += 1;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.known.clear();
        inner.queue.clear();
        inner.current = None;
        inner.last_shown = None;
    }

    fn advance_if_current(&self, name: &str) {
        let event = {
            let mut inner = self.inner.lock().unwrap();
            match &inner.current {
                Some(slide) if slide.name == name => {}
                _ => return,
            }
            self.advance_inner(&mut inner)
        };
        self.publish(event);
    }

    fn advance_guarded(&self, expected_generation: Option<u64>) {
        let event = {
            let mut inner = self.inner.lock().unwrap();
            if let Some(generation) = expected_generation {
                if generation != inner.timer_generation {
                    // Minuterie annulée entre-temps
                    return;
                }
            }
            self.advance_inner(&mut inner)
        };
        self.publish(event);
    }

    /// Cœur de la transition, sous verrou
    fn advance_inner(&self, inner: &mut SchedulerInner) -> Option<Slide> {
        inner.timer_generation += 1;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }

        if inner.queue.is_empty() {
            Self::refill_queue(inner);
        }

        let Some(name) = inner.queue.pop_front() else {
            debug!("Media pool is empty, scheduler going idle");
            inner.current = None;
            return None;
        };

        let kind = MediaKind::from_name(&name).unwrap_or(MediaKind::Image);
        let slide = Slide {
            name: name.clone(),
            kind,
        };
        inner.last_shown = Some(name);
        inner.current = Some(slide.clone());

        if kind == MediaKind::Image {
            let generation = inner.timer_generation;
            let scheduler = self.clone();
            let dwell = self.dwell;
            inner.timer = Some(tokio::spawn(async move {
                tokio::time::sleep(dwell).await;
                scheduler.advance_guarded(Some(generation));
            }));
        }

        Some(slide)
    }

    /// Recharge la file : mélange uniforme de la liste connue
    ///
    /// Variante anti-répétition stricte : si le mélange place le dernier
    /// nom affiché en tête et que le pool compte plus d'un élément, il
    /// est renvoyé en queue de file.
    fn refill_queue(inner: &mut SchedulerInner) {
        if inner.known.is_empty() {
            return;
        }

        let mut pool = inner.known.clone();
        let mut rng = rand::rng();
        pool.shuffle(&mut rng);

        if pool.len() > 1 {
            if let Some(last) = &inner.last_shown {
                if pool[0] == *last {
                    let end = pool.len() - 1;
                    pool.swap(0, end);
                }
            }
        }

        inner.queue = pool.into();
    }

    fn publish(&self, slide: Option<Slide>) {
        if let Some(slide) = slide {
            // Ignoré si personne n'écoute
            let _ = self.events.send(SlideEvent {
                slide,
                timestamp: Utc::now(),
            });
        }
    }
}

/// Clé d'ensemble insensible à l'ordre (tri puis jointure)
fn set_key(names: &[String]) -> String {
    let mut sorted = names.to_vec();
    sorted.sort();
    sorted.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_ignores_order() {
        let a = vec!["b".to_string(), "a".to_string()];
        let b = vec!["a".to_string(), "b".to_string()];
        assert_eq!(set_key(&a), set_key(&b));
    }

    #[test]
    fn test_set_key_detects_membership_change() {
        let a = vec!["a".to_string(), "b".to_string()];
        let b = vec!["a".to_string(), "c".to_string()];
        assert_ne!(set_key(&a), set_key(&b));
    }
}

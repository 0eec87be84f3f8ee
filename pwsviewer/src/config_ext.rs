//! Extension de pwsconfig pour le séquenceur

use std::time::Duration;

const DEFAULT_DWELL_SECS: u64 = 10;
const DEFAULT_POLL_SECS: u64 = 60;

/// Trait d'extension pour pwsconfig::Config
pub trait ViewerConfigExt {
    /// Durée d'affichage d'une image avant avance automatique
    fn slideshow_dwell(&self) -> Duration;

    /// Période de rafraîchissement de la liste côté viewer
    fn slideshow_poll_period(&self) -> Duration;
}

impl ViewerConfigExt for pwsconfig::Config {
    fn slideshow_dwell(&self) -> Duration {
        Duration::from_secs(read_secs(
            self,
            &["slideshow", "dwell_secs"],
            DEFAULT_DWELL_SECS,
        ))
    }

    fn slideshow_poll_period(&self) -> Duration {
        Duration::from_secs(read_secs(
            self,
            &["slideshow", "poll_secs"],
            DEFAULT_POLL_SECS,
        ))
    }
}

fn read_secs(config: &pwsconfig::Config, path: &[&str], default: u64) -> u64 {
    match config.get_value(path) {
        Ok(serde_yaml::Value::Number(n)) => match n.as_u64() {
            Some(secs) if secs > 0 => secs,
            _ => default,
        },
        _ => default,
    }
}

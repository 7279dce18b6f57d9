use crate::models::Alert;
use tracing::warn;

/// Delivers user-facing alerts.
pub trait Notifier: Send + Sync {
    fn notify(&self, alert: &Alert);
}

/// Records alerts in the server log. The page raises the desktop
/// notification itself from the alert carried in the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, alert: &Alert) {
        warn!(title = %alert.title, "{}", alert.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Alert>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, alert: &Alert) {
            self.seen.lock().unwrap().push(alert.clone());
        }
    }

    #[test]
    fn notifier_is_object_safe() {
        let recorder = Recorder::default();
        let notifier: &dyn Notifier = &recorder;
        let alert = Alert {
            title: "Fuel alert".to_string(),
            body: "Only 12.0 km left before the reserve.".to_string(),
        };
        notifier.notify(&alert);
        LogNotifier.notify(&alert);
        assert_eq!(recorder.seen.lock().unwrap().as_slice(), &[alert]);
    }
}

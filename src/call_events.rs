//! Call event listener.
//!
//! Platform call-state notifications arrive here one at a time. Each event is
//! turned into at most one overlay action.

use crate::normalizer::{is_ussd, normalize_number};
use crate::overlay::OverlayHandle;
use crate::redact::number_fingerprint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Telephony call state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallState {
    Idle,
    Ringing,
    Offhook,
    #[serde(other)]
    Unknown,
}

/// A call notification as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CallEvent {
    PhoneState {
        #[serde(default)]
        state: Option<CallState>,
        #[serde(default)]
        incoming_number: Option<String>,
    },
    NewOutgoingCall {
        #[serde(default)]
        phone_number: Option<String>,
    },
}

/// What the listener did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    ShowOverlay { caller_id: String },
    ScheduleStop { delay: Duration },
    Ignored { reason: &'static str },
}

impl Dispatch {
    pub fn action(&self) -> &'static str {
        match self {
            Dispatch::ShowOverlay { .. } => "show_overlay",
            Dispatch::ScheduleStop { .. } => "schedule_stop",
            Dispatch::Ignored { .. } => "ignored",
        }
    }
}

/// Where the listener sends overlay requests.
pub trait OverlayLauncher: Send + Sync {
    fn show(&self, caller_id: String);
    fn schedule_stop(&self, delay: Duration);
}

impl OverlayLauncher for OverlayHandle {
    fn show(&self, caller_id: String) {
        OverlayHandle::show(self, Some(caller_id));
    }

    fn schedule_stop(&self, delay: Duration) {
        OverlayHandle::schedule_stop(self, delay);
    }
}

/// Invoked synchronously once per platform call event.
pub trait CallEventHandler {
    fn on_call_event(&mut self, event: CallEvent, region: Option<&str>) -> Dispatch;
}

pub struct CallReceiver<L: OverlayLauncher> {
    launcher: L,
    default_region: String,
    stop_delay: Duration,
    last_state: Option<CallState>,
}

impl<L: OverlayLauncher> CallReceiver<L> {
    pub fn new(launcher: L, default_region: impl Into<String>, stop_delay: Duration) -> Self {
        Self {
            launcher,
            default_region: default_region.into(),
            stop_delay,
            last_state: None,
        }
    }

    pub fn last_state(&self) -> Option<CallState> {
        self.last_state
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    fn show_for(&self, raw: &str, region: Option<&str>) -> Dispatch {
        if is_ussd(raw) {
            tracing::debug!("Ignoring USSD code");
            return Dispatch::Ignored {
                reason: "ussd_code",
            };
        }

        let region = region.unwrap_or(self.default_region.as_str());
        let caller_id = normalize_number(raw, Some(region));
        tracing::info!("Showing overlay for {}", number_fingerprint(&caller_id));
        self.launcher.show(caller_id.clone());
        Dispatch::ShowOverlay { caller_id }
    }
}

impl<L: OverlayLauncher> CallEventHandler for CallReceiver<L> {
    fn on_call_event(&mut self, event: CallEvent, region: Option<&str>) -> Dispatch {
        match event {
            CallEvent::PhoneState {
                state,
                incoming_number,
            } => {
                let dispatch = match (state, incoming_number.as_deref()) {
                    (None, _) => Dispatch::Ignored {
                        reason: "missing_state",
                    },
                    (Some(CallState::Idle | CallState::Offhook), _) => {
                        tracing::debug!("Call ended or answered, scheduling overlay stop");
                        self.launcher.schedule_stop(self.stop_delay);
                        Dispatch::ScheduleStop {
                            delay: self.stop_delay,
                        }
                    }
                    (Some(CallState::Ringing), Some(number)) => {
                        tracing::info!("Incoming call from {}", number_fingerprint(number));
                        self.show_for(number, region)
                    }
                    (Some(CallState::Ringing), None) => Dispatch::Ignored {
                        reason: "missing_number",
                    },
                    (Some(CallState::Unknown), _) => Dispatch::Ignored {
                        reason: "unknown_state",
                    },
                };
                self.last_state = state;
                dispatch
            }
            CallEvent::NewOutgoingCall { phone_number } => match phone_number.as_deref() {
                Some(number) => {
                    tracing::info!("Outgoing call to {}", number_fingerprint(number));
                    self.show_for(number, region)
                }
                None => Dispatch::Ignored {
                    reason: "missing_number",
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingLauncher {
        shows: Arc<Mutex<Vec<String>>>,
        stops: Arc<Mutex<Vec<Duration>>>,
    }

    impl OverlayLauncher for RecordingLauncher {
        fn show(&self, caller_id: String) {
            self.shows.lock().unwrap().push(caller_id);
        }

        fn schedule_stop(&self, delay: Duration) {
            self.stops.lock().unwrap().push(delay);
        }
    }

    fn receiver() -> CallReceiver<RecordingLauncher> {
        CallReceiver::new(RecordingLauncher::default(), "US", Duration::from_secs(10))
    }

    #[test]
    fn test_ringing_shows_normalized_number() {
        let mut rx = receiver();
        let dispatch = rx.on_call_event(
            CallEvent::PhoneState {
                state: Some(CallState::Ringing),
                incoming_number: Some("+1 415-555-0101".into()),
            },
            None,
        );
        assert_eq!(
            dispatch,
            Dispatch::ShowOverlay {
                caller_id: "4155550101".into()
            }
        );
        assert_eq!(
            *rx.launcher().shows.lock().unwrap(),
            vec!["4155550101".to_string()]
        );
        assert_eq!(rx.last_state(), Some(CallState::Ringing));
    }

    #[test]
    fn test_idle_and_offhook_schedule_stop() {
        let mut rx = receiver();
        for state in [CallState::Offhook, CallState::Idle] {
            let dispatch = rx.on_call_event(
                CallEvent::PhoneState {
                    state: Some(state),
                    incoming_number: None,
                },
                None,
            );
            assert_eq!(dispatch.action(), "schedule_stop");
        }
        assert_eq!(rx.launcher().stops.lock().unwrap().len(), 2);
        assert!(rx.launcher().shows.lock().unwrap().is_empty());
        assert_eq!(rx.last_state(), Some(CallState::Idle));
    }

    #[test]
    fn test_outgoing_ussd_is_ignored() {
        let mut rx = receiver();
        let dispatch = rx.on_call_event(
            CallEvent::NewOutgoingCall {
                phone_number: Some("*123#".into()),
            },
            None,
        );
        assert_eq!(dispatch.action(), "ignored");
        assert!(rx.launcher().shows.lock().unwrap().is_empty());
    }

    #[test]
    fn test_outgoing_unparseable_number_kept_raw() {
        let mut rx = receiver();
        let dispatch = rx.on_call_event(
            CallEvent::NewOutgoingCall {
                phone_number: Some("12".into()),
            },
            Some("US"),
        );
        assert_eq!(
            dispatch,
            Dispatch::ShowOverlay {
                caller_id: "12".into()
            }
        );
    }

    #[test]
    fn test_missing_state_clears_last_state() {
        let mut rx = receiver();
        rx.on_call_event(
            CallEvent::PhoneState {
                state: Some(CallState::Ringing),
                incoming_number: None,
            },
            None,
        );
        assert_eq!(rx.last_state(), Some(CallState::Ringing));
        let dispatch = rx.on_call_event(
            CallEvent::PhoneState {
                state: None,
                incoming_number: None,
            },
            None,
        );
        assert_eq!(dispatch.action(), "ignored");
        assert_eq!(rx.last_state(), None);
    }

    #[test]
    fn test_deserialize_events() {
        let event: CallEvent = serde_json::from_str(
            r#"{"event":"phone_state","state":"RINGING","incoming_number":"+14155550101"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            CallEvent::PhoneState {
                state: Some(CallState::Ringing),
                incoming_number: Some("+14155550101".into()),
            }
        );

        let event: CallEvent =
            serde_json::from_str(r#"{"event":"phone_state","state":"DIALING"}"#).unwrap();
        assert!(matches!(
            event,
            CallEvent::PhoneState {
                state: Some(CallState::Unknown),
                ..
            }
        ));
    }
}

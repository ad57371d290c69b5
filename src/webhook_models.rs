use crate::call_events::{CallEvent, Dispatch};
use serde::{Deserialize, Serialize};

/// Call event posted by the telephony bridge.
///
/// ```json
/// {"event": "phone_state", "state": "RINGING", "incoming_number": "+14155550101", "region": "US"}
/// {"event": "new_outgoing_call", "phone_number": "+9607771234"}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallEventPayload {
    #[serde(flatten)]
    pub event: CallEvent,

    /// Device locale country, used as the number parsing region.
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallEventResponse {
    pub status: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_delay_secs: Option<u64>,
}

impl From<&Dispatch> for CallEventResponse {
    fn from(dispatch: &Dispatch) -> Self {
        let (reason, stop_delay_secs) = match dispatch {
            Dispatch::Ignored { reason } => (Some(reason.to_string()), None),
            Dispatch::ScheduleStop { delay } => (None, Some(delay.as_secs())),
            Dispatch::ShowOverlay { .. } => (None, None),
        };

        Self {
            status: "received".to_string(),
            action: dispatch.action().to_string(),
            reason,
            stop_delay_secs,
        }
    }
}

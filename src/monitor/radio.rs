//! Radio signal subscriber.
//!
//! Each signal-strength notification becomes one line on the radio channel.
//! The reading that is written depends on the telephony network type:
//!
//! | Network | Payload |
//! |---------|---------|
//! | LTE (or any GSM sample) | `<signal> <rsrp> <rsrq> <rssnr> <cqi>`, or GSM dBm when LTE fields are unset |
//! | CDMA | CDMA dBm |
//! | EVDO rev 0/A | EVDO dBm |
//! | anything else | `0` |

use std::sync::Arc;

use tracing::debug;

use crate::host::notification::SignalStrength;
use crate::host::oracle::{
    TELEPHONY_TYPE_CDMA, TELEPHONY_TYPE_EVDO_0, TELEPHONY_TYPE_EVDO_A, TELEPHONY_TYPE_LTE,
};
use crate::host::{NetworkStatus, Notification, NotificationKind};
use crate::trace::payload::{self, GSM_ASU_UNKNOWN};
use crate::trace::ChannelSink;

use super::Subscriber;

/// Written when no reading applies
const DEFAULT_SIGNAL: &str = "0";

/// Render a signal-strength sample for the given telephony network type
pub fn radio_payload(signal: &SignalStrength, network_type: i32) -> String {
    if signal.is_gsm || network_type == TELEPHONY_TYPE_LTE {
        // LTE sub-fields are only meaningful on an LTE network.
        let [strength, rsrp, rsrq, rssnr, cqi] = if network_type == TELEPHONY_TYPE_LTE {
            let lte = &signal.lte;
            [lte.signal_strength, lte.rsrp, lte.rsrq, lte.rssnr, lte.cqi].map(|v| v.unwrap_or(0))
        } else {
            [0; 5]
        };

        let unset = |v: i32| strength == v && rsrp == v && rsrq == v && cqi == v;
        if !(unset(0) || unset(-1)) {
            return format!("{} {} {} {} {}", strength, rsrp, rsrq, rssnr, cqi);
        }

        if signal.is_gsm && signal.gsm_asu != GSM_ASU_UNKNOWN {
            return payload::gsm_dbm(signal.gsm_asu).to_string();
        }
        return DEFAULT_SIGNAL.to_string();
    }

    match network_type {
        TELEPHONY_TYPE_CDMA => signal.cdma_dbm.to_string(),
        TELEPHONY_TYPE_EVDO_0 | TELEPHONY_TYPE_EVDO_A => signal.evdo_dbm.to_string(),
        _ => DEFAULT_SIGNAL.to_string(),
    }
}

pub struct RadioSubscriber {
    network: Arc<dyn NetworkStatus>,
    sink: Arc<ChannelSink>,
}

impl RadioSubscriber {
    pub fn new(network: Arc<dyn NetworkStatus>, sink: Arc<ChannelSink>) -> Self {
        Self { network, sink }
    }
}

impl Subscriber for RadioSubscriber {
    fn name(&self) -> &'static str {
        "radio"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::SignalStrength]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::SignalStrengthChanged(signal) => {
                let line = radio_payload(signal, self.network.telephony_network_type());
                debug!("Signal strength changed to {}", line);
                self.sink.record(&line);
            }
            other => debug!("radio ignoring {:?}", other.kind()),
        }
    }
}

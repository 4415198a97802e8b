//! # Payload Normalization
//!
//! Conversions from raw host values into the units written to trace files,
//! and the fixed tokens each channel uses.
//!
//! | Channel | Payload |
//! |---------|---------|
//! | screen | `ON <timeoutSeconds> <brightnessPct>` or `OFF` |
//! | battery | `<level> <tempC> <powered>` |
//! | wifi | `CONNECTED <mac> <rssi> <ssid>` or a state token |
//! | bluetooth | `CONNECTED`, `DISCONNECTED` or `OFF` |
//! | gps | `ACTIVE`, `STANDBY` or `OFF` |
//! | camera | `ON` or `OFF` |
//! | screen-rotation | `landscape` or `portrait` |

pub const ON: &str = "ON";
pub const OFF: &str = "OFF";
pub const CONNECTED: &str = "CONNECTED";
pub const DISCONNECTED: &str = "DISCONNECTED";
pub const CONNECTING: &str = "CONNECTING";
pub const DISCONNECTING: &str = "DISCONNECTING";
pub const SUSPENDED: &str = "SUSPENDED";
pub const UNKNOWN: &str = "UNKNOWN";
pub const GPS_ACTIVE: &str = "ACTIVE";
pub const GPS_STANDBY: &str = "STANDBY";
pub const LANDSCAPE: &str = "landscape";
pub const PORTRAIT: &str = "portrait";
pub const IMPORTANCE_FOREGROUND: &str = "Foreground";
pub const IMPORTANCE_BACKGROUND: &str = "Background";

/// Raw brightness treated as 100%
///
/// Hosts report 0-255; everything from this value up is full brightness.
pub const MAX_RAW_BRIGHTNESS: i32 = 240;

/// GSM ASU value meaning "signal unknown"
pub const GSM_ASU_UNKNOWN: i32 = 99;

/// Convert raw screen brightness to a 0-100 percentage
///
/// # Examples
///
/// ```
/// use peripheral_trace::trace::payload::brightness_percent;
///
/// assert_eq!(brightness_percent(120), 50);
/// assert_eq!(brightness_percent(255), brightness_percent(240));
/// ```
pub fn brightness_percent(raw: i32) -> u32 {
    let clamped = raw.clamp(0, MAX_RAW_BRIGHTNESS);
    (f64::from(clamped) / f64::from(MAX_RAW_BRIGHTNESS) * 100.0).round() as u32
}

/// Convert the screen-off timeout from milliseconds to whole seconds
pub fn timeout_seconds(timeout_ms: i64) -> i64 {
    timeout_ms / 1000
}

/// Battery charge percentage from the raw level/scale pair
///
/// Returns -1 when either value is missing or unusable, or when the
/// percentage does not fit an `i32`.
pub fn battery_level(raw: Option<i32>, scale: Option<i32>) -> i32 {
    match (raw, scale) {
        (Some(raw), Some(scale)) if raw >= 0 && scale > 0 => {
            i32::try_from(i64::from(raw) * 100 / i64::from(scale)).unwrap_or(-1)
        }
        _ => -1,
    }
}

/// Whole degrees Celsius from tenths of a degree
pub fn temperature_celsius(tenths: i32) -> i32 {
    tenths / 10
}

/// Signal strength in dBm from a GSM ASU reading
pub fn gsm_dbm(asu: i32) -> i32 {
    -113 + 2 * asu
}

/// `ON <timeoutSeconds> <brightnessPct>`
pub fn screen_on(timeout_secs: i64, brightness_pct: u32) -> String {
    format!("{} {} {}", ON, timeout_secs, brightness_pct)
}

/// `<level> <tempC> <powered>`
pub fn battery(level: i32, temp_c: i32, powered: bool) -> String {
    format!("{} {} {}", level, temp_c, powered)
}

/// `CONNECTED <mac> <rssi> <ssid>`
pub fn wifi_connected(mac: &str, rssi: i32, ssid: &str) -> String {
    format!("{} {} {} {}", CONNECTED, mac, rssi, ssid)
}

/// `Name:<process> State:<importance>`
pub fn process_entry(name: &str, importance: &str) -> String {
    format!("Name:{} State:{}", name, importance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_clamps_high_values() {
        assert_eq!(brightness_percent(255), 100);
        assert_eq!(brightness_percent(240), 100);
        assert_eq!(brightness_percent(250), 100);
    }

    #[test]
    fn test_brightness_rescales() {
        assert_eq!(brightness_percent(120), 50);
        assert_eq!(brightness_percent(0), 0);
        assert_eq!(brightness_percent(15), 6);
        assert_eq!(brightness_percent(-4), 0);
    }

    #[test]
    fn test_timeout_to_seconds() {
        assert_eq!(timeout_seconds(30_000), 30);
        assert_eq!(timeout_seconds(15_500), 15);
        assert_eq!(timeout_seconds(0), 0);
    }

    #[test]
    fn test_battery_level_from_scale() {
        assert_eq!(battery_level(Some(80), Some(100)), 80);
        assert_eq!(battery_level(Some(40), Some(50)), 80);
        assert_eq!(battery_level(Some(80), Some(0)), -1);
        assert_eq!(battery_level(Some(-1), Some(100)), -1);
        assert_eq!(battery_level(None, Some(100)), -1);
    }

    #[test]
    fn test_battery_level_large_scale() {
        assert_eq!(battery_level(Some(30_000_000), Some(100_000_000)), 30);
        assert_eq!(battery_level(Some(i32::MAX), Some(i32::MAX)), 100);
        assert_eq!(battery_level(Some(i32::MAX), Some(1)), -1);
    }

    #[test]
    fn test_temperature_truncates() {
        assert_eq!(temperature_celsius(350), 35);
        assert_eq!(temperature_celsius(359), 35);
        assert_eq!(temperature_celsius(-1), 0);
    }

    #[test]
    fn test_gsm_dbm() {
        assert_eq!(gsm_dbm(0), -113);
        assert_eq!(gsm_dbm(31), -51);
    }

    #[test]
    fn test_payload_formats() {
        assert_eq!(screen_on(30, 50), "ON 30 50");
        assert_eq!(battery(80, 35, true), "80 35 true");
        assert_eq!(
            wifi_connected("aa:bb:cc:dd:ee:ff", -55, "home"),
            "CONNECTED aa:bb:cc:dd:ee:ff -55 home"
        );
        assert_eq!(
            process_entry("com.example", IMPORTANCE_FOREGROUND),
            "Name:com.example State:Foreground"
        );
    }
}

//! # Trace Channels
//!
//! Every peripheral stream the recorder captures is a [`Channel`]. Each channel
//! owns exactly one output file inside the session's trace folder.

use std::fmt;

/// Logical peripheral stream with its own trace file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Radio,
    Wifi,
    Bluetooth,
    Gps,
    Camera,
    Screen,
    ScreenRotation,
    Battery,
    ActiveProcess,
    DeviceInfo,
    DeviceDetails,
}

impl Channel {
    /// All channels, in the order their files are opened
    pub const ALL: [Channel; 11] = [
        Channel::Wifi,
        Channel::Radio,
        Channel::Camera,
        Channel::Battery,
        Channel::Gps,
        Channel::Screen,
        Channel::ScreenRotation,
        Channel::ActiveProcess,
        Channel::Bluetooth,
        Channel::DeviceInfo,
        Channel::DeviceDetails,
    ];

    /// Position of the channel in [`Channel::ALL`]
    pub fn index(self) -> usize {
        match self {
            Channel::Wifi => 0,
            Channel::Radio => 1,
            Channel::Camera => 2,
            Channel::Battery => 3,
            Channel::Gps => 4,
            Channel::Screen => 5,
            Channel::ScreenRotation => 6,
            Channel::ActiveProcess => 7,
            Channel::Bluetooth => 8,
            Channel::DeviceInfo => 9,
            Channel::DeviceDetails => 10,
        }
    }

    /// File name of the channel inside the trace folder
    ///
    /// # Examples
    ///
    /// ```
    /// use peripheral_trace::channel::Channel;
    ///
    /// assert_eq!(Channel::Battery.file_name(), "battery_events");
    /// assert_eq!(Channel::ScreenRotation.file_name(), "screen_rotations");
    /// ```
    pub fn file_name(self) -> &'static str {
        match self {
            Channel::Radio => "radio_events",
            Channel::Wifi => "wifi_events",
            Channel::Bluetooth => "bluetooth_events",
            Channel::Gps => "gps_events",
            Channel::Camera => "camera_events",
            Channel::Screen => "screen_events",
            Channel::ScreenRotation => "screen_rotations",
            Channel::Battery => "battery_events",
            Channel::ActiveProcess => "active_process",
            Channel::DeviceInfo => "device_info",
            Channel::DeviceDetails => "device_details",
        }
    }

    /// Whether lines on this channel carry an event timestamp
    ///
    /// The device snapshot channels are plain value lists.
    pub fn is_timestamped(self) -> bool {
        !matches!(self, Channel::DeviceInfo | Channel::DeviceDetails)
    }

    fn label(self) -> &'static str {
        match self {
            Channel::Radio => "radio",
            Channel::Wifi => "wifi",
            Channel::Bluetooth => "bluetooth",
            Channel::Gps => "gps",
            Channel::Camera => "camera",
            Channel::Screen => "screen",
            Channel::ScreenRotation => "screen-rotation",
            Channel::Battery => "battery",
            Channel::ActiveProcess => "active-process",
            Channel::DeviceInfo => "device-info",
            Channel::DeviceDetails => "device-details",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_channels_listed_once() {
        let unique: HashSet<_> = Channel::ALL.iter().collect();
        assert_eq!(unique.len(), Channel::ALL.len());
    }

    #[test]
    fn test_index_matches_open_order() {
        for channel in Channel::ALL {
            assert_eq!(Channel::ALL[channel.index()], channel);
        }
    }

    #[test]
    fn test_file_names_are_unique() {
        let names: HashSet<_> = Channel::ALL.iter().map(|c| c.file_name()).collect();
        assert_eq!(names.len(), Channel::ALL.len(), "Each channel needs its own file");
    }

    #[test]
    fn test_snapshot_channels_are_untimestamped() {
        assert!(!Channel::DeviceInfo.is_timestamped());
        assert!(!Channel::DeviceDetails.is_timestamped());
        assert!(Channel::Battery.is_timestamped());
        assert!(Channel::Gps.is_timestamped());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Channel::ScreenRotation.to_string(), "screen-rotation");
        assert_eq!(Channel::Wifi.to_string(), "wifi");
    }
}

//! Parsing of the bridge tool's plain-text output

use crate::models::{Device, DeviceState};

/// Parse the output of `adb devices -l`.
///
/// The header line, `* daemon ...` status lines and blank lines are
/// ignored. Each remaining line is `<serial> <state> [key:value ...]`.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    let mut devices = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("List of devices") || line.starts_with('*') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(serial) = parts.next() else {
            continue;
        };
        let state = parts
            .next()
            .map(DeviceState::from_token)
            .unwrap_or(DeviceState::Unknown);

        let mut device = Device::new(serial, state);
        for field in parts {
            if let Some((key, value)) = field.split_once(':') {
                match key {
                    "product" => device.product = Some(value.to_string()),
                    "model" => device.model = Some(value.to_string()),
                    "device" => device.hardware = Some(value.to_string()),
                    "transport_id" => device.transport_id = Some(value.to_string()),
                    _ => {}
                }
            }
        }
        devices.push(device);
    }

    devices
}

/// Escape text for `adb shell input text`.
///
/// The device-side shell sees the argument, so spaces become `%s` and shell
/// metacharacters get a backslash.
pub fn escape_input_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => escaped.push_str("%s"),
            '\\' | '\'' | '"' | '`' | '$' | '&' | '|' | ';' | '(' | ')' | '<' | '>' | '*'
            | '~' | '#' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_listing_with_fields() {
        let output = "List of devices attached\n\
                      R5CT20ABCDE            device usb:1-1 product:dm1q model:SM_S911B device:dm1q transport_id:1\n\
                      emulator-5554          offline\n";
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 2);

        assert_eq!(devices[0].serial, "R5CT20ABCDE");
        assert_eq!(devices[0].state, DeviceState::Device);
        assert_eq!(devices[0].model.as_deref(), Some("SM_S911B"));
        assert_eq!(devices[0].product.as_deref(), Some("dm1q"));
        assert_eq!(devices[0].hardware.as_deref(), Some("dm1q"));
        assert_eq!(devices[0].transport_id.as_deref(), Some("1"));

        assert_eq!(devices[1].serial, "emulator-5554");
        assert_eq!(devices[1].state, DeviceState::Offline);
        assert!(devices[1].model.is_none());
    }

    #[test]
    fn skips_header_daemon_and_blank_lines() {
        let output = "* daemon not running; starting now at tcp:5037\n\
                      * daemon started successfully\n\
                      List of devices attached\n\
                      \n\
                      0123456789ABCDEF\tdevice\n\
                      \n";
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].serial, "0123456789ABCDEF");
    }

    #[test]
    fn empty_listing_yields_no_devices() {
        assert!(parse_device_list("List of devices attached\n\n").is_empty());
        assert!(parse_device_list("").is_empty());
    }

    #[test]
    fn unknown_state_tokens_are_preserved_as_unknown() {
        let devices = parse_device_list("abc123 bootloader\n");
        assert_eq!(devices[0].state, DeviceState::Unknown);
    }

    #[test]
    fn unauthorized_devices_are_listed_but_not_usable() {
        let devices = parse_device_list("abc123 unauthorized transport_id:4\n");
        assert_eq!(devices[0].state, DeviceState::Unauthorized);
        assert!(!devices[0].state.is_usable());
    }

    #[test]
    fn input_text_escaping() {
        assert_eq!(escape_input_text("hello world"), "hello%sworld");
        assert_eq!(escape_input_text("a&b"), "a\\&b");
        assert_eq!(escape_input_text("it's"), "it\\'s");
        assert_eq!(escape_input_text("plain"), "plain");
    }
}

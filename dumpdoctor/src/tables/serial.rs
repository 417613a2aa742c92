//! Serial port identifiers and function flags.
//!
//! Mirrors `serialPortIdentifier_e` and `serialPortFunction_e` from the
//! Betaflight firmware (`src/main/io/serial.h`). Resync by hand whenever the
//! firmware adds a port or function.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialIdentifier {
    pub name: &'static str,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFunction {
    pub name: &'static str,
    pub mask: u32,
}

pub const SERIAL_IDENTIFIERS: &[SerialIdentifier] = &[
    SerialIdentifier { name: "None", value: -1 },
    SerialIdentifier { name: "UART 1", value: 0 },
    SerialIdentifier { name: "UART 2", value: 1 },
    SerialIdentifier { name: "UART 3", value: 2 },
    SerialIdentifier { name: "UART 4", value: 3 },
    SerialIdentifier { name: "UART 5", value: 4 },
    SerialIdentifier { name: "UART 6", value: 5 },
    SerialIdentifier { name: "UART 7", value: 6 },
    SerialIdentifier { name: "UART 8", value: 7 },
    SerialIdentifier { name: "UART 9", value: 8 },
    SerialIdentifier { name: "UART 10", value: 9 },
    SerialIdentifier { name: "USB VCP", value: 20 },
    SerialIdentifier { name: "Soft Serial 1", value: 30 },
    SerialIdentifier { name: "Soft Serial 2", value: 31 },
    SerialIdentifier { name: "LPUART 1", value: 40 },
];

/// Function name used by the firmware for the receiver input port.
pub const FUNCTION_RX_SERIAL: &str = "RX Serial";

pub const SERIAL_FUNCTIONS: &[SerialFunction] = &[
    SerialFunction { name: "None", mask: 0 },
    SerialFunction { name: "MSP", mask: 1 << 0 },
    SerialFunction { name: "GPS", mask: 1 << 1 },
    SerialFunction { name: "FrSky Hub", mask: 1 << 2 },
    SerialFunction { name: "HoTT", mask: 1 << 3 },
    SerialFunction { name: "LTM", mask: 1 << 4 },
    SerialFunction { name: "SmartPort", mask: 1 << 5 },
    SerialFunction { name: FUNCTION_RX_SERIAL, mask: 1 << 6 },
    SerialFunction { name: "Blackbox", mask: 1 << 7 },
    SerialFunction { name: "Not Used", mask: 1 << 8 },
    SerialFunction { name: "MAVLink", mask: 1 << 9 },
    SerialFunction { name: "ESC Sensor", mask: 1 << 10 },
    SerialFunction { name: "VTX SmartAudio", mask: 1 << 11 },
    SerialFunction { name: "Telemetry iBus", mask: 1 << 12 },
    SerialFunction { name: "VTX Tramp", mask: 1 << 13 },
    SerialFunction { name: "RC Device", mask: 1 << 14 },
    SerialFunction { name: "Lidar TF", mask: 1 << 15 },
    SerialFunction { name: "FrSky OSD", mask: 1 << 16 },
    SerialFunction { name: "VTX MSP", mask: 1 << 17 },
];

/// Name of a serial identifier, or the raw code when the table has no entry.
pub fn identifier_name(raw: &str) -> String {
    raw.parse::<i32>()
        .ok()
        .and_then(|code| SERIAL_IDENTIFIERS.iter().find(|id| id.value == code))
        .map(|id| id.name.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Names of every function bit set in `bits`, in table order. Bits beyond
/// the table are ignored.
pub fn decode_functions(bits: u64) -> Vec<String> {
    SERIAL_FUNCTIONS
        .iter()
        .filter(|f| bits & u64::from(f.mask) != 0)
        .map(|f| f.name.to_string())
        .collect()
}

//! Flight-mode ("box") registry.
//!
//! Sourced from the Betaflight firmware, `src/main/msp/msp_box.c`
//! (`boxes[CHECKBOX_ITEM_COUNT]`). Permanent ids are not contiguous: retired
//! boxes (9, 10, 14, 16, 18, 21, 22, 38) keep their gap. When that file
//! changes this table has to be updated by hand.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxMode {
    pub name: &'static str,
    pub permanent_id: u32,
}

pub const UNKNOWN_MODE: &str = "Unknown";

pub const ARM: &str = "ARM";

const fn mode(name: &'static str, permanent_id: u32) -> BoxMode {
    BoxMode { name, permanent_id }
}

pub const BOXES: &[BoxMode] = &[
    mode(ARM, 0),
    mode("ANGLE", 1),
    mode("HORIZON", 2),
    mode("ALTHOLD", 3),
    mode("ANTI GRAVITY", 4),
    mode("MAG", 5),
    mode("HEADFREE", 6),
    mode("HEADADJ", 7),
    mode("CAMSTAB", 8),
    mode("POS HOLD", 11),
    mode("PASSTHRU", 12),
    mode("BEEPER", 13),
    mode("LEDLOW", 15),
    mode("CALIB", 17),
    mode("OSD DISABLE", 19),
    mode("TELEMETRY", 20),
    mode("SERVO1", 23),
    mode("SERVO2", 24),
    mode("SERVO3", 25),
    mode("BLACKBOX", 26),
    mode("FAILSAFE", 27),
    mode("AIR MODE", 28),
    mode("3D DISABLE", 29),
    mode("FPV ANGLE MIX", 30),
    mode("BLACKBOX ERASE", 31),
    mode("CAMERA CONTROL 1", 32),
    mode("CAMERA CONTROL 2", 33),
    mode("CAMERA CONTROL 3", 34),
    mode("FLIP OVER AFTER CRASH", 35),
    mode("PREARM", 36),
    mode("GPS BEEP SATELLITE COUNT", 37),
    mode("VTX PIT MODE", 39),
    // User box names are build-time defaults and may be renamed on the craft.
    mode("USER1", 40),
    mode("USER2", 41),
    mode("USER3", 42),
    mode("USER4", 43),
    mode("PID AUDIO", 44),
    mode("PARALYZE", 45),
    mode("GPS RESCUE", 46),
    mode("ACRO TRAINER", 47),
    mode("VTX CONTROL DISABLE", 48),
    mode("LAUNCH CONTROL", 49),
    mode("MSP OVERRIDE", 50),
    mode("STICK COMMANDS DISABLE", 51),
    mode("BEEPER MUTE", 52),
    mode("READY", 53),
    mode("LAP TIMER RESET", 54),
];

pub fn find_box(permanent_id: u32) -> Option<&'static BoxMode> {
    BOXES.iter().find(|b| b.permanent_id == permanent_id)
}

/// Mode name for a permanent id, `"Unknown"` when the id is not registered.
pub fn box_name(permanent_id: u32) -> &'static str {
    find_box(permanent_id).map(|b| b.name).unwrap_or(UNKNOWN_MODE)
}

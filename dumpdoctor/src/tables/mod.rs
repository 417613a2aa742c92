//! Static code tables used to decode numeric firmware codes into names.

pub mod boxes;
pub mod serial;

pub use boxes::{box_name, find_box, BoxMode, BOXES, UNKNOWN_MODE};
pub use serial::{
    decode_functions, identifier_name, SerialFunction, SerialIdentifier, SERIAL_FUNCTIONS,
    SERIAL_IDENTIFIERS,
};

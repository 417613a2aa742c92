pub mod cli;
pub mod hardware;
pub mod modes;
pub mod schema;
pub mod section;
pub mod serial;
pub mod status;

// Re-export for convenience
pub use cli::{extract_cli_line, extract_non_set_cli_line, extract_problem};
pub use hardware::{extract_dma, extract_timers};
pub use modes::extract_modes;
pub use schema::*;
pub use section::{extract_memory_dump, find_section};
pub use serial::extract_serial;
pub use status::{arming_disable_flags, extract_status};

//! Embassy async tasks
//!
//! Each task owns its display outright; nothing is shared between them.

pub mod console;
pub mod counter;

pub use console::{i2c_console_task, spi_console_task};
pub use counter::counter_task;

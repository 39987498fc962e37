//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod companion_rx;
pub mod companion_tx;
pub mod controller;
pub mod display;
pub mod input;
pub mod sync;
pub mod tick;

pub use companion_rx::companion_rx_task;
pub use companion_tx::companion_tx_task;
pub use controller::controller_task;
pub use display::display_task;
pub use input::input_task;
pub use sync::sync_task;
pub use tick::{minute_tick_task, redraw_timer_task};

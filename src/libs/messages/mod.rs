pub mod display;
pub mod macros;
pub mod types;

pub use macros::is_debug_mode;
pub use types::Message;

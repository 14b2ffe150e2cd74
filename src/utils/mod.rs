pub mod format;
pub mod table;

pub use format::{capitalize, format_pct, format_usd};
pub use table::GridLayout;

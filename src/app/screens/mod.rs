//! TUI screen components
//!
//! The weekly entries screen and the panels it draws.

pub mod entries;
pub mod notice;
pub mod stats;

pub use entries::{EntriesScreen, LoadState};
pub use notice::Notice;
pub use stats::StatsPanel;

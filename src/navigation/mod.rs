//! Path → page mapping, navigation history and reactive evaluation.

pub mod history;
pub mod live;
pub mod table;

pub use history::History;
pub use live::{evaluate, LiveView, Screen};
pub use table::{Access, Page, Resolution, RouteMatch, RouteTable};

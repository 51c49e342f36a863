pub mod actions;
pub mod artifacts;
mod app_state;
mod bubble;
mod bubble_list;
pub mod clipboard;
mod conversation;
pub mod downloads;
pub mod events;
pub mod markdown;
mod panel;
pub mod preview;
mod scroll;
mod syntaxes;
mod themes;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use panel::*;
pub use scroll::*;
pub use syntaxes::*;
pub use themes::*;

mod action;
mod artifact;
mod backend;
mod event;
mod loading;
mod message;
mod slash_commands;
mod textarea;

pub use action::*;
pub use artifact::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use slash_commands::*;
pub use textarea::*;

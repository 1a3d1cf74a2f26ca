pub mod error;
pub mod extras;
pub mod header;
pub mod hotkey;
pub mod location;
pub mod network;
pub mod parser;
mod report;
pub mod shellitems;
pub mod shortcut;
pub mod strings;
pub mod volume;

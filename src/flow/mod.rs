pub mod action;
pub mod destination;
pub mod document;
pub mod menu;
pub mod state;

pub use action::*;
pub use destination::*;
pub use document::*;
pub use menu::*;
pub use state::*;

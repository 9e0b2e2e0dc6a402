pub mod dialplan;
pub mod menu_rows;

pub use dialplan::*;
pub use menu_rows::*;

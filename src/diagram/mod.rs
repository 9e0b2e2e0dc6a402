pub mod conversion;
pub mod definition;
pub mod properties;

pub use conversion::*;
pub use definition::*;
pub use properties::*;

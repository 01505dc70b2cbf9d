pub mod event;
pub mod settings;
pub mod summary;
pub mod usage;

pub use event::*;
pub use settings::*;
pub use summary::*;
pub use usage::*;

pub mod user;
pub mod event;
pub mod entry;
pub mod analysis;

pub use user::*;
pub use event::*;
pub use entry::*;

pub mod taxonomy;
pub mod ticket;
pub mod user;

pub use taxonomy::*;
pub use ticket::*;
pub use user::*;

mod talk;
pub use self::talk::*;
mod talk_error;
pub use self::talk_error::*;
mod talk_store;
pub use self::talk_store::*;
mod waiter_registry;
pub use self::waiter_registry::*;
mod talk_service;
pub use self::talk_service::*;

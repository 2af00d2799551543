mod path_pattern;
pub use self::path_pattern::*;
mod route_handler;
pub use self::route_handler::*;
mod route_table;
pub use self::route_table::*;
mod route_service;
pub use self::route_service::*;

mod core_config;
pub use self::core_config::*;
mod environment_config;
pub use self::environment_config::*;
mod service_config;
pub use self::service_config::*;
mod web_config;
pub use self::web_config::*;

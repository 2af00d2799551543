mod ready;
pub use self::ready::*;
mod version;
pub use self::version::*;
mod telemetry_config;
pub use self::telemetry_config::*;

mod health;
pub use self::health::*;

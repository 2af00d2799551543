mod json_body;
pub use self::json_body::*;

pub mod json;
pub mod password;

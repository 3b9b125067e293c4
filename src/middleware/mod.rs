pub mod auth;
pub mod gate;
pub mod response;

pub use gate::{access_gate, classify_path, PathClass};
pub use response::{ApiResponse, ApiResult};

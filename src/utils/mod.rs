pub mod environment;
pub mod logging;
pub mod paths;

pub use environment::Settings;
pub use paths::{is_within, project_name_from_cwd, sanitize_cache_key};

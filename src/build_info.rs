pub const BUILD_TIME: &str = env!("BLOGICUM_BUILD_TIME");
pub const AXUM_VERSION: &str = env!("BLOGICUM_AXUM_VERSION");
pub const RUST_VERSION: &str = env!("BLOGICUM_RUST_VERSION");

pub mod builder;
pub mod deployment_environment;
pub mod server_state;
pub mod session;

pub use builder::ServerStateBuilder;
pub use deployment_environment::DeploymentEnvironment;
pub use server_state::ServerState;
pub use session::{DEFAULT_SESSION_DURATION, Session};

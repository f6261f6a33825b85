mod check;
mod config;
mod ensure;

pub use check::CheckArgs;
pub use check::handle_check;
pub use config::ConfigArgs;
pub use config::handle_config;
pub use ensure::EnsureArgs;
pub use ensure::handle_ensure;

mod format_options;
mod target_options;

pub use format_options::FormatOptions;
pub use target_options::TargetOptions;

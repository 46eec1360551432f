//! Configuration: where files live and the user's settings

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::Settings;

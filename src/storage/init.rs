//! Storage initialization
//!
//! First-run setup: directories, settings file and the default categories.

use tracing::info;

use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::error::TallyResult;
use crate::services::CategoryRegistry;

use super::Storage;

/// What `initialize_storage` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    /// Whether config.json was written by this call
    pub settings_created: bool,
    /// How many default categories were inserted
    pub categories_created: usize,
}

/// Initialize storage, keeping anything that already exists
///
/// Safe to run repeatedly: settings are only written when missing and the
/// category seed skips pairs that are already registered.
pub fn initialize_storage(paths: &TallyPaths) -> TallyResult<InitReport> {
    paths.ensure_directories()?;

    let settings_created = !paths.settings_file().exists();
    let settings = Settings::load_or_create(paths)?;
    if settings_created {
        settings.save(paths)?;
    }

    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;
    let categories_created = CategoryRegistry::new(&storage).seed_defaults()?;

    info!(
        base_dir = %paths.base_dir().display(),
        settings_created,
        categories_created,
        "storage initialized"
    );

    Ok(InitReport {
        settings_created,
        categories_created,
    })
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TallyPaths) -> bool {
    !paths.settings_file().exists() || !paths.categories_file().exists()
}

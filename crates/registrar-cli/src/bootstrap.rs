use anyhow::Context;
use registrar_config::RegistrarConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RegistrarConfig> {
    let mut config =
        RegistrarConfig::load_with_dotenv().context("failed to load registrar configuration")?;
    apply_overrides(&mut config, flags);
    tracing::debug!(db = %config.database.path, "configuration loaded");
    Ok(config)
}

fn apply_overrides(config: &mut RegistrarConfig, flags: &GlobalFlags) {
    if let Some(path) = flags.db.as_deref().filter(|path| !path.is_empty()) {
        config.database.path = path.to_string();
    }
}

use std::path::Path;

use f2c_lib::{Config, F2cError, Framework};
use tracing::debug;

pub fn load_config(path: Option<&Path>) -> Result<Config, F2cError> {
    let cfg = if let Some(p) = path {
        Config::from_toml_file(p).map_err(|e| {
            F2cError::Config(format!("Failed to read config {}: {}", p.display(), e))
        })?
    } else {
        Config::default()
    };

    cfg.validate()
        .map_err(|e| F2cError::Config(format!("Invalid config: {}", e)))?;
    debug!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "defaults".into()),
        framework = cfg.framework.as_str(),
        model = %cfg.generator.model,
        image_scale = cfg.figma.image_scale,
        "effective config"
    );
    Ok(cfg)
}

/// A `--framework` flag wins over the config file.
pub fn resolve_framework(flag: Option<Framework>, config: &Config) -> Framework {
    flag.unwrap_or(config.framework)
}

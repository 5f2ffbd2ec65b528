use std::path::Path;

use anyhow::Context;
use cloudrip_common::config::ScanConfig;
use cloudrip_common::success;

pub fn create_config(path: &Path) -> anyhow::Result<()> {
    ScanConfig::write_default(path)
        .with_context(|| format!("creating config file {}", path.display()))?;
    success!("Example configuration written to {}", path.display());
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::info;

use schedule_manager::{
    application::commands::load_config,
    domain::config_model::ScheduleConfig,
    AppServices,
};

// ==========================================
// 設定の読み込み元
// ==========================================
//
// JSON ファイルの形式:
//
// {
//   "statuses": [{ "id": 1, "key": "delivered", "order": 40, "slot": "delivery", "isAnchor": true }],
//   "rules":    [{ "id": 1, "subjectStatusKey": "assembly-complete", "anchorStatusKey": "delivered",
//                  "offsetDays": 2, "direction": "before" }],
//   "holidays": ["25/12/2025"]
// }

pub enum ConfigSource {
    Json(PathBuf),
    Store(PathBuf),
}

impl ConfigSource {
    /// JSON が指定されていればそちらを優先する
    pub fn pick(config: Option<PathBuf>, db: Option<PathBuf>) -> anyhow::Result<Self> {
        match (config, db) {
            (Some(path), _) => Ok(ConfigSource::Json(path)),
            (None, Some(path)) => Ok(ConfigSource::Store(path)),
            (None, None) => bail!("either --config or --db (SCHEDULE_DB) is required"),
        }
    }

    pub async fn load(&self) -> anyhow::Result<ScheduleConfig> {
        match self {
            ConfigSource::Json(path) => read_json_config(path),
            ConfigSource::Store(path) => {
                let services = AppServices::connect(path)
                    .await
                    .with_context(|| format!("failed to open store {}", path.display()))?;
                Ok(load_config(&services).await?)
            }
        }
    }
}

pub fn read_json_config(path: &Path) -> anyhow::Result<ScheduleConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = parse_json_config(&text)
        .with_context(|| format!("{} is not a valid schedule config", path.display()))?;

    info!(
        path = %path.display(),
        statuses = config.statuses.len(),
        rules = config.rules.len(),
        holidays = config.holidays.len(),
        "loaded schedule config"
    );
    Ok(config)
}

pub fn parse_json_config(text: &str) -> Result<ScheduleConfig, serde_json::Error> {
    serde_json::from_str(text)
}

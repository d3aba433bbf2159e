use std::sync::Arc;

use anyhow::Context;
use registrar_config::RegistrarConfig;
use registrar_db::{EventSink, JsonlSink, LogSink, RecordsService};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RecordsService,
    pub config: RegistrarConfig,
}

impl AppContext {
    /// Open the records service and wire the configured alert sink.
    pub async fn init(config: RegistrarConfig) -> anyhow::Result<Self> {
        let sink: Arc<dyn EventSink> = match config.alerts.jsonl_path() {
            Some(path) => Arc::new(JsonlSink::new(&path).with_context(|| {
                format!("failed to prepare alert log at {}", path.display())
            })?),
            None => Arc::new(LogSink),
        };

        let service = RecordsService::new_local(&config.database, &config.auth)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?
            .with_sink(sink);

        Ok(Self { service, config })
    }
}

//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and dataset loading
//! so command handlers only deal with their own output.

use tracing::info;

use edumap::config::ConfigFile;
use edumap::filter::MarkerLayer;
use edumap::loader::{AsyncReqwestClient, DataSource, Loader};
use edumap::logging::{init_logging, split_log_path, LoggingGuard};
use edumap::session::MapSession;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    /// `--source` override
    source: Option<String>,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `source` - Data source overriding `data.source`
    /// * `debug` - Mirror logs to stderr at debug level
    pub fn new(source: Option<String>, debug: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, debug, debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            source,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Data source for this run: `--source` if given, else the config value.
    pub fn data_source(&self) -> DataSource {
        match &self.source {
            Some(source) => DataSource::parse(source),
            None => self.config.data_source(),
        }
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("EduMap v{}", edumap::VERSION);
        info!(source = %self.data_source(), "EduMap CLI: {} command", command);
    }

    /// Load the dataset into a fresh session with every marker visible.
    pub fn load_session(&self) -> Result<MapSession<MarkerLayer>, CliError> {
        let client = AsyncReqwestClient::with_timeout(self.config.data.timeout)
            .map_err(CliError::HttpClient)?;

        let mut loader = Loader::new(client)
            .with_parser(self.config.csv_parser())
            .with_palette(self.config.palette.clone());
        if let Some(digits) = self.config.repair_digits() {
            loader = loader.with_repair(digits);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        let loaded = runtime.block_on(loader.load(&self.data_source()))?;

        let mut session = MapSession::new(MarkerLayer::new());
        session.complete_load(Ok(loaded));
        Ok(session)
    }
}

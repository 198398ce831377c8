//! Dataset loading from a local file or an HTTP(S) URL.
//!
//! A load is all-or-nothing: it either yields a complete [`LoadedDataset`]
//! (marker index plus parse report) or a single [`LoadError`]. There are no
//! retries and no partial results.
//!
//! # Example
//!
//! ```ignore
//! use edumap::loader::{AsyncReqwestClient, DataSource, Loader};
//!
//! let loader = Loader::new(AsyncReqwestClient::new()?);
//! let loaded = loader.load(&DataSource::parse("data/locatii.csv")).await?;
//! println!("{} markers", loaded.index.len());
//! ```

mod http;

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpError, DEFAULT_TIMEOUT_SECS};

use crate::dataset::{repair_csv, CsvParser, ParseError, ParseReport};
use crate::marker::{MarkerIndex, TypePalette};

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local file path.
    File(PathBuf),
    /// HTTP or HTTPS URL.
    Url(String),
}

impl DataSource {
    /// Interpret a configured source string.
    ///
    /// Values starting with `http://` or `https://` are URLs; anything else
    /// is a file path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::File(PathBuf::from(value))
        }
    }

    /// Returns true for remote sources.
    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Url(_))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Errors that abort a load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch {url}: {source}")]
    FetchFailure {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Response from {url} is not valid UTF-8")]
    InvalidEncoding { url: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Where the data was read from.
    pub source: DataSource,
    /// One marker per accepted record.
    pub index: MarkerIndex,
    /// Row counts and rejections from the parse.
    pub report: ParseReport,
    /// Coordinate cells rewritten by the repair stage (0 when disabled).
    pub repaired: usize,
}

/// Fetches, parses and indexes a dataset.
pub struct Loader<C: AsyncHttpClient> {
    client: C,
    parser: CsvParser,
    palette: TypePalette,
    repair_digits: Option<usize>,
}

impl<C: AsyncHttpClient> Loader<C> {
    /// Loader with default column mapping, bounds and palette.
    pub fn new(client: C) -> Self {
        Self {
            client,
            parser: CsvParser::default(),
            palette: TypePalette::default(),
            repair_digits: None,
        }
    }

    /// Use a custom parser (column mapping and bounds).
    pub fn with_parser(mut self, parser: CsvParser) -> Self {
        self.parser = parser;
        self
    }

    /// Use a custom type palette.
    pub fn with_palette(mut self, palette: TypePalette) -> Self {
        self.palette = palette;
        self
    }

    /// Run coordinate repair before parsing.
    pub fn with_repair(mut self, integer_digits: usize) -> Self {
        self.repair_digits = Some(integer_digits);
        self
    }

    /// Read the raw CSV text of a source.
    pub async fn fetch(&self, source: &DataSource) -> Result<String, LoadError> {
        match source {
            DataSource::File(path) => {
                debug!(path = %path.display(), "Reading dataset file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| LoadError::Io {
                        path: path.clone(),
                        source: e,
                    })
            }
            DataSource::Url(url) => {
                debug!(url = url.as_str(), "Downloading dataset");
                let body = self
                    .client
                    .get(url)
                    .await
                    .map_err(|e| LoadError::FetchFailure {
                        url: url.clone(),
                        source: e,
                    })?;
                String::from_utf8(body).map_err(|_| LoadError::InvalidEncoding { url: url.clone() })
            }
        }
    }

    /// Load a source into a marker index.
    pub async fn load(&self, source: &DataSource) -> Result<LoadedDataset, LoadError> {
        let text = match self.fetch(source).await {
            Ok(text) => text,
            Err(e) => {
                warn!(source = %source, error = %e, "Dataset load failed");
                return Err(e);
            }
        };

        let (text, repaired) = match self.repair_digits {
            Some(digits) => {
                let output = repair_csv(&text, self.parser.mapping(), digits)?;
                (output.text, output.repaired)
            }
            None => (text, 0),
        };

        let parsed = match self.parser.parse(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(source = %source, error = %e, "Dataset parse failed");
                return Err(e.into());
            }
        };

        let index = MarkerIndex::build(parsed.records, &self.palette);

        info!(
            source = %source,
            markers = index.len(),
            rejected = parsed.report.rejected_count(),
            repaired = repaired,
            "Dataset loaded"
        );

        Ok(LoadedDataset {
            source: source.clone(),
            index,
            report: parsed.report,
            repaired,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::http::tests::MockAsyncHttpClient;
    use super::*;

    const CSV: &str = "County,Name,Type,Latitude,Longitude\n\
                       Cluj,Liceul Teoretic Ion Agârbiceanu,Liceu,46.55,23.57\n\
                       Timiș,Școala Gimnazială nr. 2,Școală Gimnazială,45.74,21.22\n\
                       Alba,Colegiul Național Horea,Colegiu,abc,23.58\n";

    fn temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DataSource::parse("data/locatii.csv"),
            DataSource::File(PathBuf::from("data/locatii.csv"))
        );
        assert_eq!(
            DataSource::parse(" https://example.com/a.csv "),
            DataSource::Url("https://example.com/a.csv".to_string())
        );
        assert!(DataSource::parse("HTTP://example.com/a.csv").is_remote());
        assert!(!DataSource::parse("httpdocs/a.csv").is_remote());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let file = temp_csv(CSV);
        let loader = Loader::new(MockAsyncHttpClient::ok(""));

        let loaded = loader
            .load(&DataSource::File(file.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(loaded.index.len(), 2);
        assert_eq!(loaded.report.total_rows, 3);
        assert_eq!(loaded.report.rejected_count(), 1);
        assert_eq!(loaded.repaired, 0);
        assert!(loaded.index.all_counties().contains(&"Cluj"));
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let loader = Loader::new(MockAsyncHttpClient::ok(CSV));
        let source = DataSource::parse("https://example.com/locatii.csv");

        let loaded = loader.load(&source).await.unwrap();
        assert_eq!(loaded.index.len(), 2);
        assert_eq!(loaded.source, source);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(MockAsyncHttpClient::ok(""));

        let result = loader
            .load(&DataSource::File(dir.path().join("missing.csv")))
            .await;
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[tokio::test]
    async fn test_http_failure_is_fetch_failure() {
        let loader = Loader::new(MockAsyncHttpClient::failing(HttpError::Status {
            status: 503,
            url: "https://example.com/locatii.csv".to_string(),
        }));

        let result = loader
            .load(&DataSource::parse("https://example.com/locatii.csv"))
            .await;
        assert!(matches!(result, Err(LoadError::FetchFailure { .. })));
    }

    #[tokio::test]
    async fn test_invalid_utf8_response() {
        let loader = Loader::new(MockAsyncHttpClient {
            response: Ok(vec![0xff, 0xfe, 0xfd]),
        });

        let result = loader
            .load(&DataSource::parse("https://example.com/locatii.csv"))
            .await;
        assert!(matches!(result, Err(LoadError::InvalidEncoding { .. })));
    }

    #[tokio::test]
    async fn test_empty_source_is_parse_error() {
        let loader = Loader::new(MockAsyncHttpClient::ok("County,Name,Type,Latitude,Longitude\n"));

        let result = loader.load(&DataSource::parse("https://example.com/a.csv")).await;
        assert!(matches!(
            result,
            Err(LoadError::Parse(ParseError::EmptySource))
        ));
    }

    #[tokio::test]
    async fn test_repair_stage_recovers_rows() {
        let csv = "County,Name,Type,Latitude,Longitude\n\
                   Cluj,Liceul Teoretic Ion Agârbiceanu,Liceu,460.623.309,23.57\n";

        let strict = Loader::new(MockAsyncHttpClient::ok(csv));
        let result = strict.load(&DataSource::parse("https://example.com/a.csv")).await;
        assert!(matches!(
            result,
            Err(LoadError::Parse(ParseError::NoValidRecords { rejected: 1 }))
        ));

        let repairing = Loader::new(MockAsyncHttpClient::ok(csv)).with_repair(2);
        let loaded = repairing
            .load(&DataSource::parse("https://example.com/a.csv"))
            .await
            .unwrap();
        assert_eq!(loaded.repaired, 1);
        assert_eq!(loaded.index.len(), 1);

        let marker = loaded.index.iter().next().unwrap();
        assert!((marker.position().0 - 46.0623309).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_custom_palette_applies() {
        let palette = TypePalette::default().with_color("Liceu", "#000000");
        let loader = Loader::new(MockAsyncHttpClient::ok(CSV)).with_palette(palette);

        let loaded = loader
            .load(&DataSource::parse("https://example.com/a.csv"))
            .await
            .unwrap();
        let liceu = loaded.index.iter().find(|m| m.kind() == "Liceu").unwrap();
        assert_eq!(liceu.icon().color, "#000000");
    }
}

// Document source strategies
// One capability (load a source descriptor into a Document), two
// interchangeable implementations, selected by the caller at construction
// time through the factory below. No inheritance, no session state.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Document;
use crate::error::ParseError;

// ============================================================================
// SOURCE KIND DETECTION
// ============================================================================

/// Which retrieval strategy a source descriptor maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Network,
    File,
}

impl SourceKind {
    /// Classify a source descriptor.
    ///
    /// Anything that does not look like an http(s) URL is treated as a
    /// filesystem path; a bad path surfaces later as a read failure rather
    /// than a detection failure.
    pub fn detect(source: &str) -> SourceKind {
        if source.starts_with("http://") || source.starts_with("https://") {
            SourceKind::Network
        } else {
            SourceKind::File
        }
    }

    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceKind::Network => "network",
            SourceKind::File => "file",
        }
    }
}

// ============================================================================
// FETCH OPTIONS
// ============================================================================

/// Knobs for the network strategy.
///
/// The reference behavior of a bare blocking GET carries no timeout; one is
/// applied here so a stalled fetch cannot block the caller indefinitely.
/// There is no retry layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with network fetches.
    pub user_agent: String,
}

impl FetchOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            timeout_secs: 30,
            user_agent: format!("ledger-lens/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// ============================================================================
// STRATEGY TRAIT
// ============================================================================

/// One interchangeable way of turning a source descriptor into a document.
pub trait DocumentSource {
    /// Retrieve the raw markup and parse it.
    ///
    /// # Returns
    /// * `Ok(Document)` - parsed document
    /// * `Err(ParseError)` - retrieval or parse failure, carrying the cause
    fn load(&self) -> Result<Document, ParseError>;

    /// Which strategy this source uses.
    fn kind(&self) -> SourceKind;
}

// ============================================================================
// NETWORK STRATEGY
// ============================================================================

/// Blocking HTTP GET followed by a markup parse.
pub struct NetworkSource {
    url: String,
    options: FetchOptions,
}

impl NetworkSource {
    pub fn new(url: impl Into<String>) -> Self {
        NetworkSource {
            url: url.into(),
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    fn fetch(&self) -> Result<String, ParseError> {
        let fetch_err = |source| ParseError::Fetch {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.options.timeout())
            .user_agent(self.options.user_agent.clone())
            .build()
            .map_err(fetch_err)?;

        let body = client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch_err)?;

        debug!(url = %self.url, bytes = body.len(), "fetched markup");
        Ok(body)
    }
}

impl DocumentSource for NetworkSource {
    fn load(&self) -> Result<Document, ParseError> {
        let body = self.fetch()?;
        Document::parse(&body)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Network
    }
}

// ============================================================================
// FILE STRATEGY
// ============================================================================

/// Synchronous read of a local file followed by a markup parse.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    fn read(&self) -> Result<String, ParseError> {
        // read_to_string opens, reads and closes the handle in one scope;
        // the handle is released whether the read completes or fails.
        let contents = fs::read_to_string(&self.path).map_err(|e| ParseError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), bytes = contents.len(), "read markup");
        Ok(contents)
    }
}

impl DocumentSource for FileSource {
    fn load(&self) -> Result<Document, ParseError> {
        let contents = self.read()?;
        Document::parse(&contents)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Pick the strategy for a source descriptor.
///
/// Returns `Box<dyn DocumentSource>` for polymorphism; the choice happens
/// once, at construction time.
pub fn source_for(source: &str, options: &FetchOptions) -> Box<dyn DocumentSource> {
    match SourceKind::detect(source) {
        SourceKind::Network => Box::new(NetworkSource::new(source).with_options(options.clone())),
        SourceKind::File => Box::new(FileSource::new(source)),
    }
}

/// Resolve a source descriptor into a parsed document with default options.
///
/// Any retrieval or parse failure comes back as a `ParseError` value; the
/// caller branches on the result instead of catching a panic.
pub fn resolve(source: &str) -> Result<Document, ParseError> {
    resolve_with(source, &FetchOptions::default())
}

/// Resolve a source descriptor with explicit fetch options.
pub fn resolve_with(source: &str, options: &FetchOptions) -> Result<Document, ParseError> {
    source_for(source, options).load()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_sample_file(markup: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(markup.as_bytes()).expect("write markup");
        file
    }

    #[test]
    fn test_detect_network_sources() {
        assert_eq!(SourceKind::detect("https://example.com/"), SourceKind::Network);
        assert_eq!(SourceKind::detect("http://localhost:8080/x"), SourceKind::Network);
    }

    #[test]
    fn test_detect_file_sources() {
        assert_eq!(SourceKind::detect("./statements.html"), SourceKind::File);
        assert_eq!(SourceKind::detect("/var/data/page.html"), SourceKind::File);
        assert_eq!(SourceKind::detect("relative.html"), SourceKind::File);
    }

    #[test]
    fn test_file_source_loads_and_queries() {
        let file = write_sample_file(
            "<html><body><a href=\"/a\">one</a><a href=\"/b\">two</a></body></html>",
        );

        let source = FileSource::new(file.path());
        assert_eq!(source.kind(), SourceKind::File);

        let doc = source.load().unwrap();
        assert_eq!(doc.descendants("a").len(), 2);
    }

    #[test]
    fn test_resolve_local_file() {
        let file = write_sample_file("<html><body><a href=\"/only\">only</a></body></html>");
        let path = file.path().to_str().unwrap().to_string();

        let doc = resolve(&path).unwrap();
        let anchors = doc.descendants("a");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].attr("href").as_deref(), Some("/only"));
    }

    #[test]
    fn test_resolve_missing_file_is_error_value() {
        let result = resolve("definitely-not-a-real-file.html");

        match result {
            Err(ParseError::Read { path, .. }) => {
                assert_eq!(path, PathBuf::from("definitely-not-a-real-file.html"));
            }
            other => panic!("expected read failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_source_for_picks_strategy() {
        let options = FetchOptions::default();
        assert_eq!(
            source_for("https://example.com/", &options).kind(),
            SourceKind::Network
        );
        assert_eq!(source_for("page.html", &options).kind(), SourceKind::File);
    }

    #[test]
    fn test_fetch_options_builder() {
        let options = FetchOptions::default()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("statements-bot/2.0");

        assert_eq!(options.timeout(), Duration::from_secs(5));
        assert_eq!(options.user_agent, "statements-bot/2.0");
    }
}

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_matcher::analysis::ResumeAnalyzer;
use resume_matcher::config::Config;
use resume_matcher::extraction::PdfTextExtractor;
use resume_matcher::matching::{KeywordComparator, KeywordExtractor, StopwordList, UnicodeWordTokenizer};
use resume_matcher::routes::build_router;
use resume_matcher::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher API v{}", env!("CARGO_PKG_VERSION"));

    let stopwords = load_stopwords(&config)?;
    info!("Stopword list loaded ({} words)", stopwords.len());

    let extractor = KeywordExtractor::new(Arc::new(UnicodeWordTokenizer), stopwords);
    let analyzer = ResumeAnalyzer::new(
        Arc::new(PdfTextExtractor::new()),
        Arc::new(KeywordComparator::new(extractor)),
    );

    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload form has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr} (upload limit {} bytes)", config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// English stop words, plus the optional extra list from `STOPWORDS_PATH`.
fn load_stopwords(config: &Config) -> Result<StopwordList> {
    let mut stopwords = StopwordList::english();
    if let Some(path) = &config.stopwords_path {
        let extra = StopwordList::load(path)
            .with_context(|| format!("Failed to read stopword list '{}'", path.display()))?;
        info!("Adding {} stop words from {}", extra.len(), path.display());
        stopwords.extend(extra.iter());
    }
    Ok(stopwords)
}

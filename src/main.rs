use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cartmate::adapters::api_handler::ApiState;
use cartmate::adapters::{FirecrawlScrapeClient, TavilySearchClient};
use cartmate::assistant::domain::load_tool_definitions;
use cartmate::assistant::llm::AnthropicClient;
use cartmate::assistant::memory::InMemoryStore;
use cartmate::assistant::tools::{
    CompetitorPriceSearchTool, PriceMatchPolicyTool, ToolRegistry,
};
use cartmate::assistant::ChatController;
use cartmate::cli::Cli;
use cartmate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Cartmate on {}:{}", host, port);

    // External clients, constructed once and reused across all calls
    let model_client = Arc::new(
        AnthropicClient::from_settings(&settings.model)
            .context("Failed to create model client")?,
    );
    let search_client = Arc::new(
        TavilySearchClient::from_settings(&settings.search)
            .context("Failed to create search client")?,
    );
    let scrape_client = Arc::new(
        FirecrawlScrapeClient::from_settings(&settings.scrape)
            .context("Failed to create scrape client")?,
    );

    // Tool registry with the two built-in tools
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CompetitorPriceSearchTool::new(
        search_client,
        settings.search.default_retailers.clone(),
        settings.search.max_results,
    )))?;
    registry.register(Arc::new(PriceMatchPolicyTool::new(
        settings.documents.policies.clone(),
    )))?;
    info!("Registered tools: {}", registry.list().join(", "));

    // Tool schema document; an absent file means no tools are advertised
    let tool_definitions = load_tool_definitions(&settings.documents.tools_schema)?;
    info!("Loaded {} tool definitions", tool_definitions.len());

    let controller = Arc::new(ChatController::new(
        model_client,
        Arc::new(InMemoryStore::new()),
        Arc::new(registry),
        scrape_client,
        tool_definitions,
        settings.model.default.clone(),
        settings.model.max_tokens,
    ));

    let app = cartmate::create_app(ApiState { controller });

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use assessment_flow::adapters::export::load_template;
use assessment_flow::adapters::http::{app_router, WorkflowAppState};
use assessment_flow::adapters::{
    load_registry, CsvSpreadsheetExporter, DocumentRenderer, InMemorySessionStore,
    LocalArtifactStorage, TemplateDocumentExporter,
};
use assessment_flow::application::PurgeIdleSessionsHandler;
use assessment_flow::config::AppConfig;
use assessment_flow::ports::{ArtifactStorage, ReportExporter, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config);

    let registry = Arc::new(
        load_registry(&config.workflow.modules_path).context("loading module registry")?,
    );
    let template = Arc::new(
        load_template(&config.workflow.template_path).context("loading report template")?,
    );

    tokio::fs::create_dir_all(&config.storage.reports_dir)
        .await
        .with_context(|| {
            format!(
                "creating reports directory {}",
                config.storage.reports_dir.display()
            )
        })?;

    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let artifact_storage: Arc<dyn ArtifactStorage> =
        Arc::new(LocalArtifactStorage::new(&config.storage.reports_dir));

    let mut renderer = DocumentRenderer::new().with_pdf_timeout(config.export.pdf_timeout_secs);
    if let Some(pandoc) = &config.export.pandoc_path {
        renderer = renderer.with_pandoc_path(pandoc);
    }
    let exporters: Vec<Arc<dyn ReportExporter>> = vec![
        Arc::new(CsvSpreadsheetExporter::new(artifact_storage.clone())),
        Arc::new(
            TemplateDocumentExporter::new(template, registry.clone(), artifact_storage.clone())
                .with_format(config.export.document_format)
                .with_renderer(renderer),
        ),
    ];

    spawn_purge_task(session_store.clone(), &config);

    let state = WorkflowAppState {
        session_store,
        registry,
        artifact_storage,
        exporters,
    };
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, reports_dir = %config.storage.reports_dir.display(), "Assessment flow listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn spawn_purge_task(store: Arc<dyn SessionStore>, config: &AppConfig) {
    let handler = PurgeIdleSessionsHandler::new(store, config.workflow.session_ttl_minutes);
    let mut interval = tokio::time::interval(config.workflow.purge_interval());

    tokio::spawn(async move {
        // First tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = handler.handle().await {
                tracing::warn!(error = %e, "Idle session purge failed");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

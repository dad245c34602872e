mod cli;
mod core;
mod features;
mod modules;
mod shared;

use crate::cli::{Cli, Commands, NewBillArgs};
use crate::core::config::Config;
use crate::core::router::{LoggingNavigator, Navigator, Route};
use crate::core::session::SessionContext;
use crate::features::bills::{BillsController, HeadlessBillsView, PreviewTarget};
use crate::features::new_bill::dtos::{FileSelection, SelectedFile};
use crate::features::new_bill::{HeadlessNewBillView, NewBillController};
use crate::features::pages::{bootstrap_bills_page, render_page, Page};
use crate::modules::store::{BillStore, HttpBillStore};
use crate::shared::validation::base_name;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli, worker_threads))
}

async fn async_main(cli: Cli, worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: store={}, tokio_worker_threads={}",
        config.store.api_url,
        worker_threads
    );

    let navigator: Arc<dyn Navigator> = Arc::new(LoggingNavigator);

    let session = match SessionContext::from_config(&config.session) {
        Ok(session) => session,
        Err(e) => {
            navigator.navigate(Route::Login);
            return Err(anyhow::anyhow!("Failed to read session: {}", e));
        }
    };
    tracing::info!(
        "Session user: {} ({:?}, home {})",
        session.email,
        session.user_type,
        session.home_route()
    );

    let store: Arc<dyn BillStore> = Arc::new(
        HttpBillStore::new(&config.store, session.jwt.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize store client: {}", e))?,
    );
    let view = Arc::new(HeadlessBillsView {
        width: config.app.preview_modal_width,
    });

    let bills = BillsController::new(Arc::clone(&store), Arc::clone(&navigator), view);

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            tracing::debug!("{}", render_page(&Page::Loading)?);
            let page = bootstrap_bills_page(&bills).await;
            let html = render_page(&page)?;
            println!("{}", html);
        }
        Commands::Preview { id } => {
            let rows = bills.fetch_and_format_bills().await?;
            let row = rows
                .iter()
                .find(|b| b.id == id)
                .ok_or_else(|| anyhow::anyhow!("No bill with id {}", id))?;
            bills.handle_click_icon_eye(&PreviewTarget::from(row))?;
        }
        Commands::NewBill(args) => {
            bills.handle_click_new_bill();
            let controller = NewBillController::new(
                store,
                navigator,
                Arc::new(HeadlessNewBillView),
                session,
            );
            submit_new_bill(&controller, &args).await?;
        }
    }

    Ok(())
}

async fn submit_new_bill(controller: &NewBillController, args: &NewBillArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.file {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let input_value = path.to_string_lossy().to_string();
        let file = SelectedFile {
            name: base_name(&input_value).to_string(),
            content_type: String::new(),
            bytes,
        };

        // A rejected or failed attachment does not block the form
        if let Err(e) = controller
            .handle_file_selection(FileSelection::single(input_value, file))
            .await
        {
            tracing::warn!("Submitting without attachment: {}", e);
        } else {
            tracing::info!(
                "Attached {} as bill {} ({})",
                controller.file_name().unwrap_or_default(),
                controller.file_id().unwrap_or_default(),
                controller.file_url().unwrap_or_default()
            );
        }
    }

    let submitted = controller.handle_submit(args.form()).await?;
    tracing::info!(
        "Bill {} submitted ({} €, {})",
        submitted.id(),
        submitted.bill().amount,
        submitted.bill().expense_type
    );
    println!("{}", submitted.id());

    Ok(())
}

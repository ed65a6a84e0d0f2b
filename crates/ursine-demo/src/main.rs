use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ursine_classifier::{ModelProvider, ModelSource, ObjectStore};
use ursine_demo::cli::Cli;
use ursine_demo::server::run_server;
use ursine_demo::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match cli.resolve_source() {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = format!("{}:{}", cli.address, cli.port).parse()?;

    let mut store = ObjectStore::new();
    if let Some(endpoint) = &cli.s3_endpoint {
        store = store.with_endpoint(endpoint);
    }
    let provider = ModelProvider::with_store(store);

    match &source {
        ModelSource::Remote { bucket, key } => {
            tracing::info!("Loading model {key} from S3 bucket {bucket}...");
        }
        ModelSource::LocalPath(path) => {
            tracing::info!("Loading model from {}...", path.display());
        }
    }

    let classifier = match provider.get_or_load(&source).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("failed to load model: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded model successfully");

    println!();
    println!("  Ursine — image classifier demo");
    println!("  Model:   {source}");
    println!("  Labels:  {}", classifier.labels().join(", "));
    println!();
    println!("  Open http://{addr} in your browser");
    println!();

    run_server(AppState::new(classifier), addr).await
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "ursine_demo=debug,ursine_classifier=debug,tower_http=debug"
    } else {
        "ursine_demo=info,ursine_classifier=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

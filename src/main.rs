#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use like_ui::storage::{load_events, load_markup, load_page, persist_page};
    use like_ui::{LikeResponseHandler, ReplayConfig, RequestEvents, replay};
    use tracing::info;
    use tracing_subscriber::{EnvFilter, fmt};

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ReplayConfig::from_env();
    let markup = load_markup(config.markup_path.as_deref()).await?;
    let mut document = load_page(&config.page_path).await?;
    let recorded = load_events(&config.events_path).await?;

    let mut events = RequestEvents::new();
    events.subscribe(LikeResponseHandler::new(markup));

    let summary = replay(&mut document, &recorded, &events);

    persist_page(&config.output_path, &document, config.renders_html()).await?;
    info!("wrote {}", config.output_path.display());

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

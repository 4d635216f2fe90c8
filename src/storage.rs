use crate::config::LikeMarkup;
use crate::dom::Document;
use crate::errors::LikeError;
use crate::models::{PageNode, ReplayEvent};
use crate::ui::render_page;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;
use tracing::info;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LikeError> {
    let bytes = fs::read(path)
        .await
        .map_err(|err| LikeError::storage(format!("failed to read {}: {err}", path.display())))?;
    parse_json(path, &bytes)
}

fn parse_json<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, LikeError> {
    serde_json::from_slice(bytes)
        .map_err(|err| LikeError::storage(format!("failed to parse {}: {err}", path.display())))
}

pub async fn load_page(path: &Path) -> Result<Document, LikeError> {
    let page: PageNode = read_json(path).await?;
    Ok(Document::from_snapshot(&page))
}

/// A missing event log means there is nothing to replay.
pub async fn load_events(path: &Path) -> Result<Vec<ReplayEvent>, LikeError> {
    match fs::read(path).await {
        Ok(bytes) => parse_json(path, &bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no event log at {}, nothing to replay", path.display());
            Ok(Vec::new())
        }
        Err(err) => Err(LikeError::storage(format!(
            "failed to read {}: {err}",
            path.display()
        ))),
    }
}

pub async fn load_markup(path: Option<&Path>) -> Result<LikeMarkup, LikeError> {
    match path {
        Some(path) => read_json(path).await,
        None => Ok(LikeMarkup::default()),
    }
}

pub async fn persist_page(path: &Path, document: &Document, as_html: bool) -> Result<(), LikeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = if as_html {
        render_page(document).into_bytes()
    } else {
        serde_json::to_vec_pretty(&document.to_snapshot()).map_err(LikeError::storage)?
    };
    fs::write(path, payload).await?;
    Ok(())
}

pub mod config;
pub mod dom;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod replay;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;
pub mod ui;

#[cfg(feature = "browser")]
pub mod browser;

pub use config::{LikeMarkup, ReplayConfig};
pub use dom::{Document, LikeDom};
pub use events::RequestEvents;
pub use handlers::LikeResponseHandler;
pub use replay::replay;

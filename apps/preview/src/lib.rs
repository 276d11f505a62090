//! # Lamsa Preview
//!
//! Plays a scripted storefront session and reports what the page ended up
//! showing.
//!
//! ## Script Format
//! ```json
//! {
//!   "layout": { "item_list": true, "badges": 1, "cart_panel": true, "backdrop": true },
//!   "session": "[{\"id\":1,\"name\":\"تارت\",\"price\":55,\"img\":\"t.jpg\",\"qty\":1}]",
//!   "realtime": false,
//!   "steps": [
//!     { "event": { "type": "ready" } },
//!     { "event": { "type": "add_to_cart", "id": "c1", "name": "Croissant", "price": 12.5 } },
//!     { "wait_ms": 3400 },
//!     { "event": { "type": "checkout" } }
//!   ]
//! }
//! ```
//!
//! `layout` defaults to the full storefront page and `session` to an empty
//! tab. With `realtime` set, waits also sleep on the wall clock so the run
//! can be watched in the logs.

pub mod error;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lamsa_core::{MemoryStorage, SessionStorage};
use lamsa_ui::{Effect, PageLayout, PageView, Storefront, UiConfig, UiEvent};

pub use error::{PreviewError, PreviewResult};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lamsa-preview")]
#[command(about = "Play a scripted storefront session and print the final page")]
pub struct Args {
    /// JSON script of page events and waits
    pub script: PathBuf,
    /// TOML config file; defaults to the user config dir
    pub config: Option<PathBuf>,
}

/// One scripted session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "PageLayout::storefront")]
    pub layout: PageLayout,
    /// Raw value already in the cart slot when the page loads.
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub realtime: bool,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Wait { wait_ms: u64 },
    Event { event: UiEvent },
}

/// What the session left behind.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Every effect other than [`Effect::None`], in order.
    pub effects: Vec<Effect>,
    pub view: PageView,
    /// Final value of the cart slot.
    pub session: Option<String>,
}

/// Initializes tracing. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,lamsa=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Plays `script` against a fresh page.
pub async fn play(script: Script, config: UiConfig) -> SessionReport {
    let storage = match &script.session {
        Some(raw) => MemoryStorage::with_item(&config.storage.key, raw),
        None => MemoryStorage::new(),
    };
    let key = config.storage.key.clone();
    let mut page = Storefront::new(config, script.layout, storage);
    let mut effects = Vec::new();

    for step in script.steps {
        match step {
            Step::Wait { wait_ms } => {
                if script.realtime {
                    tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                }
                page.advance(wait_ms);
                debug!(now_ms = page.now(), "Clock advanced");
            }
            Step::Event { event } => match page.handle(event) {
                Effect::None => {}
                effect => effects.push(effect),
            },
        }
    }

    SessionReport {
        effects,
        view: page.snapshot(),
        session: page.store().storage().get_item(&key),
    }
}

/// Command-line entry: `lamsa-preview <script.json> [config.toml]`.
pub async fn run(args: Args) -> PreviewResult<String> {
    let config = UiConfig::load_or_default(args.config);

    let raw = std::fs::read_to_string(&args.script).map_err(|source| PreviewError::ReadScript {
        path: args.script.clone(),
        source,
    })?;
    let script: Script = serde_json::from_str(&raw)?;
    info!(path = %args.script.display(), steps = script.steps.len(), "Playing script");

    let report = play(script, config).await;
    Ok(serde_json::to_string_pretty(&report)?)
}

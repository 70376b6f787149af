pub mod app;
pub mod form;

use std::sync::Arc;

use anyhow::Result;
use strive_core::client::RecommendationSource;
use strive_core::store::FieldStore;

pub use app::InteractiveApp;

/// Run the interactive form against the given source and field store.
pub async fn run_interactive(
    source: Arc<dyn RecommendationSource>,
    store: Box<dyn FieldStore>,
) -> Result<()> {
    let mut app = InteractiveApp::new(source, store);
    app.run().await
}

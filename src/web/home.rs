//! Dashboard page

use axum::{extract::State, response::Html};

use super::{views, PageResult};

pub async fn dashboard(State(state): State<crate::AppState>) -> PageResult<Html<String>> {
    let summary = state.services.catalog.summary().await?;
    tracing::debug!(?summary, "Dashboard counters");
    Ok(Html(views::dashboard(&summary)))
}

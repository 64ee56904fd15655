//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// How many products the landing page features.
const FEATURED_COUNT: usize = 4;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductView>,
}

/// Display the landing page with a featured selection from the catalog.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = state
        .catalog()
        .featured(FEATURED_COUNT)
        .iter()
        .map(ProductView::from)
        .collect();

    HomeTemplate { featured }
}

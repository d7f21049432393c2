use crate::centroids::CentroidTable;
use crate::config::AppConfig;
use crate::palette;
use crate::render::{self, MapView};
use crate::state::{SelectionState, ViewEvent};
use crate::types::ExhibitionRecord;
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::warn;

pub struct AppState {
    pub records: Vec<ExhibitionRecord>,
    pub centroids: CentroidTable,
    pub config: AppConfig,
    // Panel id -> that panel's current selection
    pub panels: Mutex<HashMap<String, SelectionState>>,
}

/// Everything the frontend needs to build its controls.
#[derive(Serialize)]
pub struct MetaResponse {
    pub min_year: u16,
    pub max_year: u16,
    pub nationalities: Vec<NationalityEntry>,
    pub panels: Vec<PanelMeta>,
}

#[derive(Serialize)]
pub struct NationalityEntry {
    pub name: &'static str,
    pub color: &'static str,
}

#[derive(Serialize)]
pub struct PanelMeta {
    pub id: String,
    pub selection: SelectionState,
}

pub async fn start_server(
    config: AppConfig,
    records: Vec<ExhibitionRecord>,
    centroids: CentroidTable,
) -> Result<()> {
    let port = config.server.port;
    let static_dir = config.server.static_dir.clone();
    let state = Arc::new(AppState::new(config, records, centroids));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Starting server on http://{}", addr);

    let app = Router::new()
        .route("/api/meta", get(meta_handler))
        .route("/api/panels/:id/view", get(view_handler))
        .route("/api/panels/:id/events", post(event_handler))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

impl AppState {
    pub fn new(config: AppConfig, records: Vec<ExhibitionRecord>, centroids: CentroidTable) -> Self {
        let panels = config
            .map
            .panels
            .iter()
            .map(|panel| {
                let mut selection = SelectionState::new(panel.default_year);
                selection.show_lines = panel.show_lines;
                if let Some(nationality) = &panel.default_nationality {
                    selection.add_nationality(nationality);
                }
                (panel.id.clone(), selection)
            })
            .collect();

        AppState {
            records,
            centroids,
            config,
            panels: Mutex::new(panels),
        }
    }

    fn view_for(&self, selection: &SelectionState) -> MapView {
        render::build_view(
            &self.records,
            &self.centroids,
            selection,
            &self.config.map.style,
        )
    }
}

pub async fn meta_handler(State(state): State<Arc<AppState>>) -> Json<MetaResponse> {
    let panels = {
        let selections = state.panels.lock().expect("panel state lock");
        // config order, not HashMap order
        state
            .config
            .map
            .panels
            .iter()
            .filter_map(|panel| {
                selections.get(&panel.id).map(|selection| PanelMeta {
                    id: panel.id.clone(),
                    selection: selection.clone(),
                })
            })
            .collect()
    };

    let nationalities = palette::restricted_colors()
        .into_iter()
        .map(|(name, color)| NationalityEntry { name, color })
        .collect();

    Json(MetaResponse {
        min_year: state.config.map.min_year,
        max_year: state.config.map.max_year,
        nationalities,
        panels,
    })
}

pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MapView>, StatusCode> {
    let selection = {
        let selections = state.panels.lock().expect("panel state lock");
        match selections.get(&id) {
            Some(selection) => selection.clone(),
            None => {
                warn!("View requested for unknown panel '{}'", id);
                return Err(StatusCode::NOT_FOUND);
            }
        }
    };
    Ok(Json(state.view_for(&selection)))
}

pub async fn event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(event): Json<ViewEvent>,
) -> Result<Json<MapView>, StatusCode> {
    let selection = {
        let mut selections = state.panels.lock().expect("panel state lock");
        match selections.get_mut(&id) {
            Some(selection) => {
                selection.apply(&event);
                selection.clone()
            }
            None => {
                warn!("Event for unknown panel '{}': {:?}", id, event);
                return Err(StatusCode::NOT_FOUND);
            }
        }
    };
    Ok(Json(state.view_for(&selection)))
}

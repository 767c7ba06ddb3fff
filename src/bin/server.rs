use std::net::SocketAddr;

use anyhow::Context;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hexworld::config::{Params, Strategy};
use hexworld::topology::Wrap;
use hexworld::{Grid, render, save};

/// Pixels per internal unit for previews.
const PREVIEW_SCALE: f64 = 12.0;

/// Previews are scaled down past this many pixels.
const PREVIEW_MAX_PIXELS: usize = 16 << 20;

/// Generated maps are between `MIN_SIDE` and `MAX_SIDE` tiles on each side.
const MIN_SIDE: usize = 10;
const MAX_SIDE: usize = 512;

fn clamp_side(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(MIN_SIDE, MAX_SIDE)
}

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    wrap: Option<Wrap>,
    strategy: Option<Strategy>,
    land_fraction: Option<f64>,
    water_fraction: Option<f64>,
    west_points: Option<usize>,
    east_points: Option<usize>,
    neighbor_land_chance: Option<f64>,
}

#[derive(Serialize)]
struct GenerateResponse {
    grid: Value,
    preview: String,
    land: usize,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct LoadResponse {
    preview: String,
    width: usize,
    height: usize,
    wrap: Wrap,
    land: usize,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<hexworld::Error> for ApiError {
    fn from(e: hexworld::Error) -> Self {
        warn!(error = %e, "request rejected");
        ApiError(StatusCode::BAD_REQUEST, e.to_string())
    }
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("PNG encode failed: {e}")))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn preview(grid: &Grid) -> Result<String, ApiError> {
    let scale = render::fit_scale(grid, PREVIEW_SCALE, PREVIEW_MAX_PIXELS);
    let (rgba, w, h) = render::render_map(grid, scale);
    encode_png(&rgba, w, h)
}

fn joined(e: tokio::task::JoinError) -> ApiError {
    ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("worker failed: {e}"))
}

async fn generate_handler(Json(req): Json<GenerateRequest>) -> Result<Json<GenerateResponse>, ApiError> {
    let seed = req.seed.unwrap_or(42);
    let width = clamp_side(req.width, 80);
    let height = clamp_side(req.height, 50);
    let wrap = req.wrap.unwrap_or(Wrap::Cylinder);

    let defaults = Params::for_strategy(req.strategy.unwrap_or_default());
    let params = Params {
        land_fraction: req.land_fraction.unwrap_or(defaults.land_fraction),
        water_fraction: req.water_fraction.unwrap_or(defaults.water_fraction),
        west_points: req.west_points.unwrap_or(defaults.west_points),
        east_points: req.east_points.unwrap_or(defaults.east_points),
        neighbor_land_chance: req.neighbor_land_chance.unwrap_or(defaults.neighbor_land_chance),
        ..defaults
    };

    let response = tokio::task::spawn_blocking(move || -> Result<GenerateResponse, ApiError> {
        let (grid, report) = hexworld::generate(seed, width, height, wrap, &params)?;
        let timings = report
            .timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();
        Ok(GenerateResponse {
            grid: save::save_value(&grid)?,
            preview: preview(&grid)?,
            land: report.land,
            timings,
            width,
            height,
        })
    })
    .await
    .map_err(joined)??;

    Ok(Json(response))
}

async fn load_handler(Json(saved): Json<Value>) -> Result<Json<LoadResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || -> Result<LoadResponse, ApiError> {
        let grid = save::load_value(saved)?;
        Ok(LoadResponse {
            preview: preview(&grid)?,
            width: grid.width(),
            height: grid.height(),
            wrap: grid.wrap(),
            land: grid.land_count(),
        })
    })
    .await
    .map_err(joined)??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/load", post(load_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("hexworld server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_sides_are_clamped() {
        assert_eq!(clamp_side(None, 80), 80);
        assert_eq!(clamp_side(Some(32768), 80), MAX_SIDE);
        assert_eq!(clamp_side(Some(0), 80), MIN_SIDE);
        assert_eq!(clamp_side(Some(120), 80), 120);
    }

    #[test]
    fn largest_preview_stays_bounded() {
        let grid = Grid::new(MAX_SIDE, MAX_SIDE, Wrap::Flat).unwrap();
        let scale = render::fit_scale(&grid, PREVIEW_SCALE, PREVIEW_MAX_PIXELS);
        let (w, h) = render::image_size(&grid, scale);
        assert!((w * h) as f64 <= 1.01 * PREVIEW_MAX_PIXELS as f64);
    }
}

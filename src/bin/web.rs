//! Single binary web server exposing the round robin tally as a REST call.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post,
    web::{Json, JsonConfig},
    App, HttpResponse, HttpServer, Responder,
};
use round_robin_tally::{tally_participant_results, LogTrace, TallyRequest};

/// Upper bound on a tally request body.
const MAX_REQUEST_BYTES: usize = 2 * 1024 * 1024;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-tally",
    })
}

/// Tally one round robin group (matchUps of a single structure).
#[post("/api/tally")]
async fn api_tally(body: Json<TallyRequest>) -> HttpResponse {
    let request = body.into_inner();
    match tally_participant_results(&request, &mut LogTrace) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::info!("Rejected tally request: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(|| {
        App::new()
            .app_data(JsonConfig::default().limit(MAX_REQUEST_BYTES))
            .service(api_health)
            .service(api_tally)
    })
    .bind(bind)?
    .run()
    .await
}

use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde_json::{Map, Value};

use crate::web::extract::ValidJson;
use crate::web::models::{AnalyzeResponse, ConversationRequest, GenerateResponse, StatusResponse};
use crate::AppState;

// Root status endpoint
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        message: "Character Decomposition API is running!".to_string(),
    })
}

// Generate a reply for the conversation so far
pub async fn generate(
    data: web::Data<AppState>,
    req: ValidJson<ConversationRequest>,
) -> impl Responder {
    let req = req.into_inner();

    info!("Generate request: {} messages, {} selected characters",
          req.messages.len(), req.selected_characters.len());

    let response = data
        .model
        .model
        .generate_response(&req.messages, &req.selected_characters);

    HttpResponse::Ok().json(GenerateResponse {
        response,
        status: "success".to_string(),
    })
}

// Decompose a reply into characters
pub async fn analyze(
    data: web::Data<AppState>,
    req: ValidJson<Map<String, Value>>,
) -> impl Responder {
    let characters = data.model.model.analyze_response(&req.into_inner());

    info!("Analyze request produced {} characters", characters.len());

    HttpResponse::Ok().json(AnalyzeResponse { characters })
}

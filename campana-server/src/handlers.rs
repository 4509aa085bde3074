//! Request handlers.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use serde_json::json;

use campana_core::{collection::CollectionKey, service::CollectionQueryService};

use crate::error::ApiError;

const CAMPAIGN_PARAM: &str = "campana_id";

/// Query string shared by the collection endpoints.
///
/// A repeated `campana_id` resolves to its last occurrence; only an absent one is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignQuery {
    /// Campaign identifier, optionally wrapped in double quotes.
    pub campana_id: String,
}

impl CampaignQuery {
    pub fn from_query(query: &str) -> Result<Self, ApiError> {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map_err(|e| ApiError::Validation(e.to_string()))?
            .into_inner();

        pairs
            .into_iter()
            .rev()
            .find(|(key, _)| key == CAMPAIGN_PARAM)
            .map(|(_, campana_id)| CampaignQuery { campana_id })
            .ok_or_else(|| ApiError::Validation(format!("missing query parameter `{CAMPAIGN_PARAM}`")))
    }
}

impl FromRequest for CampaignQuery {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_query(req.query_string()))
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

/// GET /campana?campana_id=...
pub async fn get_campana(
    service: web::Data<CollectionQueryService>,
    query: CampaignQuery,
) -> Result<HttpResponse, ApiError> {
    collection_response(&service, CollectionKey::Campana, &query.campana_id).await
}

/// GET /estacion?campana_id=...
pub async fn get_estacion(
    service: web::Data<CollectionQueryService>,
    query: CampaignQuery,
) -> Result<HttpResponse, ApiError> {
    collection_response(&service, CollectionKey::Estacion, &query.campana_id).await
}

async fn collection_response(
    service: &CollectionQueryService,
    key: CollectionKey,
    campaign_id: &str,
) -> Result<HttpResponse, ApiError> {
    let documents = service.fetch(key, campaign_id).await?;

    if documents.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Sin documentos en '{}' para ese campana_id.",
            key.config().name
        )));
    }

    Ok(HttpResponse::Ok().json(documents))
}

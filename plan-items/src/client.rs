use async_trait::async_trait;
use reqwest::{cookie::Jar, Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::PlanItem;
use crate::error::ApiError;
use crate::payload::{
    flight_autofill_path, plan_item_path, plan_items_path, CreatePlanItemRequest,
    FlightAutofillRequest, Submission,
};

const SESSION_COOKIE: &str = "id";

/// Plan item endpoints of the trips backend.
#[async_trait]
pub trait PlanItemsApi: Send + Sync {
    async fn list_plan_items(&self, trip_id: &str) -> Result<Vec<PlanItem>, ApiError>;

    async fn create_plan_item(
        &self,
        trip_id: &str,
        body: &CreatePlanItemRequest,
    ) -> Result<(), ApiError>;

    async fn autofill_flight(
        &self,
        trip_id: &str,
        body: &FlightAutofillRequest,
    ) -> Result<(), ApiError>;

    async fn update_plan_item(
        &self,
        trip_id: &str,
        item_id: &str,
        body: &CreatePlanItemRequest,
    ) -> Result<(), ApiError>;

    /// Dispatch a submission to the endpoint it belongs to.
    async fn submit(&self, trip_id: &str, submission: &Submission) -> Result<(), ApiError> {
        match submission {
            Submission::Create(body) => self.create_plan_item(trip_id, body).await,
            Submission::FlightAutofill(body) => self.autofill_flight(trip_id, body).await,
            Submission::Update { item_id, body } => {
                self.update_plan_item(trip_id, item_id, body).await
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlanItemsClient {
    client: Client,
    base_url: Url,
}

impl PlanItemsClient {
    pub fn new(base_url: &str, session_id: Option<&str>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Url(format!("{base_url}: {e}")))?;
        let jar = Arc::new(Jar::default());
        if let Some(session_id) = session_id {
            jar.add_cookie_str(
                &format!("{}={}; Path=/", SESSION_COOKIE, session_id),
                &base_url,
            );
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Url(format!("{path}: {e}")))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            call: call_name.to_string(),
            source,
        })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(call = call_name, %status, "request rejected as unauthorized");
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            warn!(call = call_name, %status, ?message, "backend returned error");
            return Err(ApiError::Backend {
                call: call_name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response.json::<T>().await.map_err(|source| ApiError::Parse {
            call: call_name.to_string(),
            source,
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        debug!(call = call_name, "request succeeded");
        Ok(())
    }
}

#[async_trait]
impl PlanItemsApi for PlanItemsClient {
    #[instrument(skip(self))]
    async fn list_plan_items(&self, trip_id: &str) -> Result<Vec<PlanItem>, ApiError> {
        let path = plan_items_path(trip_id);
        self.get_json(
            self.client.get(self.endpoint(&path)?),
            "GET /trips/:id/plan-items",
        )
        .await
    }

    #[instrument(skip(self, body), fields(item_type = %body.item_type))]
    async fn create_plan_item(
        &self,
        trip_id: &str,
        body: &CreatePlanItemRequest,
    ) -> Result<(), ApiError> {
        let path = plan_items_path(trip_id);
        self.send_without_body(
            self.client.post(self.endpoint(&path)?).json(body),
            "POST /trips/:id/plan-items",
        )
        .await
    }

    #[instrument(skip(self, body), fields(flight_number = %body.flight_number))]
    async fn autofill_flight(
        &self,
        trip_id: &str,
        body: &FlightAutofillRequest,
    ) -> Result<(), ApiError> {
        let path = flight_autofill_path(trip_id);
        self.send_without_body(
            self.client.post(self.endpoint(&path)?).json(body),
            "POST /trips/:id/plan-items/flight/autofill",
        )
        .await
    }

    #[instrument(skip(self, body), fields(item_type = %body.item_type))]
    async fn update_plan_item(
        &self,
        trip_id: &str,
        item_id: &str,
        body: &CreatePlanItemRequest,
    ) -> Result<(), ApiError> {
        let path = plan_item_path(trip_id, item_id);
        self.send_without_body(
            self.client.patch(self.endpoint(&path)?).json(body),
            "PATCH /trips/:id/plan-items/:item_id",
        )
        .await
    }
}

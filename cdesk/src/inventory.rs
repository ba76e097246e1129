//! Hotel inventory backend trait and reqwest-based HTTP client.

use ccommon::BoxFuture;
use reqwest::Client;

use crate::error::InventoryError;
use crate::types::{BookingConfirmation, CreateBookingRequest, Room};

pub trait InventoryApi: Send + Sync {
    fn list_rooms<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Room>, InventoryError>>;

    fn create_booking<'a>(
        &'a self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'a, Result<BookingConfirmation, InventoryError>>;
}

#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://bot9assignement.deno.dev".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl InventoryApi for HttpInventoryClient {
    fn list_rooms<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Room>, InventoryError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.endpoint("rooms"))
                .send()
                .await
                .map_err(|err| InventoryError::transport(err.to_string()))?;

            if !response.status().is_success() {
                return Err(InventoryError::status(format!(
                    "room listing failed with status {}",
                    response.status()
                )));
            }

            response
                .json::<Vec<Room>>()
                .await
                .map_err(|err| InventoryError::decode(err.to_string()))
        })
    }

    fn create_booking<'a>(
        &'a self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'a, Result<BookingConfirmation, InventoryError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint("book"))
                .json(&request)
                .send()
                .await
                .map_err(|err| InventoryError::transport(err.to_string()))?;

            if !response.status().is_success() {
                return Err(InventoryError::status(format!(
                    "booking request failed with status {}",
                    response.status()
                )));
            }

            response
                .json::<BookingConfirmation>()
                .await
                .map_err(|err| InventoryError::decode(err.to_string()))
        })
    }
}

//! Resource fetchers for the upstream parking REST API.
//!
//! One GET per call, no retries, no caching; every failure (connect error,
//! non-success status, invalid JSON body) surfaces as `AppError::Transport`
//! and aborts the query that needed the collection.

use serde::de::DeserializeOwned;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{
    Client, PaymentDetail, RateType, Section, Space, Ticket, Vehicle, VehicleType,
};

#[derive(Clone)]
pub struct ParkingApi {
    client: reqwest::Client,
    base_url: String,
}

impl ParkingApi {
    /// `base_url` comes from configuration, read once at startup.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("{} GET {}", API_NAME, url);
        let response = self.client.get(&url).send().await?;
        let body = response.error_for_status()?.json::<T>().await?;
        Ok(body)
    }

    pub async fn clients(&self) -> Result<Vec<Client>, AppError> {
        self.get_json("clientes").await
    }

    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        self.get_json("vehiculos").await
    }

    pub async fn vehicle_by_id(&self, id: &str) -> Result<Vehicle, AppError> {
        self.get_json(&format!("vehiculos/{id}")).await
    }

    pub async fn vehicle_types(&self) -> Result<Vec<VehicleType>, AppError> {
        self.get_json("tipo-vehiculo").await
    }

    pub async fn vehicle_type_by_id(&self, id: &str) -> Result<VehicleType, AppError> {
        self.get_json(&format!("tipo-vehiculo/{id}")).await
    }

    pub async fn rate_types(&self) -> Result<Vec<RateType>, AppError> {
        self.get_json("tipo-tarifa").await
    }

    pub async fn spaces(&self) -> Result<Vec<Space>, AppError> {
        self.get_json("espacios").await
    }

    pub async fn sections(&self) -> Result<Vec<Section>, AppError> {
        self.get_json("secciones").await
    }

    pub async fn tickets(&self) -> Result<Vec<Ticket>, AppError> {
        self.get_json("tickets").await
    }

    pub async fn payment_details(&self) -> Result<Vec<PaymentDetail>, AppError> {
        self.get_json("detalle-pago").await
    }
}

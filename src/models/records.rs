//! Raw records as the upstream REST API returns them.
//!
//! Field names on the wire are the upstream's Spanish camelCase names; the
//! structs expose them under the gateway's own names via serde renames.
//! Timestamps stay raw strings here so that an unparseable value surfaces as
//! a `MalformedRecord` error in the layer that actually reads it, not as a
//! deserialization failure that poisons the whole collection.

use serde::{Deserialize, Serialize};

/// A record that carries the upstream's opaque string identifier.
/// Identifiers are comparison-only; the gateway never interprets them.
pub trait Keyed {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "clienteId")]
    pub client_id: String,
    #[serde(rename = "tipoVehiculoId")]
    pub vehicle_type_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipoTarifaId")]
    pub rate_type_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateType {
    pub id: String,
    #[serde(rename = "tipoTarifa")]
    pub rate_type_name: String,
    #[serde(rename = "precioHora")]
    pub hourly_price: f64,
    #[serde(rename = "precioDia")]
    pub daily_price: f64,
}

/// `occupied` maps the wire's `estado` flag; `true` means the space is taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "estado")]
    pub occupied: bool,
    #[serde(rename = "seccionId")]
    pub section_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "letraSeccion")]
    pub section_letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    #[serde(rename = "fechaIngreso")]
    pub entry_time: String,
    #[serde(rename = "fechaSalida")]
    pub exit_time: Option<String>,
    #[serde(rename = "vehiculoId")]
    pub vehicle_id: String,
    #[serde(rename = "espacioId")]
    pub space_id: String,
    // Absent while the vehicle is still parked.
    #[serde(rename = "detallePagoId")]
    pub payment_detail_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub id: String,
    #[serde(rename = "metodo")]
    pub method: String,
    #[serde(rename = "fechaPago")]
    pub payment_date: String,
    #[serde(rename = "pagoTotal")]
    pub total_paid: f64,
}

macro_rules! impl_keyed {
    ($($record:ty),+ $(,)?) => {
        $(impl Keyed for $record {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

impl_keyed!(
    Vehicle,
    Client,
    VehicleType,
    RateType,
    Space,
    Section,
    Ticket,
    PaymentDetail,
);

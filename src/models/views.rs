//! Composite output objects served by the GraphQL schema.
//!
//! Every view is built by an explicit constructor that names each field it
//! reads and writes, so a record shape change fails at the call site instead
//! of surfacing during serialization. A nested view is either fully present
//! or absent; there is no partially populated variant.

use async_graphql::SimpleObject;
use chrono::NaiveDateTime;

use crate::models::records::{Client, PaymentDetail, RateType, Space};

/// Brief vehicle listing row. Tolerant denormalization: `client_name` and
/// `category` hold the placeholder value when the foreign key did not resolve.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct VehicleSummary {
    pub id: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub client_name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ClientView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientView {
    pub fn from_record(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct RateTypeView {
    pub id: String,
    pub rate_type_name: String,
    pub hourly_price: f64,
    pub daily_price: f64,
}

impl RateTypeView {
    pub fn from_record(rate: &RateType) -> Self {
        Self {
            id: rate.id.clone(),
            rate_type_name: rate.rate_type_name.clone(),
            hourly_price: rate.hourly_price,
            daily_price: rate.daily_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct VehicleTypeFull {
    pub id: String,
    pub category: String,
    pub description: String,
    pub rate: RateTypeView,
}

/// Fully denormalized vehicle graph. Built only by strict assembly; every
/// reference resolved or the whole operation failed.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct VehicleFull {
    pub id: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub client: ClientView,
    pub vehicle_type: VehicleTypeFull,
}

/// `state` is the human-readable occupancy label. Canonical mapping: the
/// upstream `estado == true` means the space is occupied.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct SpaceView {
    pub id: String,
    pub number: String,
    pub state: String,
}

impl SpaceView {
    pub fn from_record(space: &Space) -> Self {
        Self {
            id: space.id.clone(),
            number: space.number.clone(),
            state: if space.occupied {
                "Occupied".to_string()
            } else {
                "Available".to_string()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct SectionOccupancy {
    pub section_letter: String,
    pub spaces: Vec<SpaceView>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct PaymentDetailView {
    pub id: String,
    pub method: String,
    pub payment_date: String,
    pub total_paid: f64,
}

impl PaymentDetailView {
    pub fn from_record(payment: &PaymentDetail) -> Self {
        Self {
            id: payment.id.clone(),
            method: payment.method.clone(),
            payment_date: payment.payment_date.clone(),
            total_paid: payment.total_paid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct TicketView {
    pub id: String,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    pub vehicle: VehicleSummary,
    pub space: SpaceView,
    pub payment_detail: Option<PaymentDetailView>,
}

/// Ticket re-packaged for the single-day report. `total` carries the day's
/// entry count and is identical on every entry of one response.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct DailyClientEntry {
    pub id: String,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    pub vehicle: VehicleSummary,
    pub total: i32,
}

/// A ticket dropped during bulk assembly, with the reference that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTicket {
    pub id: String,
    pub reason: String,
}

/// Bulk ticket assembly result: the assembled views plus a structured
/// account of every skipped ticket, kept separate from any log stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketBatch {
    pub items: Vec<TicketView>,
    pub skipped: Vec<SkippedTicket>,
}

impl TicketBatch {
    /// Number of tickets the batch started from, assembled and skipped alike.
    pub fn fetched(&self) -> usize {
        self.items.len() + self.skipped.len()
    }
}

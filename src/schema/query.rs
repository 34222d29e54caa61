//! Query root. Each resolver fetches the collections it needs (independent
//! fetches run concurrently), builds the indices, then hands off to the
//! filter and assembly engines. Nothing here outlives the request.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::constants::API_NAME;
use crate::models::{
    DailyClientEntry, PaymentDetailView, SectionOccupancy, SpaceView, TicketView, VehicleFull,
    VehicleSummary,
};
use crate::repository::ParkingApi;
use crate::service::{
    assemble_daily_entries, assemble_tickets, assemble_vehicles_full, build_index,
    filter_spaces_by_section_and_state, filter_tickets_by_date, summarize_vehicles,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Brief vehicle listing with tolerant denormalization of client name
    /// and vehicle-type category.
    async fn vehicles(&self, ctx: &Context<'_>) -> Result<Vec<VehicleSummary>> {
        let api = ctx.data_unchecked::<ParkingApi>();
        let (vehicles, clients, types) =
            tokio::try_join!(api.vehicles(), api.clients(), api.vehicle_types())
                .map_err(|e| e.extend())?;

        let clients = build_index(clients);
        let types = build_index(types);
        Ok(summarize_vehicles(&vehicles, &clients, &types))
    }

    /// Fully denormalized vehicle graph: client, vehicle type and rate. Fails
    /// the whole query if any reference does not resolve.
    async fn vehicles_full(&self, ctx: &Context<'_>) -> Result<Vec<VehicleFull>> {
        let api = ctx.data_unchecked::<ParkingApi>();
        let (vehicles, clients, types, rates) = tokio::try_join!(
            api.vehicles(),
            api.clients(),
            api.vehicle_types(),
            api.rate_types()
        )
        .map_err(|e| e.extend())?;

        let clients = build_index(clients);
        let types = build_index(types);
        let rates = build_index(rates);
        assemble_vehicles_full(&vehicles, &clients, &types, &rates).map_err(|e| e.extend())
    }

    async fn payment_details(&self, ctx: &Context<'_>) -> Result<Vec<PaymentDetailView>> {
        let api = ctx.data_unchecked::<ParkingApi>();
        let payments = api.payment_details().await.map_err(|e| e.extend())?;
        Ok(payments.iter().map(PaymentDetailView::from_record).collect())
    }

    /// Tickets entered on the given date (YYYY-MM-DD), each wrapped with its
    /// vehicle and the day's total entry count.
    async fn daily_clients(&self, ctx: &Context<'_>, date: String) -> Result<Vec<DailyClientEntry>> {
        let api = ctx.data_unchecked::<ParkingApi>();
        let (tickets, vehicles, clients, types) = tokio::try_join!(
            api.tickets(),
            api.vehicles(),
            api.clients(),
            api.vehicle_types()
        )
        .map_err(|e| e.extend())?;

        let vehicles = build_index(vehicles);
        let clients = build_index(clients);
        let types = build_index(types);
        let filtered = filter_tickets_by_date(tickets, &date, &vehicles).map_err(|e| e.extend())?;
        assemble_daily_entries(filtered, &vehicles, &clients, &types).map_err(|e| e.extend())
    }

    /// Spaces in the section with the given letter that match the requested
    /// occupancy state. An unknown letter yields an empty result.
    async fn section_occupancy(
        &self,
        ctx: &Context<'_>,
        section_letter: String,
        occupied: bool,
    ) -> Result<SectionOccupancy> {
        let api = ctx.data_unchecked::<ParkingApi>();
        let (sections, spaces) =
            tokio::try_join!(api.sections(), api.spaces()).map_err(|e| e.extend())?;

        let matched =
            filter_spaces_by_section_and_state(&sections, spaces, &section_letter, occupied);
        let spaces: Vec<SpaceView> = matched.iter().map(SpaceView::from_record).collect();
        let total = spaces.len() as i32;
        Ok(SectionOccupancy {
            section_letter,
            spaces,
            total,
        })
    }

    /// All tickets joined with vehicle, space and optional payment detail.
    /// Tickets with a dangling vehicle or space reference are skipped; skips
    /// are reported on the diagnostic channel, not as per-item errors.
    async fn tickets(&self, ctx: &Context<'_>) -> Result<Vec<TicketView>> {
        let api = ctx.data_unchecked::<ParkingApi>();
        let (tickets, vehicles, clients, types, spaces, payments) = tokio::try_join!(
            api.tickets(),
            api.vehicles(),
            api.clients(),
            api.vehicle_types(),
            api.spaces(),
            api.payment_details()
        )
        .map_err(|e| e.extend())?;

        let vehicles = build_index(vehicles);
        let clients = build_index(clients);
        let types = build_index(types);
        let spaces = build_index(spaces);
        let payments = build_index(payments);

        let batch = assemble_tickets(tickets, &vehicles, &clients, &types, &spaces, &payments)
            .map_err(|e| e.extend())?;

        for skip in &batch.skipped {
            tracing::warn!("{} Skipping ticket {}: {}", API_NAME, skip.id, skip.reason);
        }
        tracing::info!(
            "{} Assembled {} of {} tickets",
            API_NAME,
            batch.items.len(),
            batch.fetched()
        );
        Ok(batch.items)
    }
}

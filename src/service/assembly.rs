//! Join/assembly engine: turns raw collections plus their indices into the
//! composite views the schema serves.
//!
//! Two reference-resolution policies live here. Tolerant assembly (brief
//! vehicle listing) substitutes a placeholder for a dangling key so listing
//! survives referential drift in the upstream store. Strict assembly
//! (full-vehicle graph) fails the whole call on the first dangling key,
//! because the caller asked for a fully populated graph. Bulk ticket assembly
//! sits in between: a ticket with a dangling mandatory key is skipped and
//! accounted for in the returned batch, never silently dropped.

use std::collections::HashMap;

use crate::constants::UNKNOWN;
use crate::error::AppError;
use crate::models::{
    Client, ClientView, DailyClientEntry, PaymentDetail, PaymentDetailView, RateType,
    RateTypeView, SkippedTicket, Space, SpaceView, Ticket, TicketBatch, TicketView, Vehicle,
    VehicleFull, VehicleSummary, VehicleType, VehicleTypeFull,
};
use crate::service::filter::parse_timestamp;

/// Tolerant denormalization for one vehicle.
pub fn summarize_vehicle(
    vehicle: &Vehicle,
    clients: &HashMap<String, Client>,
    types: &HashMap<String, VehicleType>,
) -> VehicleSummary {
    VehicleSummary {
        id: vehicle.id.clone(),
        plate: vehicle.plate.clone(),
        brand: vehicle.brand.clone(),
        model: vehicle.model.clone(),
        client_name: clients
            .get(&vehicle.client_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        category: types
            .get(&vehicle.vehicle_type_id)
            .map(|t| t.category.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

pub fn summarize_vehicles(
    vehicles: &[Vehicle],
    clients: &HashMap<String, Client>,
    types: &HashMap<String, VehicleType>,
) -> Vec<VehicleSummary> {
    vehicles
        .iter()
        .map(|vehicle| summarize_vehicle(vehicle, clients, types))
        .collect()
}

/// Strict assembly of the full vehicle graph. Every foreign key must resolve;
/// a miss fails the whole call naming the vehicle and the dangling key.
pub fn assemble_vehicles_full(
    vehicles: &[Vehicle],
    clients: &HashMap<String, Client>,
    types: &HashMap<String, VehicleType>,
    rates: &HashMap<String, RateType>,
) -> Result<Vec<VehicleFull>, AppError> {
    vehicles
        .iter()
        .map(|vehicle| {
            let client =
                clients
                    .get(&vehicle.client_id)
                    .ok_or_else(|| AppError::MissingReference {
                        record_id: vehicle.id.clone(),
                        key: "clienteId",
                    })?;
            let vehicle_type =
                types
                    .get(&vehicle.vehicle_type_id)
                    .ok_or_else(|| AppError::MissingReference {
                        record_id: vehicle.id.clone(),
                        key: "tipoVehiculoId",
                    })?;
            let rate =
                rates
                    .get(&vehicle_type.rate_type_id)
                    .ok_or_else(|| AppError::MissingReference {
                        record_id: vehicle.id.clone(),
                        key: "tipoTarifaId",
                    })?;

            Ok(VehicleFull {
                id: vehicle.id.clone(),
                plate: vehicle.plate.clone(),
                brand: vehicle.brand.clone(),
                model: vehicle.model.clone(),
                client: ClientView::from_record(client),
                vehicle_type: VehicleTypeFull {
                    id: vehicle_type.id.clone(),
                    category: vehicle_type.category.clone(),
                    description: vehicle_type.description.clone(),
                    rate: RateTypeView::from_record(rate),
                },
            })
        })
        .collect()
}

/// Bulk ticket assembly. Vehicle and space are mandatory: a ticket whose key
/// misses either index is recorded in `skipped` and left out of `items`. The
/// payment detail is optional and resolves to `None` when unset or dangling.
/// Unparseable timestamps remain hard errors.
pub fn assemble_tickets(
    tickets: Vec<Ticket>,
    vehicles: &HashMap<String, Vehicle>,
    clients: &HashMap<String, Client>,
    types: &HashMap<String, VehicleType>,
    spaces: &HashMap<String, Space>,
    payments: &HashMap<String, PaymentDetail>,
) -> Result<TicketBatch, AppError> {
    let mut items = Vec::with_capacity(tickets.len());
    let mut skipped = Vec::new();

    for ticket in tickets {
        let Some(vehicle) = vehicles.get(&ticket.vehicle_id) else {
            skipped.push(SkippedTicket {
                reason: format!("vehiculoId '{}' did not resolve", ticket.vehicle_id),
                id: ticket.id,
            });
            continue;
        };
        let Some(space) = spaces.get(&ticket.space_id) else {
            skipped.push(SkippedTicket {
                reason: format!("espacioId '{}' did not resolve", ticket.space_id),
                id: ticket.id,
            });
            continue;
        };

        let entry_time = parse_timestamp(&ticket.id, "fechaIngreso", &ticket.entry_time)?;
        let exit_time = ticket
            .exit_time
            .as_deref()
            .map(|raw| parse_timestamp(&ticket.id, "fechaSalida", raw))
            .transpose()?;
        let payment_detail = ticket
            .payment_detail_id
            .as_ref()
            .and_then(|payment_id| payments.get(payment_id))
            .map(PaymentDetailView::from_record);

        items.push(TicketView {
            id: ticket.id.clone(),
            entry_time,
            exit_time,
            vehicle: summarize_vehicle(vehicle, clients, types),
            space: SpaceView::from_record(space),
            payment_detail,
        });
    }

    Ok(TicketBatch { items, skipped })
}

/// Wraps date-filtered tickets for the daily report. `total` is the filtered
/// set's size, computed once and stamped on every entry. The filter already
/// guarantees each vehicle resolves; a miss here means the caller passed an
/// index the tickets were not filtered against.
pub fn assemble_daily_entries(
    tickets: Vec<Ticket>,
    vehicles: &HashMap<String, Vehicle>,
    clients: &HashMap<String, Client>,
    types: &HashMap<String, VehicleType>,
) -> Result<Vec<DailyClientEntry>, AppError> {
    let total = tickets.len() as i32;
    tickets
        .into_iter()
        .map(|ticket| {
            let vehicle =
                vehicles
                    .get(&ticket.vehicle_id)
                    .ok_or_else(|| AppError::MissingReference {
                        record_id: ticket.id.clone(),
                        key: "vehiculoId",
                    })?;
            let entry_time = parse_timestamp(&ticket.id, "fechaIngreso", &ticket.entry_time)?;
            let exit_time = ticket
                .exit_time
                .as_deref()
                .map(|raw| parse_timestamp(&ticket.id, "fechaSalida", raw))
                .transpose()?;

            Ok(DailyClientEntry {
                id: ticket.id.clone(),
                entry_time,
                exit_time,
                vehicle: summarize_vehicle(vehicle, clients, types),
                total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::index::build_index;

    fn vehicle(id: &str, client_id: &str, type_id: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            plate: format!("PLT-{id}"),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            client_id: client_id.to_string(),
            vehicle_type_id: type_id.to_string(),
        }
    }

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: "555-0100".to_string(),
        }
    }

    fn vehicle_type(id: &str, category: &str, rate_type_id: &str) -> VehicleType {
        VehicleType {
            id: id.to_string(),
            category: category.to_string(),
            description: format!("{category} vehicles"),
            rate_type_id: rate_type_id.to_string(),
        }
    }

    fn rate_type(id: &str) -> RateType {
        RateType {
            id: id.to_string(),
            rate_type_name: "standard".to_string(),
            hourly_price: 2.5,
            daily_price: 20.0,
        }
    }

    fn space(id: &str, occupied: bool) -> Space {
        Space {
            id: id.to_string(),
            number: "1".to_string(),
            occupied,
            section_id: "S1".to_string(),
        }
    }

    fn ticket(id: &str, vehicle_id: &str, space_id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            entry_time: "2024-01-05T08:00:00".to_string(),
            exit_time: None,
            vehicle_id: vehicle_id.to_string(),
            space_id: space_id.to_string(),
            payment_detail_id: None,
        }
    }

    fn payment(id: &str) -> PaymentDetail {
        PaymentDetail {
            id: id.to_string(),
            method: "card".to_string(),
            payment_date: "2024-01-05".to_string(),
            total_paid: 12.5,
        }
    }

    #[test]
    fn brief_listing_substitutes_unknown_for_dangling_keys() {
        let vehicles = vec![vehicle("v-1", "c-missing", "t-missing")];
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);

        let summaries = summarize_vehicles(&vehicles, &clients, &types);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].client_name, "Unknown");
        assert_eq!(summaries[0].category, "Unknown");
    }

    #[test]
    fn brief_listing_resolves_present_keys() {
        let vehicles = vec![vehicle("v-1", "c-1", "t-1")];
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);

        let summaries = summarize_vehicles(&vehicles, &clients, &types);
        assert_eq!(summaries[0].client_name, "Ana");
        assert_eq!(summaries[0].category, "Car");
    }

    #[test]
    fn strict_assembly_fails_on_missing_vehicle_type() {
        let vehicles = vec![vehicle("v-1", "c-1", "t-missing")];
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);
        let rates = build_index(vec![rate_type("r-1")]);

        let result = assemble_vehicles_full(&vehicles, &clients, &types, &rates);
        match result {
            Err(AppError::MissingReference { record_id, key }) => {
                assert_eq!(record_id, "v-1");
                assert_eq!(key, "tipoVehiculoId");
            }
            other => panic!("expected MissingReference, got {other:?}"),
        }
    }

    #[test]
    fn strict_assembly_fails_on_missing_rate_type() {
        let vehicles = vec![vehicle("v-1", "c-1", "t-1")];
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-missing")]);
        let rates = build_index(vec![rate_type("r-1")]);

        let result = assemble_vehicles_full(&vehicles, &clients, &types, &rates);
        match result {
            Err(AppError::MissingReference { record_id, key }) => {
                assert_eq!(record_id, "v-1");
                assert_eq!(key, "tipoTarifaId");
            }
            other => panic!("expected MissingReference, got {other:?}"),
        }
    }

    #[test]
    fn strict_assembly_resolves_the_whole_graph() {
        let vehicles = vec![vehicle("v-1", "c-1", "t-1")];
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);
        let rates = build_index(vec![rate_type("r-1")]);

        let full = assemble_vehicles_full(&vehicles, &clients, &types, &rates).unwrap();
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].client.name, "Ana");
        assert_eq!(full[0].vehicle_type.category, "Car");
        assert_eq!(full[0].vehicle_type.rate.hourly_price, 2.5);
    }

    #[test]
    fn ticket_with_dangling_space_is_skipped_and_accounted_for() {
        let vehicles = build_index(vec![vehicle("v-1", "c-1", "t-1")]);
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);
        let spaces = build_index(vec![space("p-1", true)]);
        let payments = build_index(Vec::<PaymentDetail>::new());

        let tickets = vec![
            ticket("tk-1", "v-1", "p-1"),
            ticket("tk-2", "v-1", "p-1"),
            ticket("tk-3", "v-1", "p-missing"),
            ticket("tk-4", "v-1", "p-1"),
            ticket("tk-5", "v-1", "p-1"),
        ];
        let batch =
            assemble_tickets(tickets, &vehicles, &clients, &types, &spaces, &payments).unwrap();

        assert_eq!(batch.items.len(), 4);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.fetched(), 5);
        assert_eq!(batch.skipped[0].id, "tk-3");
        assert!(batch.skipped[0].reason.contains("espacioId"));
    }

    #[test]
    fn ticket_with_dangling_vehicle_is_skipped() {
        let vehicles = build_index(vec![vehicle("v-1", "c-1", "t-1")]);
        let clients = build_index(Vec::<Client>::new());
        let types = build_index(Vec::<VehicleType>::new());
        let spaces = build_index(vec![space("p-1", true)]);
        let payments = build_index(Vec::<PaymentDetail>::new());

        let tickets = vec![ticket("tk-1", "v-missing", "p-1")];
        let batch =
            assemble_tickets(tickets, &vehicles, &clients, &types, &spaces, &payments).unwrap();

        assert!(batch.items.is_empty());
        assert_eq!(batch.skipped[0].id, "tk-1");
        assert!(batch.skipped[0].reason.contains("vehiculoId"));
    }

    #[test]
    fn unresolved_payment_detail_resolves_to_none() {
        let vehicles = build_index(vec![vehicle("v-1", "c-1", "t-1")]);
        let clients = build_index(Vec::<Client>::new());
        let types = build_index(Vec::<VehicleType>::new());
        let spaces = build_index(vec![space("p-1", true)]);
        let payments = build_index(vec![payment("pay-1")]);

        let mut unresolved = ticket("tk-1", "v-1", "p-1");
        unresolved.payment_detail_id = Some("pay-missing".to_string());
        let mut resolved = ticket("tk-2", "v-1", "p-1");
        resolved.payment_detail_id = Some("pay-1".to_string());

        let batch = assemble_tickets(
            vec![unresolved, resolved],
            &vehicles,
            &clients,
            &types,
            &spaces,
            &payments,
        )
        .unwrap();

        assert_eq!(batch.items.len(), 2);
        assert!(batch.items[0].payment_detail.is_none());
        assert_eq!(batch.items[1].payment_detail.as_ref().unwrap().id, "pay-1");
    }

    #[test]
    fn malformed_exit_timestamp_is_a_hard_error() {
        let vehicles = build_index(vec![vehicle("v-1", "c-1", "t-1")]);
        let clients = build_index(Vec::<Client>::new());
        let types = build_index(Vec::<VehicleType>::new());
        let spaces = build_index(vec![space("p-1", true)]);
        let payments = build_index(Vec::<PaymentDetail>::new());

        let mut bad = ticket("tk-1", "v-1", "p-1");
        bad.exit_time = Some("later".to_string());
        let result = assemble_tickets(vec![bad], &vehicles, &clients, &types, &spaces, &payments);
        assert!(matches!(result, Err(AppError::MalformedRecord { .. })));
    }

    #[test]
    fn daily_entries_stamp_the_same_total_on_every_entry() {
        let vehicles = build_index(vec![vehicle("v-1", "c-1", "t-1")]);
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);

        let tickets = vec![
            ticket("tk-1", "v-1", "p-1"),
            ticket("tk-2", "v-1", "p-1"),
            ticket("tk-3", "v-1", "p-1"),
        ];
        let entries = assemble_daily_entries(tickets, &vehicles, &clients, &types).unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.total == 3));
    }

    #[test]
    fn daily_entries_empty_input_yields_empty_output() {
        let vehicles = build_index(Vec::<Vehicle>::new());
        let clients = build_index(Vec::<Client>::new());
        let types = build_index(Vec::<VehicleType>::new());

        let entries = assemble_daily_entries(vec![], &vehicles, &clients, &types).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn assembly_is_idempotent_over_identical_inputs() {
        let vehicles = build_index(vec![vehicle("v-1", "c-1", "t-1")]);
        let clients = build_index(vec![client("c-1", "Ana")]);
        let types = build_index(vec![vehicle_type("t-1", "Car", "r-1")]);
        let spaces = build_index(vec![space("p-1", true)]);
        let payments = build_index(vec![payment("pay-1")]);

        let tickets = vec![ticket("tk-1", "v-1", "p-1"), ticket("tk-2", "v-missing", "p-1")];
        let first = assemble_tickets(
            tickets.clone(),
            &vehicles,
            &clients,
            &types,
            &spaces,
            &payments,
        )
        .unwrap();
        let second =
            assemble_tickets(tickets, &vehicles, &clients, &types, &spaces, &payments).unwrap();

        assert_eq!(first, second);
    }
}

pub mod records;
pub mod views;

pub use records::{
    Client, Keyed, PaymentDetail, RateType, Section, Space, Ticket, Vehicle, VehicleType,
};
pub use views::{
    ClientView, DailyClientEntry, PaymentDetailView, RateTypeView, SectionOccupancy, SkippedTicket,
    SpaceView, TicketBatch, TicketView, VehicleFull, VehicleSummary, VehicleTypeFull,
};

pub mod assembly;
pub mod filter;
pub mod index;

pub use assembly::{
    assemble_daily_entries, assemble_tickets, assemble_vehicles_full, summarize_vehicle,
    summarize_vehicles,
};
pub use filter::{filter_spaces_by_section_and_state, filter_tickets_by_date, parse_timestamp};
pub use index::build_index;

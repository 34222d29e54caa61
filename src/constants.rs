pub const API_NAME: &str = "[Parking Gateway]";

/// Placeholder used by tolerant denormalization when a foreign key
/// does not resolve in the fetched index.
pub const UNKNOWN: &str = "Unknown";

//! Named axis-aligned regions used by the server's area rules
//! (no-spawn zones, protected facilities, explosion-safe areas).

mod region;

pub use region::{Zone, ZoneSet};

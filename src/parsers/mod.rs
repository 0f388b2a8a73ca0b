/// Decoding of upstream feeds into domain records
pub mod events;
pub mod forecast;
pub mod hp30;
pub mod regions;
pub mod rows;

pub use events::{group_by_event_id, parse_event, parse_events, recent_events};
pub use forecast::{parse_forecast, OpenMeteoResponse};
pub use hp30::parse_hp30;
pub use rows::decode_rows;
pub use regions::{
    active_regions, group_by_region, latest_observations, latest_snapshot, normalize,
    normalize_all,
};

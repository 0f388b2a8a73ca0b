/// Positional astronomy: pure functions of time and place
pub mod daylight;
pub mod heliographic;
pub mod julian;
pub mod moon;
pub mod projection;
pub mod subsolar;

pub use daylight::{
    altitude_scan, crossings, daylight_report, solar_altitude, solar_event_sequence,
};
pub use heliographic::{heliographic_parameters, heliographic_parameters_at};
pub use julian::julian_date;
pub use moon::moon_phase;
pub use projection::{ortho_circle, project, project_clamped};
pub use subsolar::{subsolar_point, terminator_phase};

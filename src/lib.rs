//! Space-weather and positional astronomy core.
//!
//! Pure functions for placing the Sun, its active regions and the day/night
//! terminator on a disk, plus decoders for the GFZ Hp30 nowcast and the
//! NOAA SWPC region and event feeds. The HTTP service in `main.rs` wires
//! these to their upstream sources.
pub mod astro;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod parsers;
pub mod routes;
pub mod services;
pub mod utils;

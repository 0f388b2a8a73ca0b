//! Normalization and grouping of SWPC daily region reports.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::{SolarRegionMetadata, SolarRegionObservation, SolarRegionObservationDto};
use crate::errors::ParseError;

/// Validates one feed row.
///
/// `Ok(None)` when latitude, longitude or location is missing, which is how
/// the feed marks spotless or far-side entries. A malformed `observed_date`
/// or `first_date` is an error: those columns are always well formed
/// upstream, so a bad value means the feed itself changed.
pub fn normalize(
    dto: &SolarRegionObservationDto,
) -> Result<Option<SolarRegionObservation>, ParseError> {
    let (Some(latitude), Some(longitude), Some(location)) =
        (dto.latitude, dto.longitude, dto.location.as_ref())
    else {
        debug!(
            "Region {} on {} has no position",
            dto.region, dto.observed_date
        );
        return Ok(None);
    };

    let observed_date = NaiveDate::parse_from_str(&dto.observed_date, "%Y-%m-%d").map_err(
        |source| ParseError::InvalidDate {
            value: dto.observed_date.clone(),
            source,
        },
    )?;
    let first_date = dto
        .first_date
        .parse::<NaiveDateTime>()
        .map_err(|source| ParseError::InvalidDateTime {
            value: dto.first_date.clone(),
            source,
        })?;

    Ok(Some(SolarRegionObservation {
        region: dto.region,
        observed_date,
        first_date,
        latitude,
        longitude,
        metadata: SolarRegionMetadata {
            location: location.clone(),
            carrington_longitude: dto.carrington_longitude,
            area: dto.area,
            spot_class: dto.spot_class.clone(),
            extent: dto.extent,
            number_spots: dto.number_spots,
            mag_class: dto.mag_class.clone(),
            mag_string: dto.mag_string.clone(),
            status: dto.status.clone(),
            c_xray_events: dto.c_xray_events,
            m_xray_events: dto.m_xray_events,
            x_xray_events: dto.x_xray_events,
            proton_events: dto.proton_events,
            c_flare_probability: dto.c_flare_probability,
            m_flare_probability: dto.m_flare_probability,
            x_flare_probability: dto.x_flare_probability,
            proton_probability: dto.proton_probability,
        },
    }))
}

/// Normalizes a whole feed, failing on the first malformed date.
pub fn normalize_all(
    dtos: &[SolarRegionObservationDto],
) -> Result<Vec<SolarRegionObservation>, ParseError> {
    dtos.iter()
        .filter_map(|dto| normalize(dto).transpose())
        .collect()
}

pub fn group_by_region(
    observations: Vec<SolarRegionObservation>,
) -> BTreeMap<i32, Vec<SolarRegionObservation>> {
    let mut grouped: BTreeMap<i32, Vec<SolarRegionObservation>> = BTreeMap::new();
    for observation in observations {
        grouped
            .entry(observation.region)
            .or_default()
            .push(observation);
    }
    grouped
}

/// The most recent observation of every region.
pub fn latest_observations(
    grouped: &BTreeMap<i32, Vec<SolarRegionObservation>>,
) -> Vec<&SolarRegionObservation> {
    grouped
        .values()
        .filter_map(|observations| observations.iter().max_by_key(|o| o.observed_date))
        .collect()
}

/// Regions to draw: each region's latest observation, skipping spotless ones.
pub fn active_regions(
    grouped: &BTreeMap<i32, Vec<SolarRegionObservation>>,
) -> Vec<&SolarRegionObservation> {
    latest_observations(grouped)
        .into_iter()
        .filter(|o| o.metadata.number_spots != 0)
        .collect()
}

/// Observations from the newest report day of the feed, grouped by region.
pub fn latest_snapshot(
    observations: Vec<SolarRegionObservation>,
) -> BTreeMap<i32, Vec<SolarRegionObservation>> {
    let Some(newest) = observations.iter().map(|o| o.observed_date).max() else {
        return BTreeMap::new();
    };
    group_by_region(
        observations
            .into_iter()
            .filter(|o| o.observed_date == newest)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(region: i32, observed_date: &str, number_spots: i32) -> SolarRegionObservationDto {
        serde_json::from_value(serde_json::json!({
            "observed_date": observed_date,
            "region": region,
            "latitude": -19,
            "longitude": -87,
            "location": "S19W87",
            "carrington_longitude": 348,
            "old_carrington_longitude": 349,
            "area": 1170,
            "spot_class": "Fkc",
            "extent": 24,
            "number_spots": number_spots,
            "mag_class": "BGD",
            "mag_string": null,
            "status": "f",
            "c_xray_events": 0,
            "m_xray_events": 5,
            "x_xray_events": 0,
            "proton_events": null,
            "s_flares": 6,
            "c_flare_probability": 99,
            "m_flare_probability": 75,
            "x_flare_probability": 40,
            "proton_probability": 99,
            "first_date": "2024-05-01T16:42:56"
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_copies_fields() {
        let observation = normalize(&dto(3664, "2024-05-13", 15)).unwrap().unwrap();
        assert_eq!(observation.region, 3664);
        assert_eq!(observation.latitude, -19);
        assert_eq!(observation.longitude, -87);
        assert_eq!(
            observation.observed_date,
            NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
        );
        assert_eq!(observation.metadata.area, 1170);
        assert_eq!(observation.metadata.location, "S19W87");
        assert_eq!(observation.metadata.spot_class.as_deref(), Some("Fkc"));
        assert_eq!(observation.metadata.m_xray_events, 5);
        assert_eq!(observation.metadata.x_flare_probability, 40);
        assert_eq!(observation.metadata.proton_events, None);
        assert_eq!(observation.metadata.proton_probability, Some(99));
    }

    #[test]
    fn test_missing_position_is_dropped() {
        let mut d = dto(3664, "2024-05-13", 15);
        d.latitude = None;
        assert!(normalize(&d).unwrap().is_none());

        let mut d = dto(3664, "2024-05-13", 15);
        d.location = None;
        assert!(normalize(&d).unwrap().is_none());
    }

    #[test]
    fn test_malformed_dates_are_errors() {
        let d = dto(3664, "13/05/2024", 15);
        assert!(matches!(
            normalize(&d),
            Err(ParseError::InvalidDate { .. })
        ));

        let mut d = dto(3664, "2024-05-13", 15);
        d.first_date = "soon".to_string();
        assert!(matches!(
            normalize(&d),
            Err(ParseError::InvalidDateTime { .. })
        ));
        assert!(normalize_all(&[dto(1, "2024-05-13", 1), d]).is_err());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let dtos = vec![
            dto(3664, "2024-05-12", 10),
            dto(3664, "2024-05-13", 15),
            dto(3665, "2024-05-13", 3),
        ];
        let a = group_by_region(normalize_all(&dtos).unwrap());
        let b = group_by_region(normalize_all(&dtos).unwrap());
        assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
        for (key, observations) in &a {
            assert_eq!(observations.len(), b[key].len());
            assert!(observations.iter().all(|o| b[key].contains(o)));
        }
    }

    #[test]
    fn test_active_regions_use_latest_observation() {
        let dtos = vec![
            dto(3664, "2024-05-12", 10),
            dto(3664, "2024-05-13", 15),
            dto(3665, "2024-05-11", 4),
            dto(3665, "2024-05-12", 0),
        ];
        let grouped = group_by_region(normalize_all(&dtos).unwrap());

        let latest = latest_observations(&grouped);
        assert_eq!(latest.len(), 2);

        let active = active_regions(&grouped);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].region, 3664);
        assert_eq!(active[0].metadata.number_spots, 15);
    }

    #[test]
    fn test_latest_snapshot() {
        let dtos = vec![
            dto(3664, "2024-05-12", 10),
            dto(3664, "2024-05-13", 15),
            dto(3665, "2024-05-12", 4),
        ];
        let snapshot = latest_snapshot(normalize_all(&dtos).unwrap());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&3664].len(), 1);
        assert!(latest_snapshot(Vec::new()).is_empty());
    }
}

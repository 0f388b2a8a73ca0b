//! Classification of SWPC event rows into typed observations.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::debug;

use crate::domain::{
    EventHeader, FixedRadioBurstEvent, FlareBrightness, FlareCharacteristic, FlareEvent,
    FrequencyRange, GenericSolarEvent, RadioBurstType, SolarEventObservation,
    SolarEventObservationDto, SolarEventType, SolarObservatory, SweptRadioBurstEvent, XrayEvent,
};

/// Feed timestamps are naive UTC, e.g. `2024-05-28T06:38:00`.
fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    value.parse::<NaiveDateTime>().ok().map(|dt| dt.and_utc())
}

/// Optional timestamp column: blank means absent, garbage rejects the row.
fn optional_datetime(value: Option<&str>) -> Result<Option<DateTime<Utc>>, ()> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_datetime(v).map(Some).ok_or(()),
    }
}

fn header(dto: &SolarEventObservationDto) -> Option<EventHeader> {
    let Some(event_type) = SolarEventType::from_code(&dto.event_type) else {
        debug!("Unknown event type: {}", dto.event_type);
        return None;
    };
    let Some(observatory) = SolarObservatory::from_code(&dto.observatory) else {
        debug!("Unknown observatory: {}", dto.observatory);
        return None;
    };

    let Some(begin) = dto.begin_datetime.as_deref().and_then(parse_datetime) else {
        debug!("Event {} has no usable begin time", dto.bin);
        return None;
    };
    let (Ok(max), Ok(end)) = (
        optional_datetime(dto.max_datetime.as_deref()),
        optional_datetime(dto.end_datetime.as_deref()),
    ) else {
        debug!("Event {} has a malformed max or end time", dto.bin);
        return None;
    };

    Some(EventHeader {
        region: dto.region,
        event_id: dto.bin,
        begin,
        begin_quality: dto.begin_quality.clone(),
        max,
        max_quality: dto.max_quality.clone(),
        end,
        end_quality: dto.end_quality.clone(),
        event_type,
        observatory,
        quality: dto.quality.clone(),
        status_code: dto.status_code,
        status_text: dto.status_text.clone(),
        change_flag: dto.change_flag,
    })
}

fn xray(header: EventHeader, dto: &SolarEventObservationDto) -> Option<XrayEvent> {
    Some(XrayEvent {
        header,
        frequency: dto.frequency.clone(),
        xray_class: dto.particulars1.clone()?,
    })
}

/// `2N` is importance 2, normal brightness.
fn flare(header: EventHeader, dto: &SolarEventObservationDto) -> Option<FlareEvent> {
    let code = dto.particulars1.as_deref()?;
    let mut chars = code.chars();
    let importance = chars.next()?;
    let brightness = FlareBrightness::from_code(chars.as_str())?;

    let characteristics = dto
        .particulars()
        .filter_map(FlareCharacteristic::from_code)
        .collect();

    Some(FlareEvent {
        header,
        location: dto.location.clone(),
        importance,
        brightness,
        characteristics,
    })
}

fn fixed_radio_burst(
    header: EventHeader,
    dto: &SolarEventObservationDto,
) -> Option<FixedRadioBurstEvent> {
    let frequency = dto.frequency.as_deref()?.trim().parse().ok()?;
    let max_brightness = dto.particulars1.as_deref()?.trim().parse().ok()?;

    Some(FixedRadioBurstEvent {
        header,
        frequency,
        max_brightness,
    })
}

/// Exactly two parts, so `80--5` or `II/2/3` are rejected.
fn split_pair(value: &str, separator: char) -> Option<[&str; 2]> {
    let mut parts = value.split(separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Some([first, second]),
        _ => None,
    }
}

/// `80-180` with `II/2` is a type II burst of intensity 2 sweeping 80..180 MHz.
fn swept_radio_burst(
    header: EventHeader,
    dto: &SolarEventObservationDto,
) -> Option<SweptRadioBurstEvent> {
    let [low, high] = split_pair(dto.frequency.as_deref()?, '-')?;
    let frequency_range = FrequencyRange {
        low: low.trim().parse().ok()?,
        high: high.trim().parse().ok()?,
    };

    let [burst_type, intensity] = split_pair(dto.particulars1.as_deref()?, '/')?;
    let burst_type = RadioBurstType::from_code(burst_type.trim())?;
    let intensity = intensity.trim().parse().ok()?;

    Some(SweptRadioBurstEvent {
        header,
        frequency_range,
        burst_type,
        intensity,
    })
}

/// Turns one feed row into a typed observation.
///
/// Returns `None`, logging why, when the type or observatory code is
/// unknown, the begin time is missing, or the variant's own fields do not
/// validate. A row is never partially populated.
pub fn parse_event(dto: &SolarEventObservationDto) -> Option<SolarEventObservation> {
    let header = header(dto)?;
    let event_type = header.event_type;

    let event = match event_type {
        SolarEventType::XRayEvent => xray(header, dto).map(SolarEventObservation::Xray),
        SolarEventType::OpticalFlare => flare(header, dto).map(SolarEventObservation::Flare),
        SolarEventType::FixedFrequencyRadioBurst => {
            fixed_radio_burst(header, dto).map(SolarEventObservation::FixedRadioBurst)
        }
        SolarEventType::SweepFrequencyRadioBurst => {
            swept_radio_burst(header, dto).map(SolarEventObservation::SweptRadioBurst)
        }
        SolarEventType::BrightSurge
        | SolarEventType::FilamentDisappearance
        | SolarEventType::EruptiveProminence
        | SolarEventType::Filament
        | SolarEventType::ForbushDecrease
        | SolarEventType::GroundLevelEvent
        | SolarEventType::LoopProminenceSystem
        | SolarEventType::PolarCapAbsorption
        | SolarEventType::RadioNoiseStorm
        | SolarEventType::Spray
        | SolarEventType::XRayFlare => {
            Some(SolarEventObservation::Generic(GenericSolarEvent { header }))
        }
    };

    if event.is_none() {
        debug!("Dropping malformed {} event {}", dto.event_type, dto.bin);
    }
    event
}

pub fn parse_events(dtos: &[SolarEventObservationDto]) -> Vec<SolarEventObservation> {
    dtos.iter().filter_map(parse_event).collect()
}

/// Events that began strictly after `now - window`.
pub fn recent_events(
    events: Vec<SolarEventObservation>,
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<SolarEventObservation> {
    let Some(cutoff) = now.checked_sub_signed(window) else {
        return events;
    };
    events.into_iter().filter(|e| e.begin() > cutoff).collect()
}

/// Multi-station reports of one event share its id.
pub fn group_by_event_id(
    events: Vec<SolarEventObservation>,
) -> BTreeMap<i32, Vec<SolarEventObservation>> {
    let mut grouped: BTreeMap<i32, Vec<SolarEventObservation>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.event_id()).or_default().push(event);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dto(event_type: &str) -> SolarEventObservationDto {
        serde_json::from_value(serde_json::json!({
            "begin_datetime": "2024-05-28T06:38:00",
            "begin_quality": "",
            "max_datetime": "2024-05-28T06:43:00",
            "max_quality": "",
            "end_datetime": "2024-05-28T06:48:00",
            "end_quality": "",
            "observatory": "G16",
            "quality": "5",
            "type": event_type,
            "coded_type": 1,
            "obsid": 0,
            "location": "",
            "frequency": "1-8A",
            "particulars1": "C4.1",
            "particulars2": "1.4E-03",
            "particulars3": null,
            "particulars10": "4.1E-06",
            "region": 3697,
            "bin": 7000,
            "age": null,
            "status_code": 5,
            "status_text": "",
            "change_flag": 0
        }))
        .unwrap()
    }

    fn minimal(event_type: SolarEventType) -> SolarEventObservationDto {
        let mut d = dto(event_type.code());
        match event_type {
            SolarEventType::OpticalFlare => d.particulars1 = Some("2N".to_string()),
            SolarEventType::FixedFrequencyRadioBurst => {
                d.frequency = Some("245".to_string());
                d.particulars1 = Some("130".to_string());
            }
            SolarEventType::SweepFrequencyRadioBurst => {
                d.frequency = Some("25-180".to_string());
                d.particulars1 = Some("III/1".to_string());
            }
            _ => {}
        }
        d
    }

    #[test]
    fn test_xray_event() {
        let Some(SolarEventObservation::Xray(event)) = parse_event(&dto("XRA")) else {
            panic!("expected an x-ray event");
        };
        assert_eq!(event.xray_class, "C4.1");
        assert_eq!(event.frequency.as_deref(), Some("1-8A"));
        assert_eq!(event.header.region, Some(3697));
        assert_eq!(event.header.event_id, 7000);
        assert_eq!(event.header.observatory, SolarObservatory::Goes16);
        assert_eq!(
            event.header.begin,
            Utc.with_ymd_and_hms(2024, 5, 28, 6, 38, 0).unwrap()
        );
    }

    #[test]
    fn test_every_type_code_is_classified() {
        assert_eq!(SolarEventType::ALL.len(), 15);
        for &event_type in SolarEventType::ALL {
            let event = parse_event(&minimal(event_type))
                .unwrap_or_else(|| panic!("{} was dropped", event_type.code()));
            assert_eq!(event.header().event_type, event_type);
            let dedicated = matches!(
                (event_type, &event),
                (SolarEventType::XRayEvent, SolarEventObservation::Xray(_))
                    | (SolarEventType::OpticalFlare, SolarEventObservation::Flare(_))
                    | (
                        SolarEventType::FixedFrequencyRadioBurst,
                        SolarEventObservation::FixedRadioBurst(_)
                    )
                    | (
                        SolarEventType::SweepFrequencyRadioBurst,
                        SolarEventObservation::SweptRadioBurst(_)
                    )
            );
            assert!(dedicated || matches!(event, SolarEventObservation::Generic(_)));
        }
    }

    #[test]
    fn test_unknown_codes_are_dropped() {
        assert!(parse_event(&dto("ZZZ")).is_none());
        let mut d = dto("XRA");
        d.observatory = "XYZ".to_string();
        assert!(parse_event(&d).is_none());
    }

    #[test]
    fn test_swept_radio_burst() {
        let mut d = dto("RSP");
        d.frequency = Some("80-180".to_string());
        d.particulars1 = Some("II/2".to_string());
        let Some(SolarEventObservation::SweptRadioBurst(event)) = parse_event(&d) else {
            panic!("expected a swept radio burst");
        };
        assert_eq!(event.frequency_range, FrequencyRange { low: 80, high: 180 });
        assert_eq!(event.burst_type, RadioBurstType::II);
        assert_eq!(event.intensity, 2);

        d.particulars1 = Some("XX/2".to_string());
        assert!(parse_event(&d).is_none());
    }

    #[test]
    fn test_swept_radio_burst_bad_frequency() {
        let mut d = dto("RSP");
        d.particulars1 = Some("IV/1".to_string());
        d.frequency = Some("80".to_string());
        assert!(parse_event(&d).is_none());
        d.frequency = Some("80-x".to_string());
        assert!(parse_event(&d).is_none());
        d.frequency = Some("80--5".to_string());
        assert!(parse_event(&d).is_none());
        d.frequency = Some("-80-180".to_string());
        assert!(parse_event(&d).is_none());
        d.frequency = Some("80-180".to_string());
        assert!(parse_event(&d).is_some());
    }

    #[test]
    fn test_swept_radio_burst_extra_particular_parts() {
        let mut d = dto("RSP");
        d.frequency = Some("80-180".to_string());
        d.particulars1 = Some("II/2/3".to_string());
        assert!(parse_event(&d).is_none());
        d.particulars1 = Some("II".to_string());
        assert!(parse_event(&d).is_none());
    }

    #[test]
    fn test_flare_characteristics() {
        let mut d = dto("FLA");
        d.location = Some("S19W87".to_string());
        d.particulars1 = Some("SF".to_string());
        d.particulars2 = Some("ERU".to_string());
        d.particulars3 = Some("???".to_string());
        d.particulars4 = Some("DSF".to_string());
        let Some(SolarEventObservation::Flare(event)) = parse_event(&d) else {
            panic!("expected a flare");
        };
        assert_eq!(event.importance, 'S');
        assert_eq!(event.brightness, FlareBrightness::F);
        assert_eq!(
            event.characteristics,
            vec![
                FlareCharacteristic::EruptiveCenters,
                FlareCharacteristic::FilamentDisappearance
            ]
        );
        assert_eq!(event.location.as_deref(), Some("S19W87"));
    }

    #[test]
    fn test_flare_requires_brightness() {
        let mut d = dto("FLA");
        d.particulars1 = Some("2".to_string());
        assert!(parse_event(&d).is_none());
        d.particulars1 = Some("2Q".to_string());
        assert!(parse_event(&d).is_none());
    }

    #[test]
    fn test_fixed_radio_burst_requires_integers() {
        let mut d = dto("RBR");
        d.frequency = Some("2695".to_string());
        d.particulars1 = Some("abc".to_string());
        assert!(parse_event(&d).is_none());
        d.particulars1 = Some("56".to_string());
        let Some(SolarEventObservation::FixedRadioBurst(event)) = parse_event(&d) else {
            panic!("expected a fixed radio burst");
        };
        assert_eq!(event.frequency, 2695);
        assert_eq!(event.max_brightness, 56);
    }

    #[test]
    fn test_begin_is_mandatory() {
        let mut d = dto("XRA");
        d.begin_datetime = None;
        assert!(parse_event(&d).is_none());
    }

    #[test]
    fn test_optional_times() {
        let mut d = dto("XRA");
        d.max_datetime = None;
        d.end_datetime = Some(String::new());
        let event = parse_event(&d).unwrap();
        assert_eq!(event.header().max, None);
        assert_eq!(event.header().end, None);

        d.end_datetime = Some("yesterday".to_string());
        assert!(parse_event(&d).is_none());
    }

    #[test]
    fn test_group_by_event_id() {
        let mut second_station = dto("XRA");
        second_station.observatory = "G18".to_string();
        let mut other = dto("XRA");
        other.bin = 7001;
        let events = parse_events(&[dto("XRA"), second_station, other, dto("ZZZ")]);
        let grouped = group_by_event_id(events);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&7000].len(), 2);
        assert_eq!(grouped[&7001].len(), 1);
    }

    #[test]
    fn test_recent_events() {
        let events = parse_events(&[dto("XRA")]);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(recent_events(events.clone(), now, Duration::days(7)).len(), 1);
        let later = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        assert!(recent_events(events.clone(), later, Duration::days(7)).is_empty());
        assert_eq!(recent_events(events, later, Duration::MAX).len(), 1);
    }
}

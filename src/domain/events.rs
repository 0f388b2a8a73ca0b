use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw row of the SWPC `solar_events.json` feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SolarEventObservationDto {
    pub begin_datetime: Option<String>,
    pub begin_quality: Option<String>,
    pub max_datetime: Option<String>,
    pub max_quality: Option<String>,
    pub end_datetime: Option<String>,
    pub end_quality: Option<String>,
    pub observatory: String,
    pub quality: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub coded_type: i32,
    pub obsid: i32,
    pub location: Option<String>,
    pub frequency: Option<String>,
    pub particulars1: Option<String>,
    pub particulars2: Option<String>,
    pub particulars3: Option<String>,
    pub particulars4: Option<String>,
    pub particulars5: Option<String>,
    pub particulars6: Option<String>,
    pub particulars7: Option<String>,
    pub particulars8: Option<String>,
    pub particulars9: Option<String>,
    pub particulars10: Option<String>,
    pub region: Option<i32>,
    pub bin: i32,
    pub age: Option<String>,
    pub status_code: i32,
    pub status_text: Option<String>,
    pub change_flag: i32,
}

impl SolarEventObservationDto {
    /// All particulars columns that carry a value, in column order.
    pub fn particulars(&self) -> impl Iterator<Item = &str> {
        [
            &self.particulars1,
            &self.particulars2,
            &self.particulars3,
            &self.particulars4,
            &self.particulars5,
            &self.particulars6,
            &self.particulars7,
            &self.particulars8,
            &self.particulars9,
            &self.particulars10,
        ]
        .into_iter()
        .filter_map(|p| p.as_deref())
    }
}

macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $code:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

coded_enum! {
    /// NOAA event type codes.
    SolarEventType {
        BrightSurge => "BSL",
        FilamentDisappearance => "DSF",
        EruptiveProminence => "EPL",
        Filament => "FIL",
        OpticalFlare => "FLA",
        ForbushDecrease => "FOR",
        GroundLevelEvent => "GLE",
        LoopProminenceSystem => "LPS",
        PolarCapAbsorption => "PCA",
        FixedFrequencyRadioBurst => "RBR",
        RadioNoiseStorm => "RNS",
        SweepFrequencyRadioBurst => "RSP",
        Spray => "SPY",
        XRayFlare => "XFL",
        XRayEvent => "XRA",
    }
}

coded_enum! {
    /// Reporting ground stations and GOES satellites.
    SolarObservatory {
        Culgoora => "CUL",
        Holloman => "HOL",
        Palehua => "PAL",
        Learmonth => "LEA",
        Ramey => "RAM",
        SagamoreHill => "SAG",
        SanVito => "SVI",
        Goes13 => "G13",
        Goes14 => "G14",
        Goes15 => "G15",
        Goes16 => "G16",
        Goes17 => "G17",
        Goes18 => "G18",
        Goes19 => "G19",
    }
}

/// Relative H-alpha brightness at flare maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlareBrightness {
    /// faint
    F,
    /// normal
    N,
    /// brilliant
    B,
}

impl FlareBrightness {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" => Some(FlareBrightness::F),
            "N" => Some(FlareBrightness::N),
            "B" => Some(FlareBrightness::B),
            _ => None,
        }
    }
}

coded_enum! {
    /// Optional remarks attached to an optical flare report.
    FlareCharacteristic {
        VisibleInWhiteLight => "VWL",
        UmbralCoverage => "UMB",
        ParallelRibbon => "PRB",
        LoopProminence => "LPS",
        YShapedRibbon => "YSR",
        EruptiveCenters => "ERU",
        BrilliantPoints => "BPT",
        HighSpeedSurge => "HSS",
        DarkSurgeOnDisk => "DSD",
        FilamentDisappearance => "DSF",
        BlueWingEmission => "BLU",
    }
}

coded_enum! {
    /// Spectral classes of swept-frequency radio bursts.
    RadioBurstType {
        /// slow drift
        II => "II",
        /// fast drift
        III => "III",
        /// broadband smooth continuum
        IV => "IV",
        /// brief continuum following type III
        V => "V",
        /// series of type III over 10 minutes or more
        VI => "VI",
        /// series of type III and V over 10 minutes or more
        VII => "VII",
        /// broadband long-lived dekametric continuum
        CTM => "CTM",
    }
}

/// Fields shared by every event report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHeader {
    pub region: Option<i32>,
    pub event_id: i32,
    pub begin: DateTime<Utc>,
    pub begin_quality: Option<String>,
    pub max: Option<DateTime<Utc>>,
    pub max_quality: Option<String>,
    pub end: Option<DateTime<Utc>>,
    pub end_quality: Option<String>,
    pub event_type: SolarEventType,
    pub observatory: SolarObservatory,
    pub quality: Option<String>,
    pub status_code: i32,
    pub status_text: Option<String>,
    pub change_flag: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XrayEvent {
    #[serde(flatten)]
    pub header: EventHeader,
    pub frequency: Option<String>,
    /// GOES class, e.g. "C4.1"
    pub xray_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlareEvent {
    #[serde(flatten)]
    pub header: EventHeader,
    pub location: Option<String>,
    /// Corrected area class: S, 1, 2, 3 or 4
    pub importance: char,
    pub brightness: FlareBrightness,
    pub characteristics: Vec<FlareCharacteristic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedRadioBurstEvent {
    #[serde(flatten)]
    pub header: EventHeader,
    /// MHz
    pub frequency: i32,
    /// Peak above pre-burst background, solar flux units
    pub max_brightness: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyRange {
    pub low: i32,
    pub high: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweptRadioBurstEvent {
    #[serde(flatten)]
    pub header: EventHeader,
    /// MHz
    pub frequency_range: FrequencyRange,
    pub burst_type: RadioBurstType,
    /// 1 = minor, 2 = significant, 3 = major
    pub intensity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericSolarEvent {
    #[serde(flatten)]
    pub header: EventHeader,
}

/// A single station's report of a solar event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum SolarEventObservation {
    Xray(XrayEvent),
    Flare(FlareEvent),
    FixedRadioBurst(FixedRadioBurstEvent),
    SweptRadioBurst(SweptRadioBurstEvent),
    Generic(GenericSolarEvent),
}

impl SolarEventObservation {
    pub fn header(&self) -> &EventHeader {
        match self {
            SolarEventObservation::Xray(e) => &e.header,
            SolarEventObservation::Flare(e) => &e.header,
            SolarEventObservation::FixedRadioBurst(e) => &e.header,
            SolarEventObservation::SweptRadioBurst(e) => &e.header,
            SolarEventObservation::Generic(e) => &e.header,
        }
    }

    pub fn event_id(&self) -> i32 {
        self.header().event_id
    }

    pub fn begin(&self) -> DateTime<Utc> {
        self.header().begin
    }
}

//! Data types shared by the engine's components

mod types;

pub use types::{
    BrandGuess, DeviceIdentifier, IntakeReport, MismatchResult, ScanClassification, ScanKind,
    SuspicionReport, TacEntry, TacResolution,
};

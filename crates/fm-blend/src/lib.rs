//! fm-blend: ethanol/gasoline blending solver for fuelmix.
//!
//! Provides:
//! - Validated ethanol fractions and mixture states
//! - A catalog of named gasoline and ethanol grades
//! - The mixture solver (fill from empty, top-up, automatic fuel choice)
//! - Display-only rounding and report formatting
//! - A serde scenario schema compiled into solver inputs
//!
//! # Example
//!
//! ```
//! use fm_blend::{fill_from_empty, EthanolFraction};
//!
//! let target = EthanolFraction::from_percent(50.0).unwrap();
//! let gasoline = EthanolFraction::from_percent(27.0).unwrap();
//! let report = fill_from_empty(40.0, target, gasoline).unwrap();
//!
//! assert!(report.is_valid());
//! // ≈12.60 L of ethanol + ≈27.40 L of gasoline
//! assert!((report.additions[0].volume_l - 12.6027).abs() < 1e-3);
//! ```

pub mod display;
pub mod error;
pub mod fraction;
pub mod grade;
pub mod mixture;
pub mod scenario;
pub mod solver;

// Re-exports for ergonomics
pub use display::{format_percent, format_report, format_volume, round_to};
pub use error::{BlendError, BlendResult};
pub use fraction::EthanolFraction;
pub use grade::{
    ethanol_grades, filter_grades, find_ethanol_grade, find_gasoline_grade, find_grade,
    gasoline_grades, FuelGradeEntry,
};
pub use mixture::Mixture;
pub use scenario::{CompiledScenario, ScenarioDef};
pub use solver::{
    best_addition, fill_from_empty, top_up, Addition, BlendReport, FuelSource, InfeasibleKind,
    Verdict, FRACTION_BAND, FRACTION_EPS,
};

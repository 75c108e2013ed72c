//! Display-only formatting.
//!
//! Rounding happens here and nowhere else: the solver carries full
//! precision, presentation rounds volumes to 2 decimals and percentages
//! to 1.

use crate::fraction::EthanolFraction;
use crate::solver::{BlendReport, InfeasibleKind, Verdict};
use fm_core::VolumeUnit;

/// Round to a fixed number of decimals (presentation only).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let p = 10_f64.powi(decimals as i32);
    (value * p).round() / p
}

/// Format a liter quantity in the requested unit, 2 decimals.
pub fn format_volume(liters: f64, unit: VolumeUnit) -> String {
    format!("{:.2} {}", round_to(unit.from_liters(liters), 2), unit.label())
}

/// Format an ethanol fraction as a percentage, 1 decimal.
pub fn format_percent(fraction: EthanolFraction) -> String {
    format!("{:.1}%", round_to(fraction.as_percent(), 1))
}

/// Render a report as human-readable lines.
pub fn format_report(report: &BlendReport, unit: VolumeUnit) -> String {
    let mut out = String::new();

    match &report.verdict {
        Verdict::Valid => {
            for addition in &report.additions {
                out.push_str(&format!(
                    "Add {} of {} ({})\n",
                    format_volume(addition.volume_l, unit),
                    addition.source.label(),
                    format_percent(addition.fraction),
                ));
            }
            out.push_str(&format!(
                "Final: {} at {}\n",
                format_volume(report.final_state.volume_l(), unit),
                format_percent(report.final_state.ethanol_fraction()),
            ));
        }
        Verdict::Invalid { kind, reason } => {
            if *kind == InfeasibleKind::InfiniteVolume {
                out.push_str("Required volume: ∞\n");
            }
            out.push_str(&format!("Not feasible: {reason}\n"));
        }
    }

    out
}

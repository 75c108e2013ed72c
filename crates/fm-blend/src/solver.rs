//! Closed-form mixture-ratio solver.
//!
//! Three solve modes over the same mass-balance arithmetic:
//! - [`fill_from_empty`]: compose a final volume from pure ethanol plus a
//!   gasoline grade (two-source linear system);
//! - [`top_up`]: add one fuel to an existing mixture to hit a target
//!   fraction (single unknown);
//! - [`best_addition`]: run [`top_up`] for both candidate fuels and keep
//!   the cheaper one.
//!
//! All modes are pure functions. Infeasible scenarios come back as
//! `Verdict::Invalid` with an actionable reason; `Err` is reserved for
//! input the solver refuses to run on (non-finite volumes).

use crate::error::{BlendError, BlendResult};
use crate::fraction::EthanolFraction;
use crate::grade::FuelGradeEntry;
use crate::mixture::Mixture;
use fm_core::{clamp, nearly_equal, Tolerances};
use serde::Serialize;
use tracing::debug;

/// Near-zero / equality tolerance in fraction space.
pub const FRACTION_EPS: f64 = 1e-9;

/// Sanity band for the computed final fraction around `[min(Ec,Ea), max(Ec,Ea)]`.
pub const FRACTION_BAND: f64 = 1e-6;

// Fraction-space comparisons are pure absolute-difference checks.
const FRACTION_TOL: Tolerances = Tolerances {
    abs: FRACTION_EPS,
    rel: 0.0,
};

fn fraction_eq(a: f64, b: f64) -> bool {
    nearly_equal(a, b, FRACTION_TOL)
}

/// Which liquid an addition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelSource {
    Ethanol,
    Gasoline,
}

impl FuelSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ethanol => "ethanol",
            Self::Gasoline => "gasoline",
        }
    }
}

/// One required addition: pour `volume_l` of a fuel at `fraction`.
/// Volumes are always >= 0; an unreachable target never surfaces as a
/// negative addition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Addition {
    pub source: FuelSource,
    pub fraction: EthanolFraction,
    pub volume_l: f64,
}

/// Why a scenario is infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasibleKind {
    /// No final volume to compose (fill requested with zero total).
    NoFinalVolume,
    /// Nothing in the tank to top up.
    EmptyTank,
    /// Target below the minimum the chosen gasoline allows.
    TargetBelowFloor,
    /// The chosen additive moves the fraction away from the target.
    WrongDirection,
    /// Target equals the additive's own fraction: reaching it would take
    /// infinite volume. Explicit marker; no numeric addition accompanies it.
    InfiniteVolume,
    /// Target beyond what the additive can ever reach.
    Unreachable,
    /// Computed final fraction fell outside the attainable band.
    ConservationViolated,
}

/// Feasibility verdict for a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid { kind: InfeasibleKind, reason: String },
}

/// Solve result: required additions, resulting mixture, and verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendReport {
    pub additions: Vec<Addition>,
    pub final_state: Mixture,
    pub verdict: Verdict,
}

impl BlendReport {
    pub fn is_valid(&self) -> bool {
        matches!(self.verdict, Verdict::Valid)
    }

    /// Reason string when invalid.
    pub fn reason(&self) -> Option<&str> {
        match &self.verdict {
            Verdict::Valid => None,
            Verdict::Invalid { reason, .. } => Some(reason),
        }
    }

    /// Total volume to add across all sources, in liters.
    pub fn total_addition_l(&self) -> f64 {
        self.additions.iter().map(|a| a.volume_l).sum()
    }

    fn valid(additions: Vec<Addition>, final_state: Mixture) -> Self {
        Self {
            additions,
            final_state,
            verdict: Verdict::Valid,
        }
    }

    fn invalid(
        additions: Vec<Addition>,
        final_state: Mixture,
        kind: InfeasibleKind,
        reason: String,
    ) -> Self {
        Self {
            additions,
            final_state,
            verdict: Verdict::Invalid { kind, reason },
        }
    }
}

/// Compose `total_l` liters at `target` from pure ethanol (E100) plus a
/// gasoline grade at `gasoline` ethanol content, starting from an empty
/// tank.
///
/// System: `x + y = T`, `(x + Eg·y)/T = Et`, so
/// `x = T·(Et − Eg)/(1 − Eg)` and `y = T − x`.
pub fn fill_from_empty(
    total_l: f64,
    target: EthanolFraction,
    gasoline: EthanolFraction,
) -> BlendResult<BlendReport> {
    if !total_l.is_finite() {
        return Err(BlendError::NonFinite { what: "final volume" });
    }

    let t = total_l;
    let et = target.value();
    let eg = gasoline.value();

    if t <= 0.0 {
        return Ok(BlendReport::invalid(
            zero_additions(gasoline),
            Mixture::empty(target),
            InfeasibleKind::NoFinalVolume,
            "No final volume specified.".to_string(),
        ));
    }

    let denom = 1.0 - eg;
    if fraction_eq(eg, 1.0) {
        // Degenerate gasoline that is itself pure ethanol: split directly.
        debug!(total_l = t, "fill_from_empty: degenerate gasoline (Eg = 1)");
        let x = t * et;
        let y = t * (1.0 - et);
        return Ok(BlendReport::valid(
            additions_pair(x, y, gasoline),
            Mixture::new_unchecked(t, target),
        ));
    }

    if et < eg - FRACTION_EPS {
        // Achievable range with this gasoline is [Eg, 1].
        let floor_pct = eg * 100.0;
        return Ok(BlendReport::invalid(
            zero_additions(gasoline),
            Mixture::new_unchecked(t, gasoline),
            InfeasibleKind::TargetBelowFloor,
            format!(
                "With the selected gasoline (≈E{floor_pct:.0}), the minimum achievable is \
                 E{floor_pct:.0}. For less, use E0 gasoline."
            ),
        ));
    }

    let x = clamp(t * (et - eg) / denom, 0.0, t);
    let y = clamp(t - x, 0.0, t);
    debug!(
        total_l = t,
        ethanol_l = x,
        gasoline_l = y,
        "fill_from_empty: solved"
    );

    Ok(BlendReport::valid(
        additions_pair(x, y, gasoline),
        Mixture::new_unchecked(t, target),
    ))
}

/// Add a single fuel (`additive` content, labeled `source`) to `current`
/// until the mixture reaches `target`; the direction is fixed by the
/// caller's fuel choice.
///
/// Mass balance with one unknown: `x = A·(Et − Ec)/(Ea − Et)`.
pub fn top_up(
    current: Mixture,
    target: EthanolFraction,
    additive: EthanolFraction,
    source: FuelSource,
) -> BlendReport {
    let a = current.volume_l();
    let ec = current.ethanol_fraction().value();
    let et = target.value();
    let ea = additive.value();

    if a <= 0.0 {
        return BlendReport::invalid(
            vec![],
            current,
            InfeasibleKind::EmptyTank,
            "Tank is empty; plan a fill from empty instead.".to_string(),
        );
    }

    // Already at target: nothing to add.
    if fraction_eq(et, ec) {
        return BlendReport::valid(
            vec![Addition {
                source,
                fraction: additive,
                volume_l: 0.0,
            }],
            current,
        );
    }

    // The additive can only pull the fraction toward its own content.
    let wrong_direction =
        (et > ec && ea <= ec + FRACTION_EPS) || (et < ec && ea >= ec - FRACTION_EPS);
    if wrong_direction {
        let hint = if et > ec {
            "add ethanol instead"
        } else {
            "add gasoline instead, or drain the tank"
        };
        return BlendReport::invalid(
            vec![Addition {
                source,
                fraction: additive,
                volume_l: 0.0,
            }],
            current,
            InfeasibleKind::WrongDirection,
            format!(
                "Target E{:.1} is on the wrong side of the current E{:.1} for {}; {hint}.",
                et * 100.0,
                ec * 100.0,
                source.label(),
            ),
        );
    }

    // Target equals the additive's own content: asymptote, never reached.
    if fraction_eq(ea, et) {
        return BlendReport::invalid(
            vec![],
            current,
            InfeasibleKind::InfiniteVolume,
            format!(
                "Reaching E{:.1} with a {:.1}% additive would require infinite volume.",
                et * 100.0,
                ea * 100.0,
            ),
        );
    }

    let x = a * (et - ec) / (ea - et);
    if !x.is_finite() || x < 0.0 {
        return BlendReport::invalid(
            vec![],
            current,
            InfeasibleKind::Unreachable,
            format!(
                "A {:.1}% additive can only move the mixture toward {:.1}%; E{:.1} is out of reach.",
                ea * 100.0,
                ea * 100.0,
                et * 100.0,
            ),
        );
    }

    let final_state = current.with_added(x, additive);
    debug!(
        addition_l = x,
        final_volume_l = final_state.volume_l(),
        "top_up: solved"
    );

    // The final fraction must land between the two source fractions.
    let lo = ec.min(ea) - FRACTION_BAND;
    let hi = ec.max(ea) + FRACTION_BAND;
    let ef = final_state.ethanol_fraction().value();
    if !(lo..=hi).contains(&ef) {
        return BlendReport::invalid(
            vec![],
            current,
            InfeasibleKind::ConservationViolated,
            format!(
                "Computed final content {:.3}% fell outside the attainable range.",
                ef * 100.0
            ),
        );
    }

    BlendReport::valid(
        vec![Addition {
            source,
            fraction: additive,
            volume_l: x,
        }],
        final_state,
    )
}

/// Solve [`top_up`] for both candidate fuels (an ethanol grade and a
/// gasoline grade) and keep the one requiring the smaller addition.
pub fn best_addition(
    current: Mixture,
    target: EthanolFraction,
    ethanol: &FuelGradeEntry,
    gasoline: &FuelGradeEntry,
) -> BlendReport {
    let with_ethanol = top_up(current, target, ethanol.fraction(), FuelSource::Ethanol);
    let with_gasoline = top_up(current, target, gasoline.fraction(), FuelSource::Gasoline);

    let candidates = [with_ethanol, with_gasoline];
    let chosen = candidates
        .iter()
        .filter(|report| report.is_valid())
        .min_by(|a, b| {
            a.total_addition_l()
                .partial_cmp(&b.total_addition_l())
                .expect("valid additions are finite")
        });

    if let Some(report) = chosen {
        debug!(
            source = report.additions.first().map(|a| a.source.label()),
            addition_l = report.total_addition_l(),
            "best_addition: candidate chosen"
        );
        return report.clone();
    }

    // Neither fuel works: report the directionally relevant failure.
    let et = target.value();
    let ec = current.ethanol_fraction().value();
    let [with_ethanol, with_gasoline] = candidates;
    let (directional, needs) = if et > ec {
        (with_ethanol, format!("raising to E{:.1} needs ethanol ({})", et * 100.0, ethanol.display_name))
    } else {
        (with_gasoline, format!("lowering to E{:.1} needs gasoline ({})", et * 100.0, gasoline.display_name))
    };

    match directional.verdict {
        Verdict::Invalid { kind, reason } => BlendReport::invalid(
            vec![],
            current,
            kind,
            format!("{needs}: {reason}"),
        ),
        // Unreachable: a valid directional candidate would have been chosen.
        Verdict::Valid => directional,
    }
}

fn zero_additions(gasoline: EthanolFraction) -> Vec<Addition> {
    additions_pair(0.0, 0.0, gasoline)
}

fn additions_pair(ethanol_l: f64, gasoline_l: f64, gasoline: EthanolFraction) -> Vec<Addition> {
    vec![
        Addition {
            source: FuelSource::Ethanol,
            fraction: EthanolFraction::PURE_ETHANOL,
            volume_l: ethanol_l,
        },
        Addition {
            source: FuelSource::Gasoline,
            fraction: gasoline,
            volume_l: gasoline_l,
        },
    ]
}

//! Scenario schema: plain numeric fields as they arrive from a file or a
//! form, compiled into validated solver inputs.
//!
//! The schema deliberately stores raw percentages, volumes, and grade ids;
//! `compile` is the single place where units convert to liters, percents
//! to fractions, and ids to catalog entries. Unknown ids and out-of-range
//! percentages are errors here, not invalid verdicts.

use crate::error::{BlendError, BlendResult};
use crate::fraction::EthanolFraction;
use crate::grade::{find_gasoline_grade, find_grade, FuelGradeEntry};
use crate::mixture::Mixture;
use crate::solver::{best_addition, fill_from_empty, top_up, BlendReport, FuelSource};
use fm_core::VolumeUnit;
use serde::{Deserialize, Serialize};

fn default_gasoline_id() -> String {
    "e27".to_string()
}

fn default_ethanol_id() -> String {
    "e100".to_string()
}

/// A blending scenario as stored on disk or filled into a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScenarioDef {
    /// Compose a final volume from scratch.
    FillFromEmpty {
        volume: f64,
        #[serde(default)]
        unit: VolumeUnit,
        target_e_percent: f64,
        #[serde(default = "default_gasoline_id")]
        gasoline: String,
    },
    /// Add one chosen fuel to the current tank, direction fixed by the
    /// choice.
    TopUp {
        tank_volume: f64,
        #[serde(default)]
        unit: VolumeUnit,
        tank_e_percent: f64,
        target_e_percent: f64,
        /// Grade id of the fuel being added (ethanol or gasoline grade).
        additive: String,
    },
    /// Let the solver pick the cheaper of the two fuels.
    Auto {
        tank_volume: f64,
        #[serde(default)]
        unit: VolumeUnit,
        tank_e_percent: f64,
        target_e_percent: f64,
        #[serde(default = "default_ethanol_id")]
        ethanol: String,
        #[serde(default = "default_gasoline_id")]
        gasoline: String,
    },
}

/// Validated, unit-converted scenario ready to solve.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledScenario {
    FillFromEmpty {
        total_l: f64,
        target: EthanolFraction,
        gasoline: &'static FuelGradeEntry,
    },
    TopUp {
        current: Mixture,
        target: EthanolFraction,
        additive: &'static FuelGradeEntry,
        source: FuelSource,
    },
    Auto {
        current: Mixture,
        target: EthanolFraction,
        ethanol: &'static FuelGradeEntry,
        gasoline: &'static FuelGradeEntry,
    },
}

impl ScenarioDef {
    /// The unit this scenario's volumes were entered in (and should be
    /// displayed in).
    pub fn unit(&self) -> VolumeUnit {
        match self {
            Self::FillFromEmpty { unit, .. }
            | Self::TopUp { unit, .. }
            | Self::Auto { unit, .. } => *unit,
        }
    }

    /// Validate and convert into solver inputs.
    pub fn compile(&self) -> BlendResult<CompiledScenario> {
        match self {
            Self::FillFromEmpty {
                volume,
                unit,
                target_e_percent,
                gasoline,
            } => Ok(CompiledScenario::FillFromEmpty {
                total_l: unit.to_liters(*volume),
                target: EthanolFraction::from_percent(*target_e_percent)?,
                gasoline: lookup_gasoline(gasoline)?,
            }),
            Self::TopUp {
                tank_volume,
                unit,
                tank_e_percent,
                target_e_percent,
                additive,
            } => {
                let additive = find_grade(additive).ok_or_else(|| BlendError::UnknownGrade {
                    id: additive.clone(),
                })?;
                // Grades at or above 50% count as the ethanol side.
                let source = if additive.ethanol_fraction >= 0.5 {
                    FuelSource::Ethanol
                } else {
                    FuelSource::Gasoline
                };
                Ok(CompiledScenario::TopUp {
                    current: Mixture::new(
                        unit.to_liters(*tank_volume),
                        EthanolFraction::from_percent(*tank_e_percent)?,
                    )?,
                    target: EthanolFraction::from_percent(*target_e_percent)?,
                    additive,
                    source,
                })
            }
            Self::Auto {
                tank_volume,
                unit,
                tank_e_percent,
                target_e_percent,
                ethanol,
                gasoline,
            } => Ok(CompiledScenario::Auto {
                current: Mixture::new(
                    unit.to_liters(*tank_volume),
                    EthanolFraction::from_percent(*tank_e_percent)?,
                )?,
                target: EthanolFraction::from_percent(*target_e_percent)?,
                ethanol: crate::grade::find_ethanol_grade(ethanol).ok_or_else(|| {
                    BlendError::UnknownGrade {
                        id: ethanol.clone(),
                    }
                })?,
                gasoline: lookup_gasoline(gasoline)?,
            }),
        }
    }

    /// Compile and solve in one step.
    pub fn solve(&self) -> BlendResult<BlendReport> {
        self.compile()?.solve()
    }
}

impl CompiledScenario {
    pub fn solve(&self) -> BlendResult<BlendReport> {
        match self {
            Self::FillFromEmpty {
                total_l,
                target,
                gasoline,
            } => fill_from_empty(*total_l, *target, gasoline.fraction()),
            Self::TopUp {
                current,
                target,
                additive,
                source,
            } => Ok(top_up(*current, *target, additive.fraction(), *source)),
            Self::Auto {
                current,
                target,
                ethanol,
                gasoline,
            } => Ok(best_addition(*current, *target, ethanol, gasoline)),
        }
    }
}

fn lookup_gasoline(id: &str) -> BlendResult<&'static FuelGradeEntry> {
    find_gasoline_grade(id).ok_or_else(|| BlendError::UnknownGrade { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_round_trip() {
        let def = ScenarioDef::Auto {
            tank_volume: 30.0,
            unit: VolumeUnit::Liters,
            tank_e_percent: 10.0,
            target_e_percent: 50.0,
            ethanol: "anhydrous".to_string(),
            gasoline: "e27".to_string(),
        };

        let yaml = serde_yaml::to_string(&def).unwrap();
        let back: ScenarioDef = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn yaml_defaults_fill_in() {
        let yaml = "mode: fill_from_empty\nvolume: 40\ntarget_e_percent: 50\n";
        let def: ScenarioDef = serde_yaml::from_str(yaml).unwrap();

        let ScenarioDef::FillFromEmpty { unit, gasoline, .. } = &def else {
            panic!("wrong variant");
        };
        assert_eq!(*unit, VolumeUnit::Liters);
        assert_eq!(gasoline, "e27");
    }

    #[test]
    fn gallons_convert_on_compile() {
        let def = ScenarioDef::FillFromEmpty {
            volume: 10.0,
            unit: VolumeUnit::Gallons,
            target_e_percent: 50.0,
            gasoline: "e27".to_string(),
        };

        let CompiledScenario::FillFromEmpty { total_l, .. } = def.compile().unwrap() else {
            panic!("wrong variant");
        };
        assert!((total_l - 37.8541).abs() < 1e-9);
    }

    #[test]
    fn unknown_grade_is_an_error() {
        let def = ScenarioDef::TopUp {
            tank_volume: 30.0,
            unit: VolumeUnit::Liters,
            tank_e_percent: 10.0,
            target_e_percent: 50.0,
            additive: "e95000".to_string(),
        };
        assert!(matches!(
            def.compile(),
            Err(BlendError::UnknownGrade { .. })
        ));
    }

    #[test]
    fn out_of_range_percent_is_an_error() {
        let def = ScenarioDef::FillFromEmpty {
            volume: 40.0,
            unit: VolumeUnit::Liters,
            target_e_percent: 120.0,
            gasoline: "e27".to_string(),
        };
        assert!(matches!(
            def.compile(),
            Err(BlendError::PercentOutOfRange { .. })
        ));
    }

    #[test]
    fn additive_side_follows_fraction() {
        let def = ScenarioDef::TopUp {
            tank_volume: 30.0,
            unit: VolumeUnit::Liters,
            tank_e_percent: 10.0,
            target_e_percent: 50.0,
            additive: "hydrated".to_string(),
        };
        let CompiledScenario::TopUp { source, .. } = def.compile().unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(source, FuelSource::Ethanol);

        let def = ScenarioDef::TopUp {
            tank_volume: 60.0,
            unit: VolumeUnit::Liters,
            tank_e_percent: 60.0,
            target_e_percent: 40.0,
            additive: "e25".to_string(),
        };
        let CompiledScenario::TopUp { source, .. } = def.compile().unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(source, FuelSource::Gasoline);
    }

    #[test]
    fn solve_through_schema() {
        let yaml = "mode: top_up\ntank_volume: 30\ntank_e_percent: 10\ntarget_e_percent: 50\nadditive: e100\n";
        let def: ScenarioDef = serde_yaml::from_str(yaml).unwrap();
        let report = def.solve().unwrap();

        assert!(report.is_valid());
        assert!((report.total_addition_l() - 24.0).abs() < 1e-9);
    }
}

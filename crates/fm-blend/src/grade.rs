//! Named fuel grades with fixed ethanol fractions.
//!
//! Brazilian pump gasoline carries a mandated ethanol cut (regular ≈27%,
//! premium ≈25%, up to 30% regionally); the ethanol sold alongside it is
//! hydrated (≈95.5%) or anhydrous (≈99.6%). The solver treats a grade as
//! nothing more than its id and fixed fraction.

use crate::fraction::EthanolFraction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelGradeEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub ethanol_fraction: f64,
    pub aliases: &'static [&'static str],
}

impl FuelGradeEntry {
    /// The grade's ethanol content as a validated fraction.
    pub fn fraction(&self) -> EthanolFraction {
        // Catalog constants are all in [0, 1]; enforced by tests below.
        EthanolFraction::new(self.ethanol_fraction).expect("catalog fraction in range")
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    fn matches_id(&self, id: &str) -> bool {
        let id = id.trim();
        self.id.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

const GASOLINE_GRADES: [FuelGradeEntry; 4] = [
    FuelGradeEntry {
        id: "e27",
        display_name: "Regular/Aditivada gasoline (≈E27)",
        ethanol_fraction: 0.27,
        aliases: &["comum", "aditivada", "regular"],
    },
    FuelGradeEntry {
        id: "e25",
        display_name: "Premium/Podium gasoline (≈E25)",
        ethanol_fraction: 0.25,
        aliases: &["premium", "podium"],
    },
    FuelGradeEntry {
        id: "e30",
        display_name: "Regional gasoline (≈E30)",
        ethanol_fraction: 0.30,
        aliases: &["regional"],
    },
    FuelGradeEntry {
        id: "e0",
        display_name: "Ethanol-free gasoline (E0)",
        ethanol_fraction: 0.0,
        aliases: &["pure-gasoline"],
    },
];

const ETHANOL_GRADES: [FuelGradeEntry; 3] = [
    FuelGradeEntry {
        id: "e100",
        display_name: "Pure ethanol (E100)",
        ethanol_fraction: 1.0,
        aliases: &["pure", "pure-ethanol"],
    },
    FuelGradeEntry {
        id: "hydrated",
        display_name: "Hydrated ethanol (≈95.5%)",
        ethanol_fraction: 0.955,
        aliases: &["hidratado", "e95"],
    },
    FuelGradeEntry {
        id: "anhydrous",
        display_name: "Anhydrous ethanol (≈99.6%)",
        ethanol_fraction: 0.996,
        aliases: &["anidro"],
    },
];

pub fn gasoline_grades() -> &'static [FuelGradeEntry] {
    &GASOLINE_GRADES
}

pub fn ethanol_grades() -> &'static [FuelGradeEntry] {
    &ETHANOL_GRADES
}

/// Look up a gasoline grade by id or alias (case-insensitive).
pub fn find_gasoline_grade(id: &str) -> Option<&'static FuelGradeEntry> {
    GASOLINE_GRADES.iter().find(|entry| entry.matches_id(id))
}

/// Look up an ethanol grade by id or alias (case-insensitive).
pub fn find_ethanol_grade(id: &str) -> Option<&'static FuelGradeEntry> {
    ETHANOL_GRADES.iter().find(|entry| entry.matches_id(id))
}

/// Look up any grade: ethanol grades first, then gasoline.
pub fn find_grade(id: &str) -> Option<&'static FuelGradeEntry> {
    find_ethanol_grade(id).or_else(|| find_gasoline_grade(id))
}

/// Free-text search across both catalogs.
pub fn filter_grades(query: &str) -> Vec<FuelGradeEntry> {
    ETHANOL_GRADES
        .iter()
        .chain(GASOLINE_GRADES.iter())
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

//! System status summary across the displayed sensors.

use core::fmt;

use serde::{Deserialize, Serialize};

use farmwatch_types::StatusLevel;

/// Overall banner shown above the sensor cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    AllSystemsNominal,
    ActionRecommended,
}

impl Banner {
    /// Banner text.
    pub fn text(self) -> &'static str {
        match self {
            Banner::AllSystemsNominal => "All Systems Nominal",
            Banner::ActionRecommended => "Action Recommended",
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Count of sensors in each status band.
///
/// Built from exactly three levels (soil, humidity, temperature), so the
/// counts always add up to three. The pump is not part of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemSummary {
    pub optimal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl SystemSummary {
    /// Tally the three classified levels.
    pub fn from_levels(levels: [StatusLevel; 3]) -> Self {
        let count = |wanted: StatusLevel| levels.iter().filter(|&&l| l == wanted).count();
        Self {
            optimal: count(StatusLevel::Optimal),
            warning: count(StatusLevel::Warning),
            critical: count(StatusLevel::Critical),
        }
    }

    /// Number of sensors counted.
    pub fn total(&self) -> usize {
        self.optimal + self.warning + self.critical
    }

    /// Which banner to show.
    pub fn banner(&self) -> Banner {
        if self.warning == 0 && self.critical == 0 {
            Banner::AllSystemsNominal
        } else {
            Banner::ActionRecommended
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatusLevel::{Critical, Optimal, Warning};

    #[test]
    fn test_all_optimal_is_nominal() {
        let summary = SystemSummary::from_levels([Optimal, Optimal, Optimal]);
        assert_eq!(summary.optimal, 3);
        assert_eq!(summary.banner(), Banner::AllSystemsNominal);
        assert_eq!(summary.banner().to_string(), "All Systems Nominal");
    }

    #[test]
    fn test_single_warning_recommends_action() {
        let summary = SystemSummary::from_levels([Optimal, Warning, Optimal]);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.banner(), Banner::ActionRecommended);
        assert_eq!(summary.banner().text(), "Action Recommended");
    }

    #[test]
    fn test_every_combination_sums_to_three() {
        let levels = [Optimal, Warning, Critical];
        for a in levels {
            for b in levels {
                for c in levels {
                    let summary = SystemSummary::from_levels([a, b, c]);
                    assert_eq!(summary.total(), 3);
                    let nominal = [a, b, c].iter().all(|l| *l == Optimal);
                    assert_eq!(summary.banner() == Banner::AllSystemsNominal, nominal);
                }
            }
        }
    }
}

//! Production areas of the plant.

use serde::{Deserialize, Serialize};

/// A production area. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductionArea {
    /// Material preparation, cutting and deburring.
    A10,
    /// Welding.
    A11,
    /// Turning.
    A20,
    /// Milling.
    A30,
    /// Assembly.
    A40,
}

impl ProductionArea {
    /// Every area, in code order.
    pub const ALL: [Self; 5] = [Self::A10, Self::A11, Self::A20, Self::A30, Self::A40];

    /// Area code as used in the rate tables.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::A10 => "A10",
            Self::A11 => "A11",
            Self::A20 => "A20",
            Self::A30 => "A30",
            Self::A40 => "A40",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::A10 => "Material preparation",
            Self::A11 => "Welding",
            Self::A20 => "Turning",
            Self::A30 => "Milling",
            Self::A40 => "Assembly",
        }
    }
}

impl std::fmt::Display for ProductionArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ProductionArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|area| area.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| format!("Unknown production area: {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A10", ProductionArea::A10)]
    #[case("a11", ProductionArea::A11)]
    #[case(" A20 ", ProductionArea::A20)]
    #[case("A30", ProductionArea::A30)]
    #[case("A40", ProductionArea::A40)]
    fn test_parse_area(#[case] raw: &str, #[case] expected: ProductionArea) {
        assert_eq!(raw.parse::<ProductionArea>(), Ok(expected));
    }

    #[test]
    fn test_unknown_area() {
        assert!("A99".parse::<ProductionArea>().is_err());
        assert!("".parse::<ProductionArea>().is_err());
    }

    #[test]
    fn test_code_round_trips() {
        for area in ProductionArea::ALL {
            assert_eq!(area.code().parse::<ProductionArea>(), Ok(area));
            assert_eq!(area.to_string(), area.code());
        }
    }
}

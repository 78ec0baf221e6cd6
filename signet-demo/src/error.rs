use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("unknown unit {0:?} (expected one of m, km, ft, mi)")]
    Unknown(String),
}

/// A unit of length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Meters,
    Kilometers,
    Feet,
    Miles,
}

impl Unit {
    pub fn meters(self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Kilometers => 1000.0,
            Unit::Feet => 0.3048,
            Unit::Miles => 1609.344,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Kilometers => "km",
            Unit::Feet => "ft",
            Unit::Miles => "mi",
        }
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" | "meters" => Ok(Unit::Meters),
            "km" | "kilometers" => Ok(Unit::Kilometers),
            "ft" | "feet" => Ok(Unit::Feet),
            "mi" | "miles" => Ok(Unit::Miles),
            _ => Err(UnitError::Unknown(s.to_owned())),
        }
    }
}

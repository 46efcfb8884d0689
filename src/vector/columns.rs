//! Fixed schema of the vector load case table

use serde::{Deserialize, Serialize};

/// The 26 columns of a vector load case row, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VectorColumn {
    RowNumber,
    Description,
    DeadLoadFactor,
    WindAreaFactor,
    SfSteelPolesArmsTowers,
    SfWoodPoles,
    SfConcreteUltimate,
    SfConcreteFirstCrack,
    SfConcreteZeroTension,
    SfGuysCables,
    SfNonTubularArms,
    SfBraces,
    SfInsulators,
    SfHardware,
    SfFoundation,
    SfClimbing,
    PointLoads,
    WindIceModel,
    TransWindPressure,
    LongitWindPressure,
    IceThickness,
    IceDensity,
    Temperature,
    PoleDeflectionCheck,
    PoleDeflectionLimit,
    JointDisplacement,
}

impl VectorColumn {
    pub const ALL: [VectorColumn; 26] = [
        Self::RowNumber,
        Self::Description,
        Self::DeadLoadFactor,
        Self::WindAreaFactor,
        Self::SfSteelPolesArmsTowers,
        Self::SfWoodPoles,
        Self::SfConcreteUltimate,
        Self::SfConcreteFirstCrack,
        Self::SfConcreteZeroTension,
        Self::SfGuysCables,
        Self::SfNonTubularArms,
        Self::SfBraces,
        Self::SfInsulators,
        Self::SfHardware,
        Self::SfFoundation,
        Self::SfClimbing,
        Self::PointLoads,
        Self::WindIceModel,
        Self::TransWindPressure,
        Self::LongitWindPressure,
        Self::IceThickness,
        Self::IceDensity,
        Self::Temperature,
        Self::PoleDeflectionCheck,
        Self::PoleDeflectionLimit,
        Self::JointDisplacement,
    ];

    /// Header text used by downstream analysis tools
    pub fn header(&self) -> &'static str {
        match self {
            Self::RowNumber => "Row #",
            Self::Description => "Load Case Description",
            Self::DeadLoadFactor => "Dead Load Factor",
            Self::WindAreaFactor => "Wind Area Factor",
            Self::SfSteelPolesArmsTowers => "SF for Steel Poles Arms and Towers",
            Self::SfWoodPoles => "SF for Wood Poles",
            Self::SfConcreteUltimate => "SF for Conc. Ult.",
            Self::SfConcreteFirstCrack => "SF for Conc. First Crack",
            Self::SfConcreteZeroTension => "SF for Conc. Zero Tens.",
            Self::SfGuysCables => "SF for Guys and Cables",
            Self::SfNonTubularArms => "SF for Non Tubular Arms",
            Self::SfBraces => "SF for Braces",
            Self::SfInsulators => "SF for Insuls.",
            Self::SfHardware => "SF for Hardware",
            Self::SfFoundation => "SF For Found.",
            Self::SfClimbing => "SF For Climbing",
            Self::PointLoads => "Point Loads",
            Self::WindIceModel => "Wind/Ice Model",
            Self::TransWindPressure => "Trans. Wind Pressure (psf)",
            Self::LongitWindPressure => "Longit. Wind Pressure (psf)",
            Self::IceThickness => "Ice Thick. (in)",
            Self::IceDensity => "Ice Density (lbs/ft^3)",
            Self::Temperature => "Temperature (deg F)",
            Self::PoleDeflectionCheck => "Pole Deflection Check",
            Self::PoleDeflectionLimit => "Pole Deflection Limit % or (ft)",
            Self::JointDisplacement => "Joint Displ.",
        }
    }

    /// Look a column up by its header text
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.header() == header)
    }
}

//! Categorical domain types
//!
//! Every categorical column of the generated population is backed by one of
//! the closed enumerations below. The label written to the dataset follows the
//! vocabulary of the Senegalese STEPS survey the population is calibrated to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declare a closed categorical enum together with its dataset labels
macro_rules! categorical_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// All variants in their declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Label written to the dataset
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Parse a dataset label back into its variant
            #[must_use]
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical_enum! {
    /// Sex of an individual
    Sex {
        /// Female
        Female => "F",
        /// Male
        Male => "M",
    }
}

categorical_enum! {
    /// Administrative region of Senegal
    Region {
        Dakar => "Dakar",
        Thies => "Thiès",
        SaintLouis => "Saint-Louis",
        Diourbel => "Diourbel",
        Louga => "Louga",
        Fatick => "Fatick",
        Kaolack => "Kaolack",
        Kolda => "Kolda",
        Matam => "Matam",
        Tambacounda => "Tambacounda",
        Ziguinchor => "Ziguinchor",
        Sedhiou => "Sédhiou",
        Kaffrine => "Kaffrine",
        Kedougou => "Kédougou",
    }
}

impl Region {
    /// Regions whose residents are always classified as urban
    #[must_use]
    pub const fn is_urban(self) -> bool {
        matches!(self, Self::Dakar | Self::Thies | Self::SaintLouis)
    }
}

categorical_enum! {
    /// Urban/rural classification of the place of residence
    Urbanicity {
        Urban => "Urbain",
        SemiUrban => "Semi-urbain",
        Rural => "Rural",
    }
}

categorical_enum! {
    /// Occupation sector (informal sector dominates)
    Profession {
        InformalSector => "Secteur informel",
        CivilServant => "Fonctionnaire",
        Commerce => "Commerce",
        Agriculture => "Agriculture",
        Fishing => "Pêche",
        Unemployed => "Sans emploi",
    }
}

categorical_enum! {
    /// Highest completed education level, ordered from lowest to highest
    EducationLevel {
        NoSchooling => "Aucun",
        Primary => "Primaire",
        Secondary => "Secondaire",
        Higher => "Supérieur",
    }
}

categorical_enum! {
    /// Chest pain subtype, `NoPain` whenever no chest pain is reported
    ChestPainType {
        NoPain => "Aucune",
        TypicalAngina => "Angine typique",
        AtypicalAngina => "Angine atypique",
        NonAnginalPain => "Douleur non-angineuse",
    }
}

impl ChestPainType {
    /// Subtypes drawn when chest pain is present
    pub const SYMPTOMATIC: [Self; 3] = [
        Self::TypicalAngina,
        Self::AtypicalAngina,
        Self::NonAnginalPain,
    ];
}

categorical_enum! {
    /// Bucketed cardiovascular risk on the 0-10 display scale
    RiskCategory {
        Low => "Faible",
        Moderate => "Modéré",
        High => "Élevé",
        VeryHigh => "Très élevé",
    }
}

impl RiskCategory {
    /// Bin a displayed risk score using the upper bounds 2, 4, 6 and 10
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= 2.0 {
            Self::Low
        } else if score <= 4.0 {
            Self::Moderate
        } else if score <= 6.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

categorical_enum! {
    /// Climatic season of the consultation month
    Season {
        /// January to March
        CoolDry => "Saison sèche froide",
        /// April to June
        HotDry => "Saison sèche chaude",
        /// July to September
        Rainy => "Hivernage",
        /// October to December
        PostRainy => "Post-hivernage",
    }
}

impl Season {
    /// Season of a calendar month (1-12)
    #[must_use]
    pub const fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Self::CoolDry),
            4..=6 => Some(Self::HotDry),
            7..=9 => Some(Self::Rainy),
            10..=12 => Some(Self::PostRainy),
            _ => None,
        }
    }
}

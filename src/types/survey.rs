//! Survey metadata: electrode arrangement and spacing

use serde::{Deserialize, Serialize};

/// Electrode arrangement used during acquisition.
///
/// Parsed case-insensitively from its name, a known alias, its short code
/// or its numeric id (`"slbg"`, `"S"`, `"1"` all give Schlumberger).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Arrangement {
    #[default]
    Schlumberger,
    Wenner,
    DipoleDipole,
    GradientRectangular,
}

impl Arrangement {
    pub const ALL: [Arrangement; 4] = [
        Arrangement::Schlumberger,
        Arrangement::Wenner,
        Arrangement::DipoleDipole,
        Arrangement::GradientRectangular,
    ];

    pub const fn id(self) -> u8 {
        match self {
            Arrangement::Schlumberger => 1,
            Arrangement::Wenner => 2,
            Arrangement::DipoleDipole => 3,
            Arrangement::GradientRectangular => 4,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Arrangement::Schlumberger => "S",
            Arrangement::Wenner => "W",
            Arrangement::DipoleDipole => "DD",
            Arrangement::GradientRectangular => "GR",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Arrangement::Schlumberger => "Schlumberger",
            Arrangement::Wenner => "Wenner",
            Arrangement::DipoleDipole => "Dipole-dipole",
            Arrangement::GradientRectangular => "Gradient-rectangular",
        }
    }

    /// Lowercase identifier used in configuration files.
    pub const fn slug(self) -> &'static str {
        match self {
            Arrangement::Schlumberger => "schlumberger",
            Arrangement::Wenner => "wenner",
            Arrangement::DipoleDipole => "dipole-dipole",
            Arrangement::GradientRectangular => "gradient-rectangular",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Arrangement::Schlumberger => &["schlumberger", "ab>>mn", "slbg"],
            Arrangement::Wenner => &["wenner", "ab=mn"],
            Arrangement::DipoleDipole => &["dipole-dipole", "dd", "ab<bm>mn", "mn<na>ab"],
            Arrangement::GradientRectangular => {
                &["gradient-rectangular", "[ab]mn", "mn[ab]", "[ab]"]
            }
        }
    }
}

impl std::fmt::Display for Arrangement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Arrangement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| {
                a.aliases().contains(&needle.as_str())
                    || a.code().eq_ignore_ascii_case(&needle)
                    || a.id().to_string() == needle
            })
            .ok_or_else(|| format!("unknown electrode arrangement '{s}'"))
    }
}

impl TryFrom<String> for Arrangement {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Arrangement> for String {
    fn from(arrangement: Arrangement) -> Self {
        arrangement.slug().to_string()
    }
}

use std::fmt;

/// The currency a game is played in. Only ever displayed, never used in
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "₪"))]
    Shekel,
    #[cfg_attr(feature = "serde", serde(rename = "$"))]
    Dollar,
    #[cfg_attr(feature = "serde", serde(rename = "€"))]
    Euro,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Shekel => "₪",
            Currency::Dollar => "$",
            Currency::Euro => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

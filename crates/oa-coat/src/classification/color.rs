use super::coat::Coat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Display colour derived from a [`Coat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OaColor {
    #[serde(rename = "Diamond")]
    Diamond,
    #[serde(rename = "Gold")]
    Gold,
    #[serde(rename = "Hybrid")]
    Hybrid,
    #[serde(rename = "Bronze")]
    Bronze,
    #[serde(rename = "Green-Post")]
    GreenPost,
    #[serde(rename = "Green-Pre")]
    GreenPre,
    #[serde(rename = "Other OA")]
    OtherOa,
    #[serde(rename = "Closed")]
    Closed,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl OaColor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diamond => "Diamond",
            Self::Gold => "Gold",
            Self::Hybrid => "Hybrid",
            Self::Bronze => "Bronze",
            Self::GreenPost => "Green-Post",
            Self::GreenPre => "Green-Pre",
            Self::OtherOa => "Other OA",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the colour stands for any open access route.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed | Self::Unknown)
    }
}

impl fmt::Display for OaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static COLOR_TABLE: OnceLock<Vec<(OaColor, Coat)>> = OnceLock::new();

fn color_table() -> &'static [(OaColor, Coat)] {
    COLOR_TABLE.get_or_init(|| {
        const ROWS: &[(OaColor, [u8; 5])] = &[
            (OaColor::Diamond, [1, 1, 1, 1, 1]),
            (OaColor::Gold, [1, 2, 1, 1, 2]),
            (OaColor::Hybrid, [1, 2, 1, 1, 3]),
            (OaColor::Bronze, [1, 4, 1, 4, 3]),
            (OaColor::GreenPost, [2, 4, 2, 4, 1]),
            (OaColor::GreenPre, [2, 4, 4, 4, 1]),
            (OaColor::OtherOa, [3, 4, 4, 4, 3]),
            (OaColor::Closed, [4, 4, 4, 4, 4]),
        ];

        ROWS.iter()
            .map(|(color, levels)| (*color, Coat::from_checked(color.label().to_string(), *levels)))
            .collect()
    })
}

/// Maps a tuple to its colour: the first row the tuple is lower than or equal to.
pub fn color_for(coat: Option<&Coat>) -> OaColor {
    let Some(coat) = coat else {
        return OaColor::Unknown;
    };

    color_table()
        .iter()
        .find(|(_, threshold)| coat.is_lower(threshold))
        .map(|(color, _)| *color)
        .unwrap_or(OaColor::Unknown)
}

/// Reference tuple of a colour, `None` for [`OaColor::Unknown`].
pub fn threshold_for(color: OaColor) -> Option<&'static Coat> {
    color_table()
        .iter()
        .find(|(candidate, _)| *candidate == color)
        .map(|(_, coat)| coat)
}

//! Cyclic lane colours shared by the overlay and the chart.
use serde::{Deserialize, Serialize};

pub type Rgb = [u8; 3];

const DEFAULT_COLORS: [Rgb; 6] = [
    [0xFF, 0x00, 0x00],
    [0x00, 0xFF, 0x00],
    [0x00, 0x00, 0xFF],
    [0xFF, 0xFF, 0x00],
    [0xFF, 0x00, 0xFF],
    [0x00, 0xFF, 0xFF],
];

/// Fixed list of colours; lane `i` gets colour `i % len`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    /// Build a palette; an empty list falls back to the default colours.
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn color_for(&self, lane_index: usize) -> Rgb {
        self.colors[lane_index % self.colors.len()]
    }

    pub fn hex_for(&self, lane_index: usize) -> String {
        to_hex(self.color_for(lane_index))
    }
}

pub fn to_hex([r, g, b]: Rgb) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parse `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex(s: &str) -> Result<Rgb, String> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(format!("expected #RRGGBB colour, got {s:?}"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| format!("bad colour {s:?}: {e}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

impl TryFrom<Vec<String>> for Palette {
    type Error = String;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let colors = value
            .iter()
            .map(|s| parse_hex(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }
}

impl From<Palette> for Vec<String> {
    fn from(p: Palette) -> Self {
        p.colors.into_iter().map(to_hex).collect()
    }
}

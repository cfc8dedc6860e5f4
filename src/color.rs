use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Marker colours
// ---------------------------------------------------------------------------

/// Fill category of a scatter marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointColor {
    /// The highlighted player.
    Highlight,
    /// At or below the 25th percentile.
    Low,
    /// Between the thresholds, or no usable value.
    Mid,
    /// At or above the 75th percentile.
    High,
}

impl PointColor {
    pub fn hex(self) -> &'static str {
        match self {
            PointColor::Highlight => "#000000",
            PointColor::Low => "#e74c3c",
            PointColor::Mid => "#f1c40f",
            PointColor::High => "#2ecc71",
        }
    }

    pub fn color32(self) -> Color32 {
        hex_to_color32(self.hex())
    }
}

/// Marker outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Border {
    /// Player of the distinguished team.
    Team,
    None,
}

impl Border {
    pub fn color32(self) -> Color32 {
        match self {
            Border::Team => hex_to_color32("#800080"),
            Border::None => Color32::TRANSPARENT,
        }
    }
}

/// Parse `#rrggbb`. Malformed input renders grey.
pub fn hex_to_color32(hex: &str) -> Color32 {
    hex.parse::<Srgb<u8>>()
        .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
        .unwrap_or(Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_dashboard_hex_codes() {
        assert_eq!(PointColor::Low.color32(), Color32::from_rgb(0xe7, 0x4c, 0x3c));
        assert_eq!(PointColor::High.color32(), Color32::from_rgb(0x2e, 0xcc, 0x71));
        assert_eq!(PointColor::Mid.color32(), Color32::from_rgb(0xf1, 0xc4, 0x0f));
        assert_eq!(PointColor::Highlight.color32(), Color32::BLACK);
        assert_eq!(Border::Team.color32(), Color32::from_rgb(128, 0, 128));
        assert_eq!(Border::None.color32(), Color32::TRANSPARENT);
    }

    #[test]
    fn malformed_hex_is_grey() {
        assert_eq!(hex_to_color32("purple"), Color32::GRAY);
    }
}

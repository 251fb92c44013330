use crate::core::Color;

/// Base trace palette, in assignment order.
pub const BASE_PALETTE: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22,
    0x17becf,
];

/// Lightness shift, in percentage points, used for the lighter and darker
/// halves of the slice palette.
pub const PALETTE_SHIFT: f64 = 20.0;

/// Default stroke color for slice outlines and figure text.
pub const DEFAULT_LINE_COLOR: u32 = 0x444444;

#[must_use]
pub fn base_palette() -> Vec<Color> {
    BASE_PALETTE.iter().copied().map(Color::from_rgb_u32).collect()
}

/// Builds the slice palette from `base`: the base colors, then each lightened,
/// then each darkened.
///
/// Colors are round-tripped through hex so lookups compare equal to colors
/// parsed from their printed form.
#[must_use]
pub fn slice_palette(base: &[Color]) -> Vec<Color> {
    let quantize = |color: Color| Color::parse(&color.to_hex()).unwrap_or(color);
    let mut palette = Vec::with_capacity(base.len() * 3);
    palette.extend(base.iter().copied());
    palette.extend(base.iter().map(|color| quantize(color.lighten(PALETTE_SHIFT))));
    palette.extend(base.iter().map(|color| quantize(color.darken(PALETTE_SHIFT))));
    palette
}

/// Picks the palette entry for the `index`-th default assignment, wrapping.
#[must_use]
pub fn default_color(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        return Color::from_rgb_u32(DEFAULT_LINE_COLOR);
    }
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::{base_palette, default_color, slice_palette};
    use crate::core::Color;

    #[test]
    fn slice_palette_is_base_then_lighter_then_darker() {
        let base = base_palette();
        let palette = slice_palette(&base);
        assert_eq!(palette.len(), 30);
        assert_eq!(palette[0].to_hex(), "#1f77b4");
        assert_eq!(palette[10], base[0].lighten(20.0).to_hex().parse::<Color>().expect("hex"));
        assert_eq!(palette[20], base[0].darken(20.0).to_hex().parse::<Color>().expect("hex"));
    }

    #[test]
    fn default_color_wraps_around() {
        let palette = slice_palette(&base_palette());
        assert_eq!(default_color(&palette, 30), palette[0]);
        assert_eq!(default_color(&palette, 31), palette[1]);
        assert_eq!(default_color(&[], 5).to_hex(), "#444444");
    }
}

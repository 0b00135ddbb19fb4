//! RGB565 color helpers.

/// Black, also the padding color of short frames
pub const BLACK: u16 = 0x0000;

/// Pure white
pub const WHITE: u16 = 0xFFFF;

/// Pure red
pub const RED: u16 = 0xF800;

/// Pure green
pub const GREEN: u16 = 0x07E0;

/// Pure blue
pub const BLUE: u16 = 0x001F;

/// Packs 8-bit channels into an RGB565 color
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
	((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Expands an RGB565 color to 8-bit channels, replicating high bits into the low ones
pub const fn to_rgb888(color: u16) -> [u8; 3] {
	let r = ((color >> 11) & 0x1F) as u8;
	let g = ((color >> 5) & 0x3F) as u8;
	let b = (color & 0x1F) as u8;
	[(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_primaries() {
		assert_eq!(rgb565(0, 255, 0), GREEN);
		assert_eq!(rgb565(255, 0, 0), RED);
		assert_eq!(rgb565(0, 0, 255), BLUE);
		assert_eq!(rgb565(255, 255, 255), WHITE);
		assert_eq!(to_rgb888(WHITE), [255, 255, 255]);
		assert_eq!(to_rgb888(GREEN), [0, 255, 0]);
	}

	#[test]
	fn test_roundtrip_keeps_high_bits() {
		let color = rgb565(0x12, 0x34, 0x56);
		assert_eq!(rgb565(to_rgb888(color)[0], to_rgb888(color)[1], to_rgb888(color)[2]), color);
	}
}

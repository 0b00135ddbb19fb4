//! `AnimationDisplay` over a file-backed flash image

use std::io::Write;

use animpak_rs::prelude::*;

use crate::{HEIGHT, WIDTH, build_pack, column_frames, stream_config};

fn display_config(base_offset: u32) -> DisplayConfig {
	DisplayConfig {
		base_offset,
		frame_delay_ms: 0,
		stream: stream_config(5),
		..DisplayConfig::default()
	}
}

fn open_display(
	image: &tempfile::NamedTempFile,
	base_offset: u32,
) -> AnimationDisplay<FileMedium, MemorySink> {
	let medium = FileMedium::open_rw(image.path()).unwrap();
	AnimationDisplay::new(medium, MemorySink::new(WIDTH, HEIGHT), display_config(base_offset))
		.unwrap()
		.with_pacer(NoopPacer)
}

fn image_with(region: &[u8]) -> tempfile::NamedTempFile {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(region).unwrap();
	file.flush().unwrap();
	file
}

#[test_log::test]
fn test_startup_animation_from_file() {
	let image = image_with(&build_pack().to_region(0x400).unwrap());
	let display = open_display(&image, 0x400);

	assert_eq!(display.start().unwrap(), Some(PlayOutcome::Completed));
	let (_, sink) = display.into_parts();
	assert_eq!(sink.frames(), &column_frames(usize::from(WIDTH))[..]);
	assert_eq!(sink.clears(), 1);
}

#[test_log::test]
fn test_flash_and_play() {
	// erased flash, then the container is programmed through the display
	let image = image_with(&[0xFF; 8192]);
	let display = open_display(&image, 0x100);
	assert!(display.list_names().is_empty());
	assert_eq!(display.start().unwrap_err().to_string(), "Invalid PACK magic: expected [50, 41, 43, 4B], got [FF, FF, FF, FF]");

	display.write_raw(0x100, &build_pack().to_bytes(0x100).unwrap()).unwrap();
	assert_eq!(display.reload().unwrap(), 2);
	assert!(display.has_animation("solid"));

	assert_eq!(display.play("solid", false, 0).unwrap(), PlayOutcome::Completed);
	display.with_sink(|sink| assert_eq!(sink.surface(), &[color::RED; 32]));
}

#[test_log::test]
fn test_decode_frame_copies() {
	let image = image_with(&build_pack().to_region(0).unwrap());
	let display = open_display(&image, 0);

	let frames = column_frames(usize::from(WIDTH));
	for (index, expected) in frames.iter().enumerate() {
		assert_eq!(&display.decode_frame("meter", index).unwrap(), expected);
	}
	assert!(display.decode_frame("nope", 0).unwrap_err().is_not_found());
}

//! Playback example.
//!
//! Builds a small flash image in memory, then drives an `AnimationDisplay`
//! the way firmware would: play the startup animation, loop another one on a
//! background thread, and stop it by entering power save.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example playback
//! ```

use std::{thread, time::Duration};

use animpak_rs::prelude::*;
use log::info;

const WIDTH: u16 = 96;
const HEIGHT: u16 = 64;

/// A bar that fills from left to right over `frames` frames
fn meter(frames: u16) -> Result<AnimationBuilder, FormatError> {
	let mut animation = AnimationBuilder::new("meter")?;
	for i in 0..frames {
		let filled = usize::from(WIDTH) * usize::from(i + 1) / usize::from(frames);
		let pixels: Vec<u16> = (0..usize::from(WIDTH) * usize::from(HEIGHT))
			.map(|p| if p % usize::from(WIDTH) < filled { color::GREEN } else { color::BLACK })
			.collect();
		animation.add_frame(&pixels);
	}
	Ok(animation)
}

/// Horizontal stripes scrolling down one row per frame
fn stripes(frames: u16) -> Result<AnimationBuilder, FormatError> {
	let mut animation = AnimationBuilder::new("stripes")?;
	for i in 0..frames {
		let pixels: Vec<u16> = (0..usize::from(WIDTH) * usize::from(HEIGHT))
			.map(|p| {
				let row = p / usize::from(WIDTH) + usize::from(i);
				if row / 4 % 2 == 0 { color::rgb565(0xFF, 0x80, 0x00) } else { color::BLUE }
			})
			.collect();
		animation.add_frame(&pixels);
	}
	Ok(animation)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let config = DisplayConfig {
		base_offset: 0x1000,
		frame_delay_ms: 10,
		..DisplayConfig::default()
	};

	let mut pack = PackBuilder::new();
	pack.add(meter(12)?)?;
	pack.add(stripes(8)?)?;
	let region = pack.to_region(config.base_offset)?;
	info!("Flash image: {} bytes", region.len());

	let medium = MemoryMedium::from_bytes(region).with_label(config.partition_label.clone());
	let sink = MemorySink::new(WIDTH, HEIGHT).without_history();
	let display = AnimationDisplay::new(medium, sink, config)?;

	info!("Startup: {:?}", display.start()?);
	info!("Animations: {:?}", display.list_names());

	thread::scope(|scope| {
		let looping = scope.spawn(|| display.play("stripes", true, 20));

		thread::sleep(Duration::from_millis(300));
		if let Err(err) = display.set_power_save(true) {
			info!("Power save failed: {err}");
		}

		match looping.join() {
			Ok(result) => info!("Looping playback ended: {:?}", result),
			Err(_) => info!("Playback thread panicked"),
		}
	});

	match display.play("meter", false, 10) {
		Err(PlayError::PowerSave) => info!("Playback refused while in power save"),
		other => info!("Unexpected: {other:?}"),
	}

	display.set_power_save(false)?;
	let first = display.decode_frame("meter", 0)?;
	let lit = first.iter().filter(|&&p| p == color::GREEN).count();
	info!("meter frame 0 lights {lit} pixels");

	Ok(())
}

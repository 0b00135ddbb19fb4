//! PACK container utility.
//!
//! Provides the following subcommands:
//! - `list`: print the animation names of a flash image
//! - `inspect`: show table entries, sub-container headers and frame sizes
//! - `export`: decode every frame of one animation to PNG files
//! - `build`: assemble a flash image from directories of PNG frames
//! - `play`: stream an animation with real frame delays
//! - `verify`: hash every sub-container and decode every frame
//!
//! Settings are layered: built-in defaults, then an optional TOML file
//! (`--config`), then `ANIMPAK_*` environment variables, then command-line
//! flags. Nested keys use a double underscore, e.g.
//! `ANIMPAK_STREAM__READ_CHUNK=64`.
//!
//! # Usage
//!
//! ```bash
//! # Build a flash image where each sub-directory of frames/ is one animation
//! cargo run --example pack_utils -- build frames/ flash.bin --base-offset 4096
//!
//! # List and inspect it
//! cargo run --example pack_utils -- list flash.bin --base-offset 4096
//! cargo run --example pack_utils -- inspect flash.bin --base-offset 4096 --json
//!
//! # Export the frames of one animation
//! cargo run --example pack_utils -- export flash.bin meter -o meter_frames/
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{RgbImage, imageops::FilterType};
use log::{info, warn};
use md5::{Digest, Md5};
use serde::Serialize;
use walkdir::WalkDir;

use animpak_rs::prelude::*;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::List(args) => run_list(args),
		Command::Inspect(args) => run_inspect(args),
		Command::Export(args) => run_export(args),
		Command::Build(args) => run_build(args),
		Command::Play(args) => run_play(args),
		Command::Verify(args) => run_verify(args),
	}
}

#[derive(Parser)]
#[command(name = "pack_utils")]
#[command(author = "animpak-rs project")]
#[command(version)]
#[command(about = "Build, inspect and play PACK animation containers", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// List animation names in container order
	List(ImageArgs),
	/// Show the table and sub-container headers
	Inspect(InspectArgs),
	/// Decode the frames of one animation to PNG files
	Export(ExportArgs),
	/// Build a flash image from directories of PNG frames
	Build(BuildArgs),
	/// Stream an animation with real frame delays
	Play(PlayArgs),
	/// Hash every sub-container and decode every frame
	Verify(ImageArgs),
}

/// Options shared by every command that reads an image
#[derive(Args, Clone)]
struct ImageArgs {
	/// Flash image holding the container
	#[arg(value_name = "IMAGE")]
	image: PathBuf,

	/// TOML settings file
	#[arg(short, long, value_name = "FILE", env = "ANIMPAK_CONFIG")]
	config: Option<PathBuf>,

	/// Offset of the PACK header inside the image
	#[arg(short, long, value_name = "OFFSET", value_parser = parse_offset)]
	base_offset: Option<u32>,

	/// Bytes fetched per streaming read
	#[arg(long, value_name = "BYTES")]
	read_chunk: Option<usize>,
}

#[derive(Args)]
struct InspectArgs {
	#[command(flatten)]
	image: ImageArgs,

	/// Print the report as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct ExportArgs {
	#[command(flatten)]
	image: ImageArgs,

	/// Animation to export
	#[arg(value_name = "NAME")]
	name: String,

	/// Output directory (defaults to `<NAME>_frames/`)
	#[arg(short, long, value_name = "DIR")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
	/// Directory whose sub-directories each hold one animation's PNG frames
	#[arg(value_name = "INPUT_DIR")]
	input: PathBuf,

	/// Flash image to write
	#[arg(value_name = "OUTPUT")]
	output: PathBuf,

	/// TOML settings file
	#[arg(short, long, value_name = "FILE", env = "ANIMPAK_CONFIG")]
	config: Option<PathBuf>,

	/// Offset to place the PACK header at; the bytes before it are 0xFF
	#[arg(short, long, value_name = "OFFSET", value_parser = parse_offset)]
	base_offset: Option<u32>,

	/// Pad the image with 0xFF up to this size
	#[arg(long, value_name = "BYTES", value_parser = parse_offset)]
	region_size: Option<u32>,
}

#[derive(Args)]
struct PlayArgs {
	#[command(flatten)]
	image: ImageArgs,

	/// Animation to play
	#[arg(value_name = "NAME")]
	name: String,

	/// Delay between frames in milliseconds
	#[arg(short, long, value_name = "MS")]
	delay: Option<u64>,

	/// Number of passes to play
	#[arg(short, long, value_name = "COUNT", default_value_t = 1)]
	passes: usize,

	/// Write every presented frame as a PNG into this directory
	#[arg(short, long, value_name = "DIR")]
	output: Option<PathBuf>,
}

/// Accepts decimal or `0x`-prefixed hexadecimal offsets
fn parse_offset(value: &str) -> Result<u32, String> {
	let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => u32::from_str_radix(hex, 16),
		None => value.parse(),
	};
	parsed.map_err(|err| format!("invalid offset {value:?}: {err}"))
}

/// Layers defaults, the optional settings file and `ANIMPAK_*` variables
fn load_config(path: Option<&Path>) -> Result<DisplayConfig> {
	let mut builder = config::Config::builder();
	if let Some(path) = path {
		builder = builder.add_source(config::File::from(path).required(true));
	}
	let settings = builder
		.add_source(
			config::Environment::with_prefix("ANIMPAK")
				.prefix_separator("_")
				.separator("__")
				.try_parsing(true),
		)
		.build()
		.context("Failed to read settings")?;

	let config: DisplayConfig = settings.try_deserialize().context("Invalid settings")?;
	Ok(config)
}

impl ImageArgs {
	fn settings(&self) -> Result<DisplayConfig> {
		let mut config = load_config(self.config.as_deref())?;
		if let Some(base_offset) = self.base_offset {
			config.base_offset = base_offset;
		}
		if let Some(read_chunk) = self.read_chunk {
			config.stream.read_chunk = read_chunk;
		}
		config.validate()?;
		Ok(config)
	}

	fn open(&self) -> Result<(DisplayConfig, ByteStore<FileMedium>, Catalog)> {
		let config = self.settings()?;
		let medium = FileMedium::open(&self.image)
			.with_context(|| format!("Failed to open {}", self.image.display()))?
			.with_label(config.partition_label.clone());
		let mut store = ByteStore::with_write_chunk(medium, config.write_chunk);
		let catalog = Catalog::open(&mut store, config.base_offset)
			.with_context(|| format!("No PACK container at 0x{:08X}", config.base_offset))?;
		Ok((config, store, catalog))
	}
}

fn run_list(args: ImageArgs) -> Result<()> {
	let (_, _, catalog) = args.open()?;
	for name in catalog.list_names() {
		println!("{name}");
	}
	Ok(())
}

#[derive(Serialize)]
struct InspectReport {
	image: String,
	base_offset: u32,
	animations: Vec<AnimationReport>,
}

#[derive(Serialize)]
struct AnimationReport {
	name: String,
	offset: u32,
	length: u32,
	frame_count: Option<u16>,
	frame_data_size: Option<u32>,
	audio_data_size: Option<u32>,
	frame_sizes: Vec<u32>,
	error: Option<String>,
}

fn inspect_entry(
	store: &mut ByteStore<FileMedium>,
	streamer: &FrameStreamer,
	entry: &TableEntry,
) -> AnimationReport {
	let mut report = AnimationReport {
		name: entry.name(),
		offset: entry.offset,
		length: entry.length,
		frame_count: None,
		frame_data_size: None,
		audio_data_size: None,
		frame_sizes: Vec::new(),
		error: None,
	};

	let header = match streamer.anim_header(store, entry) {
		Ok(header) => header,
		Err(err) => {
			report.error = Some(err.to_string());
			return report;
		}
	};
	report.frame_count = Some(header.frame_count);
	report.frame_data_size = Some(header.frame_data_size);
	report.audio_data_size = Some(header.audio_data_size);

	for index in 0..header.frame_count {
		let addr = header.frame_entry_addr(entry.offset, index);
		let read = u32::try_from(addr)
			.map_err(|_| anyhow::anyhow!("frame table entry at 0x{addr:X} is out of range"))
			.and_then(|addr| Ok(store.read_array::<{ FrameTableEntry::SIZE }>(addr)?))
			.and_then(|bytes| Ok(FrameTableEntry::from_bytes(&bytes)?));
		match read {
			Ok(frame) => report.frame_sizes.push(frame.size),
			Err(err) => {
				report.error = Some(format!("frame {index}: {err}"));
				break;
			}
		}
	}
	report
}

fn run_inspect(args: InspectArgs) -> Result<()> {
	let (config, mut store, catalog) = args.image.open()?;
	let streamer = FrameStreamer::new(config.stream)?;

	let report = InspectReport {
		image: args.image.image.display().to_string(),
		base_offset: config.base_offset,
		animations: catalog.iter().map(|entry| inspect_entry(&mut store, &streamer, entry)).collect(),
	};

	if args.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("{} (PACK at 0x{:08X}, {} animations)", report.image, report.base_offset, report.animations.len());
	for anim in &report.animations {
		print!("  {:<32} offset 0x{:08X} length {:>8}", anim.name, anim.offset, anim.length);
		match (&anim.error, anim.frame_count) {
			(Some(err), _) => println!("  ERROR: {err}"),
			(None, Some(count)) => {
				let total: u64 = anim.frame_sizes.iter().map(|&s| u64::from(s)).sum();
				println!("  {count} frames, {total} stream bytes");
			}
			(None, None) => println!(),
		}
	}
	Ok(())
}

fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
	let img = RgbImage::from_raw(u32::from(frame.width()), u32::from(frame.height()), frame.to_rgb888())
		.context("Failed to create frame image")?;
	img.save(path).with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
	let (config, mut store, catalog) = args.image.open()?;
	let entry = *catalog.require(&args.name)?;
	let mut streamer = FrameStreamer::new(config.stream)?;
	let mut frame = FrameBuffer::for_config(&config.stream);

	let output = args.output.unwrap_or_else(|| PathBuf::from(format!("{}_frames", args.name)));
	fs::create_dir_all(&output)?;

	let frame_count = usize::from(streamer.anim_header(&mut store, &entry)?.frame_count);
	for index in 0..frame_count {
		let stats = streamer
			.decode_frame(&mut store, &entry, index, &mut frame)
			.with_context(|| format!("Failed to decode frame {index}"))?;
		if !stats.is_complete(frame.len()) {
			warn!("frame {index}: padded after {} pixels", stats.pixels);
		}
		save_png(&frame, &output.join(format!("frame_{index:04}.png")))?;
	}

	println!("Exported {frame_count} frames to {}", output.display());
	Ok(())
}

/// Loads a PNG and converts it to RGB565 at the configured frame size
fn load_frame(path: &Path, config: &StreamConfig) -> Result<Vec<u16>> {
	let img = image::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let (width, height) = (u32::from(config.width), u32::from(config.height));
	let img = if img.width() == width && img.height() == height {
		img.to_rgb8()
	} else {
		info!("{}: resizing {}x{} to {}x{}", path.display(), img.width(), img.height(), width, height);
		img.resize_exact(width, height, FilterType::Triangle).to_rgb8()
	};
	Ok(img.pixels().map(|p| color::rgb565(p[0], p[1], p[2])).collect())
}

fn collect_frames(dir: &Path) -> Vec<PathBuf> {
	WalkDir::new(dir)
		.max_depth(1)
		.sort_by_file_name()
		.into_iter()
		.filter_map(|entry| match entry {
			Ok(entry) => Some(entry),
			Err(err) => {
				warn!("{err}");
				None
			}
		})
		.filter(|entry| entry.file_type().is_file())
		.map(walkdir::DirEntry::into_path)
		.filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")))
		.collect()
}

fn run_build(args: BuildArgs) -> Result<()> {
	if !args.input.is_dir() {
		bail!("{} is not a directory", args.input.display());
	}
	let mut config = load_config(args.config.as_deref())?;
	if let Some(base_offset) = args.base_offset {
		config.base_offset = base_offset;
	}
	config.validate()?;

	let mut pack = PackBuilder::new();
	for dir in WalkDir::new(&args.input).min_depth(1).max_depth(1).sort_by_file_name() {
		let dir = dir?;
		if !dir.file_type().is_dir() {
			continue;
		}
		let name = dir.file_name().to_string_lossy().into_owned();
		let frames = collect_frames(dir.path());
		if frames.is_empty() {
			warn!("{name}: no PNG frames, skipped");
			continue;
		}

		let mut animation = AnimationBuilder::new(name.as_str())?;
		for path in &frames {
			animation.add_frame(&load_frame(path, &config.stream)?);
		}
		info!("{name}: {} frames", animation.frame_count());
		pack.add(animation).with_context(|| format!("Cannot add animation {name}"))?;
	}

	let mut region = pack.to_region(config.base_offset)?;
	if let Some(size) = args.region_size {
		if region.len() > size as usize {
			bail!("Container needs {} bytes, region is {size}", region.len());
		}
		region.resize(size as usize, 0xFF);
	}
	fs::write(&args.output, &region).with_context(|| format!("Failed to write {}", args.output.display()))?;

	println!("Wrote {} animations ({} bytes) to {}", pack.len(), region.len(), args.output.display());
	Ok(())
}

/// Sink that saves each presented frame as a numbered PNG
struct PngSink {
	dir: PathBuf,
	frame: FrameBuffer,
	written: usize,
}

impl FrameSink for PngSink {
	fn draw_bitmap(&mut self, x: u16, y: u16, width: u16, height: u16, pixels: &[u16]) -> Result<(), SinkError> {
		if (x, y, width, height) != (0, 0, self.frame.width(), self.frame.height()) {
			return Err("PngSink only accepts full frames".into());
		}
		self.frame.pixels_mut().copy_from_slice(pixels);
		let path = self.dir.join(format!("played_{:05}.png", self.written));
		save_png(&self.frame, &path).map_err(|err| SinkError::from(format!("{err:#}")))?;
		self.written += 1;
		Ok(())
	}

	fn clear(&mut self) -> Result<(), SinkError> {
		self.frame.clear();
		Ok(())
	}
}

/// Sink that only logs a digest of each frame
struct LogSink {
	presented: usize,
}

impl FrameSink for LogSink {
	fn draw_bitmap(&mut self, _x: u16, _y: u16, width: u16, height: u16, pixels: &[u16]) -> Result<(), SinkError> {
		let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_le_bytes()).collect();
		info!("frame {:>4}: {}x{} md5 {}", self.presented, width, height, hex::encode(Md5::digest(&bytes)));
		self.presented += 1;
		Ok(())
	}

	fn clear(&mut self) -> Result<(), SinkError> {
		info!("clear");
		Ok(())
	}
}

fn play_with<S: FrameSink>(args: &PlayArgs, config: DisplayConfig, sink: S) -> Result<()> {
	let delay = args.delay.unwrap_or(config.frame_delay_ms);
	let medium = FileMedium::open(&args.image.image)?.with_label(config.partition_label.clone());
	let display = AnimationDisplay::new(medium, sink, config)?;

	for pass in 0..args.passes {
		let outcome = display.play(&args.name, false, delay)?;
		info!("pass {}: {:?}", pass + 1, outcome);
	}
	Ok(())
}

fn run_play(args: PlayArgs) -> Result<()> {
	let config = args.image.settings()?;
	match &args.output {
		Some(dir) => {
			fs::create_dir_all(dir)?;
			let sink = PngSink {
				dir: dir.clone(),
				frame: FrameBuffer::for_config(&config.stream),
				written: 0,
			};
			play_with(&args, config, sink)
		}
		None => play_with(
			&args,
			config,
			LogSink {
				presented: 0,
			},
		),
	}
}

fn run_verify(args: ImageArgs) -> Result<()> {
	let (config, mut store, catalog) = args.open()?;
	let mut streamer = FrameStreamer::new(config.stream)?;
	let mut frame = FrameBuffer::for_config(&config.stream);
	let mut failures = 0usize;

	for entry in &catalog {
		let digest = match store.read(entry.offset, entry.length as usize) {
			Ok(bytes) => hex::encode(Md5::digest(&bytes)),
			Err(err) => {
				failures += 1;
				println!("✗ {:<32} {}", entry.name(), err);
				continue;
			}
		};

		let frame_count = streamer.frame_count(&mut store, entry);
		let mut padded = 0usize;
		let mut failed = None;
		for index in 0..usize::from(frame_count) {
			match streamer.decode_frame(&mut store, entry, index, &mut frame) {
				Ok(stats) if !stats.is_complete(frame.len()) => padded += 1,
				Ok(_) => {}
				Err(err) => {
					failed = Some(format!("frame {index}: {err}"));
					break;
				}
			}
		}

		match failed {
			Some(err) => {
				failures += 1;
				println!("✗ {:<32} {digest}  {err}", entry.name());
			}
			None if frame_count == 0 => {
				failures += 1;
				println!("✗ {:<32} {digest}  no frames", entry.name());
			}
			None => println!("✓ {:<32} {digest}  {frame_count} frames, {padded} padded", entry.name()),
		}
	}

	if failures > 0 {
		bail!("{failures} of {} animations failed verification", catalog.len());
	}
	Ok(())
}

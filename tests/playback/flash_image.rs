//! Catalog and streaming decode through `FileMedium`

use std::{
	fs,
	io::{Seek, SeekFrom, Write},
};

use animpak_rs::prelude::*;
use animpak_rs::animpak_vfs::IoMedium;

use crate::{HEIGHT, WIDTH, build_pack, column_frames, stream_config};

const REGION_SIZE: usize = 64 * 1024;

fn write_image(base_offset: u32) -> tempfile::NamedTempFile {
	let mut region = build_pack().to_region(base_offset).unwrap();
	region.resize(REGION_SIZE, 0xFF);

	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(&region).unwrap();
	file.flush().unwrap();
	file
}

#[test_log::test]
fn test_decode_from_file_at_every_chunk_size() {
	let image = write_image(0x2000);
	let mut store = ByteStore::new(FileMedium::open(image.path()).unwrap());
	assert_eq!(store.size() as usize, REGION_SIZE);

	let catalog = Catalog::open(&mut store, 0x2000).unwrap();
	assert_eq!(catalog.list_names(), vec!["meter", "solid"]);
	let entry = *catalog.require("meter").unwrap();

	for read_chunk in [1, 2, 3, 5, 7, 256, 4096] {
		let config = stream_config(read_chunk);
		let mut streamer = FrameStreamer::new(config).unwrap();
		let mut frame = FrameBuffer::for_config(&config);

		assert_eq!(streamer.frame_count(&mut store, &entry), WIDTH);
		for (index, expected) in column_frames(usize::from(WIDTH)).iter().enumerate() {
			streamer.decode_frame(&mut store, &entry, index, &mut frame).unwrap();
			assert_eq!(frame.pixels(), &expected[..], "frame {index} with chunk {read_chunk}");
		}
	}
}

#[test_log::test]
fn test_partition_inside_larger_image() {
	// 4 KiB of other data, then a 16 KiB partition holding the container at offset 0x100
	let mut container = build_pack().to_region(0x100).unwrap();
	container.resize(16 * 1024, 0xFF);

	let mut file = tempfile::tempfile().unwrap();
	file.write_all(&[0xAB; 4096]).unwrap();
	file.write_all(&container).unwrap();
	file.seek(SeekFrom::Start(0)).unwrap();

	let medium = IoMedium::new(file, 4096, 16 * 1024).with_label("animations");
	let mut store = ByteStore::new(medium);
	assert_eq!(store.label(), "animations");

	let catalog = Catalog::open(&mut store, 0x100).unwrap();
	let entry = *catalog.require("solid").unwrap();
	let config = stream_config(16);
	let mut streamer = FrameStreamer::new(config).unwrap();
	let mut frame = FrameBuffer::for_config(&config);
	streamer.decode_frame(&mut store, &entry, 0, &mut frame).unwrap();
	assert_eq!(frame.pixels(), &[color::RED; 32]);

	let header = streamer.anim_header(&mut store, &entry).unwrap();
	assert_eq!(header.audio_data_size, 100);

	// reads past the partition end never reach the surrounding file
	assert!(store.read(16 * 1024 - 2, 4).unwrap_err().is_out_of_bounds());
}

#[test_log::test]
fn test_missing_container() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(&[0xFF; 1024]).unwrap();
	file.flush().unwrap();

	let mut store = ByteStore::new(FileMedium::open(file.path()).unwrap());
	let err = Catalog::open(&mut store, 0).unwrap_err();
	assert!(matches!(err.as_format(), Some(FormatError::BadMagic { .. })));
	assert!(Catalog::open(&mut store, 2048).unwrap_err().is_out_of_bounds());
}

#[test_log::test]
fn test_chunked_writes_land_in_file() {
	let image = write_image(0);
	let mut store = ByteStore::with_write_chunk(FileMedium::open_rw(image.path()).unwrap(), 16);

	let patch: Vec<u8> = (0..100u8).collect();
	store.write(0x8000, &patch).unwrap();
	assert_eq!(store.read(0x8000, patch.len()).unwrap(), patch);
	drop(store);

	let bytes = fs::read(image.path()).unwrap();
	assert_eq!(&bytes[0x8000..0x8000 + patch.len()], &patch[..]);
	assert_eq!(bytes.len(), REGION_SIZE);
}

#[test]
fn test_frame_geometry() {
	assert_eq!(stream_config(1).frame_pixels(), usize::from(WIDTH) * usize::from(HEIGHT));
}

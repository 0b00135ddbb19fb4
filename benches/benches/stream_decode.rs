//! Benchmark suite for streaming frame decode
//!
//! Measures how the read chunk size trades memory against per-read overhead,
//! and what the catalog load costs at the 70-entry limit.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use animpak_benches::{Pattern, generate_catalog, generate_pack, sizes};
use animpak_types::{Catalog, FrameBuffer, FrameStreamer, StreamConfig, rle};
use animpak_vfs::{ByteStore, MemoryMedium};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const FRAMES: usize = 8;

/// Decode every frame of a panel-sized animation at several chunk sizes
fn bench_chunk_sizes(c: &mut Criterion) {
	let (width, height) = sizes::PANEL;

	for pattern in [Pattern::Flat, Pattern::Noisy] {
		let mut group = c.benchmark_group(format!("stream_decode_{pattern:?}").to_lowercase());
		let mut store = ByteStore::new(MemoryMedium::from_bytes(generate_pack(width, height, FRAMES, pattern).unwrap()));
		let catalog = Catalog::open(&mut store, 0).unwrap();
		let entry = *catalog.require("bench").unwrap();

		group.throughput(Throughput::Elements((usize::from(width) * usize::from(height) * FRAMES) as u64));
		for chunk in [1usize, 3, 64, 256] {
			let config = StreamConfig::new(width, height, chunk);
			let mut streamer = FrameStreamer::new(config).unwrap();
			let mut frame = FrameBuffer::for_config(&config);

			group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, _| {
				b.iter(|| {
					for index in 0..FRAMES {
						streamer.decode_frame(&mut store, &entry, index, &mut frame).unwrap();
					}
					black_box(frame.pixels()[0])
				});
			});
		}

		group.finish();
	}
}

/// In-memory decode of the same streams, the lower bound for streaming
fn bench_in_memory(c: &mut Criterion) {
	let (width, height) = sizes::QVGA;
	let pixels = usize::from(width) * usize::from(height);
	let mut group = c.benchmark_group("rle_in_memory");
	group.throughput(Throughput::Elements(pixels as u64));

	for pattern in [Pattern::Flat, Pattern::Noisy] {
		let frame = &animpak_benches::generate_frames(width, height, 1, pattern)[0];
		let stream = rle::encode(frame);
		group.bench_with_input(BenchmarkId::new("decode", format!("{pattern:?}")), &stream, |b, stream| {
			b.iter(|| black_box(rle::decode(black_box(stream), pixels)));
		});
	}

	group.finish();
}

/// Load a full 70-entry catalog
fn bench_catalog_open(c: &mut Criterion) {
	let mut group = c.benchmark_group("catalog");
	let mut store = ByteStore::new(MemoryMedium::from_bytes(generate_catalog(70).unwrap()));

	group.bench_function("open_70", |b| {
		b.iter(|| black_box(Catalog::open(&mut store, 0).unwrap().len()));
	});
	group.bench_function("find_last", |b| {
		let catalog = Catalog::open(&mut store, 0).unwrap();
		b.iter(|| black_box(catalog.find(black_box("anim_69")).is_some()));
	});

	group.finish();
}

criterion_group!(benches, bench_chunk_sizes, bench_in_memory, bench_catalog_open);

criterion_main!(benches);

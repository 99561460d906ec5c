use std::fmt::Write as _;
use std::io::Write;

use bencher::{benchmark_group, benchmark_main, Bencher};
use oxtraj::{
    chunk::ReadBlocks, index, index_file, parse_conf, Exhaustive, Greedy, IndexOptions,
    SourceKind,
};

benchmark_main!(indexing, parsing);
benchmark_group!(
    indexing,
    index_exhaustive,
    index_greedy,
    index_mapped,
    index_small_windows
);
benchmark_group!(parsing, parse_configuration);

const NCONFS: usize = 200;
const NATOMS: usize = 400;

/// A trajectory of `NCONFS` configurations with `NATOMS` particles each.
fn trajectory() -> Vec<u8> {
    let mut text = String::new();
    for idx in 0..NCONFS {
        text.push_str(&configuration(idx));
    }
    text.into_bytes()
}

fn configuration(idx: usize) -> String {
    let mut text = String::new();
    writeln!(text, "t = {}", idx * 1000).unwrap();
    writeln!(text, "b = 40.0000 40.0000 40.0000").unwrap();
    writeln!(text, "E = -1.4521 -1.5330 0.0809").unwrap();
    for atom in 0..NATOMS {
        let x = (idx * NATOMS + atom) as f64 * 0.01;
        writeln!(
            text,
            "{x:.4} {:.4} {:.4} 1.0000 0.0000 0.0000 0.0000 0.0000 1.0000",
            x + 0.5,
            x - 0.5,
        )
        .unwrap();
    }
    text
}

fn index_exhaustive(b: &mut Bencher) {
    let bytes = trajectory();
    b.bytes = bytes.len() as u64;
    b.iter(|| {
        let source = ReadBlocks::new(&bytes[..], bytes.len() as u64, 1_000_000);
        index(source, &Exhaustive).unwrap()
    });
}

fn index_greedy(b: &mut Bencher) {
    let bytes = trajectory();
    b.bytes = bytes.len() as u64;
    b.iter(|| {
        let source = ReadBlocks::new(&bytes[..], bytes.len() as u64, 1_000_000);
        index(source, &Greedy).unwrap()
    });
}

fn index_mapped(b: &mut Bencher) {
    let bytes = trajectory();
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    b.bytes = bytes.len() as u64;
    b.iter(|| index_file(&file, SourceKind::Mapped, &IndexOptions::default()).unwrap());
}

fn index_small_windows(b: &mut Bencher) {
    let bytes = trajectory();
    b.bytes = bytes.len() as u64;
    b.iter(|| {
        let source = ReadBlocks::new(&bytes[..], bytes.len() as u64, 1_000);
        index(source, &Exhaustive).unwrap()
    });
}

fn parse_configuration(b: &mut Bencher) {
    let text = configuration(7);
    b.bytes = text.len() as u64;
    b.iter(|| parse_conf(&text, NATOMS).unwrap());
}

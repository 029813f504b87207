//! Headerless raw sample files in native byte order.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

pub trait RawSample: Copy {
    const WIDTH: usize;
    fn from_ne(bytes: &[u8]) -> Self;
    fn extend_ne(self, out: &mut Vec<u8>);
}

impl RawSample for i16 {
    const WIDTH: usize = 2;

    fn from_ne(b: &[u8]) -> Self {
        i16::from_ne_bytes([b[0], b[1]])
    }

    fn extend_ne(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }
}

impl RawSample for f32 {
    const WIDTH: usize = 4;

    fn from_ne(b: &[u8]) -> Self {
        f32::from_ne_bytes([b[0], b[1], b[2], b[3]])
    }

    fn extend_ne(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }
}

pub fn read_all<T: RawSample>(path: &Path) -> Result<Vec<T>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let trailing = bytes.len() % T::WIDTH;
    if trailing != 0 {
        warn!("{}: ignoring {} trailing byte(s)", path.display(), trailing);
    }
    Ok(bytes.chunks_exact(T::WIDTH).map(T::from_ne).collect())
}

pub fn write_all<T: RawSample>(path: &Path, samples: &[T]) -> Result<()> {
    let mut bytes = Vec::with_capacity(samples.len() * T::WIDTH);
    for &s in samples {
        s.extend_ne(&mut bytes);
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

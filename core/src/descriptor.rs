use crate::KeyPoint;

/// Number of bytes in one binary descriptor (256 bits).
pub const DESCRIPTOR_BYTES: usize = 32;

/// A 256-bit rotation-steered binary descriptor tied to its keypoint.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub bits: [u8; DESCRIPTOR_BYTES],
    pub keypoint: KeyPoint,
}

impl Descriptor {
    pub fn new(bits: [u8; DESCRIPTOR_BYTES], keypoint: KeyPoint) -> Self {
        Self { bits, keypoint }
    }

    /// Bit-difference count against another descriptor. Smaller is more
    /// similar.
    pub fn hamming_distance(&self, other: &Descriptor) -> u32 {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }
}

/// Descriptors extracted from one image, in keypoint order.
#[derive(Debug, Clone, Default)]
pub struct Descriptors {
    pub descriptors: Vec<Descriptor>,
}

impl Descriptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            descriptors: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, desc: Descriptor) {
        self.descriptors.push(desc);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }
}

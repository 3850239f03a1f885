//! Symbol timing recovery over the thresholded sample stream.
//!
//! A sector is a maximal run of one binary level. Sector width, not a
//! fixed clock, decides how many bits the run represents, which lets
//! the receiver absorb small baud-rate drift.

/// Maximal run of constant binary level, `[left_edge, right_edge)` in
/// sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub left_edge: usize,
    pub right_edge: usize,
    pub value: u8,
}

impl Sector {
    pub fn width(&self) -> usize {
        self.right_edge - self.left_edge
    }

    pub fn center(&self) -> usize {
        self.left_edge + self.width() / 2
    }
}

/// Detect plateaus of consecutive ones, then fill the complementary
/// gaps (including before the first and after the last plateau) with
/// zero sectors. The result partitions `0..digital.len()` with no
/// gaps and no overlaps.
pub fn find_level_sectors(digital: &[u8]) -> Vec<Sector> {
    let mut sectors = Vec::new();
    let mut cursor = 0usize;
    let mut i = 0usize;

    while i < digital.len() {
        if digital[i] != 0 {
            let start = i;
            while i < digital.len() && digital[i] != 0 {
                i += 1;
            }
            if cursor < start {
                sectors.push(Sector {
                    left_edge: cursor,
                    right_edge: start,
                    value: 0,
                });
            }
            sectors.push(Sector {
                left_edge: start,
                right_edge: i,
                value: 1,
            });
            cursor = i;
        } else {
            i += 1;
        }
    }

    if cursor < digital.len() {
        sectors.push(Sector {
            left_edge: cursor,
            right_edge: digital.len(),
            value: 0,
        });
    }

    sectors
}

/// Re-slice each sector into `round(width / samples_per_bit)` equal
/// sub-sectors (at least one), each inheriting the level. The output
/// is one sector per recovered bit, in time order.
pub fn slice_into_bits(sectors: &[Sector], samples_per_bit: f64) -> Vec<Sector> {
    let mut bits = Vec::new();
    for sector in sectors {
        let count = ((sector.width() as f64 / samples_per_bit).round() as usize).max(1);
        let step = sector.width() as f64 / count as f64;
        for k in 0..count {
            let left = sector.left_edge + (k as f64 * step).round() as usize;
            let right = if k + 1 == count {
                sector.right_edge
            } else {
                sector.left_edge + ((k + 1) as f64 * step).round() as usize
            };
            bits.push(Sector {
                left_edge: left,
                right_edge: right,
                value: sector.value,
            });
        }
    }
    bits
}

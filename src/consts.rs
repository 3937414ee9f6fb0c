/// Size of the dump header, two `u32` holding `jmax` and `imax`.
pub const HEADER_BYTES: u64 = 8;

/// Size of one grid point record, three `f32` holding `(x, y, u)`.
pub const RECORD_BYTES: u64 = 12;

/// Values per grid point record.
pub const RECORD_VALUES: usize = 3;

/// One sided second order stencils need three points.
pub const MIN_POINTS_PER_AXIS: usize = 3;

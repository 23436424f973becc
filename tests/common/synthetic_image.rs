/// Generates an RGBA gel image with bright vertical bands on a dark background.
///
/// Each band covers columns `[x0, x1)` and rows `[rows.0, rows.1)`; everything
/// else has gray value `background`.
pub fn banded_gel_rgba(
    width: usize,
    height: usize,
    bands: &[(usize, usize)],
    rows: (usize, usize),
    background: u8,
    band: u8,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let in_rows = y >= rows.0 && y < rows.1;
            let in_band = bands.iter().any(|&(x0, x1)| x >= x0 && x < x1);
            let v = if in_rows && in_band { band } else { background };
            img.extend_from_slice(&[v, v, v, 255]);
        }
    }
    img
}

/// Three 10 px bands separated by 10 px gaps on a 100x50 image.
pub fn three_lane_gel() -> Vec<u8> {
    banded_gel_rgba(100, 50, &THREE_BANDS, (10, 40), 20, 220)
}

pub const THREE_BANDS: [(usize, usize); 3] = [(20, 30), (40, 50), (60, 70)];

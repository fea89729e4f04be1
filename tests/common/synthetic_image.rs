/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}

/// Gray image with a filled disk of `fg` on a `bg` background.
pub fn disk_u8(
    width: usize,
    height: usize,
    center: (usize, usize),
    radius: usize,
    fg: u8,
    bg: u8,
) -> Vec<u8> {
    let (cx, cy) = (center.0 as i64, center.1 as i64);
    let r2 = (radius * radius) as i64;
    let mut img = vec![bg; width * height];
    for y in 0..height {
        for x in 0..width {
            let dx = x as i64 - cx;
            let dy = y as i64 - cy;
            if dx * dx + dy * dy <= r2 {
                img[y * width + x] = fg;
            }
        }
    }
    img
}

/// Gray image with a `thickness`-pixel band of `fg` centered on the circle of
/// `radius`, on a `bg` background.
pub fn ring_u8(
    width: usize,
    height: usize,
    center: (usize, usize),
    radius: usize,
    thickness: usize,
    fg: u8,
    bg: u8,
) -> Vec<u8> {
    assert!(thickness > 0 && thickness <= 2 * radius);
    let inner = radius as f64 - thickness as f64 / 2.0;
    let outer = inner + thickness as f64;
    let (cx, cy) = (center.0 as f64, center.1 as f64);
    let mut img = vec![bg; width * height];
    for y in 0..height {
        for x in 0..width {
            let d = (x as f64 - cx).hypot(y as f64 - cy);
            if d >= inner && d < outer {
                img[y * width + x] = fg;
            }
        }
    }
    img
}

/// RGB image split vertically at `split`: `left` color, then `right` color.
pub fn vertical_step_rgb(
    width: usize,
    height: usize,
    split: usize,
    left: [u8; 3],
    right: [u8; 3],
) -> Vec<u8> {
    let mut img = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            img.extend_from_slice(if x < split { &left } else { &right });
        }
    }
    img
}

/// RGB image tiled with `colors` in square patches of side `patch`, row by
/// row, cycling through the list.
pub fn color_patches_rgb(width: usize, height: usize, patch: usize, colors: &[[u8; 3]]) -> Vec<u8> {
    assert!(patch > 0 && !colors.is_empty());
    let per_row = width.div_ceil(patch);
    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let idx = (y / patch) * per_row + x / patch;
            img.extend_from_slice(&colors[idx % colors.len()]);
        }
    }
    img
}

/// Deterministic pseudo-random samples (xorshift), for content-agnostic checks.
pub fn noise_u8(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

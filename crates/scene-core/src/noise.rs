use rand::prelude::*;

// Skew/unskew factors for the 2D simplex grid.
const F2: f32 = 0.366_025_42; // (sqrt(3) - 1) / 2
const G2: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6

// Twelve gradient directions; only x/y are used in 2D sampling.
const GRAD3: [[f32; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Seeded 2D simplex noise field.
///
/// The permutation table is shuffled once at construction and immutable
/// afterwards, so a given seed always reproduces the same field. Sampling is
/// total over all real inputs and returns values in roughly \[-1, 1\].
pub struct NoiseField {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl NoiseField {
    /// Build a field from an explicit RNG so callers control reproducibility.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut source = [0u8; 256];
        for (i, v) in source.iter_mut().enumerate() {
            *v = i as u8;
        }
        source.shuffle(rng);

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = source[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }
        Self { perm, perm_mod12 }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut StdRng::seed_from_u64(seed))
    }

    /// Sample the field at `(x, y)`.
    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        // Skew input space to find which simplex cell we are in.
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Which of the two triangles of the unit square holds the point.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;

        let gi0 = self.perm_mod12[ii + self.perm[jj] as usize] as usize;
        let gi1 = self.perm_mod12[ii + i1 + self.perm[jj + j1] as usize] as usize;
        let gi2 = self.perm_mod12[ii + 1 + self.perm[jj + 1] as usize] as usize;

        let n0 = corner(x0, y0, gi0);
        let n1 = corner(x1, y1, gi1);
        let n2 = corner(x2, y2, gi2);

        70.0 * (n0 + n1 + n2)
    }
}

#[inline]
fn corner(x: f32, y: f32, gi: usize) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let g = GRAD3[gi];
        t * t * t * t * (g[0] * x + g[1] * y)
    }
}

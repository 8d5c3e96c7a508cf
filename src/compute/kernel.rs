use crate::error::{Result, SemError};
use crate::store::NoiseSpec;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use statrs::distribution::Normal;
use wide::f64x4;

/// `dest[i] += coef * src[i]`, four lanes at a time.
#[inline(always)]
pub fn axpy(dest: &mut [f64], coef: f64, src: &[f64]) {
    debug_assert_eq!(dest.len(), src.len());
    let c = f64x4::splat(coef);

    let mut d_chunks = dest.chunks_exact_mut(4);
    let mut s_chunks = src.chunks_exact(4);
    for (d, s) in (&mut d_chunks).zip(&mut s_chunks) {
        let dv = f64x4::from([d[0], d[1], d[2], d[3]]);
        let sv = f64x4::from([s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&(dv + c * sv).to_array());
    }
    for (d, s) in d_chunks.into_remainder().iter_mut().zip(s_chunks.remainder()) {
        *d += coef * s;
    }
}

/// Overwrites `dest` with independent draws from `noise`.
pub fn fill_noise<R: Rng + ?Sized>(dest: &mut [f64], noise: NoiseSpec, rng: &mut R) -> Result<()> {
    // A zero spread is a deterministic node; neither distribution accepts it.
    if noise.magnitude() == 0.0 {
        dest.fill(0.0);
        return Ok(());
    }

    match noise {
        NoiseSpec::Gaussian { scale } => {
            let dist = Normal::new(0.0, scale).map_err(|e| SemError::structure(format!("Bad noise scale {}: {}", scale, e)))?;
            for v in dest.iter_mut() {
                *v = dist.sample(rng);
            }
        }
        NoiseSpec::Uniform { half_width } => {
            if !(half_width.is_finite() && half_width > 0.0) {
                return Err(SemError::structure(format!("Bad noise half width {}", half_width)));
            }
            // Scaled from the unit interval; the span `2 * half_width` may not be representable.
            let unit = Uniform::new(-1.0f64, 1.0);
            for v in dest.iter_mut() {
                *v = half_width * unit.sample(rng);
            }
        }
    }
    Ok(())
}

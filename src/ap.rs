//! Affinity-propagation message passing over a dense similarity matrix.
//!
//! Two damped recurrences run for a fixed number of sweeps:
//!
//! - responsibility `R(i,k)`: how strongly `i` nominates `k` as its
//!   exemplar, relative to the best competing candidate;
//! - availability `A(i,k)`: how appropriate it is for `i` to pick `k`,
//!   given the support `k` gathers from other rows.
//!
//! The responsibility pass of a sweep completes over the whole matrix
//! before the availability pass starts. The self-availability diagonal is
//! folded in once after the final sweep, and the evidence matrix `R + A`
//! is returned; its row-wise argmax elects exemplars.

use log::debug;

use crate::matrix::MatrixF32;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs `iterations` damped sweeps over `sim` and returns the evidence
/// matrix `R + A`. `damping` is the convex blend λ with the previous
/// iterate, expected in [0, 1).
pub fn propagate(sim: &MatrixF32, iterations: usize, damping: f32) -> MatrixF32 {
    let n = sim.n;
    if n <= 1 {
        return MatrixF32::zeros(n);
    }

    let mut resp = MatrixF32::zeros(n);
    let mut avail = MatrixF32::zeros(n);
    for _ in 0..iterations {
        update_responsibilities(sim, &avail, &mut resp, damping);
        update_availabilities(&resp, &mut avail, damping);
    }

    // Fold the accumulated positive support into the diagonal once the
    // off-diagonal messages have settled.
    let support = positive_column_support(&resp);
    for (k, s) in support.iter().enumerate() {
        let prev = avail.get(k, k);
        avail.set(k, k, (1.0 - damping) * s + damping * prev);
    }
    debug!("affinity propagation finished after {iterations} sweeps over {n} views");

    let mut evidence = resp;
    for (e, a) in evidence.data.iter_mut().zip(avail.data.iter()) {
        *e += *a;
    }
    evidence
}

/// `R(i,k) ← (1−λ)·(S(i,k) − max_{k'≠k}(S(i,k') + A(i,k'))) + λ·R(i,k)`.
fn update_responsibilities(sim: &MatrixF32, avail: &MatrixF32, resp: &mut MatrixF32, lam: f32) {
    let n = sim.n;
    let row_update = |i: usize, out: &mut [f32]| {
        let s_row = sim.row(i);
        let a_row = avail.row(i);
        // Top two of S + A over the row; the runner-up substitutes when the
        // excluded column happens to be the argmax.
        let mut max1 = f32::NEG_INFINITY;
        let mut max2 = f32::NEG_INFINITY;
        let mut arg1 = 0usize;
        for k in 0..n {
            let v = s_row[k] + a_row[k];
            if v > max1 {
                max2 = max1;
                max1 = v;
                arg1 = k;
            } else if v > max2 {
                max2 = v;
            }
        }
        for k in 0..n {
            let competing = if k == arg1 { max2 } else { max1 };
            out[k] = (1.0 - lam) * (s_row[k] - competing) + lam * out[k];
        }
    };
    #[cfg(feature = "parallel")]
    {
        resp.data
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| row_update(i, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        resp.data
            .chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| row_update(i, row));
    }
}

/// `A(i,k) ← (1−λ)·min(0, R(k,k) + Σ_{i'∉{i,k}} max(0, R(i',k))) + λ·A(i,k)`
/// for `i ≠ k`, with the column totals hoisted out of the cell loop.
fn update_availabilities(resp: &MatrixF32, avail: &mut MatrixF32, lam: f32) {
    let n = resp.n;
    // col_total[k] = R(k,k) + Σ_{i'≠k} max(0, R(i',k))
    let mut col_total = vec![0.0f32; n];
    for i in 0..n {
        let row = resp.row(i);
        for (k, total) in col_total.iter_mut().enumerate() {
            if i == k {
                *total += row[k];
            } else if row[k] > 0.0 {
                *total += row[k];
            }
        }
    }
    let row_update = |i: usize, out: &mut [f32]| {
        let r_row = resp.row(i);
        for k in 0..n {
            if i == k {
                continue;
            }
            let excluded = r_row[k].max(0.0);
            let pending = col_total[k] - excluded;
            out[k] = (1.0 - lam) * pending.min(0.0) + lam * out[k];
        }
    };
    #[cfg(feature = "parallel")]
    {
        avail
            .data
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| row_update(i, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        avail
            .data
            .chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| row_update(i, row));
    }
}

/// `Σ_{i'≠k} max(0, R(i',k))` per column.
fn positive_column_support(resp: &MatrixF32) -> Vec<f32> {
    let n = resp.n;
    let mut out = vec![0.0f32; n];
    for i in 0..n {
        let row = resp.row(i);
        for (k, support) in out.iter_mut().enumerate() {
            if i != k && row[k] > 0.0 {
                *support += row[k];
            }
        }
    }
    out
}

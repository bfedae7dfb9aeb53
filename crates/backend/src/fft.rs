//! Radix-2 decimation-in-frequency FFT over the scalar field.

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

/// Below this sub-length the recursion stays on the current thread.
const PARALLEL_THRESHOLD: usize = 64;

/// In-place DFT of `a`: afterwards `a[k] = sum_j a_in[j] * w^(j*k)`.
/// `a.len()` must be a power of two and `w` an `a.len()`-th root of unity.
///
/// Recursion halves fork onto worker threads while the cumulative split
/// count stays within the available parallelism and the sub-length exceeds
/// a threshold; the final bit-reversal restores natural order.
pub fn fft<P: FieldParams>(a: &mut [Field<P>], w: &Field<P>) {
    debug_assert!(a.len().is_power_of_two());
    fft_inner(a, *w, 1);
    bit_reverse(a);
}

fn fft_inner<P: FieldParams>(a: &mut [Field<P>], w: Field<P>, splits: usize) {
    let n = a.len();
    if n == 1 {
        return;
    }
    let m = n >> 1;

    let mut w_pow = w;
    let t = a[0];
    a[0] = t + a[m];
    a[m] = t - a[m];
    for i in 1..m {
        let t = a[i];
        a[i] = t + a[i + m];
        a[i + m] = (t - a[i + m]) * w_pow;
        w_pow *= w;
    }

    if m == 1 {
        return;
    }

    let w_next = w.sqr();
    let (lo, hi) = a.split_at_mut(m);
    let serial = splits > rayon::current_num_threads() || m <= PARALLEL_THRESHOLD;
    if serial {
        fft_inner(lo, w_next, splits);
        fft_inner(hi, w_next, splits);
    } else {
        let splits = splits << 1;
        rayon::join(
            || fft_inner(lo, w_next, splits),
            || fft_inner(hi, w_next, splits),
        );
    }
}

/// Apply the bit-reversal permutation to `a` (length must be a power of two).
pub fn bit_reverse<P: FieldParams>(a: &mut [Field<P>]) {
    let n = a.len();
    if n <= 1 {
        return;
    }
    let shift = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let irev = i.reverse_bits() >> shift;
        if irev > i {
            a.swap(i, irev);
        }
    }
}

//! Construction and evaluation of layered switch schedules.

use tracing::debug;

use crate::bipartite::Bipartite;
use crate::error::Error;
use crate::permutation::Permutation;

/// Configuration of one 2x2 switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Straight,
    Swap,
}

/// Build the layered switch schedule realizing `p`: feeding wires
/// 0..n-1 into the leftmost layer top-to-bottom and reading the rightmost
/// layer top-to-bottom applies `p` (output d carries the input s with
/// pair (s, d)).
///
/// The outer layers have ceil(n/2) slots; for odd n their last slot is a
/// fixed straight pass-through. Inner layer widths follow the recursive
/// split and are exposed through [`schedule_widths`].
pub fn build_switches(p: &Permutation) -> Result<Vec<Vec<SwitchState>>, Error> {
    if !p.is_valid() {
        return Err(Error::InvalidPermutation { len: p.len() });
    }
    debug!(n = p.len(), "building switch schedule");
    Ok(route(p))
}

fn route(p: &Permutation) -> Vec<Vec<SwitchState>> {
    let n = p.len();
    if n <= 1 {
        return Vec::new();
    }
    if n == 2 {
        let identity = p.pairs().iter().all(|&(s, d)| s == d);
        let state = if identity {
            SwitchState::Straight
        } else {
            SwitchState::Swap
        };
        return vec![vec![state]];
    }

    let mut bp = Bipartite::new(p);
    let (pre, post) = bp.switch_states();
    let (p_up, p_down) = bp.inner_permutations();

    let mut upper = route(&p_up);
    let lower = route(&p_down);

    // The lower network is never shallower; level the upper schedule with
    // all-straight layers of its own width.
    let pad_width = p_up.len().div_ceil(2);
    while upper.len() < lower.len() {
        upper.push(vec![SwitchState::Straight; pad_width]);
    }
    debug_assert_eq!(upper.len(), lower.len());

    let mut layers = Vec::with_capacity(lower.len() + 2);
    layers.push(pre);
    for (u, d) in upper.into_iter().zip(lower) {
        let mut layer = u;
        layer.extend(d);
        layers.push(layer);
    }
    layers.push(post);
    layers
}

/// Number of layers in the schedule for n wires.
pub fn schedule_depth(n: usize) -> usize {
    match n {
        0 | 1 => 0,
        2 => 1,
        _ => schedule_depth(n.div_ceil(2)) + 2,
    }
}

/// Slot count of every layer in the schedule for n wires, pads included.
/// This shape is a function of n alone, which lets a flat list of switch
/// states be folded back into layers.
pub fn schedule_widths(n: usize) -> Vec<usize> {
    match n {
        0 | 1 => Vec::new(),
        2 => vec![1],
        _ => {
            let upper_n = n / 2;
            let upper = schedule_widths(upper_n);
            let lower = schedule_widths(n - upper_n);
            let pad_width = upper_n.div_ceil(2);
            let outer = n.div_ceil(2);

            let mut widths = Vec::with_capacity(lower.len() + 2);
            widths.push(outer);
            for (k, lw) in lower.iter().enumerate() {
                let uw = upper.get(k).copied().unwrap_or(pad_width);
                widths.push(uw + lw);
            }
            widths.push(outer);
            widths
        }
    }
}

/// Total slot count of the schedule for n wires.
pub fn switch_count(n: usize) -> usize {
    schedule_widths(n).iter().sum()
}

/// Feed `inputs` through a schedule, applying `switch` at every slot that
/// covers two wires. `switch(state, top, bottom)` returns the pair leaving
/// the slot. Generic over the element and state types so the same walk can
/// evaluate concrete values or emit circuit constraints; states are
/// consumed in a fixed order determined by the schedule shape.
pub fn apply_network<T: Clone, S: Copy>(
    layers: &[Vec<S>],
    inputs: &[T],
    switch: &mut impl FnMut(S, &T, &T) -> (T, T),
) -> Vec<T> {
    let n = inputs.len();
    if n <= 1 {
        return inputs.to_vec();
    }
    if n == 2 {
        // Trailing layers, if any, are leveling pads.
        let (top, bottom) = switch(layers[0][0], &inputs[0], &inputs[1]);
        return vec![top, bottom];
    }

    // Layers past the network's own depth are leveling pads appended when
    // a sibling schedule ran deeper; they pass every wire straight through.
    let depth = schedule_depth(n);
    debug_assert!(layers.len() >= depth);
    let pre = &layers[0];
    let post = &layers[depth - 1];
    let mid = &layers[1..depth - 1];
    let upper_n = n / 2;
    let lower_n = n - upper_n;

    // Input column. An odd last wire passes straight into the lower network.
    let mut after: Vec<T> = inputs.to_vec();
    for (j, &state) in pre.iter().take(upper_n).enumerate() {
        let (top, bottom) = switch(state, &inputs[2 * j], &inputs[2 * j + 1]);
        after[2 * j] = top;
        after[2 * j + 1] = bottom;
    }

    let upper_in: Vec<T> = (0..upper_n).map(|j| after[2 * j].clone()).collect();
    let mut lower_in: Vec<T> = (0..upper_n).map(|j| after[2 * j + 1].clone()).collect();
    if n % 2 == 1 {
        lower_in.push(after[n - 1].clone());
    }

    // Undo the layer concatenation of the construction.
    let upper_widths = schedule_widths(upper_n);
    let pad_width = upper_n.div_ceil(2);
    let mut upper_layers = Vec::with_capacity(mid.len());
    let mut lower_layers = Vec::with_capacity(mid.len());
    for (k, layer) in mid.iter().enumerate() {
        let cut = upper_widths.get(k).copied().unwrap_or(pad_width);
        upper_layers.push(layer[..cut].to_vec());
        lower_layers.push(layer[cut..].to_vec());
    }

    let upper_out = apply_network(&upper_layers, &upper_in, switch);
    let lower_out = apply_network(&lower_layers, &lower_in, switch);

    // Output column, mirroring the input interleave.
    let mut joined: Vec<T> = inputs.to_vec();
    for j in 0..upper_n {
        joined[2 * j] = upper_out[j].clone();
        joined[2 * j + 1] = lower_out[j].clone();
    }
    if n % 2 == 1 {
        joined[n - 1] = lower_out[lower_n - 1].clone();
    }
    let mut outputs = joined.clone();
    for (j, &state) in post.iter().take(upper_n).enumerate() {
        let (top, bottom) = switch(state, &joined[2 * j], &joined[2 * j + 1]);
        outputs[2 * j] = top;
        outputs[2 * j + 1] = bottom;
    }
    outputs
}

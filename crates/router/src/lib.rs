//! AS-Waksman routing networks.
//!
//! An arbitrary-size Waksman network is a layered arrangement of 2x2
//! switches that can realize any permutation of its inputs by an appropriate
//! choice of switch states. [`waksman::build_switches`] produces the layered
//! switch schedule for a given permutation; the construction recursively
//! 2-colors a bipartite multigraph built from adjacent wire pairs.
//!
//! See <https://hal.inria.fr/inria-00072871/document>.

pub mod bipartite;
pub mod error;
pub mod permutation;
pub mod waksman;

pub use error::Error;
pub use permutation::{sorted_with_permutation, Permutation};
pub use waksman::{
    apply_network, build_switches, schedule_depth, schedule_widths, switch_count, SwitchState,
};

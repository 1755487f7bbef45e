//! The reconciliation and downsampling engine: pure functions over domain
//! types, no I/O. The orchestrator in `coinmirror-sync` sequences these
//! against the external collaborators.

mod downsample;
mod normalize;
mod reconcile;
mod window;

pub use downsample::{downsample, percent_change};
pub use normalize::{normalize, Anchor};
pub use reconcile::{reconcile, ReconcilePlan};
pub use window::select_batch;

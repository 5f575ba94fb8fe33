//! Archive persistence.
//!
//! Two pieces of state live under the archive root:
//! - the **ledger** (`download_list.txt`): one append-only line per item
//!   processing attempt, used to skip already-seen ids on later runs
//! - the **partitions**: asset and metadata pairs grouped by creation date
//!
//! ## Directory Structure
//!
//! ```text
//! NASA/
//! ├── download_list.txt     # Ledger (append-only)
//! └── 2021/                 # Year
//!     └── 3/                # Month, not zero-padded
//!         └── 7/            # Day, not zero-padded
//!             ├── PIA_24546.jpg
//!             └── PIA_24546.json
//! ```

pub mod ledger;
pub mod local;

use serde::{Deserialize, Serialize};

// Re-export for convenience
pub use ledger::{Ledger, LedgerStats};
pub use local::LocalArchive;

/// How [`Ledger::exists`] decides that a line mentions a safe id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The safe id occurs anywhere in the raw line. A short id can match a
    /// longer one (`12` matches a line for `123`).
    #[default]
    Substring,
    /// The safe-id field of the line equals the safe id.
    Exact,
}

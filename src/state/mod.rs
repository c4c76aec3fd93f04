//! Reconciliation state and its persisted forms.
//!
//! | Module   | Purpose                                              |
//! |----------|------------------------------------------------------|
//! | `data`   | `SheetState`, JSON hand-off between build and update |
//! | `codec`  | Data Page rendering and verified parsing             |
//! | `digest` | HMAC-SHA-384 signing key                             |

mod codec;
mod data;
mod digest;

pub use codec::{parse_data_page, render_data_page};
pub use data::SheetState;
pub use digest::{DIGEST_HEX_LEN, DataKey};

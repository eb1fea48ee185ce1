//! User interface module
//!
//! - `preview.rs` - preview panel of one session (image, navigation, status)

pub mod preview;

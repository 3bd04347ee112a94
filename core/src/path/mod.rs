//! Describes how names and file modes are represented inside trees and the
//! staging index.

mod file_mode;
pub use file_mode::FileMode;

mod path_mode;
pub use path_mode::PathMode;

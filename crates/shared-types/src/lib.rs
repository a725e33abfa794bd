pub mod error;
pub mod feature_flags;

// Portal domain modules
pub mod article;
pub mod case;
pub mod common;
pub mod display_board;
pub mod judge;
pub mod judgment;
pub mod locale;
pub mod report;
pub mod role;
pub mod search;

pub use error::*;
pub use feature_flags::*;

pub use article::*;
pub use case::*;
pub use common::*;
pub use display_board::*;
pub use judge::*;
pub use judgment::*;
pub use locale::*;
pub use report::*;
pub use role::*;
pub use search::*;

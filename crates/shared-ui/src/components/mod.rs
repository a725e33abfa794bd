// Layout and content
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod page_header;
pub mod pagination;
pub mod search_bar;
pub mod skeleton;

// Form controls
pub mod form_select;
pub mod input;
pub mod textarea;

// Overlays and feedback
pub mod alert_dialog;
pub mod toast;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
pub use skeleton::*;
pub use textarea::*;
pub use toast::*;

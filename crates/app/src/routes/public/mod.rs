mod article;
mod display_board;
mod judges;
mod judgments;
mod news;
mod search;

pub use article::ArticleDetail;
pub use display_board::{court_options, CauseListTable, DisplayBoard};
pub use judges::{JudgeProfile, Judges};
pub use judgments::{JudgmentDetail, Judgments};
pub use news::News;
pub use search::Search;

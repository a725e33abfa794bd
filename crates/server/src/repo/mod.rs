pub mod article;
pub mod case;
pub mod display_board;
pub mod judge;
pub mod judgment;
pub mod report;
pub mod role;

#[cfg(test)]
mod common;

#[cfg(test)]
mod article_tests;

#[cfg(test)]
mod case_tests;

#[cfg(test)]
mod display_board_tests;

#[cfg(test)]
mod judge_tests;

#[cfg(test)]
mod judgment_tests;

#[cfg(test)]
mod permission_tests;

#[cfg(test)]
mod report_tests;

#[cfg(test)]
mod search_tests;

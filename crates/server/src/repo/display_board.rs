use chrono::NaiveDate;
use shared_types::{AppError, CaseResponse, CauseList};
use sqlx::{Pool, Postgres};

/// Build the cause list for a court on a date from the cases scheduled
/// for hearing.
pub async fn cause_list(
    pool: &Pool<Postgres>,
    court: &str,
    date: NaiveDate,
) -> Result<CauseList, AppError> {
    let cases = crate::repo::case::list_for_hearing(pool, court, date).await?;
    let responses: Vec<CaseResponse> = cases.into_iter().map(CaseResponse::from).collect();
    Ok(CauseList::build(court, date, responses))
}

//! Confirmation and optimistic-update state for the admin tables.
//!
//! These types hold no signals and do no I/O; pages keep them in a
//! `Signal` and drive the requests themselves.

use shared_types::{ArticleResponse, CaseResponse};

/// A row whose status can be changed inline.
pub trait StatusRow: Clone {
    fn row_id(&self) -> &str;
    fn status(&self) -> &str;
    fn set_status(&mut self, status: String);
}

impl StatusRow for CaseResponse {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: String) {
        self.status = status;
    }
}

impl StatusRow for ArticleResponse {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: String) {
        self.status = status;
    }
}

/// A status change awaiting confirmation or in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub new_status: String,
}

/// Inline status editing with a confirmation step and optimistic write.
///
/// Picking a status only opens a confirmation. Confirming writes the new
/// status into the local rows before the request is sent; [`finish`]
/// reconciles with the server afterwards.
///
/// [`finish`]: StatusWorkflow::finish
#[derive(Debug, Clone, PartialEq)]
pub struct StatusWorkflow<T> {
    rows: Vec<T>,
    pending: Option<StatusChange>,
    /// The change sent to the server and the status it replaced.
    in_flight: Option<(StatusChange, String)>,
}

impl<T: StatusRow> Default for StatusWorkflow<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: StatusRow> StatusWorkflow<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            pending: None,
            in_flight: None,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Replace the local rows with a fresh fetch. A pending confirmation
    /// for a row that no longer exists is dropped.
    pub fn replace_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if let Some(p) = &self.pending {
            if !self.rows.iter().any(|r| r.row_id() == p.id) {
                self.pending = None;
            }
        }
    }

    pub fn pending(&self) -> Option<&StatusChange> {
        self.pending.as_ref()
    }

    /// Whether a confirmed change is waiting on the server.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Open a confirmation for `id → new_status`. Ignored for unknown rows,
    /// for the row's current status, and while a change is in flight.
    pub fn request_change(&mut self, id: &str, new_status: &str) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        let Some(row) = self.rows.iter().find(|r| r.row_id() == id) else {
            return false;
        };
        if row.status() == new_status {
            self.pending = None;
            return false;
        }
        self.pending = Some(StatusChange {
            id: id.to_string(),
            new_status: new_status.to_string(),
        });
        true
    }

    /// Close the confirmation; the row shows its stored status again.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Apply the pending change locally and return it for sending.
    pub fn confirm(&mut self) -> Option<StatusChange> {
        let change = self.pending.take()?;
        let row = self.rows.iter_mut().find(|r| r.row_id() == change.id)?;
        let previous = row.status().to_string();
        row.set_status(change.new_status.clone());
        self.in_flight = Some((change.clone(), previous));
        Some(change)
    }

    /// Settle the in-flight change.
    ///
    /// `refreshed` is the list re-fetched after the request; it wins when
    /// present. Without it, success keeps the optimistic status and failure
    /// restores the previous one.
    pub fn finish(&mut self, succeeded: bool, refreshed: Option<Vec<T>>) {
        let in_flight = self.in_flight.take();
        self.pending = None;

        if let Some(rows) = refreshed {
            self.rows = rows;
            return;
        }
        if succeeded {
            return;
        }
        if let Some((change, previous)) = in_flight {
            if let Some(row) = self.rows.iter_mut().find(|r| r.row_id() == change.id) {
                row.set_status(previous);
            }
        }
    }

    /// Status to render for a row: the pending choice while its dialog is
    /// open, otherwise the local value.
    pub fn displayed_status(&self, id: &str) -> Option<String> {
        if let Some(p) = &self.pending {
            if p.id == id {
                return Some(p.new_status.clone());
            }
        }
        self.rows
            .iter()
            .find(|r| r.row_id() == id)
            .map(|r| r.status().to_string())
    }
}

/// Delete confirmation. No request may be issued until [`resolve`] hands
/// back the id.
///
/// [`resolve`]: DeleteFlow::resolve
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteFlow {
    target: Option<String>,
}

impl DeleteFlow {
    pub fn request(&mut self, id: &str) {
        self.target = Some(id.to_string());
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Close the dialog. Returns the id to delete only when confirmed.
    pub fn resolve(&mut self, confirmed: bool) -> Option<String> {
        let target = self.target.take();
        if confirmed {
            target
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        status: String,
    }

    impl StatusRow for Row {
        fn row_id(&self) -> &str {
            &self.id
        }
        fn status(&self) -> &str {
            &self.status
        }
        fn set_status(&mut self, status: String) {
            self.status = status;
        }
    }

    fn row(id: &str, status: &str) -> Row {
        Row {
            id: id.into(),
            status: status.into(),
        }
    }

    fn workflow() -> StatusWorkflow<Row> {
        StatusWorkflow::new(vec![row("a", "pending"), row("b", "draft")])
    }

    #[test]
    fn pending_choice_is_displayed_until_cancel() {
        let mut wf = workflow();
        assert!(wf.request_change("a", "published"));
        assert_eq!(wf.displayed_status("a").as_deref(), Some("published"));
        assert_eq!(wf.rows()[0].status, "pending");

        wf.cancel();
        assert_eq!(wf.displayed_status("a").as_deref(), Some("pending"));
        assert!(wf.pending().is_none());
    }

    #[test]
    fn confirm_writes_optimistically_and_success_keeps_it() {
        let mut wf = workflow();
        wf.request_change("a", "published");
        let change = wf.confirm().unwrap();
        assert_eq!(
            change,
            StatusChange {
                id: "a".into(),
                new_status: "published".into()
            }
        );
        assert!(wf.pending().is_none());
        assert!(wf.is_busy());
        assert_eq!(wf.displayed_status("a").as_deref(), Some("published"));

        wf.finish(true, None);
        assert!(!wf.is_busy());
        assert_eq!(wf.displayed_status("a").as_deref(), Some("published"));
    }

    #[test]
    fn failure_reverts_to_previous_status() {
        let mut wf = workflow();
        wf.request_change("a", "rejected");
        wf.confirm();
        wf.finish(false, None);
        assert_eq!(wf.displayed_status("a").as_deref(), Some("pending"));
    }

    #[test]
    fn refetch_wins_over_local_state() {
        let mut wf = workflow();
        wf.request_change("a", "published");
        wf.confirm();
        wf.finish(false, Some(vec![row("a", "pending"), row("b", "draft")]));
        assert_eq!(wf.displayed_status("a").as_deref(), Some("pending"));

        wf.request_change("b", "published");
        wf.confirm();
        wf.finish(true, Some(vec![row("a", "pending"), row("b", "published")]));
        assert_eq!(wf.displayed_status("b").as_deref(), Some("published"));
    }

    #[test]
    fn no_op_and_unknown_changes_are_ignored() {
        let mut wf = workflow();
        assert!(!wf.request_change("a", "pending"));
        assert!(!wf.request_change("missing", "published"));
        assert!(wf.pending().is_none());
        assert!(wf.confirm().is_none());
    }

    #[test]
    fn changes_are_blocked_while_in_flight() {
        let mut wf = workflow();
        wf.request_change("a", "published");
        wf.confirm();
        assert!(!wf.request_change("b", "published"));
        wf.finish(true, None);
        assert!(wf.request_change("b", "published"));
    }

    #[test]
    fn replace_rows_drops_pending_for_vanished_row() {
        let mut wf = workflow();
        wf.request_change("b", "published");
        wf.replace_rows(vec![row("a", "pending")]);
        assert!(wf.pending().is_none());
        assert_eq!(wf.displayed_status("b"), None);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut flow = DeleteFlow::default();
        flow.request("a");
        assert!(flow.is_open());
        assert_eq!(flow.target(), Some("a"));
        assert_eq!(flow.resolve(false), None);
        assert!(!flow.is_open());

        flow.request("b");
        assert_eq!(flow.resolve(true).as_deref(), Some("b"));
        assert_eq!(flow.resolve(true), None);
    }
}

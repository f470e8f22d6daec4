//! Pipeline classification and the drag-gesture state machine.
//!
//! The engine owns no application data: callers hand it the full record
//! list and it answers with column buckets or, at the end of a drag
//! gesture, a [`StatusChange`] the caller is expected to apply
//! optimistically and persist through the store.

use crate::board::Application;

/// The fixed, ordered set of pipeline columns.
///
/// Every application maps to exactly one column via a case-insensitive
/// match of its status string; anything unrecognized lands in `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    Open,
    Applied,
    Shortlisted,
    Interview,
    Offer,
    Rejected,
    Closed,
}

impl ColumnKey {
    pub const COUNT: usize = 7;

    pub const ALL: [ColumnKey; Self::COUNT] = [
        Self::Open,
        Self::Applied,
        Self::Shortlisted,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
        Self::Closed,
    ];

    /// Resolve a free-form status string to its column. Absent and
    /// unmatched statuses default to the first column.
    pub fn from_status(status: Option<&str>) -> Self {
        let s = status.unwrap_or("Open");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Applied => "Applied",
            Self::Shortlisted => "Shortlisted",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Closed => "Closed",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::str::FromStr for ColumnKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown column '{s}': use open, applied, shortlisted, interview, offer, rejected, closed"
                )
            })
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column with the applications currently bucketed into it.
#[derive(Debug)]
pub struct ColumnView<'a> {
    pub key: ColumnKey,
    pub apps: Vec<&'a Application>,
}

/// Bucket applications into the fixed column sequence, applying an
/// optional case-insensitive substring filter over company and role
/// first. Order within a column is input order.
pub fn classify<'a>(apps: &'a [Application], search: Option<&str>) -> Vec<ColumnView<'a>> {
    let search = search.filter(|q| !q.trim().is_empty());
    let mut views: Vec<ColumnView<'a>> = ColumnKey::ALL
        .into_iter()
        .map(|key| ColumnView { key, apps: Vec::new() })
        .collect();
    for app in apps {
        if let Some(q) = search {
            if !app.matches_search(q) {
                continue;
            }
        }
        let key = ColumnKey::from_status(app.status.as_deref());
        views[key.index()].apps.push(app);
    }
    views
}

/// A completed drop: move application `id` to column `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub to: ColumnKey,
}

/// Transient state for one drag gesture.
///
/// The session is `Idle` between gestures; all per-gesture fields live
/// inside the `Dragging` variant so they cannot outlast it. Both
/// [`DragSession::drop_on`] and [`DragSession::cancel`] return the
/// session to `Idle` unconditionally.
#[derive(Debug, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(DragState),
}

#[derive(Debug)]
pub struct DragState {
    dragged_id: String,
    hover: Option<ColumnKey>,
    /// Nested enter/leave events per column, floored at zero. A column
    /// counts as hovered only while its counter is positive.
    counters: [u32; ColumnKey::COUNT],
}

impl DragSession {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Start a gesture for `id`. A gesture already in progress is
    /// abandoned: only one pointer can be active at a time, so the
    /// newest drag wins.
    pub fn begin(&mut self, id: impl Into<String>) {
        *self = Self::Dragging(DragState {
            dragged_id: id.into(),
            hover: None,
            counters: [0; ColumnKey::COUNT],
        });
    }

    pub fn enter_column(&mut self, col: ColumnKey) {
        if let Self::Dragging(s) = self {
            s.counters[col.index()] += 1;
            s.hover = Some(col);
        }
    }

    /// Balance one `enter_column`. When the column's counter drains to
    /// zero it stops being the hover target, unless a newer column has
    /// already taken over.
    pub fn leave_column(&mut self, col: ColumnKey) {
        if let Self::Dragging(s) = self {
            let counter = &mut s.counters[col.index()];
            *counter = counter.saturating_sub(1);
            if *counter == 0 && s.hover == Some(col) {
                s.hover = None;
            }
        }
    }

    /// Finish the gesture with a drop on `col`. Always resets to `Idle`.
    ///
    /// Returns `None` without emitting a change when no gesture was in
    /// progress, the dragged id is no longer in `apps`, or the target
    /// column is the one the application already occupies.
    pub fn drop_on(&mut self, col: ColumnKey, apps: &[Application]) -> Option<StatusChange> {
        let state = match std::mem::take(self) {
            Self::Dragging(s) => s,
            Self::Idle => return None,
        };
        let app = apps.iter().find(|a| a.id == state.dragged_id)?;
        if ColumnKey::from_status(app.status.as_deref()) == col {
            return None;
        }
        Some(StatusChange { id: state.dragged_id, to: col })
    }

    /// Abandon the gesture without a drop. Never emits a change.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            Self::Dragging(s) => Some(&s.dragged_id),
            Self::Idle => None,
        }
    }

    pub fn hover_column(&self) -> Option<ColumnKey> {
        match self {
            Self::Dragging(s) => s.hover,
            Self::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str, status: Option<&str>) -> Application {
        let mut a = Application::new(id, "Acme", "Engineer");
        a.status = status.map(String::from);
        a
    }

    fn named(id: &str, company: &str, role: &str) -> Application {
        Application::new(id, company, role)
    }

    // -----------------------------------------------------------------------
    // Column resolution
    // -----------------------------------------------------------------------

    #[test]
    fn from_status_matches_case_insensitively() {
        assert_eq!(ColumnKey::from_status(Some("applied")), ColumnKey::Applied);
        assert_eq!(ColumnKey::from_status(Some("APPLIED")), ColumnKey::Applied);
        assert_eq!(ColumnKey::from_status(Some("Interview")), ColumnKey::Interview);
    }

    #[test]
    fn from_status_defaults_to_open() {
        assert_eq!(ColumnKey::from_status(None), ColumnKey::Open);
        assert_eq!(ColumnKey::from_status(Some("Bogus")), ColumnKey::Open);
        assert_eq!(ColumnKey::from_status(Some("")), ColumnKey::Open);
    }

    #[test]
    fn from_str_rejects_unknown_column() {
        assert!("offer".parse::<ColumnKey>().is_ok());
        assert!("ghosted".parse::<ColumnKey>().is_err());
    }

    // -----------------------------------------------------------------------
    // classify
    // -----------------------------------------------------------------------

    #[test]
    fn classify_assigns_every_application_exactly_once() {
        let apps = vec![
            app("1", Some("Applied")),
            app("2", Some("open")),
            app("3", Some("Bogus")),
        ];
        let views = classify(&apps, None);
        let total: usize = views.iter().map(|v| v.apps.len()).sum();
        assert_eq!(total, apps.len());
        // id 2 (lowercase match) and id 3 (unmatched) both land in Open
        let open = &views[ColumnKey::Open.index()];
        let ids: Vec<&str> = open.apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["2", "3"]);
        assert_eq!(views[ColumnKey::Applied.index()].apps[0].id, "1");
    }

    #[test]
    fn classify_returns_all_columns_in_order() {
        let views = classify(&[], None);
        let keys: Vec<ColumnKey> = views.iter().map(|v| v.key).collect();
        assert_eq!(keys, ColumnKey::ALL);
    }

    #[test]
    fn classify_is_pure() {
        let apps = vec![app("1", Some("Offer")), app("2", None)];
        let first = classify(&apps, None);
        let second = classify(&apps, None);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.key, b.key);
            let a_ids: Vec<&str> = a.apps.iter().map(|x| x.id.as_str()).collect();
            let b_ids: Vec<&str> = b.apps.iter().map(|x| x.id.as_str()).collect();
            assert_eq!(a_ids, b_ids);
        }
        // the input list is untouched
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].status.as_deref(), Some("Offer"));
    }

    #[test]
    fn classify_preserves_input_order_within_a_column() {
        let apps = vec![
            named("1", "Zeta", "Dev"),
            named("2", "Alpha", "Dev"),
            named("3", "Mid", "Dev"),
        ];
        let views = classify(&apps, None);
        let ids: Vec<&str> = views[0].apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn classify_filters_by_company_and_role() {
        let apps = vec![
            named("1", "Acme Corp", "Backend Engineer"),
            named("2", "Globex", "Frontend Engineer"),
            named("3", "Initech", "Data Analyst"),
        ];
        let views = classify(&apps, Some("engineer"));
        assert_eq!(views[0].apps.len(), 2);
        let views = classify(&apps, Some("GLOBEX"));
        assert_eq!(views[0].apps.len(), 1);
        assert_eq!(views[0].apps[0].id, "2");
    }

    #[test]
    fn classify_search_composes_with_prefiltering() {
        let apps = vec![
            named("1", "Acme", "Engineer"),
            named("2", "Globex", "Analyst"),
        ];
        let searched = classify(&apps, Some("acme"));
        let prefiltered: Vec<Application> = apps
            .iter()
            .filter(|a| a.matches_search("acme"))
            .cloned()
            .collect();
        let expected = classify(&prefiltered, None);
        for (a, b) in searched.iter().zip(&expected) {
            let a_ids: Vec<&str> = a.apps.iter().map(|x| x.id.as_str()).collect();
            let b_ids: Vec<&str> = b.apps.iter().map(|x| x.id.as_str()).collect();
            assert_eq!(a_ids, b_ids);
        }
    }

    #[test]
    fn classify_blank_search_matches_everything() {
        let apps = vec![named("1", "Acme", "Dev")];
        assert_eq!(classify(&apps, Some("  "))[0].apps.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Drag session
    // -----------------------------------------------------------------------

    #[test]
    fn drop_on_other_column_emits_change_and_resets() {
        let apps = vec![app("1", Some("Applied"))];
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Interview);
        let change = drag.drop_on(ColumnKey::Interview, &apps);
        assert_eq!(
            change,
            Some(StatusChange { id: "1".into(), to: ColumnKey::Interview })
        );
        assert!(!drag.is_dragging());
        assert_eq!(drag.dragged_id(), None);
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn drop_on_same_column_is_a_noop() {
        let apps = vec![app("1", Some("Applied"))];
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Applied);
        assert_eq!(drag.drop_on(ColumnKey::Applied, &apps), None);
        // terminal transition regardless of the no-op
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drop_with_stale_id_is_silently_ignored() {
        let apps = vec![app("1", Some("Applied"))];
        let mut drag = DragSession::new();
        drag.begin("deleted-meanwhile");
        drag.enter_column(ColumnKey::Offer);
        assert_eq!(drag.drop_on(ColumnKey::Offer, &apps), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drop_while_idle_emits_nothing() {
        let apps = vec![app("1", None)];
        let mut drag = DragSession::new();
        assert_eq!(drag.drop_on(ColumnKey::Offer, &apps), None);
    }

    #[test]
    fn unmatched_status_drops_relative_to_open() {
        // "Bogus" classifies as Open, so dropping on Open is a no-op
        // and dropping anywhere else is a real move.
        let apps = vec![app("1", Some("Bogus"))];
        let mut drag = DragSession::new();
        drag.begin("1");
        assert_eq!(drag.drop_on(ColumnKey::Open, &apps), None);
        drag.begin("1");
        let change = drag.drop_on(ColumnKey::Applied, &apps);
        assert_eq!(change.unwrap().to, ColumnKey::Applied);
    }

    #[test]
    fn nested_enters_keep_hover_until_balanced() {
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Offer);
        drag.enter_column(ColumnKey::Offer);
        drag.leave_column(ColumnKey::Offer);
        // one enter still outstanding
        assert_eq!(drag.hover_column(), Some(ColumnKey::Offer));
        drag.leave_column(ColumnKey::Offer);
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn excess_leaves_never_go_negative() {
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Offer);
        for _ in 0..5 {
            drag.leave_column(ColumnKey::Offer);
        }
        assert_eq!(drag.hover_column(), None);
        // a fresh enter must hover again immediately (counter was floored at 0)
        drag.enter_column(ColumnKey::Offer);
        assert_eq!(drag.hover_column(), Some(ColumnKey::Offer));
        drag.leave_column(ColumnKey::Offer);
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn leave_does_not_clobber_newer_hover_target() {
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Applied);
        drag.enter_column(ColumnKey::Offer);
        // draining the old column must not clear the newer target
        drag.leave_column(ColumnKey::Applied);
        assert_eq!(drag.hover_column(), Some(ColumnKey::Offer));
    }

    #[test]
    fn cancel_resets_everything() {
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Interview);
        drag.enter_column(ColumnKey::Offer);
        drag.cancel();
        assert!(!drag.is_dragging());
        assert_eq!(drag.dragged_id(), None);
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn gesture_state_is_fresh_after_any_reset() {
        let apps = vec![app("1", Some("Applied"))];
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Offer);
        drag.drop_on(ColumnKey::Offer, &apps);
        // counters from the previous gesture must not leak in
        drag.begin("1");
        assert_eq!(drag.hover_column(), None);
        drag.enter_column(ColumnKey::Offer);
        drag.leave_column(ColumnKey::Offer);
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn begin_replaces_gesture_in_progress() {
        let mut drag = DragSession::new();
        drag.begin("1");
        drag.enter_column(ColumnKey::Offer);
        drag.begin("2");
        assert_eq!(drag.dragged_id(), Some("2"));
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn enter_leave_while_idle_are_ignored() {
        let mut drag = DragSession::new();
        drag.enter_column(ColumnKey::Offer);
        assert_eq!(drag.hover_column(), None);
        drag.leave_column(ColumnKey::Offer);
        assert!(!drag.is_dragging());
    }
}

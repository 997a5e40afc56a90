//! Task board and list.
//!
//! # Invariants
//! - Employees only ever see tasks assigned to them.
//! - Board columns always appear in `TaskStatus::COLUMNS` order, empty or not.

use crate::dates::add_days;
use crate::format::format_short_date;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::{User, UserId};
use crate::query::{ListQuery, Page, PageRequest, Searchable};
use chrono::NaiveDate;
use std::str::FromStr;

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

/// Due date filter options, relative to the caller's `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWindow {
    Today,
    Tomorrow,
    Overdue,
    /// Today through seven days ahead, inclusive.
    ThisWeek,
}

impl DueWindow {
    pub fn contains(self, due: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Today => due == today,
            Self::Tomorrow => due == add_days(today, 1),
            Self::Overdue => due < today,
            Self::ThisWeek => due >= today && due <= add_days(today, 7),
        }
    }
}

impl FromStr for DueWindow {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "overdue" => Ok(Self::Overdue),
            "thisWeek" | "this-week" | "week" => Ok(Self::ThisWeek),
            other => Err(format!("unknown due date filter `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub search: String,
    pub assignee: Option<UserId>,
    pub priority: Option<TaskPriority>,
    pub due: Option<DueWindow>,
}

impl TaskFilter {
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.assignee.is_some()
            || self.priority.is_some()
            || self.due.is_some()
    }
}

/// Tasks `viewer` may see that match `filter`, in store order.
pub fn visible_tasks(tasks: &[Task], filter: &TaskFilter, viewer: &User, today: NaiveDate) -> Vec<Task> {
    let own_only = viewer.role.sees_only_own_tasks();
    ListQuery::new()
        .search(filter.search.clone())
        .filter_if(own_only, |task: &Task| task.assignee_id == viewer.id)
        .filter_if(filter.assignee.is_some(), |task: &Task| {
            filter.assignee.as_deref() == Some(task.assignee_id.as_str())
        })
        .filter_if(filter.priority.is_some(), |task: &Task| {
            filter.priority == Some(task.priority)
        })
        .filter_if(filter.due.is_some(), move |task: &Task| {
            filter
                .due
                .is_some_and(|window| window.contains(task.due_date, today))
        })
        .apply(tasks)
}

pub fn tasks_page(
    tasks: &[Task],
    filter: &TaskFilter,
    viewer: &User,
    today: NaiveDate,
    request: PageRequest,
) -> Page<Task> {
    Page::paginate(visible_tasks(tasks, filter, viewer, today), request)
}

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

pub fn group_by_status(tasks: Vec<Task>) -> Vec<BoardColumn> {
    let mut columns = TaskStatus::COLUMNS
        .into_iter()
        .map(|status| BoardColumn {
            status,
            tasks: Vec::new(),
        })
        .collect::<Vec<_>>();
    for task in tasks {
        if let Some(column) = columns.iter_mut().find(|column| column.status == task.status) {
            column.tasks.push(task);
        }
    }
    columns
}

/// Due date badge shown on task cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueBadge {
    Overdue(NaiveDate),
    Today,
    Tomorrow,
    Later(NaiveDate),
}

impl DueBadge {
    pub fn for_date(due: NaiveDate, today: NaiveDate) -> Self {
        if due < today {
            Self::Overdue(due)
        } else if due == today {
            Self::Today
        } else if due == add_days(today, 1) {
            Self::Tomorrow
        } else {
            Self::Later(due)
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::Overdue(date) => format!("Overdue: {}", format_short_date(*date)),
            Self::Today => "Today".to_string(),
            Self::Tomorrow => "Tomorrow".to_string(),
            Self::Later(date) => format_short_date(*date),
        }
    }
}

/// `1 task`, `3 tasks`.
pub fn task_count_label(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

#[cfg(test)]
mod tests {
    use super::{DueBadge, DueWindow};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn this_week_is_inclusive() {
        let today = day(10);
        assert!(DueWindow::ThisWeek.contains(day(10), today));
        assert!(DueWindow::ThisWeek.contains(day(17), today));
        assert!(!DueWindow::ThisWeek.contains(day(18), today));
        assert!(!DueWindow::ThisWeek.contains(day(9), today));
    }

    #[test]
    fn badge_text() {
        let today = day(10);
        assert_eq!(DueBadge::for_date(day(5), today).text(), "Overdue: Mar 5");
        assert_eq!(DueBadge::for_date(day(10), today).text(), "Today");
        assert_eq!(DueBadge::for_date(day(11), today).text(), "Tomorrow");
        assert_eq!(DueBadge::for_date(day(20), today).text(), "Mar 20");
    }
}

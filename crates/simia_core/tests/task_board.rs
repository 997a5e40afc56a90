use chrono::NaiveDate;
use simia_core::model::task::{TaskPriority, TaskStatus};
use simia_core::service::task_service::{EmailTaskForm, NewTask, TaskService, TaskServiceError};
use simia_core::views::tasks::{
    group_by_status, task_count_label, tasks_page, visible_tasks, DueBadge, DueWindow, TaskFilter,
};
use simia_core::{demo_store, AgencyConfig, MemoryStore, PageRequest, Role, SessionService};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_as(role: Role) -> MemoryStore {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    SessionService::new(&mut store).login_as_role(role).unwrap();
    store
}

#[test]
fn employees_only_see_their_own_tasks() {
    let store = store_as(Role::Employee);
    let viewer = store.current_user().unwrap().clone();
    assert_eq!(viewer.id, "2");

    let mine = visible_tasks(store.tasks(), &TaskFilter::default(), &viewer, day(2024, 12, 1));
    let ids: Vec<&str> = mine.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t5"]);

    let boss = store_as(Role::Boss);
    let everyone = visible_tasks(
        boss.tasks(),
        &TaskFilter::default(),
        boss.current_user().unwrap(),
        day(2024, 12, 1),
    );
    assert_eq!(everyone.len(), 6);
}

#[test]
fn task_filters_combine_search_priority_and_due_window() {
    let store = store_as(Role::Boss);
    let viewer = store.current_user().unwrap().clone();
    let today = day(2024, 12, 1);

    let search = TaskFilter {
        search: "wiba".to_string(),
        ..TaskFilter::default()
    };
    assert!(search.has_active_filters());
    let found = visible_tasks(store.tasks(), &search, &viewer, today);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "t5");

    let overdue_high = TaskFilter {
        priority: Some(TaskPriority::High),
        due: Some("overdue".parse::<DueWindow>().unwrap()),
        ..TaskFilter::default()
    };
    let overdue = visible_tasks(store.tasks(), &overdue_high, &viewer, today);
    let ids: Vec<&str> = overdue.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t3"]);

    let assigned = TaskFilter {
        assignee: Some("2".to_string()),
        due: Some(DueWindow::ThisWeek),
        ..TaskFilter::default()
    };
    let this_week = visible_tasks(store.tasks(), &assigned, &viewer, today);
    assert_eq!(this_week.len(), 1);
    assert_eq!(this_week[0].id, "t5");

    let page = tasks_page(
        store.tasks(),
        &TaskFilter::default(),
        &viewer,
        today,
        PageRequest::new(2, 4),
    );
    assert_eq!(page.items.len(), 2);
    assert_eq!(task_count_label(page.total_items), "6 tasks");
}

#[test]
fn board_keeps_column_order_including_empty_columns() {
    let store = store_as(Role::Boss);
    let columns = group_by_status(store.tasks().to_vec());
    let layout: Vec<(TaskStatus, usize)> = columns
        .iter()
        .map(|column| (column.status, column.tasks.len()))
        .collect();
    assert_eq!(
        layout,
        vec![
            (TaskStatus::Todo, 3),
            (TaskStatus::InProgress, 1),
            (TaskStatus::Review, 1),
            (TaskStatus::Done, 1),
        ]
    );

    let empty = group_by_status(Vec::new());
    assert_eq!(empty.len(), 4);
    assert!(empty.iter().all(|column| column.tasks.is_empty()));

    assert_eq!(DueBadge::for_date(day(2024, 12, 2), day(2024, 12, 1)).text(), "Tomorrow");
    assert_eq!(
        DueBadge::for_date(day(2024, 11, 28), day(2024, 12, 1)).text(),
        "Overdue: Nov 28"
    );
}

#[test]
fn only_task_creators_may_create_tasks() {
    let mut employee = store_as(Role::Employee);
    let input = NewTask {
        title: "Call TechCorp".to_string(),
        description: String::new(),
        assignee_id: "3".to_string(),
        priority: TaskPriority::High,
        due_date: day(2024, 12, 3),
        labels: Vec::new(),
    };
    let err = TaskService::new(&mut employee)
        .create_task(input.clone())
        .unwrap_err();
    assert_eq!(err, TaskServiceError::NotPermitted(Role::Employee));

    let mut boss = store_as(Role::Boss);
    let mut service = TaskService::new(&mut boss);
    let created = service.create_task(input.clone()).unwrap();
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(created.assignee_id, "3");
    assert!(created.id.starts_with("t-"));

    let blank = NewTask {
        title: "   ".to_string(),
        ..input
    };
    assert_eq!(service.create_task(blank).unwrap_err(), TaskServiceError::BlankTitle);
    assert_eq!(boss.tasks().len(), 7);
}

#[test]
fn comments_labels_and_status_updates() {
    let mut store = store_as(Role::Boss);
    let mut service = TaskService::new(&mut store);

    let moved = service.update_status("t2", TaskStatus::InProgress).unwrap();
    assert_eq!(moved.status, TaskStatus::InProgress);

    assert_eq!(
        service.add_comment("t2", "  ").unwrap_err(),
        TaskServiceError::BlankComment
    );
    let comment = service.add_comment("t2", "Documents received").unwrap();
    assert_eq!(comment.user_id, "1");

    let labelled = service.toggle_label("t2", "motor").unwrap();
    assert_eq!(labelled.labels, vec!["motor".to_string()]);
    let unlabelled = service.toggle_label("t2", "motor").unwrap();
    assert!(unlabelled.labels.is_empty());

    let stored = service.get_task("t2").unwrap();
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.status, TaskStatus::InProgress);

    assert_eq!(
        service.update_status("missing", TaskStatus::Done).unwrap_err(),
        TaskServiceError::TaskNotFound("missing".to_string())
    );
}

#[test]
fn email_conversion_creates_exactly_one_task_naming_the_sender() {
    let mut store = store_as(Role::Employee);
    let before = store.tasks().len();
    let today = day(2024, 12, 1);

    let task = TaskService::new(&mut store)
        .convert_email_to_task_on("e2", &EmailTaskForm::default(), today)
        .unwrap();

    assert_eq!(store.tasks().len(), before + 1);
    assert_eq!(task.title, "WIBA Quote Needed Urgent");
    assert!(task.description.contains("info@construction.co.ke"));
    assert!(task
        .description
        .ends_with("Source: Email from info@construction.co.ke"));
    assert_eq!(task.assignee_id, "2");
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.due_date, day(2024, 12, 8));
}

#[test]
fn email_conversion_keeps_form_values_and_still_names_the_sender() {
    let mut store = store_as(Role::Boss);
    let form = EmailTaskForm {
        title: Some("  ".to_string()),
        description: Some("Book the meeting room".to_string()),
        priority: Some(TaskPriority::Urgent),
        due_date: Some(day(2024, 12, 2)),
    };
    let task = TaskService::new(&mut store)
        .convert_email_to_task_on("e1", &form, day(2024, 12, 1))
        .unwrap();

    assert_eq!(task.title, "Request for Proposal - Group Health");
    assert!(task.description.starts_with("Book the meeting room"));
    assert!(task.description.contains("client@techcorp.com"));
    assert_eq!(task.priority, TaskPriority::Urgent);
    assert_eq!(task.due_date, day(2024, 12, 2));
}

#[test]
fn email_conversion_rejects_unknown_email_and_missing_session() {
    let mut store = store_as(Role::Boss);
    let err = TaskService::new(&mut store)
        .convert_email_to_task_on("nope", &EmailTaskForm::default(), day(2024, 12, 1))
        .unwrap_err();
    assert_eq!(err, TaskServiceError::EmailNotFound("nope".to_string()));

    SessionService::new(&mut store).logout().unwrap();
    let err = TaskService::new(&mut store)
        .convert_email_to_task_on("e1", &EmailTaskForm::default(), day(2024, 12, 1))
        .unwrap_err();
    assert_eq!(err, TaskServiceError::NotLoggedIn);
    assert_eq!(store.tasks().len(), 6);
}

//! Task board use-case service.
//!
//! # Responsibility
//! - Create and edit tasks, comments and labels.
//! - Convert an inbox email into exactly one task.
//!
//! # Invariants
//! - New tasks start in `TaskStatus::Todo`.
//! - A task created from an email always names the sender in its description.

use crate::dates::add_days;
use crate::model::task::{Task, TaskComment, TaskId, TaskPriority, TaskStatus};
use crate::model::user::{Role, User, UserId};
use crate::model::validation::ModelValidationError;
use crate::repo::{MailRepository, PartyRepository, RepoError, TaskRepository};
use crate::service::non_blank;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_ID_PREFIX: &str = "t";
const COMMENT_ID_PREFIX: &str = "cm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    BlankTitle,
    BlankComment,
    TaskNotFound(TaskId),
    EmailNotFound(String),
    NotLoggedIn,
    /// Session role may not perform the operation.
    NotPermitted(Role),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::BlankComment => write!(f, "comment must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::EmailNotFound(id) => write!(f, "email not found: {id}"),
            Self::NotLoggedIn => write!(f, "no user is logged in"),
            Self::NotPermitted(role) => write!(f, "role {role} may not create tasks"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind: "task", id } => Self::TaskNotFound(id),
            RepoError::NotFound { kind: "email", id } => Self::EmailNotFound(id),
            RepoError::Validation(ModelValidationError::BlankField("task.title")) => {
                Self::BlankTitle
            }
            other => Self::Repo(other),
        }
    }
}

/// Input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assignee_id: UserId,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub labels: Vec<String>,
}

/// "Create task from email" dialog; blank fields fall back to email data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailTaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

pub struct TaskService<R: TaskRepository + PartyRepository> {
    repo: R,
}

impl<R: TaskRepository + PartyRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a `Todo` task. Only roles that may create tasks are allowed.
    pub fn create_task(&mut self, input: NewTask) -> Result<Task, TaskServiceError> {
        let user = self.session_user()?;
        if !user.role.can_create_tasks() {
            warn!(
                "event=task_create module=task status=error reason=not_permitted role={}",
                user.role
            );
            return Err(TaskServiceError::NotPermitted(user.role));
        }
        let title = input.title.trim();
        if title.is_empty() {
            return Err(TaskServiceError::BlankTitle);
        }
        let task = Task {
            id: self.repo.next_id(TASK_ID_PREFIX),
            title: title.to_string(),
            description: input.description.trim().to_string(),
            assignee_id: input.assignee_id,
            status: TaskStatus::Todo,
            priority: input.priority,
            due_date: input.due_date,
            created_at: Some(Utc::now()),
            labels: input.labels,
            comments: Vec::new(),
        };
        let task = self.repo.create_task(task)?;
        info!(
            "event=task_create module=task status=ok task_id={} assignee_id={}",
            task.id, task.assignee_id
        );
        Ok(task)
    }

    pub fn update_status(&mut self, id: &str, status: TaskStatus) -> Result<Task, TaskServiceError> {
        self.modify(id, |task| task.status = status)
    }

    /// Replaces every field of an existing task.
    pub fn update_task(&mut self, task: &Task) -> Result<(), TaskServiceError> {
        self.repo.update_task(task)?;
        info!("event=task_update module=task status=ok task_id={}", task.id);
        Ok(())
    }

    /// Appends a comment authored by the session user.
    pub fn add_comment(&mut self, id: &str, text: &str) -> Result<TaskComment, TaskServiceError> {
        let text = non_blank(Some(text)).ok_or(TaskServiceError::BlankComment)?;
        let author = self.session_user()?;
        let comment = TaskComment {
            id: self.repo.next_id(COMMENT_ID_PREFIX),
            user_id: author.id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        let added = comment.clone();
        self.modify(id, move |task| task.comments.push(comment))?;
        Ok(added)
    }

    pub fn toggle_label(&mut self, id: &str, label: &str) -> Result<Task, TaskServiceError> {
        self.modify(id, |task| task.toggle_label(label))
    }

    pub fn get_task(&self, id: &str) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(id)
            .ok_or_else(|| TaskServiceError::TaskNotFound(id.to_string()))
    }

    fn modify(&mut self, id: &str, change: impl FnOnce(&mut Task)) -> Result<Task, TaskServiceError> {
        let mut task = self.get_task(id)?;
        change(&mut task);
        self.repo.update_task(&task)?;
        info!(
            "event=task_update module=task status=ok task_id={} task_status={:?}",
            task.id, task.status
        );
        Ok(task)
    }

    fn session_user(&self) -> Result<User, TaskServiceError> {
        self.repo.current_user().ok_or(TaskServiceError::NotLoggedIn)
    }
}

impl<R: TaskRepository + PartyRepository + MailRepository> TaskService<R> {
    /// Creates one task from an email, due dates relative to the current day.
    pub fn convert_email_to_task(
        &mut self,
        email_id: &str,
        form: &EmailTaskForm,
    ) -> Result<Task, TaskServiceError> {
        self.convert_email_to_task_on(email_id, form, Utc::now().date_naive())
    }

    /// Same as `convert_email_to_task` with an explicit `today`.
    pub fn convert_email_to_task_on(
        &mut self,
        email_id: &str,
        form: &EmailTaskForm,
        today: NaiveDate,
    ) -> Result<Task, TaskServiceError> {
        let email = self
            .repo
            .get_email(email_id)
            .ok_or_else(|| TaskServiceError::EmailNotFound(email_id.to_string()))?;
        let assignee = self.session_user()?;
        let source_line = format!("Source: Email from {}", email.from);

        let title = non_blank(form.title.as_deref())
            .unwrap_or(email.subject.as_str())
            .to_string();
        let description = match non_blank(form.description.as_deref()) {
            Some(custom) if custom.contains(email.from.as_str()) => custom.to_string(),
            Some(custom) => format!("{custom}\n\n{source_line}"),
            None => format!("{}\n\n{source_line}", email.body),
        };
        let due_days = u64::from(self.repo.agency_config().task_due_days);

        let task = Task {
            id: self.repo.next_id(TASK_ID_PREFIX),
            title,
            description,
            assignee_id: assignee.id,
            status: TaskStatus::Todo,
            priority: form.priority.unwrap_or(TaskPriority::Medium),
            due_date: form.due_date.unwrap_or_else(|| add_days(today, due_days)),
            created_at: Some(Utc::now()),
            labels: Vec::new(),
            comments: Vec::new(),
        };
        let task = self.repo.create_task(task)?;
        info!(
            "event=email_convert module=task status=ok email_id={} task_id={}",
            email.id, task.id
        );
        Ok(task)
    }
}

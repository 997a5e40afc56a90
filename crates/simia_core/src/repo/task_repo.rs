//! Task board persistence contract.

use crate::model::task::Task;
use crate::repo::{position_by_id, RepoError, RepoResult, StoreContext};
use crate::store::MemoryStore;

const KIND: &str = "task";

pub trait TaskRepository: StoreContext {
    fn create_task(&mut self, task: Task) -> RepoResult<Task>;
    fn update_task(&mut self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: &str) -> Option<Task>;
    fn list_tasks(&self) -> Vec<Task>;
}

impl TaskRepository for MemoryStore {
    fn create_task(&mut self, task: Task) -> RepoResult<Task> {
        task.validate()?;
        if position_by_id(&self.tasks, &task.id, |t| t.id.as_str()).is_some() {
            return Err(RepoError::duplicate(KIND, task.id));
        }
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update_task(&mut self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let index = position_by_id(&self.tasks, &task.id, |t| t.id.as_str())
            .ok_or_else(|| RepoError::not_found(KIND, task.id.clone()))?;
        self.tasks[index] = task.clone();
        Ok(())
    }

    fn get_task(&self, id: &str) -> Option<Task> {
        self.tasks.iter().find(|task| task.id == id).cloned()
    }

    fn list_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }
}

impl<T: TaskRepository + ?Sized> TaskRepository for &mut T {
    fn create_task(&mut self, task: Task) -> RepoResult<Task> {
        (**self).create_task(task)
    }

    fn update_task(&mut self, task: &Task) -> RepoResult<()> {
        (**self).update_task(task)
    }

    fn get_task(&self, id: &str) -> Option<Task> {
        (**self).get_task(id)
    }

    fn list_tasks(&self) -> Vec<Task> {
        (**self).list_tasks()
    }
}

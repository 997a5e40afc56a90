//! Staff, session and client persistence contract.

use crate::model::client::Client;
use crate::model::user::{MemberProfile, User};
use crate::repo::{position_by_id, RepoError, RepoResult, StoreContext};
use crate::store::MemoryStore;

pub trait PartyRepository: StoreContext {
    fn list_users(&self) -> Vec<User>;
    fn get_user(&self, id: &str) -> Option<User>;
    fn list_profiles(&self) -> Vec<MemberProfile>;
    fn current_user(&self) -> Option<User>;
    fn set_current_user(&mut self, id: Option<&str>) -> RepoResult<()>;
    fn create_client(&mut self, client: Client) -> RepoResult<Client>;
    fn list_clients(&self) -> Vec<Client>;
}

impl PartyRepository for MemoryStore {
    fn list_users(&self) -> Vec<User> {
        self.users.clone()
    }

    fn get_user(&self, id: &str) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    fn list_profiles(&self) -> Vec<MemberProfile> {
        self.profiles.clone()
    }

    fn current_user(&self) -> Option<User> {
        MemoryStore::current_user(self).cloned()
    }

    fn set_current_user(&mut self, id: Option<&str>) -> RepoResult<()> {
        if let Some(id) = id {
            if position_by_id(&self.users, id, |u| u.id.as_str()).is_none() {
                return Err(RepoError::not_found("user", id));
            }
        }
        self.set_current_user_id(id.map(str::to_string));
        Ok(())
    }

    fn create_client(&mut self, client: Client) -> RepoResult<Client> {
        client.validate()?;
        if position_by_id(&self.clients, &client.id, |c| c.id.as_str()).is_some() {
            return Err(RepoError::duplicate("client", client.id));
        }
        self.clients.push(client.clone());
        Ok(client)
    }

    fn list_clients(&self) -> Vec<Client> {
        self.clients.clone()
    }
}

impl<T: PartyRepository + ?Sized> PartyRepository for &mut T {
    fn list_users(&self) -> Vec<User> {
        (**self).list_users()
    }

    fn get_user(&self, id: &str) -> Option<User> {
        (**self).get_user(id)
    }

    fn list_profiles(&self) -> Vec<MemberProfile> {
        (**self).list_profiles()
    }

    fn current_user(&self) -> Option<User> {
        (**self).current_user()
    }

    fn set_current_user(&mut self, id: Option<&str>) -> RepoResult<()> {
        (**self).set_current_user(id)
    }

    fn create_client(&mut self, client: Client) -> RepoResult<Client> {
        (**self).create_client(client)
    }

    fn list_clients(&self) -> Vec<Client> {
        (**self).list_clients()
    }
}

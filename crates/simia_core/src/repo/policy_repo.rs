//! Claims and renewals persistence contract.

use crate::model::policy::{Claim, Renewal};
use crate::repo::{position_by_id, RepoError, RepoResult, StoreContext};
use crate::store::MemoryStore;

pub trait PolicyRepository: StoreContext {
    fn list_claims(&self) -> Vec<Claim>;
    fn list_renewals(&self) -> Vec<Renewal>;
    fn get_renewal(&self, id: &str) -> Option<Renewal>;
    fn update_renewal(&mut self, renewal: &Renewal) -> RepoResult<()>;
}

impl PolicyRepository for MemoryStore {
    fn list_claims(&self) -> Vec<Claim> {
        self.claims.clone()
    }

    fn list_renewals(&self) -> Vec<Renewal> {
        self.renewals.clone()
    }

    fn get_renewal(&self, id: &str) -> Option<Renewal> {
        self.renewals.iter().find(|renewal| renewal.id == id).cloned()
    }

    fn update_renewal(&mut self, renewal: &Renewal) -> RepoResult<()> {
        renewal.validate()?;
        let index = position_by_id(&self.renewals, &renewal.id, |r| r.id.as_str())
            .ok_or_else(|| RepoError::not_found("renewal", renewal.id.clone()))?;
        self.renewals[index] = renewal.clone();
        Ok(())
    }
}

impl<T: PolicyRepository + ?Sized> PolicyRepository for &mut T {
    fn list_claims(&self) -> Vec<Claim> {
        (**self).list_claims()
    }

    fn list_renewals(&self) -> Vec<Renewal> {
        (**self).list_renewals()
    }

    fn get_renewal(&self, id: &str) -> Option<Renewal> {
        (**self).get_renewal(id)
    }

    fn update_renewal(&mut self, renewal: &Renewal) -> RepoResult<()> {
        (**self).update_renewal(renewal)
    }
}

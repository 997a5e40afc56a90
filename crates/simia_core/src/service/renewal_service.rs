//! Renewal workflow.
//!
//! # Responsibility
//! - Move renewals through processing, approval and invoicing.
//! - Issue the pending invoice for an approved renewal.
//!
//! # Invariants
//! - Employees process (`UPCOMING|OVERDUE -> PROCESSING`) and submit
//!   (`PROCESSING -> AWAITING_PAYMENT`).
//! - Boss and accountant approve any renewal not yet invoiced or paid; approval
//!   issues one pending invoice and moves the renewal to `AWAITING_PAYMENT`.

use crate::model::ledger::{Invoice, InvoiceStatus, TransactionType};
use crate::model::policy::{Renewal, RenewalId, RenewalStatus};
use crate::model::user::{Role, User};
use crate::repo::{LedgerRepository, PartyRepository, PolicyRepository, RepoError};
use crate::service::accounting_service::next_invoice_number;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INVOICE_ID_PREFIX: &str = "inv";

/// Workflow step requested on a renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalStep {
    Process,
    SubmitForApproval,
    ApproveAndInvoice,
}

impl RenewalStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::SubmitForApproval => "submit_for_approval",
            Self::ApproveAndInvoice => "approve_and_invoice",
        }
    }

    fn permits(self, role: Role) -> bool {
        match self {
            Self::Process | Self::SubmitForApproval => role.can_process_renewals(),
            Self::ApproveAndInvoice => role.can_invoice_renewals(),
        }
    }

    fn accepts(self, from: RenewalStatus) -> bool {
        match self {
            Self::Process => from.is_due(),
            Self::SubmitForApproval => from == RenewalStatus::Processing,
            Self::ApproveAndInvoice => {
                !matches!(from, RenewalStatus::AwaitingPayment | RenewalStatus::Paid)
            }
        }
    }
}

impl Display for RenewalStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewalServiceError {
    RenewalNotFound(RenewalId),
    NotLoggedIn,
    NotPermitted { role: Role, step: RenewalStep },
    IllegalTransition { from: RenewalStatus, step: RenewalStep },
    /// An invoice for this policy renewal is already pending.
    AlreadyInvoiced { policy_number: String },
    InvoiceNumbersExhausted,
    Repo(RepoError),
}

impl Display for RenewalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RenewalNotFound(id) => write!(f, "renewal not found: {id}"),
            Self::NotLoggedIn => write!(f, "no user is logged in"),
            Self::NotPermitted { role, step } => write!(f, "role {role} may not {step} renewals"),
            Self::IllegalTransition { from, step } => {
                write!(f, "cannot {step} a renewal in status {from}")
            }
            Self::AlreadyInvoiced { policy_number } => {
                write!(f, "renewal of {policy_number} already has a pending invoice")
            }
            Self::InvoiceNumbersExhausted => write!(f, "no invoice number left after the highest"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RenewalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RenewalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                kind: "renewal",
                id,
            } => Self::RenewalNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub struct RenewalService<R: PolicyRepository + PartyRepository + LedgerRepository> {
    repo: R,
}

impl<R: PolicyRepository + PartyRepository + LedgerRepository> RenewalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// `UPCOMING|OVERDUE -> PROCESSING`.
    pub fn process(&mut self, id: &str) -> Result<Renewal, RenewalServiceError> {
        self.transition(id, RenewalStep::Process, RenewalStatus::Processing)
    }

    /// `PROCESSING -> AWAITING_PAYMENT`.
    pub fn submit_for_approval(&mut self, id: &str) -> Result<Renewal, RenewalServiceError> {
        self.transition(
            id,
            RenewalStep::SubmitForApproval,
            RenewalStatus::AwaitingPayment,
        )
    }

    /// Issues a pending income invoice dated today for the premium and moves
    /// the renewal to `AWAITING_PAYMENT`.
    pub fn approve_and_invoice(&mut self, id: &str) -> Result<Invoice, RenewalServiceError> {
        self.approve_and_invoice_on(id, Utc::now().date_naive())
    }

    pub fn approve_and_invoice_on(
        &mut self,
        id: &str,
        today: NaiveDate,
    ) -> Result<Invoice, RenewalServiceError> {
        let mut renewal = self.checked(id, RenewalStep::ApproveAndInvoice)?;
        let invoices = self.repo.list_invoices();
        if invoices.iter().any(|invoice| {
            invoice.status == InvoiceStatus::Pending
                && invoice.reference.as_deref() == Some(renewal.policy_number.as_str())
        }) {
            return Err(RenewalServiceError::AlreadyInvoiced {
                policy_number: renewal.policy_number,
            });
        }

        let invoice_number = next_invoice_number(&invoices)
            .ok_or(RenewalServiceError::InvoiceNumbersExhausted)?;
        let invoice = Invoice {
            id: self.repo.next_id(INVOICE_ID_PREFIX),
            invoice_number,
            client_name: renewal.client_name.clone(),
            client: None,
            description: Some(format!("Policy renewal {}", renewal.policy_number)),
            amount: renewal.premium,
            date: today,
            status: InvoiceStatus::Pending,
            policy_type: renewal.policy_type,
            transaction_type: TransactionType::Income,
            payment_method: None,
            reference: Some(renewal.policy_number.clone()),
        };
        let invoice = self.repo.create_invoice(invoice)?;
        let from = renewal.status;
        renewal.status = RenewalStatus::AwaitingPayment;
        self.repo.update_renewal(&renewal)?;
        info!(
            "event=renewal_invoice module=renewal status=ok renewal_id={} from={} invoice_number={}",
            renewal.id, from, invoice.invoice_number
        );
        Ok(invoice)
    }

    fn transition(
        &mut self,
        id: &str,
        step: RenewalStep,
        to: RenewalStatus,
    ) -> Result<Renewal, RenewalServiceError> {
        let mut renewal = self.checked(id, step)?;
        let from = renewal.status;
        renewal.status = to;
        self.repo.update_renewal(&renewal)?;
        info!(
            "event=renewal_transition module=renewal status=ok renewal_id={} from={} to={}",
            renewal.id, from, to
        );
        Ok(renewal)
    }

    /// Loads the renewal and checks role and source status for `step`.
    fn checked(&self, id: &str, step: RenewalStep) -> Result<Renewal, RenewalServiceError> {
        let user = self.session_user()?;
        if !step.permits(user.role) {
            warn!(
                "event=renewal_transition module=renewal status=error reason=not_permitted step={} role={}",
                step, user.role
            );
            return Err(RenewalServiceError::NotPermitted {
                role: user.role,
                step,
            });
        }
        let renewal = self
            .repo
            .get_renewal(id)
            .ok_or_else(|| RenewalServiceError::RenewalNotFound(id.to_string()))?;
        if !step.accepts(renewal.status) {
            warn!(
                "event=renewal_transition module=renewal status=error reason=illegal_transition step={} from={}",
                step, renewal.status
            );
            return Err(RenewalServiceError::IllegalTransition {
                from: renewal.status,
                step,
            });
        }
        Ok(renewal)
    }

    fn session_user(&self) -> Result<User, RenewalServiceError> {
        self.repo.current_user().ok_or(RenewalServiceError::NotLoggedIn)
    }
}

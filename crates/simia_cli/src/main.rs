//! Command-line front end over the bundled demo agency.
//!
//! # Responsibility
//! - Log in as a role, run one screen's query and print it as plain text.
//! - Keep every rule inside `simia_core`; this binary only parses and prints.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use simia_core::dates::parse_calendar_date;
use simia_core::export::{claims_csv, export_file_name, renewals_csv, write_csv_file, ExportKind};
use simia_core::format::{email_timestamp_label, format_date, format_kes};
use simia_core::inbox::{EmailFilter, InboxAction};
use simia_core::model::policy::ClaimStatus;
use simia_core::model::task::TaskPriority;
use simia_core::model::user::Presence;
use simia_core::query::{PageRequest, SortDirection, SortState};
use simia_core::service::inbox_service::InboxService;
use simia_core::service::renewal_service::RenewalService;
use simia_core::service::task_service::{EmailTaskForm, TaskService};
use simia_core::views::claims::{claims_page, claims_summary, filter_claims, ClaimFilter, ClaimSortKey};
use simia_core::views::dashboard::dashboard_summary;
use simia_core::views::renewals::{
    filter_renewals, parse_status_choice, renewal_stats, renewals_page, RenewalFilter,
    RenewalSort, RenewalTab,
};
use simia_core::views::tasks::{group_by_status, task_count_label, visible_tasks, DueBadge, DueWindow, TaskFilter};
use simia_core::views::team::{members_found_label, team_members, team_page, RoleChoice, TeamFilter};
use simia_core::{
    demo_store, init_logging, AgencyConfig, LogLevel, MemoryStore, Role, SessionService, User,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "simia")]
#[command(
    version = simia_core::core_version(),
    about = "Insurance agency back office over bundled demo data",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Role to log in as (boss, employee, accountant)
    #[arg(long = "as", global = true, default_value = "boss")]
    role: Role,

    /// JSON config overriding page sizes and business constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Reference day as YYYY-MM-DD, defaults to the local date
    #[arg(long, global = true, value_parser = parse_day)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Command {
    /// Summary cards for the session user
    Dashboard,

    /// Claims table
    Claims {
        #[command(flatten)]
        list: ListArgs,
        /// Claim status (pending, approved, rejected, paid)
        #[arg(long)]
        status: Option<ClaimStatus>,
        /// Sort column (date, amount, policyNumber, policyHolder, status)
        #[arg(long, default_value = "date")]
        sort: ClaimSortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Renewals table and workflow steps
    Renewals {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: RenewalArgs,
        /// Move an upcoming or overdue renewal into processing
        #[arg(long, value_name = "ID")]
        process: Option<String>,
        /// Submit a processing renewal for approval
        #[arg(long, value_name = "ID")]
        submit: Option<String>,
        /// Approve a renewal awaiting payment and raise its invoice
        #[arg(long, value_name = "ID")]
        approve: Option<String>,
    },

    /// Task list or board
    Tasks {
        #[arg(long, default_value = "")]
        search: String,
        /// Assignee user id
        #[arg(long)]
        assignee: Option<String>,
        /// Priority (low, medium, high, urgent)
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Due window (today, tomorrow, overdue, thisWeek)
        #[arg(long)]
        due: Option<DueWindow>,
        /// Group tasks into board columns
        #[arg(long)]
        board: bool,
    },

    /// Team directory
    Team {
        #[command(flatten)]
        list: ListArgs,
        /// Role filter (all, director, agent, accountant)
        #[arg(long, default_value = "all")]
        role_filter: RoleChoice,
        /// Presence (online, offline, away)
        #[arg(long)]
        presence: Option<Presence>,
    },

    /// Mailbox folders and quick actions
    Inbox {
        /// Folder (all, unread, starred, archived, sent, drafts, trash)
        #[arg(long, default_value = "all")]
        folder: EmailFilter,
        #[arg(long, default_value = "")]
        search: String,
        /// Mark emails read before listing
        #[arg(long, value_name = "ID")]
        read: Vec<String>,
        /// Toggle the star on an email before listing
        #[arg(long, value_name = "ID")]
        star: Option<String>,
        /// Create a task assigned to the session user from an email
        #[arg(long, value_name = "ID")]
        to_task: Option<String>,
    },

    /// Write the filtered claims or renewals table as CSV
    Export {
        #[command(subcommand)]
        kind: ExportCommand,
        /// Directory the CSV file is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum ExportCommand {
    Claims {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<ClaimStatus>,
    },
    Renewals {
        #[command(flatten)]
        filter: RenewalArgs,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive substring search
    #[arg(long, default_value = "")]
    search: String,
    /// One-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Args)]
struct RenewalArgs {
    /// Status dropdown (all, upcoming, overdue, processing, awaiting_payment, completed)
    #[arg(long, default_value = "all")]
    status: String,
    /// Status tab, used while the dropdown is on all
    #[arg(long, default_value = "all")]
    tab: RenewalTab,
    /// dueDate-asc, dueDate-desc, premium-asc or premium-desc
    #[arg(long, default_value = "dueDate-asc")]
    sort: RenewalSort,
}

impl RenewalArgs {
    fn to_filter(&self, search: &str) -> CliResult<RenewalFilter> {
        Ok(RenewalFilter {
            search: search.to_string(),
            status: parse_status_choice(&self.status)?,
            tab: self.tab,
            sort: self.sort,
        })
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(value).ok_or_else(|| format!("expected YYYY-MM-DD, got `{value}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(cli.log_level.unwrap_or_else(LogLevel::build_default), log_dir)?;
    }

    let config = match cli.config.as_ref() {
        Some(path) => AgencyConfig::load(path)?,
        None => AgencyConfig::default(),
    };
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut store = demo_store(config)?;
    let viewer = SessionService::new(&mut store).login_as_role(cli.role)?;
    info!(
        "event=cli_run module=cli status=ok version={} role={} today={}",
        simia_core::core_version(),
        viewer.role,
        today
    );

    match cli.command {
        Command::Dashboard => cmd_dashboard(&store, &viewer, today),
        Command::Claims {
            list,
            status,
            sort,
            asc,
        } => {
            let direction = if asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            let filter = ClaimFilter {
                search: list.search,
                status,
                sort: SortState::new(sort, direction),
            };
            cmd_claims(&store, &filter, list.page);
            Ok(())
        }
        Command::Renewals {
            list,
            filter,
            process,
            submit,
            approve,
        } => {
            cmd_renewal_steps(&mut store, process, submit, approve, today)?;
            let filter = filter.to_filter(&list.search)?;
            cmd_renewals(&store, &filter, list.page);
            Ok(())
        }
        Command::Tasks {
            search,
            assignee,
            priority,
            due,
            board,
        } => {
            let filter = TaskFilter {
                search,
                assignee,
                priority,
                due,
            };
            cmd_tasks(&store, &filter, &viewer, today, board);
            Ok(())
        }
        Command::Team {
            list,
            role_filter,
            presence,
        } => {
            let filter = TeamFilter {
                search: list.search,
                role: role_filter,
                presence,
            };
            cmd_team(&store, &filter, list.page);
            Ok(())
        }
        Command::Inbox {
            folder,
            search,
            read,
            star,
            to_task,
        } => cmd_inbox(&mut store, folder, search, read, star, to_task, today),
        Command::Export { kind, out_dir } => cmd_export(&store, kind, out_dir, today),
    }
}

fn cmd_dashboard(store: &MemoryStore, viewer: &User, today: NaiveDate) -> CliResult<()> {
    let summary = dashboard_summary(
        viewer,
        store.tasks(),
        store.claims(),
        store.renewals(),
        store.invoices(),
        today,
    );
    println!("Welcome back, {}", summary.greeting_name);
    println!(
        "Range: {} - {}",
        format_date(summary.range.from),
        format_date(summary.range.to)
    );
    if let Some(revenue) = summary.revenue {
        println!("Revenue:        {}", format_kes(revenue));
    }
    println!("Active claims:  {}", summary.active_claims);
    println!("Pending tasks:  {}", summary.pending_tasks);
    println!("Renewals due:   {}", summary.renewals_due);
    Ok(())
}

fn cmd_claims(store: &MemoryStore, filter: &ClaimFilter, page: usize) {
    let summary = claims_summary(store.claims(), store.renewals(), filter);
    let page = claims_page(
        store.claims(),
        filter,
        PageRequest::new(page, store.config().claims_page_size),
    );
    println!(
        "{} claims ({} pending) | renewals: {} upcoming, {} overdue",
        summary.total_claims, summary.pending_claims, summary.upcoming_renewals, summary.overdue_renewals
    );
    for claim in &page.items {
        println!(
            "{:<10} {:<16} {:<9} {:>14} {:<13} {}",
            claim.policy_number,
            claim.policy_holder,
            claim.policy_type.label(),
            format_kes(claim.amount),
            format_date(claim.date),
            claim.status.as_str()
        );
    }
    println!("{} (page {}/{})", page.range_label(), page.page, page.total_pages);
}

fn cmd_renewal_steps(
    store: &mut MemoryStore,
    process: Option<String>,
    submit: Option<String>,
    approve: Option<String>,
    today: NaiveDate,
) -> CliResult<()> {
    let mut service = RenewalService::new(store);
    if let Some(id) = process {
        let renewal = service.process(&id)?;
        println!("{} is now {}", renewal.policy_number, renewal.status.label());
    }
    if let Some(id) = submit {
        let renewal = service.submit_for_approval(&id)?;
        println!("{} is now {}", renewal.policy_number, renewal.status.label());
    }
    if let Some(id) = approve {
        let invoice = service.approve_and_invoice_on(&id, today)?;
        println!(
            "Raised {} for {} ({})",
            invoice.invoice_number,
            invoice.client_name,
            format_kes(invoice.amount)
        );
    }
    Ok(())
}

fn cmd_renewals(store: &MemoryStore, filter: &RenewalFilter, page: usize) {
    let stats = renewal_stats(store.renewals());
    println!(
        "{} renewals | {} upcoming, {} overdue, {} processing, {} awaiting payment, {} completed",
        stats.total,
        stats.upcoming,
        stats.overdue,
        stats.processing,
        stats.awaiting_payment,
        stats.completed
    );
    let view = renewals_page(
        store.renewals(),
        filter,
        PageRequest::new(page, store.config().renewals_page_size),
    );
    for renewal in &view.page.items {
        println!(
            "{:<4} {:<10} {:<20} {:>12} {:<13} {}",
            renewal.id,
            renewal.policy_number,
            renewal.client_name,
            format_kes(renewal.premium),
            format_date(renewal.due_date),
            renewal.status.label()
        );
    }
    let pages = view
        .page_numbers
        .iter()
        .map(|number| {
            if *number == view.page.page {
                format!("[{number}]")
            } else {
                number.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} | pages: {pages}", view.page.range_label());
}

fn cmd_tasks(store: &MemoryStore, filter: &TaskFilter, viewer: &User, today: NaiveDate, board: bool) {
    let tasks = visible_tasks(store.tasks(), filter, viewer, today);
    println!("{}", task_count_label(tasks.len()));
    if board {
        for column in group_by_status(tasks) {
            println!("== {} ({})", column.status, column.tasks.len());
            for task in &column.tasks {
                println!("   {:<4} {} [{}]", task.id, task.title, task.priority.label());
            }
        }
        return;
    }
    for task in &tasks {
        println!(
            "{:<4} {:<32} {:<8} {:<12} {}",
            task.id,
            task.title,
            task.priority.label(),
            task.status.label(),
            DueBadge::for_date(task.due_date, today).text()
        );
    }
}

fn cmd_team(store: &MemoryStore, filter: &TeamFilter, page: usize) {
    let members = team_members(store.users(), store.profiles());
    let page = team_page(
        &members,
        filter,
        PageRequest::new(page, store.config().team_page_size),
    );
    println!("{}", members_found_label(page.total_items));
    for member in &page.items {
        println!(
            "{:<3} {:<18} {:<11} {:<8} {}",
            member.initials(),
            member.user.name,
            member.title(),
            member.profile.presence.as_str(),
            member.user.email
        );
    }
}

fn cmd_inbox(
    store: &mut MemoryStore,
    folder: EmailFilter,
    search: String,
    read: Vec<String>,
    star: Option<String>,
    to_task: Option<String>,
    today: NaiveDate,
) -> CliResult<()> {
    if let Some(email_id) = to_task.as_deref() {
        let task = TaskService::new(&mut *store).convert_email_to_task_on(
            email_id,
            &EmailTaskForm::default(),
            today,
        )?;
        println!("Created task {} \"{}\" due {}", task.id, task.title, format_date(task.due_date));
    }

    let mut inbox = InboxService::new(&mut *store);
    if !read.is_empty() {
        inbox.dispatch(InboxAction::MarkAsRead(read))?;
    }
    if let Some(id) = star {
        inbox.dispatch(InboxAction::ToggleStar(id))?;
    }
    inbox.dispatch(InboxAction::SetActiveFilter(folder))?;
    inbox.dispatch(InboxAction::SetSearchQuery(search))?;

    let now = today
        .and_hms_opt(23, 59, 59)
        .map(|at| at.and_utc())
        .unwrap_or_else(chrono::Utc::now);
    println!("{} ({} unread)", folder.as_str(), inbox.state().unread_count());
    for email in inbox.visible() {
        let (badges, more) = email.label_badges();
        let mut labels = badges.join(",");
        if more > 0 {
            labels.push_str(&format!(",+{more}"));
        }
        println!(
            "{} {} {:<4} {:<20} {:<40} {:<10} {}",
            if email.is_read { ' ' } else { '*' },
            if email.is_starred { '★' } else { ' ' },
            email.id,
            email.sender_name(),
            email.subject_or_placeholder(),
            email_timestamp_label(email.date, now),
            labels
        );
    }
    Ok(())
}

fn cmd_export(
    store: &MemoryStore,
    kind: ExportCommand,
    out_dir: PathBuf,
    today: NaiveDate,
) -> CliResult<()> {
    let (export_kind, content) = match kind {
        ExportCommand::Claims { search, status } => {
            let filter = ClaimFilter {
                search,
                status,
                ..ClaimFilter::default()
            };
            (ExportKind::Claims, claims_csv(&filter_claims(store.claims(), &filter)))
        }
        ExportCommand::Renewals { filter } => {
            let filter = filter.to_filter("")?;
            (
                ExportKind::Renewals,
                renewals_csv(&filter_renewals(store.renewals(), &filter)),
            )
        }
    };
    let path = out_dir.join(export_file_name(export_kind, today));
    write_csv_file(&path, &content)?;
    println!("Wrote {}", path.display());
    Ok(())
}

//! Team directory.

use crate::format::initials;
use crate::model::user::{MemberProfile, Presence, Role, User};
use crate::query::{ListQuery, Page, PageRequest, Searchable};
use std::str::FromStr;

/// A staff account joined with its directory profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub user: User,
    pub profile: MemberProfile,
}

impl TeamMember {
    pub fn initials(&self) -> String {
        initials(&self.user.name)
    }

    /// Role title shown on directory cards.
    pub fn title(&self) -> &'static str {
        match self.user.role {
            Role::Boss => "Director",
            Role::Employee => "Agent",
            Role::Accountant => "Accountant",
        }
    }
}

impl Searchable for TeamMember {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.user.name.as_str(), self.user.email.as_str()]
    }
}

/// Users in store order, each with its profile or an empty offline one.
pub fn team_members(users: &[User], profiles: &[MemberProfile]) -> Vec<TeamMember> {
    users
        .iter()
        .map(|user| TeamMember {
            user: user.clone(),
            profile: profiles
                .iter()
                .find(|profile| profile.user_id == user.id)
                .cloned()
                .unwrap_or_else(|| MemberProfile::empty(user.id.clone())),
        })
        .collect()
}

/// Directory role filter values (`all`, `director`, `agent`, `accountant`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleChoice {
    #[default]
    All,
    Director,
    Agent,
    Accountant,
}

impl RoleChoice {
    pub fn role(self) -> Option<Role> {
        match self {
            Self::All => None,
            Self::Director => Some(Role::Boss),
            Self::Agent => Some(Role::Employee),
            Self::Accountant => Some(Role::Accountant),
        }
    }
}

impl FromStr for RoleChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "director" => Ok(Self::Director),
            "agent" => Ok(Self::Agent),
            "accountant" => Ok(Self::Accountant),
            other => Err(format!("unknown role filter `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamFilter {
    pub search: String,
    pub role: RoleChoice,
    pub presence: Option<Presence>,
}

pub fn filter_members(members: &[TeamMember], filter: &TeamFilter) -> Vec<TeamMember> {
    let role = filter.role.role();
    ListQuery::new()
        .search(filter.search.clone())
        .filter_if(role.is_some(), move |member: &TeamMember| {
            Some(member.user.role) == role
        })
        .filter_if(filter.presence.is_some(), |member: &TeamMember| {
            Some(member.profile.presence) == filter.presence
        })
        .apply(members)
}

pub fn team_page(members: &[TeamMember], filter: &TeamFilter, request: PageRequest) -> Page<TeamMember> {
    Page::paginate(filter_members(members, filter), request)
}

/// `1 member found`, `4 members found`.
pub fn members_found_label(count: usize) -> String {
    if count == 1 {
        "1 member found".to_string()
    } else {
        format!("{count} members found")
    }
}

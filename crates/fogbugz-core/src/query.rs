//! Query normalization.
//!
//! Free-form CLI arguments become the query string the search command
//! expects, and list filter flags become the flat parameter maps the list
//! commands expect. Malformed queries are never rejected here: the server
//! answers a malformed query with the caller's current list, and that
//! behavior passes through unmodified.

/// The negation token of the server's query grammar. The CLI accepts `!`
/// instead, because `-` collides with option parsing.
pub const REMOTE_NEGATION: &str = "-";

/// Join argument tokens with single spaces and translate the CLI negation
/// marker to the remote grammar's. One substitution pass, everything else
/// preserved exactly. No arguments produce an empty string, which the server
/// defines as "the caller's current case list".
pub fn build_query(args: &[String], negation_marker: &str) -> String {
    args.join(" ").replace(negation_marker, REMOTE_NEGATION)
}

/// Scope a query to open cases.
pub fn with_active_filter(query: &str) -> String {
    format!("{query} status:\"active\"")
}

/// Scope a query to closed cases (the negated active clause).
pub fn with_closed_filter(query: &str) -> String {
    format!("{query} {REMOTE_NEGATION}status:\"active\"")
}

/// Scope a query to cases assigned to the caller.
pub fn with_owner_filter(query: &str) -> String {
    format!("{query} assignedto:me")
}

/// Filter flags for `list statuses`.
#[derive(Debug, Clone, Default)]
pub struct StatusFilter {
    /// Only list resolved statuses.
    pub resolved: bool,
    /// Filter by a category id.
    pub category: Option<u32>,
}

impl StatusFilter {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.resolved {
            params.push(("fResolved", "1".to_string()));
        }
        if let Some(category) = self.category {
            params.push(("ixCategory", category.to_string()));
        }
        params
    }
}

/// Filter flags for `list people`. With no flags set the server's default
/// applies (active and normal users).
#[derive(Debug, Clone, Default)]
pub struct PeopleFilter {
    /// Every record class at once; overrides the individual flags.
    pub all: bool,
    pub include_active: bool,
    pub include_normal: bool,
    pub include_deleted: bool,
    pub include_community: bool,
    pub include_virtual: bool,
}

impl PeopleFilter {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let flags: &[(&'static str, bool)] = &[
            ("fIncludeActive", self.include_active),
            ("fIncludeNormal", self.include_normal),
            ("fIncludeDeleted", self.include_deleted),
            ("fIncludeCommunity", self.include_community),
            ("fIncludeVirtual", self.include_virtual),
        ];
        flags
            .iter()
            .filter(|(_, set)| self.all || *set)
            .map(|(name, _)| (*name, "1".to_string()))
            .collect()
    }
}

//! Core of the FogBugz command line client: session lifecycle, query
//! normalization, the remote command seam, and the case operation engine.
//!
//! Everything here is synchronous and blocking by design. Batch mutations
//! make one remote call per case, in order, and the first failure aborts
//! the remainder of the batch.

pub mod client;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod query;
pub mod response;
pub mod session;

pub use client::{Api, ApiClient};
pub use config::CliConfig;
pub use error::{Error, Result};
pub use model::{Area, Case, Category, Mailbox, Person, Project, Status, Wiki};
pub use response::Matches;
pub use session::Session;

use query::{PeopleFilter, StatusFilter};

/// The status a case is resolved with when none is given: 45, "Fixed".
pub const DEFAULT_RESOLVE_STATUS: u32 = 45;

/// Search for cases matching `query`. `mine` scopes the search to cases
/// assigned to the caller. A malformed query is not rejected locally; the
/// server answers it with the caller's current list.
pub fn search_all(api: &dyn Api, query: &str, columns: &str, mine: bool) -> Result<Vec<Case>> {
    let q = if mine {
        query::with_owner_filter(query)
    } else {
        query.to_string()
    };
    let body = api.invoke(
        "search",
        &[("q", q), ("cols", columns.to_string())],
    )?;
    Ok(response::parse_cases(&body)?.into_vec())
}

/// Search scoped to open cases.
pub fn search_open(api: &dyn Api, query: &str, columns: &str, mine: bool) -> Result<Vec<Case>> {
    search_all(api, &query::with_active_filter(query), columns, mine)
}

/// Search scoped to closed cases.
pub fn search_closed(api: &dyn Api, query: &str, columns: &str, mine: bool) -> Result<Vec<Case>> {
    search_all(api, &query::with_closed_filter(query), columns, mine)
}

/// Resolve one case with the given status. Returns the affected id.
pub fn resolve_case(api: &dyn Api, case: &Case, status_id: u32) -> Result<u32> {
    let body = api.invoke(
        "resolve",
        &[
            ("ixBug", case.id.to_string()),
            ("ixStatus", status_id.to_string()),
        ],
    )?;
    response::expect_ok(&body)?;
    Ok(case.id)
}

/// Resolve each case in order, one remote call per case. The first failure
/// propagates and aborts the remaining batch; earlier cases stay resolved.
pub fn resolve_cases(api: &dyn Api, cases: &[Case], status_id: u32) -> Result<Vec<u32>> {
    let mut resolved = Vec::with_capacity(cases.len());
    for case in cases {
        resolved.push(resolve_case(api, case, status_id)?);
    }
    Ok(resolved)
}

/// Close one case. Returns the affected id.
pub fn close_case(api: &dyn Api, case: &Case) -> Result<u32> {
    let body = api.invoke("close", &[("ixBug", case.id.to_string())])?;
    response::expect_ok(&body)?;
    Ok(case.id)
}

/// Close each case in order; same batch semantics as [`resolve_cases`].
pub fn close_cases(api: &dyn Api, cases: &[Case]) -> Result<Vec<u32>> {
    let mut closed = Vec::with_capacity(cases.len());
    for case in cases {
        closed.push(close_case(api, case)?);
    }
    Ok(closed)
}

/// Reopen one closed case. Returns the affected id.
pub fn reopen_case(api: &dyn Api, case: &Case) -> Result<u32> {
    let body = api.invoke("reopen", &[("ixBug", case.id.to_string())])?;
    response::expect_ok(&body)?;
    Ok(case.id)
}

/// Reopen each case in order; same batch semantics as [`resolve_cases`].
pub fn reopen_cases(api: &dyn Api, cases: &[Case]) -> Result<Vec<u32>> {
    let mut reopened = Vec::with_capacity(cases.len());
    for case in cases {
        reopened.push(reopen_case(api, case)?);
    }
    Ok(reopened)
}

pub fn list_statuses(api: &dyn Api, filter: &StatusFilter) -> Result<Vec<Status>> {
    let body = api.invoke("listStatuses", &filter.params())?;
    Ok(response::parse_list(&body, "statuses", "status", Status::from_node)?.into_vec())
}

pub fn list_people(api: &dyn Api, filter: &PeopleFilter) -> Result<Vec<Person>> {
    let body = api.invoke("listPeople", &filter.params())?;
    Ok(response::parse_list(&body, "people", "person", Person::from_node)?.into_vec())
}

pub fn list_projects(api: &dyn Api) -> Result<Vec<Project>> {
    let body = api.invoke("listProjects", &[])?;
    Ok(response::parse_list(&body, "projects", "project", Project::from_node)?.into_vec())
}

pub fn list_categories(api: &dyn Api) -> Result<Vec<Category>> {
    let body = api.invoke("listCategories", &[])?;
    Ok(response::parse_list(&body, "categories", "category", Category::from_node)?.into_vec())
}

pub fn list_areas(api: &dyn Api) -> Result<Vec<Area>> {
    let body = api.invoke("listAreas", &[])?;
    Ok(response::parse_list(&body, "areas", "area", Area::from_node)?.into_vec())
}

pub fn list_wikis(api: &dyn Api) -> Result<Vec<Wiki>> {
    let body = api.invoke("listWikis", &[])?;
    Ok(response::parse_list(&body, "wikis", "wiki", Wiki::from_node)?.into_vec())
}

pub fn list_mailboxes(api: &dyn Api) -> Result<Vec<Mailbox>> {
    let body = api.invoke("listMailboxes", &[])?;
    Ok(response::parse_list(&body, "mailboxes", "mailbox", Mailbox::from_node)?.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Records every command issued and replays canned response bodies.
    struct StubApi {
        calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
        responses: RefCell<VecDeque<Result<String>>>,
    }

    impl StubApi {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                responses: RefCell::new(responses.into()),
            }
        }

        fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.borrow().clone()
        }

        fn param<'a>(
            call: &'a (String, Vec<(String, String)>),
            name: &str,
        ) -> Option<&'a str> {
            call.1
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    impl Api for StubApi {
        fn invoke(&self, cmd: &str, params: &[(&str, String)]) -> Result<String> {
            self.calls.borrow_mut().push((
                cmd.to_string(),
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect(),
            ));
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("stub ran out of responses")
        }
    }

    fn ok_body() -> Result<String> {
        Ok("<response><case ixBug=\"0\"/></response>".to_string())
    }

    fn case(id: u32) -> Case {
        Case {
            id,
            parent_id: None,
            open: true,
            title: format!("Case {id}"),
            assigned_to: "Me".to_string(),
            assigned_to_email: "me@example.com".to_string(),
            status: "Active".to_string(),
            status_id: None,
            category_id: None,
            extra: Default::default(),
        }
    }

    fn cases_body(ids: &[u32]) -> String {
        let mut body = String::from("<response><cases>");
        for id in ids {
            body.push_str(&format!(
                "<case ixBug=\"{id}\"><ixBug>{id}</ixBug><fOpen>true</fOpen>\
                 <sTitle>Case {id}</sTitle><sStatus>Active</sStatus></case>"
            ));
        }
        body.push_str("</cases></response>");
        body
    }

    #[test]
    fn search_sends_query_and_columns() {
        let api = StubApi::new(vec![Ok(cases_body(&[12]))]);
        let cases = search_all(&api, "crash", "ixBug,sTitle", false).unwrap();
        assert_eq!(cases.len(), 1);

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "search");
        assert_eq!(StubApi::param(&calls[0], "q"), Some("crash"));
        assert_eq!(StubApi::param(&calls[0], "cols"), Some("ixBug,sTitle"));
    }

    #[test]
    fn search_open_mine_embeds_the_precondition_filters() {
        let api = StubApi::new(vec![Ok(cases_body(&[12, 25]))]);
        search_open(&api, "12, 25, 556", config::DEFAULT_COLUMNS, true).unwrap();

        let calls = api.calls();
        assert_eq!(
            StubApi::param(&calls[0], "q"),
            Some("12, 25, 556 status:\"active\" assignedto:me")
        );
    }

    #[test]
    fn search_closed_uses_the_negated_clause() {
        let api = StubApi::new(vec![Ok(cases_body(&[]))]);
        let cases = search_closed(&api, "crash", "ixBug", false).unwrap();
        assert!(cases.is_empty());

        let calls = api.calls();
        assert_eq!(
            StubApi::param(&calls[0], "q"),
            Some("crash -status:\"active\"")
        );
    }

    #[test]
    fn empty_search_returns_the_default_list_untouched() {
        // Server order comes back exactly as sent; no local filtering.
        let api = StubApi::new(vec![Ok(cases_body(&[556, 12, 25]))]);
        let cases = search_all(&api, "", config::DEFAULT_COLUMNS, false).unwrap();
        let ids: Vec<u32> = cases.iter().map(|case| case.id).collect();
        assert_eq!(ids, vec![556, 12, 25]);
    }

    #[test]
    fn remote_error_surfaces_instead_of_results() {
        let api = StubApi::new(vec![Ok(
            "<response><error code=\"10\">bad command</error></response>".to_string(),
        )]);
        let err = search_all(&api, "", "ixBug", false).unwrap_err();
        assert!(matches!(err, Error::Remote { .. }));
    }

    #[test]
    fn resolve_round_trip_issues_one_call_per_case_in_order() {
        let matched = [case(12), case(25), case(556)];
        let api = StubApi::new(vec![ok_body(), ok_body(), ok_body()]);

        let resolved = resolve_cases(&api, &matched, DEFAULT_RESOLVE_STATUS).unwrap();
        assert_eq!(resolved, vec![12, 25, 556]);

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        for (call, id) in calls.iter().zip(["12", "25", "556"]) {
            assert_eq!(call.0, "resolve");
            assert_eq!(StubApi::param(call, "ixBug"), Some(id));
            assert_eq!(StubApi::param(call, "ixStatus"), Some("45"));
        }
    }

    #[test]
    fn resolve_with_close_issues_both_batches() {
        let matched = [case(7), case(8)];
        let api = StubApi::new(vec![ok_body(), ok_body(), ok_body(), ok_body()]);

        let resolved = resolve_cases(&api, &matched, 99).unwrap();
        let closed = close_cases(&api, &matched).unwrap();
        assert_eq!(resolved, vec![7, 8]);
        assert_eq!(closed, vec![7, 8]);

        let calls = api.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[..2].iter().all(|call| call.0 == "resolve"));
        assert_eq!(StubApi::param(&calls[0], "ixStatus"), Some("99"));
        assert_eq!(StubApi::param(&calls[1], "ixStatus"), Some("99"));
        assert!(calls[2..].iter().all(|call| call.0 == "close"));
        assert_eq!(StubApi::param(&calls[3], "ixBug"), Some("8"));
    }

    #[test]
    fn close_sends_no_status() {
        let api = StubApi::new(vec![ok_body()]);
        close_case(&api, &case(3)).unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].0, "close");
        assert_eq!(StubApi::param(&calls[0], "ixStatus"), None);
    }

    #[test]
    fn reopen_issues_reopen_per_case() {
        let matched = [case(40), case(41)];
        let api = StubApi::new(vec![ok_body(), ok_body()]);
        let reopened = reopen_cases(&api, &matched).unwrap();
        assert_eq!(reopened, vec![40, 41]);
        assert!(api.calls().iter().all(|call| call.0 == "reopen"));
    }

    #[test]
    fn batch_aborts_on_first_failure() {
        // Second case rejects; the third must never be attempted.
        let matched = [case(1), case(2), case(3)];
        let api = StubApi::new(vec![
            ok_body(),
            Ok("<response><error code=\"9\">Case is closed</error></response>".to_string()),
            ok_body(),
        ]);

        let err = resolve_cases(&api, &matched, DEFAULT_RESOLVE_STATUS).unwrap_err();
        assert!(matches!(err, Error::Remote { .. }));
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn excluded_cases_never_reach_the_mutation_loop() {
        // The precondition filter lives in the search query: the server
        // returns only open cases assigned to the caller, so the engine
        // issues zero mutation calls for anything else.
        let api = StubApi::new(vec![Ok(cases_body(&[25]))]);
        let eligible = search_open(&api, "12, 25", config::DEFAULT_COLUMNS, true).unwrap();
        assert_eq!(eligible.len(), 1);

        let api = StubApi::new(vec![ok_body()]);
        resolve_cases(&api, &eligible, DEFAULT_RESOLVE_STATUS).unwrap();
        assert_eq!(api.calls().len(), 1);
        assert_eq!(StubApi::param(&api.calls()[0], "ixBug"), Some("25"));
    }

    #[test]
    fn list_statuses_maps_filter_flags() {
        let body = "<response><statuses>\
            <status><sStatus>Fixed</sStatus><ixStatus>45</ixStatus></status>\
            </statuses></response>";
        let api = StubApi::new(vec![Ok(body.to_string())]);
        let statuses = list_statuses(
            &api,
            &StatusFilter {
                resolved: true,
                category: Some(2),
            },
        )
        .unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].name, "Fixed");

        let calls = api.calls();
        assert_eq!(calls[0].0, "listStatuses");
        assert_eq!(StubApi::param(&calls[0], "fResolved"), Some("1"));
        assert_eq!(StubApi::param(&calls[0], "ixCategory"), Some("2"));
    }

    #[test]
    fn list_people_all_sends_every_include_flag() {
        let body = "<response><people>\
            <person><sFullName>A</sFullName></person>\
            <person><sFullName>B</sFullName></person>\
            </people></response>";
        let api = StubApi::new(vec![Ok(body.to_string())]);
        let people = list_people(
            &api,
            &PeopleFilter {
                all: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(people.len(), 2);

        let calls = api.calls();
        assert_eq!(calls[0].0, "listPeople");
        for flag in [
            "fIncludeActive",
            "fIncludeNormal",
            "fIncludeDeleted",
            "fIncludeCommunity",
            "fIncludeVirtual",
        ] {
            assert_eq!(StubApi::param(&calls[0], flag), Some("1"));
        }
    }

    #[test]
    fn single_project_is_lifted_into_a_list() {
        let body = "<response><projects>\
            <project><ixProject>1</ixProject><sProject>Inbox</sProject></project>\
            </projects></response>";
        let api = StubApi::new(vec![Ok(body.to_string())]);
        let projects = list_projects(&api).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Inbox");
    }
}

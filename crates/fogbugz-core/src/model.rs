//! Remote entity records.
//!
//! The wire protocol names fields in Hungarian (`ixBug`, `sStatus`,
//! `fOpen`). Those names exist only here, in the `from_node` constructors;
//! the rest of the crate works with the named fields below. Entities are
//! read-only from the client's perspective: mutations are requested from the
//! server, never applied locally.

use std::collections::BTreeMap;

use roxmltree::Node;

use crate::error::{Error, Result};

pub(crate) fn text_of(node: Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(|text| text.to_string())
}

pub(crate) fn flag_of(node: Node<'_, '_>, tag: &str) -> bool {
    matches!(text_of(node, tag).as_deref(), Some("true") | Some("1"))
}

pub(crate) fn number_of(node: Node<'_, '_>, tag: &str) -> Option<u32> {
    text_of(node, tag).and_then(|text| text.trim().parse().ok())
}

/// A tracked case. Identity is `id`; `extra` holds any requested columns
/// beyond the ones modeled here, verbatim by wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub id: u32,
    pub parent_id: Option<u32>,
    pub open: bool,
    pub title: String,
    pub assigned_to: String,
    pub assigned_to_email: String,
    pub status: String,
    pub status_id: Option<u32>,
    pub category_id: Option<u32>,
    pub extra: BTreeMap<String, String>,
}

impl Case {
    /// Build a case from a `<case>` element. The id is required — it may
    /// appear as the `ixBug` attribute, the `ixBug` child element, or both.
    pub fn from_node(node: Node<'_, '_>) -> Result<Self> {
        let id = node
            .attribute("ixBug")
            .and_then(|value| value.parse().ok())
            .or_else(|| number_of(node, "ixBug"))
            .ok_or_else(|| Error::Response {
                message: "case without an ixBug id".to_string(),
            })?;

        let mut case = Case {
            id,
            parent_id: None,
            open: false,
            title: String::new(),
            assigned_to: String::new(),
            assigned_to_email: String::new(),
            status: String::new(),
            status_id: None,
            category_id: None,
            extra: BTreeMap::new(),
        };

        for child in node.children().filter(Node::is_element) {
            let value = child.text().unwrap_or_default();
            match child.tag_name().name() {
                "ixBug" => {}
                "ixBugParent" => case.parent_id = value.trim().parse().ok(),
                "fOpen" => case.open = matches!(value, "true" | "1"),
                "sTitle" => case.title = value.to_string(),
                "sPersonAssignedTo" => case.assigned_to = value.to_string(),
                "sEmailAssignedTo" => case.assigned_to_email = value.to_string(),
                "sStatus" => case.status = value.to_string(),
                "ixStatus" => case.status_id = value.trim().parse().ok(),
                "ixCategory" => case.category_id = value.trim().parse().ok(),
                other => {
                    case.extra.insert(other.to_string(), value.to_string());
                }
            }
        }

        Ok(case)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub name: String,
    pub id: Option<u32>,
    pub category_id: Option<u32>,
}

impl Status {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            name: text_of(node, "sStatus").unwrap_or_default(),
            id: number_of(node, "ixStatus"),
            category_id: number_of(node, "ixCategory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub full_name: String,
    pub email: String,
    pub admin: bool,
    pub deleted: bool,
    pub virtual_user: bool,
    pub last_activity: String,
}

impl Person {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            full_name: text_of(node, "sFullName").unwrap_or_default(),
            email: text_of(node, "sEmail").unwrap_or_default(),
            admin: flag_of(node, "fAdministrator"),
            deleted: flag_of(node, "fDeleted"),
            virtual_user: flag_of(node, "fVirtual"),
            last_activity: text_of(node, "dtLastActivity").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Option<u32>,
    pub name: String,
    pub owner: String,
    pub email: String,
    pub phone: String,
}

impl Project {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: number_of(node, "ixProject"),
            name: text_of(node, "sProject").unwrap_or_default(),
            owner: text_of(node, "sPersonOwner").unwrap_or_default(),
            email: text_of(node, "sEmail").unwrap_or_default(),
            phone: text_of(node, "sPhone").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Option<u32>,
    pub plural: String,
}

impl Category {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: number_of(node, "ixCategory"),
            plural: text_of(node, "sPlural").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: Option<u32>,
    pub name: String,
    pub project: String,
}

impl Area {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: number_of(node, "ixArea"),
            name: text_of(node, "sArea").unwrap_or_default(),
            project: text_of(node, "sProject").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiki {
    pub id: Option<u32>,
    pub name: String,
    /// The wiki's tag line, HTML included; absent for wikis without one.
    pub tagline: Option<String>,
}

impl Wiki {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: number_of(node, "ixWiki"),
            name: text_of(node, "sWiki").unwrap_or_default(),
            tagline: text_of(node, "sTagLineHTML"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub id: Option<u32>,
    pub email: String,
    pub user: String,
}

impl Mailbox {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: number_of(node, "ixMailbox"),
            email: text_of(node, "sEmail").unwrap_or_default(),
            user: text_of(node, "sEmailUser").unwrap_or_default(),
        }
    }
}

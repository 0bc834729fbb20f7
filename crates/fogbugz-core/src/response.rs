//! Response envelope parsing and shape normalization.
//!
//! The API collapses collection arity: no matches omit the collection,
//! exactly one match arrives as a bare object, two or more arrive as a
//! collection. That ambiguity is modeled as [`Matches`] right here at the
//! deserialization boundary and converted to an ordered `Vec` before
//! anything downstream sees it.

use roxmltree::{Document, Node};

use crate::error::{Error, Result};
use crate::model::Case;

/// The three shapes a result collection can arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches<T> {
    Empty,
    Single(Box<T>),
    Many(Vec<T>),
}

impl<T> Matches<T> {
    /// Normalize to an ordered sequence. `Empty` becomes `[]`, `Single`
    /// becomes a one-element sequence, `Many` passes through in server
    /// order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Matches::Empty => Vec::new(),
            Matches::Single(item) => vec![*item],
            Matches::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Matches::Empty => 0,
            Matches::Single(_) => 1,
            Matches::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(|err| Error::Response {
        message: err.to_string(),
    })
}

/// The `<error>` envelope, if the response carries one.
fn remote_error(doc: &Document<'_>) -> Option<String> {
    doc.root_element()
        .children()
        .find(|node| node.has_tag_name("error"))
        .map(|node| node.text().unwrap_or("unspecified server error").trim().to_string())
}

/// Parse a logon response into the session token. An error envelope here is
/// an authentication failure, not a generic remote error.
pub fn parse_token(xml: &str) -> Result<String> {
    let doc = parse_document(xml)?;
    if let Some(message) = remote_error(&doc) {
        return Err(Error::Authentication { message });
    }
    doc.root_element()
        .children()
        .find(|node| node.has_tag_name("token"))
        .and_then(|node| node.text())
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Response {
            message: "logon response carried no token".to_string(),
        })
}

/// Check a mutation response for an error envelope.
pub fn expect_ok(xml: &str) -> Result<()> {
    let doc = parse_document(xml)?;
    match remote_error(&doc) {
        Some(message) => Err(Error::Remote { message }),
        None => Ok(()),
    }
}

fn items_of<'a>(doc: &'a Document<'a>, plural: &str, singular: &str) -> Vec<Node<'a, 'a>> {
    doc.root_element()
        .children()
        .find(|node| node.has_tag_name(plural))
        .map(|container| {
            container
                .children()
                .filter(|node| node.has_tag_name(singular))
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a search response into case matches, preserving server order.
pub fn parse_cases(xml: &str) -> Result<Matches<Case>> {
    let doc = parse_document(xml)?;
    if let Some(message) = remote_error(&doc) {
        return Err(Error::Remote { message });
    }
    let nodes = items_of(&doc, "cases", "case");
    match nodes.as_slice() {
        [] => Ok(Matches::Empty),
        [only] => Ok(Matches::Single(Box::new(Case::from_node(*only)?))),
        _ => nodes
            .into_iter()
            .map(Case::from_node)
            .collect::<Result<Vec<_>>>()
            .map(Matches::Many),
    }
}

/// Parse a list response, unwrapped by the type's plural container and
/// singular item names.
pub fn parse_list<T>(
    xml: &str,
    plural: &str,
    singular: &str,
    parse: impl Fn(Node<'_, '_>) -> T,
) -> Result<Matches<T>> {
    let doc = parse_document(xml)?;
    if let Some(message) = remote_error(&doc) {
        return Err(Error::Remote { message });
    }
    let mut items: Vec<T> = items_of(&doc, plural, singular)
        .into_iter()
        .map(parse)
        .collect();
    match items.len() {
        0 => Ok(Matches::Empty),
        1 => Ok(Matches::Single(Box::new(items.remove(0)))),
        _ => Ok(Matches::Many(items)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    #[test]
    fn absent_collection_normalizes_to_empty() {
        let matches = parse_cases("<response><cases count=\"0\"></cases></response>").unwrap();
        assert_eq!(matches, Matches::Empty);
        assert!(matches.into_vec().is_empty());
    }

    #[test]
    fn missing_container_normalizes_to_empty() {
        let matches = parse_cases("<response></response>").unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn single_match_is_lifted_into_one_element_sequence() {
        let xml = r#"<response><cases count="1">
            <case ixBug="12"><sTitle>Lonely</sTitle></case>
        </cases></response>"#;
        let matches = parse_cases(xml).unwrap();
        assert!(matches!(matches, Matches::Single(_)));
        let cases = matches.into_vec();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, 12);
    }

    #[test]
    fn many_matches_preserve_server_order() {
        let xml = r#"<response><cases count="3">
            <case ixBug="12"/>
            <case ixBug="25"/>
            <case ixBug="556"/>
        </cases></response>"#;
        let matches = parse_cases(xml).unwrap();
        assert_eq!(matches.len(), 3);
        let ids: Vec<u32> = matches.into_vec().into_iter().map(|case| case.id).collect();
        assert_eq!(ids, vec![12, 25, 556]);
    }

    #[test]
    fn error_envelope_becomes_remote_error() {
        let xml = r#"<response><error code="10">Unrecognized command</error></response>"#;
        let err = parse_cases(xml).unwrap_err();
        assert!(matches!(err, Error::Remote { .. }));
        assert_eq!(err.to_string(), "Unrecognized command");
    }

    #[test]
    fn malformed_body_is_a_response_error() {
        let err = parse_cases("this is not xml <<").unwrap_err();
        assert!(matches!(err, Error::Response { .. }));
    }

    #[test]
    fn token_is_extracted_from_logon_response() {
        let token =
            parse_token("<response><token>24dsg34lok43un23</token></response>").unwrap();
        assert_eq!(token, "24dsg34lok43un23");
    }

    #[test]
    fn logon_error_is_an_authentication_failure() {
        let xml = r#"<response><error code="1">Incorrect password or username</error></response>"#;
        let err = parse_token(xml).unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
        assert!(err.to_string().contains("Incorrect password"));
    }

    #[test]
    fn logon_without_token_is_malformed() {
        let err = parse_token("<response></response>").unwrap_err();
        assert!(matches!(err, Error::Response { .. }));
    }

    #[test]
    fn expect_ok_passes_clean_responses() {
        assert!(expect_ok("<response><case ixBug=\"12\"/></response>").is_ok());
    }

    #[test]
    fn expect_ok_surfaces_the_error_message_verbatim() {
        let err = expect_ok(r#"<response><error code="9">Case is closed</error></response>"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Case is closed");
    }

    #[test]
    fn list_unwraps_singular_items() {
        let xml = r#"<response><statuses>
            <status><sStatus>Active</sStatus><ixStatus>1</ixStatus></status>
            <status><sStatus>Fixed</sStatus><ixStatus>45</ixStatus></status>
        </statuses></response>"#;
        let statuses = parse_list(xml, "statuses", "status", Status::from_node)
            .unwrap()
            .into_vec();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[1].name, "Fixed");
        assert_eq!(statuses[1].id, Some(45));
    }

    #[test]
    fn single_list_item_is_lifted_like_cases() {
        let xml = r#"<response><statuses>
            <status><sStatus>Active</sStatus></status>
        </statuses></response>"#;
        let matches = parse_list(xml, "statuses", "status", Status::from_node).unwrap();
        assert!(matches!(matches, Matches::Single(_)));
    }
}

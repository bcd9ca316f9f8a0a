//! User directory provider.
//!
//! The directory is an XML export of the company intranet: a `<server>`
//! element describing where avatars are hosted and a `<users>` list.
//! Avatar paths are turned into absolute URLs.

use std::path::Path;

use presence_core::{
    DataSourceError, PresenceResult, UserDirectory, UserDirectoryError, UserId, UserInfo,
};
use roxmltree::{Document, Node};

/// Loads and parses the user directory at `path`.
pub fn load_user_directory(path: impl AsRef<Path>) -> PresenceResult<UserDirectory> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| DataSourceError::new(path, e))?;
    let directory = parse_user_directory(&source)?;
    tracing::debug!(path = %path.display(), users = directory.len(), "Loaded user directory");
    Ok(directory)
}

/// Parses a user directory document.
pub fn parse_user_directory(source: &str) -> Result<UserDirectory, UserDirectoryError> {
    let document = Document::parse(source).map_err(|e| UserDirectoryError::Malformed {
        reason: e.to_string(),
    })?;
    let root = document.root_element();

    let server = child(root, "server")?;
    let base_url = format!(
        "{}://{}",
        child_text(server, "protocol")?,
        child_text(server, "host")?
    );

    let mut directory = UserDirectory::new();
    for user in child(root, "users")?
        .children()
        .filter(|n| n.has_tag_name("user"))
    {
        let raw_id = user.attribute("id").unwrap_or_default();
        let user_id = raw_id
            .trim()
            .parse::<UserId>()
            .map_err(|_| UserDirectoryError::InvalidUserId {
                value: raw_id.to_string(),
            })?;
        let name = child_text(user, "name")?.to_string();
        let avatar = match optional_child_text(user, "avatar") {
            Some(path) => format!("{}{}", base_url, path),
            None => String::new(),
        };
        directory.insert(user_id, UserInfo { name, avatar });
    }
    Ok(directory)
}

fn child<'a, 'input>(
    node: Node<'a, 'input>,
    element: &'static str,
) -> Result<Node<'a, 'input>, UserDirectoryError> {
    node.children()
        .find(|n| n.has_tag_name(element))
        .ok_or(UserDirectoryError::MissingElement { element })
}

fn child_text<'a>(node: Node<'a, '_>, element: &'static str) -> Result<&'a str, UserDirectoryError> {
    optional_child_text(node, element).ok_or(UserDirectoryError::MissingElement { element })
}

fn optional_child_text<'a>(node: Node<'a, '_>, element: &'static str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(element))
        .and_then(|n| n.text())
        .map(str::trim)
}

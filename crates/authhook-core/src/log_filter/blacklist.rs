use std::collections::BTreeSet;

use crate::descriptor::{DescriptorId, DescriptorTree};

/// Set of invocation prefixes that precede a credential
///
/// Every entry starts with `/` and ends with a single space, so `/login `
/// matches `/login secret` but not `/loginhistory`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    entries: BTreeSet<String>,
}

impl Blacklist {
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    /// Entries in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry that `text` starts with, ignoring ASCII case
    pub fn matching_entry(&self, text: &str) -> Option<&str> {
        self.iter().find(|entry| starts_with_ignore_case(text, entry))
    }

    /// Whether `text` starts with any entry, ignoring ASCII case
    pub fn matches(&self, text: &str) -> bool {
        self.matching_entry(text).is_some()
    }
}

impl FromIterator<String> for Blacklist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// The text typed before a descriptor's own label: `/` plus each ancestor's primary label
pub fn invocation_prefix(tree: &DescriptorTree, id: DescriptorId) -> String {
    let mut prefix = String::from("/");
    for label in tree.ancestor_labels(id) {
        prefix.push_str(label);
        prefix.push(' ');
    }
    prefix
}

/// Every textual form that invokes `id`, e.g. `/authme cp`, `/authme changepass`
pub fn command_syntaxes(tree: &DescriptorTree, id: DescriptorId) -> Vec<String> {
    let Some(node) = tree.get(id) else {
        return Vec::new();
    };
    let prefix = invocation_prefix(tree, id);
    node.labels()
        .iter()
        .map(|label| format!("{}{}", prefix, label))
        .collect()
}

/// Build the exhaustive blacklist for all sensitive descriptors
pub fn build_blacklist(tree: &DescriptorTree) -> Blacklist {
    tree.iter()
        .filter(|(_, node)| node.has_sensitive_argument())
        .flat_map(|(id, _)| command_syntaxes(tree, id))
        .map(|syntax| syntax + " ")
        .collect()
}

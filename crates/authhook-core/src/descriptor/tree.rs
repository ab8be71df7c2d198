use std::collections::HashSet;

use crate::errors::{AuthHookError, Result};

/// Index of a descriptor inside its [`DescriptorTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(usize);

impl DescriptorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One command: its aliases, its place in the tree, and whether it takes a password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    labels: Vec<String>,
    parent: Option<DescriptorId>,
    children: Vec<DescriptorId>,
    sensitive_argument: bool,
}

impl CommandDescriptor {
    /// Aliases in declaration order; never empty
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The first label, used when the command is written as a parent
    pub fn primary_label(&self) -> &str {
        // labels is non-empty by construction
        self.labels.first().map(String::as_str).unwrap_or_default()
    }

    pub fn parent(&self) -> Option<DescriptorId> {
        self.parent
    }

    pub fn children(&self) -> &[DescriptorId] {
        &self.children
    }

    /// Whether an argument of this command is a credential
    pub fn has_sensitive_argument(&self) -> bool {
        self.sensitive_argument
    }
}

/// Builds a [`DescriptorTree`], validating each descriptor as it is added
///
/// Rules enforced:
/// - every descriptor has at least one label
/// - labels are non-empty, contain no whitespace, and are unique per descriptor
/// - a descriptor that receives children has exactly one label
#[derive(Debug, Default)]
pub struct DescriptorTreeBuilder {
    nodes: Vec<CommandDescriptor>,
    roots: Vec<DescriptorId>,
}

impl DescriptorTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level command
    ///
    /// # Errors
    ///
    /// Returns an error if the labels are empty, malformed or repeated.
    pub fn add_root(&mut self, labels: &[&str], sensitive_argument: bool) -> Result<DescriptorId> {
        let id = self.push(labels, None, sensitive_argument)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Add a subcommand under `parent`
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is unknown or has more than one label, or
    /// if the labels are empty, malformed or repeated.
    pub fn add_child(
        &mut self,
        parent: DescriptorId,
        labels: &[&str],
        sensitive_argument: bool,
    ) -> Result<DescriptorId> {
        let parent_node = self
            .nodes
            .get(parent.0)
            .ok_or(AuthHookError::UnknownDescriptor { id: parent.0 })?;
        if parent_node.labels.len() != 1 {
            return Err(AuthHookError::MultiLabelParent {
                parent_labels: parent_node.labels.clone(),
            });
        }

        let id = self.push(labels, Some(parent), sensitive_argument)?;
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn build(self) -> DescriptorTree {
        DescriptorTree {
            nodes: self.nodes,
            roots: self.roots,
        }
    }

    fn push(
        &mut self,
        labels: &[&str],
        parent: Option<DescriptorId>,
        sensitive_argument: bool,
    ) -> Result<DescriptorId> {
        let labels = validate_labels(labels)?;
        let id = DescriptorId(self.nodes.len());
        self.nodes.push(CommandDescriptor {
            labels,
            parent,
            children: Vec::new(),
            sensitive_argument,
        });
        Ok(id)
    }
}

fn validate_labels(labels: &[&str]) -> Result<Vec<String>> {
    if labels.is_empty() {
        return Err(AuthHookError::EmptyLabels);
    }

    let mut seen = HashSet::new();
    for label in labels {
        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return Err(AuthHookError::InvalidLabel {
                label: (*label).to_string(),
            });
        }
        if !seen.insert(label.to_ascii_lowercase()) {
            return Err(AuthHookError::DuplicateLabel {
                label: (*label).to_string(),
            });
        }
    }

    Ok(labels.iter().map(|label| (*label).to_string()).collect())
}

/// The command catalog, read-only once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorTree {
    nodes: Vec<CommandDescriptor>,
    roots: Vec<DescriptorId>,
}

impl DescriptorTree {
    pub fn roots(&self) -> &[DescriptorId] {
        &self.roots
    }

    pub fn get(&self, id: DescriptorId) -> Option<&CommandDescriptor> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: DescriptorId) -> Option<&CommandDescriptor> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    pub fn children(&self, id: DescriptorId) -> impl Iterator<Item = &CommandDescriptor> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |child| self.get(*child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Primary labels of `id`'s ancestors, outermost first
    pub fn ancestor_labels(&self, id: DescriptorId) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut cursor = self.get(id).and_then(|node| node.parent);
        while let Some(parent) = cursor {
            match self.get(parent) {
                Some(node) => {
                    labels.push(node.primary_label());
                    cursor = node.parent;
                }
                None => break,
            }
        }
        labels.reverse();
        labels
    }

    /// Pre-order walk over all descriptors, roots in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &CommandDescriptor)> + '_ {
        let mut stack: Vec<DescriptorId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = self.get(id)?;
            stack.extend(node.children.iter().rev().copied());
            Some((id, node))
        })
    }

    /// Find a descriptor by a label path such as `["authme", "cp"]`
    ///
    /// Any alias matches at each level, ignoring ASCII case.
    pub fn find(&self, path: &[&str]) -> Option<DescriptorId> {
        let (first, rest) = path.split_first()?;
        let mut current = self.find_among(&self.roots, first)?;
        for label in rest {
            let node = self.get(current)?;
            current = self.find_among(&node.children, label)?;
        }
        Some(current)
    }

    fn find_among(&self, candidates: &[DescriptorId], label: &str) -> Option<DescriptorId> {
        candidates.iter().copied().find(|id| {
            self.get(*id).is_some_and(|node| {
                node.labels
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(label))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DescriptorTree {
        let mut builder = DescriptorTreeBuilder::new();
        builder.add_root(&["register", "reg"], true).unwrap();
        let authme = builder.add_root(&["authme"], false).unwrap();
        builder
            .add_child(authme, &["changepassword", "cp"], true)
            .unwrap();
        builder.add_child(authme, &["reload", "rld"], false).unwrap();
        builder.build()
    }

    #[test]
    fn test_empty_labels_rejected() {
        let mut builder = DescriptorTreeBuilder::new();
        assert_eq!(builder.add_root(&[], false), Err(AuthHookError::EmptyLabels));
    }

    #[test]
    fn test_whitespace_label_rejected() {
        let mut builder = DescriptorTreeBuilder::new();
        let result = builder.add_root(&["change password"], true);
        assert!(matches!(result, Err(AuthHookError::InvalidLabel { .. })));
    }

    #[test]
    fn test_duplicate_label_rejected_case_insensitively() {
        let mut builder = DescriptorTreeBuilder::new();
        let result = builder.add_root(&["login", "LOGIN"], true);
        assert!(matches!(result, Err(AuthHookError::DuplicateLabel { .. })));
    }

    #[test]
    fn test_child_of_multi_label_parent_rejected() {
        let mut builder = DescriptorTreeBuilder::new();
        let email = builder.add_root(&["email", "mail"], false).unwrap();

        let result = builder.add_child(email, &["setpassword"], true);

        assert_eq!(
            result,
            Err(AuthHookError::MultiLabelParent {
                parent_labels: vec!["email".to_string(), "mail".to_string()],
            })
        );
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut other = DescriptorTreeBuilder::new();
        other.add_root(&["a"], false).unwrap();
        let foreign = other.add_root(&["b"], false).unwrap();

        let mut builder = DescriptorTreeBuilder::new();
        let result = builder.add_child(foreign, &["c"], false);

        assert_eq!(result, Err(AuthHookError::UnknownDescriptor { id: 1 }));
    }

    #[test]
    fn test_parent_back_reference() {
        let tree = sample_tree();
        let cp = tree.find(&["authme", "cp"]).unwrap();

        let parent = tree.parent(cp).unwrap();

        assert_eq!(parent.primary_label(), "authme");
        assert_eq!(tree.ancestor_labels(cp), vec!["authme"]);
    }

    #[test]
    fn test_iter_is_preorder() {
        let tree = sample_tree();
        let order: Vec<&str> = tree.iter().map(|(_, node)| node.primary_label()).collect();
        assert_eq!(order, vec!["register", "authme", "changepassword", "reload"]);
    }

    #[test]
    fn test_find_by_alias_ignores_case() {
        let tree = sample_tree();
        assert!(tree.find(&["REG"]).is_some());
        assert!(tree.find(&["authme", "RLD"]).is_some());
        assert!(tree.find(&["authme", "missing"]).is_none());
        assert!(tree.find(&[]).is_none());
    }

    #[test]
    fn test_children_iterates_in_declaration_order() {
        let tree = sample_tree();
        let authme = tree.find(&["authme"]).unwrap();
        let labels: Vec<&str> = tree.children(authme).map(|c| c.primary_label()).collect();
        assert_eq!(labels, vec!["changepassword", "reload"]);
    }
}

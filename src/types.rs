//! Core types used throughout the project.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Flat source phrase → translated phrase mapping of one language (`<lang>.json`).
pub type SingleTranslations = IndexMap<String, String>;

/// Contents of one group file (`<lang>/<group>.json`).
pub type GroupTree = IndexMap<String, TranslationNode>;

/// Group name → group contents for one language.
pub type GroupTranslations = IndexMap<String, GroupTree>;

/// Language code → everything stored for that language.
pub type TranslationCorpus = IndexMap<String, LanguageTranslations>;

/// A value inside a group file: either a translated string or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Leaf(String),
    Node(GroupTree),
}

impl TranslationNode {
    /// Returns the translated string if this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Node(_) => None,
        }
    }
}

impl From<&str> for TranslationNode {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

/// Both halves of a language's translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTranslations {
    pub single: SingleTranslations,
    pub group: GroupTranslations,
}

/// A source-language value next to its translation in a target language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPair {
    pub source: String,
    /// Empty when the target language has no entry for the key.
    pub target: String,
}

/// Source keys side by side with a target language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationComparison {
    pub single: IndexMap<String, TranslationPair>,
    /// Keyed by `group.path` using the configured separator.
    pub group: IndexMap<String, TranslationPair>,
}

/// Keys to seed into a language without overwriting anything already there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingTranslations {
    /// Source phrases; stored self-mapped.
    pub single: Vec<String>,
    /// Dotted group keys; stored with an empty value.
    pub group: Vec<String>,
}

/// Writing through a path collided with an existing entry of the other kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathConflict {
    #[error("'{0}' is a translated string and cannot hold nested keys")]
    LeafInPath(String),
    #[error("'{0}' holds nested keys and cannot be replaced by a string")]
    NodeAtLeaf(String),
    #[error("empty key path")]
    EmptyPath,
}

/// Looks up the node at `path` inside a group tree.
#[must_use]
pub fn lookup<'a>(tree: &'a GroupTree, path: &[&str]) -> Option<&'a TranslationNode> {
    let (first, rest) = path.split_first()?;
    let node = tree.get(*first)?;
    if rest.is_empty() {
        return Some(node);
    }
    match node {
        TranslationNode::Node(children) => lookup(children, rest),
        TranslationNode::Leaf(_) => None,
    }
}

/// Sets the leaf at `path`, creating intermediate mappings as needed.
///
/// Siblings at every level are kept in place; an existing leaf keeps its position.
///
/// # Errors
/// Returns [`PathConflict`] if the path runs through a leaf or ends on a nested mapping.
/// The tree may already hold newly created empty intermediates in that case.
pub fn insert_at(tree: &mut GroupTree, path: &[&str], value: String) -> Result<(), PathConflict> {
    let Some((last, parents)) = path.split_last() else {
        return Err(PathConflict::EmptyPath);
    };

    let mut current = tree;
    for segment in parents {
        match current
            .entry((*segment).to_string())
            .or_insert_with(|| TranslationNode::Node(GroupTree::new()))
        {
            TranslationNode::Node(children) => current = children,
            TranslationNode::Leaf(_) => {
                return Err(PathConflict::LeafInPath((*segment).to_string()));
            }
        }
    }

    if let Some(TranslationNode::Node(_)) = current.get(*last) {
        return Err(PathConflict::NodeAtLeaf((*last).to_string()));
    }
    current.insert((*last).to_string(), TranslationNode::Leaf(value));
    Ok(())
}

/// Flattens a group tree into `prefix.key.path` → value pairs, in file order.
#[must_use]
pub fn flatten_tree(
    tree: &GroupTree,
    separator: &str,
    prefix: Option<&str>,
) -> IndexMap<String, String> {
    let mut result = IndexMap::new();
    flatten_into(tree, separator, prefix, &mut result);
    result
}

fn flatten_into(
    tree: &GroupTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut IndexMap<String, String>,
) {
    for (key, node) in tree {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        match node {
            TranslationNode::Leaf(value) => {
                result.insert(full_key, value.clone());
            }
            TranslationNode::Node(children) => {
                flatten_into(children, separator, Some(&full_key), result);
            }
        }
    }
}

/// Keeps only leaves whose key or value contains `needle`; emptied mappings are dropped.
#[must_use]
pub fn filter_tree(tree: &GroupTree, needle: &str) -> GroupTree {
    tree.iter()
        .filter_map(|(key, node)| match node {
            TranslationNode::Leaf(value) => (key.contains(needle) || value.contains(needle))
                .then(|| (key.clone(), node.clone())),
            TranslationNode::Node(children) => {
                let kept = filter_tree(children, needle);
                (!kept.is_empty()).then(|| (key.clone(), TranslationNode::Node(kept)))
            }
        })
        .collect()
}

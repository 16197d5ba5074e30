//! Chain nodes and conflict resolution.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::chain::Family;
use crate::foundation::Rule;

/// Category of a flag-only or settings modifier.
///
/// Two nodes with the same non-`None` tag conflict: the older one is dropped
/// when the newer one is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    /// Rule node or root; never conflicts by tag.
    #[default]
    None,
    Required,
    Nilable,
    Strict,
    Base,
    Unit,
    Rounding,
    Layouts,
    OutputLayout,
}

/// Boolean switches shared by every family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub required: bool,
    pub nilable: bool,
    pub strict: bool,
}

/// One immutable link of a rule-set chain.
pub(crate) struct Node<F: Family> {
    pub(crate) rule: Option<Arc<dyn Rule<F::Value>>>,
    pub(crate) tag: Tag,
    pub(crate) label: Option<Cow<'static, str>>,
    pub(crate) flags: Flags,
    pub(crate) settings: F::Settings,
    pub(crate) parent: Option<Arc<Node<F>>>,
}

impl<F: Family> Node<F> {
    /// The parent-less node every chain starts from.
    pub(crate) fn root() -> Self {
        Self {
            rule: None,
            tag: Tag::None,
            label: Some(F::label()),
            flags: Flags::default(),
            settings: F::Settings::default(),
            parent: None,
        }
    }

    /// Copy of this node linked to another parent.
    fn relink(&self, parent: Option<Arc<Node<F>>>) -> Self {
        Self {
            rule: self.rule.clone(),
            tag: self.tag,
            label: self.label.clone(),
            flags: self.flags,
            settings: self.settings.clone(),
            parent,
        }
    }

    /// The debug token this node contributes, if any.
    pub(crate) fn token(&self) -> Option<Cow<'_, str>> {
        match (&self.label, &self.rule) {
            (Some(label), _) => Some(Cow::Borrowed(label.as_ref())),
            (None, Some(rule)) => rule.describe().map(Cow::Owned),
            (None, None) => None,
        }
    }

    /// Iterates from this node toward the root.
    pub(crate) fn ancestry(self: &Arc<Self>) -> Ancestry<'_, F> {
        Ancestry { next: Some(self) }
    }
}

impl<F: Family> fmt::Debug for Node<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("token", &self.token())
            .field("tag", &self.tag)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Tail-to-root iterator over a chain.
pub(crate) struct Ancestry<'a, F: Family> {
    next: Option<&'a Arc<Node<F>>>,
}

impl<'a, F: Family> Iterator for Ancestry<'a, F> {
    type Item = &'a Arc<Node<F>>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_ref();
        Some(current)
    }
}

/// What is being appended, as seen by conflict resolution.
pub(crate) struct Incoming<'a, V> {
    pub(crate) rule: Option<&'a dyn Rule<V>>,
    pub(crate) tag: Tag,
}

impl<V: 'static> Incoming<'_, V> {
    fn supersedes<F: Family<Value = V>>(&self, node: &Node<F>) -> bool {
        if self.tag != Tag::None && self.tag == node.tag {
            return true;
        }
        match (self.rule, node.rule.as_deref()) {
            (Some(incoming), Some(existing)) => incoming.replaces(existing),
            _ => false,
        }
    }
}

/// Removes every node `incoming` supersedes, walking tail to root.
///
/// Nodes below the last change are returned as-is; nodes above it are
/// relinked copies. A chain where nothing conflicts comes back as the same
/// `Arc`.
pub(crate) fn resolve_conflicts<F: Family>(
    node: Option<&Arc<Node<F>>>,
    incoming: &Incoming<'_, F::Value>,
) -> Option<Arc<Node<F>>> {
    let node = node?;
    if incoming.supersedes(&**node) {
        return resolve_conflicts(node.parent.as_ref(), incoming);
    }

    let parent = resolve_conflicts(node.parent.as_ref(), incoming);
    let unchanged = match (&parent, &node.parent) {
        (Some(new), Some(old)) => Arc::ptr_eq(new, old),
        (None, None) => true,
        _ => false,
    };

    if unchanged {
        Some(Arc::clone(node))
    } else {
        Some(Arc::new(node.relink(parent)))
    }
}

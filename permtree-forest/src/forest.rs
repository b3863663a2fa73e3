use crate::node::{MenuNode, NodeIndex, TriState};
use permtree_types::code::parent_path;
use permtree_types::{ForestConfig, Permission, PermissionId, SiblingOrder};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ordered forest of menu permissions.
///
/// Nodes live in an arena in catalog order; parent and child links are
/// indices into it. The structure is fixed after [`MenuForest::build`], only
/// the tri-state flags change afterwards.
#[derive(Debug, Clone, Default)]
pub struct MenuForest {
    nodes: Vec<MenuNode>,
    roots: Vec<NodeIndex>,
    index: HashMap<PermissionId, NodeIndex>,
}

impl MenuForest {
    /// Builds the forest from the `menu` records of a catalog.
    ///
    /// Each node's `checked` flag starts from the record's `selected` flag;
    /// no tri-state resolution happens here.
    pub fn build(catalog: &[Permission], config: &ForestConfig) -> Self {
        let mut nodes: Vec<MenuNode> = Vec::new();
        let mut declared_parents: Vec<Option<PermissionId>> = Vec::new();
        let mut index: HashMap<PermissionId, NodeIndex> = HashMap::new();

        for perm in catalog.iter().filter(|p| p.is_menu()) {
            if index.contains_key(&perm.id) {
                warn!(id = %perm.id, code = %perm.code, "duplicate menu permission id, keeping first");
                continue;
            }
            let idx = NodeIndex(nodes.len());
            index.insert(perm.id, idx);
            declared_parents.push(perm.parent_id);
            nodes.push(MenuNode {
                id: perm.id,
                code: perm.code.clone(),
                name: perm.name.clone(),
                parent: None,
                children: Vec::new(),
                checked: perm.selected,
                indeterminate: false,
            });
        }

        // First record wins when codes collide.
        let mut by_code: HashMap<&str, NodeIndex> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            by_code.entry(node.code.as_str()).or_insert(NodeIndex(i));
        }

        let mut proposed: Vec<Option<NodeIndex>> = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            let this = NodeIndex(i);
            let explicit = declared_parents[i].and_then(|pid| {
                let found = index.get(&pid).copied().filter(|p| *p != this);
                if found.is_none() {
                    debug!(code = %node.code, parent_id = %pid, "parent_id does not name another menu node, ignoring");
                }
                found
            });
            let parent = explicit.or_else(|| {
                parent_path(&node.code)
                    .and_then(|path| by_code.get(path).copied())
                    .filter(|p| *p != this)
            });
            proposed.push(parent);
        }

        break_cycles(&nodes, &mut proposed);

        let mut roots = Vec::new();
        for (i, parent) in proposed.iter().enumerate() {
            let this = NodeIndex(i);
            nodes[i].parent = *parent;
            match parent {
                Some(p) => nodes[p.0].children.push(this),
                None => roots.push(this),
            }
        }

        let mut forest = Self {
            nodes,
            roots,
            index,
        };
        forest.sort_siblings(config.sibling_order);
        debug!(
            nodes = forest.nodes.len(),
            roots = forest.roots.len(),
            "built menu forest"
        );
        forest
    }

    // Arena order is catalog order, so only name ordering needs a sort.
    fn sort_siblings(&mut self, order: SiblingOrder) {
        if order == SiblingOrder::Catalog {
            return;
        }
        let keys: Vec<String> = self.nodes.iter().map(|n| n.name.clone()).collect();
        let by_name = |a: &NodeIndex, b: &NodeIndex| keys[a.0].cmp(&keys[b.0]).then(a.cmp(b));
        self.roots.sort_by(by_name);
        for node in &mut self.nodes {
            node.children.sort_by(by_name);
        }
    }

    /// Number of menu nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the catalog had no menu records.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in sibling order.
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Arena index of a menu permission, `None` for api or unknown ids.
    pub fn index_of(&self, id: PermissionId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// True when `id` is a menu node of this forest.
    pub fn contains(&self, id: PermissionId) -> bool {
        self.index.contains_key(&id)
    }

    /// Looks up a node by permission id.
    pub fn get(&self, id: PermissionId) -> Option<&MenuNode> {
        self.index_of(id).map(|idx| &self.nodes[idx.0])
    }

    /// # Panics
    /// If `index` does not come from this forest.
    pub fn node(&self, index: NodeIndex) -> &MenuNode {
        &self.nodes[index.0]
    }

    /// All nodes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &MenuNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// Immediate children in sibling order.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.nodes[index.0].children
    }

    /// Resolved parent, `None` for roots.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[index.0].parent
    }

    /// Current tri-state of a node.
    pub fn state(&self, index: NodeIndex) -> TriState {
        self.nodes[index.0].state()
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.parent(index),
        }
    }

    /// Number of ancestors; roots have depth 0.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).count()
    }

    /// `index` and all of its descendants, pre-order, siblings in forest order.
    pub fn descendants(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Every node, children before their parent.
    pub fn post_order(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            let mut stack = vec![(*root, false)];
            while let Some((current, expanded)) = stack.pop() {
                if expanded {
                    out.push(current);
                    continue;
                }
                stack.push((current, true));
                stack.extend(self.nodes[current.0].children.iter().rev().map(|c| (*c, false)));
            }
        }
        out
    }

    /// Sets a single node's flags to fully checked or fully unchecked.
    pub fn set_checked(&mut self, index: NodeIndex, value: bool) {
        let node = &mut self.nodes[index.0];
        node.checked = value;
        node.indeterminate = false;
    }

    /// Forces `index` and its whole subtree to `value` and returns the
    /// visited nodes in pre-order.
    pub fn set_subtree(&mut self, index: NodeIndex, value: bool) -> Vec<NodeIndex> {
        let visited = self.descendants(index);
        for idx in &visited {
            self.set_checked(*idx, value);
        }
        visited
    }

    /// Recomputes a node's flags from its immediate children. Leaves keep
    /// their own state. Returns true when either flag changed.
    pub fn refresh_from_children(&mut self, index: NodeIndex) -> bool {
        let node = &self.nodes[index.0];
        if node.children.is_empty() {
            return false;
        }
        let all_checked = node
            .children
            .iter()
            .all(|c| self.nodes[c.0].checked && !self.nodes[c.0].indeterminate);
        let any_selected = node
            .children
            .iter()
            .any(|c| self.nodes[c.0].checked || self.nodes[c.0].indeterminate);
        let checked = all_checked;
        let indeterminate = !checked && any_selected;

        let node = &mut self.nodes[index.0];
        let changed = node.checked != checked || node.indeterminate != indeterminate;
        node.checked = checked;
        node.indeterminate = indeterminate;
        changed
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    forest: &'a MenuForest,
    next: Option<NodeIndex>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.forest.parent(current);
        Some(current)
    }
}

/// Demotes the first member (in catalog order) of every parent cycle to a root.
fn break_cycles(nodes: &[MenuNode], proposed: &mut [Option<NodeIndex>]) {
    let limit = proposed.len();
    for i in 0..proposed.len() {
        let mut current = proposed[i];
        let mut steps = 0;
        while let Some(p) = current {
            if p.0 == i {
                warn!(code = %nodes[i].code, "parent_id cycle detected, promoting node to root");
                proposed[i] = None;
                break;
            }
            steps += 1;
            if steps > limit {
                // Runs into a cycle this node is not part of; that cycle is
                // broken when one of its own members is visited.
                break;
            }
            current = proposed[p.0];
        }
    }
}

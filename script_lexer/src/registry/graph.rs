//! Token graph: a character trie over the registry's symbol types
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. Each
//! root-to-node path spells the characters of the type resolved at that
//! node, if any. Parent links give the ancestor chain used when a partial
//! match has to fall back to a shorter token.

use super::character::TokenCharacter;
use super::token_type::TokenType;
use std::sync::Arc;

/// Index of a node in the graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TokenNode {
    character: TokenCharacter,
    token_type: Option<Arc<TokenType>>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    depth: usize,
}

impl TokenNode {
    pub fn character(&self) -> TokenCharacter {
        self.character
    }

    /// Type whose spelling ends at this node
    pub fn token_type(&self) -> Option<&Arc<TokenType>> {
        self.token_type.as_ref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Number of characters on the path from the root, root included
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Read-only forest of token nodes
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    nodes: Vec<TokenNode>,
    roots: Vec<NodeId>,
}

impl TokenGraph {
    /// Build the graph from symbol types; types without characters are skipped
    pub(crate) fn build<'a, I>(types: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<TokenType>>,
    {
        let mut graph = Self::default();
        for token_type in types {
            graph.insert(token_type);
        }
        graph
    }

    fn insert(&mut self, token_type: &Arc<TokenType>) {
        let mut current: Option<NodeId> = None;

        for &character in token_type.characters() {
            let existing = match current {
                None => self.root_for(character),
                Some(parent) => self.child_matching(parent, character),
            };

            current = Some(match existing {
                Some(id) => id,
                None => self.push_node(character, current),
            });
        }

        if let Some(id) = current {
            self.nodes[id.0].token_type = Some(Arc::clone(token_type));
        }
    }

    fn push_node(&mut self, character: TokenCharacter, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = parent.map(|p| self.nodes[p.0].depth + 1).unwrap_or(1);

        self.nodes.push(TokenNode {
            character,
            token_type: None,
            children: Vec::new(),
            parent,
            depth,
        });

        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &TokenNode {
        &self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root node whose character equals `character`
    pub fn root_for(&self, character: TokenCharacter) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].character == character)
    }

    pub fn child_matching(&self, parent: NodeId, character: TokenCharacter) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].character == character)
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.nodes[id.0].parent,
        }
    }

    /// Types resolvable at or below `id`, in depth-first order, capped at `limit`
    pub fn reachable_types(&self, id: NodeId, limit: usize) -> Vec<Arc<TokenType>> {
        let mut found = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if found.len() >= limit {
                break;
            }
            let node = &self.nodes[current.0];
            if let Some(token_type) = &node.token_type {
                found.push(Arc::clone(token_type));
            }
            stack.extend(node.children.iter().rev().copied());
        }

        found
    }
}

/// Iterator over a node's ancestor chain
pub struct Ancestors<'g> {
    graph: &'g TokenGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.graph.nodes[current.0].parent;
        Some(current)
    }
}

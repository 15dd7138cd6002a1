use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::{VisitMap, Visitable};
use petgraph::{Directed, Direction};
use srl_protocol::{Span, Token, TokenId};

use crate::error::TreeError;

/// One sentence's dependency parse.
///
/// Node `i` of the inner graph is the token at position `i`; edges run from
/// a head to each of its dependents and carry the dependency label.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    tokens: Vec<Token>,
    graph: Graph<TokenId, String, Directed>,
}

impl DependencyTree {
    /// Builds the tree without checking the single-rooted tree invariant.
    ///
    /// Heads that point outside the sentence get no edge.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut graph = Graph::with_capacity(tokens.len(), tokens.len());
        for token in &tokens {
            graph.add_node(token.id);
        }
        for (position, token) in tokens.iter().enumerate() {
            if let Some(head) = token.head.position() {
                if head < tokens.len() {
                    graph.add_edge(
                        NodeIndex::new(head),
                        NodeIndex::new(position),
                        token.deprel.clone(),
                    );
                }
            }
        }

        Self { tokens, graph }
    }

    /// Builds the tree and rejects parses that are not a single-rooted tree.
    pub fn validated(tokens: Vec<Token>) -> Result<Self, TreeError> {
        if tokens.is_empty() {
            return Err(TreeError::Empty);
        }

        let mut roots = 0;
        for (position, token) in tokens.iter().enumerate() {
            let expected = TokenId::from_position(position);
            if token.id != expected {
                return Err(TreeError::NonSequentialId {
                    position,
                    found: token.id,
                    expected,
                });
            }
            match token.head.position() {
                None => roots += 1,
                Some(head) if head >= tokens.len() => {
                    return Err(TreeError::DanglingHead {
                        token: token.id,
                        head: token.head,
                    })
                }
                Some(_) => {}
            }
        }
        match roots {
            0 => return Err(TreeError::NoRoot),
            1 => {}
            count => return Err(TreeError::MultipleRoots { count }),
        }

        let tree = Self::new(tokens);
        // Self loops count as cycles too.
        if let Err(cycle) = petgraph::algo::toposort(&tree.graph, None) {
            return Err(TreeError::Cycle {
                token: tree.graph[cycle.node_id()],
            });
        }
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    /// First token whose head is the root marker.
    pub fn root(&self) -> Option<&Token> {
        self.tokens.iter().find(|token| token.is_root())
    }

    /// Positions of the direct dependents of `position`, ascending.
    pub fn children(&self, position: usize) -> Vec<usize> {
        if position >= self.len() {
            return Vec::new();
        }
        let mut children: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(position), Direction::Outgoing)
            .map(|node| node.index())
            .collect();
        children.sort_unstable();
        children
    }

    /// Tokens of `span` whose head lies outside `span`.
    ///
    /// The root's head counts as outside. A well-formed constituent has
    /// exactly one such token; a span straddling unrelated subtrees has
    /// several. The span is clamped to the sentence.
    pub fn head_of_span(&self, span: Span) -> Vec<&Token> {
        let end = span.end.min(self.len());
        let start = span.start.min(end);
        let inside = Span::new(start, end);

        self.tokens[start..end]
            .iter()
            .filter(|token| match token.head.position() {
                Some(head) => !inside.contains(head),
                None => true,
            })
            .collect()
    }

    /// The token at `head` and all of its transitive dependents, sorted by id.
    pub fn subtree_from_head(&self, head: usize) -> Vec<&Token> {
        if head >= self.len() {
            return Vec::new();
        }

        let mut visited = self.graph.visit_map();
        let mut stack = vec![NodeIndex::new(head)];
        let mut subtree = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited.visit(current) {
                continue;
            }
            subtree.push(&self.tokens[current.index()]);
            stack.extend(self.graph.neighbors_directed(current, Direction::Outgoing));
        }

        subtree.sort_by_key(|token| token.id);
        subtree
    }

    /// Surface forms of `span` joined by single spaces.
    pub fn text(&self, span: Span) -> String {
        let end = span.end.min(self.len());
        let start = span.start.min(end);
        self.tokens[start..end]
            .iter()
            .map(|token| token.form.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn sentence_text(&self) -> String {
        self.text(Span::new(0, self.len()))
    }
}

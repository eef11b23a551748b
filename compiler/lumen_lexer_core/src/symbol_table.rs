//! Operator symbol compiler.
//!
//! Named groups of operator strings are compiled into [`Matcher`]s that find
//! the longest operator at the start of an input slice. Compilation builds a
//! byte trie per group (and one for the union of every group, registered
//! under [`ALL_GROUP`]) and lowers it into a flat state table:
//!
//! - every state holds the symbol ending exactly there, if any, plus its
//!   outgoing edges sorted by first byte;
//! - a chain of non-accepting single-child nodes is collapsed into one edge
//!   whose label is the whole run, so `===` in a table without `==` is one
//!   comparison rather than three transitions.
//!
//! Matching is a loop over the state table. It never generates code and
//! never looks at more input than it needs.
//!
//! Compilation is deterministic: the same groups always produce equal
//! matchers regardless of the order symbols were listed in.

use std::collections::BTreeMap;

/// Name under which the union of every group is registered.
pub const ALL_GROUP: &str = "__all__";

/// An edge between two matcher states.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Edge {
    /// First byte of `label`, kept separately for the binary search.
    first: u8,
    /// Bytes consumed by taking this edge. Never empty.
    label: Box<[u8]>,
    target: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
struct State {
    /// Index into `Matcher::symbols` of the symbol ending at this state.
    accept: Option<u32>,
    /// Sorted by `first`, no two edges share a first byte.
    edges: Vec<Edge>,
}

/// Longest-match recognizer for one set of operator strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matcher {
    /// State 0 is the root.
    states: Vec<State>,
    /// Sorted, deduplicated.
    symbols: Vec<Box<str>>,
}

impl Matcher {
    /// Compile a matcher for `symbols`. Empty strings are ignored.
    pub fn new<S: AsRef<str>>(symbols: impl IntoIterator<Item = S>) -> Self {
        let mut symbols: Vec<Box<str>> = symbols
            .into_iter()
            .map(|s| Box::from(s.as_ref()))
            .filter(|s: &Box<str>| !s.is_empty())
            .collect();
        symbols.sort_unstable();
        symbols.dedup();

        let trie = Trie::build(&symbols);
        let mut states = Vec::with_capacity(trie.nodes.len());
        trie.lower(0, &mut states);

        Matcher { states, symbols }
    }

    /// The longest symbol that is a prefix of `input`.
    pub fn longest_match(&self, input: &[u8]) -> Option<&str> {
        let mut state = self.states.first()?;
        let mut pos = 0;
        let mut best = None;

        loop {
            if state.accept.is_some() {
                best = state.accept;
            }
            let Some(&b) = input.get(pos) else {
                break;
            };
            let Ok(i) = state.edges.binary_search_by_key(&b, |e| e.first) else {
                break;
            };
            let edge = &state.edges[i];
            if !input[pos..].starts_with(&edge.label) {
                break;
            }
            pos += edge.label.len();
            state = &self.states[edge.target as usize];
        }

        best.map(|i| &*self.symbols[i as usize])
    }

    /// Whether `symbol` is one of the compiled operators.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols
            .binary_search_by(|s| (**s).cmp(symbol))
            .is_ok()
    }

    /// The compiled operators, in byte order.
    pub fn symbols(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.symbols.iter().map(|s| &**s)
    }

    /// Number of states after path compression.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Intermediate prefix tree, one node per byte.
struct Trie {
    nodes: Vec<TrieNode>,
}

#[derive(Default)]
struct TrieNode {
    accept: Option<u32>,
    children: BTreeMap<u8, usize>,
}

impl Trie {
    fn build(symbols: &[Box<str>]) -> Self {
        let mut nodes = vec![TrieNode::default()];
        for (index, symbol) in symbols.iter().enumerate() {
            let mut node = 0;
            for &b in symbol.as_bytes() {
                node = match nodes[node].children.get(&b) {
                    Some(&child) => child,
                    None => {
                        let child = nodes.len();
                        nodes.push(TrieNode::default());
                        nodes[node].children.insert(b, child);
                        child
                    }
                };
            }
            #[allow(clippy::cast_possible_truncation, reason = "operator sets are small")]
            let index = index as u32;
            nodes[node].accept = Some(index);
        }
        Trie { nodes }
    }

    /// Lower the subtree rooted at `node` into `states`, returning its index.
    ///
    /// Recursion depth is bounded by the longest operator.
    fn lower(&self, node: usize, states: &mut Vec<State>) -> u32 {
        #[allow(clippy::cast_possible_truncation, reason = "operator sets are small")]
        let index = states.len() as u32;
        states.push(State {
            accept: self.nodes[node].accept,
            edges: Vec::new(),
        });

        let mut edges = Vec::with_capacity(self.nodes[node].children.len());
        for (&first, &child) in &self.nodes[node].children {
            let mut label = vec![first];
            let mut end = child;
            while self.nodes[end].accept.is_none() && self.nodes[end].children.len() == 1 {
                let Some((&b, &next)) = self.nodes[end].children.iter().next() else {
                    break;
                };
                label.push(b);
                end = next;
            }
            let target = self.lower(end, states);
            edges.push(Edge {
                first,
                label: label.into_boxed_slice(),
                target,
            });
        }
        states[index as usize].edges = edges;
        index
    }
}

/// Matchers for every operator group plus their union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    groups: Vec<(Box<str>, Matcher)>,
    all: Matcher,
}

impl SymbolTable {
    /// Compile `(group name, symbols)` pairs.
    ///
    /// A group named more than once keeps its last definition. The union
    /// matcher is registered as [`ALL_GROUP`].
    pub fn compile<N, I, S>(groups: impl IntoIterator<Item = (N, I)>) -> Self
    where
        N: Into<Box<str>>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled: Vec<(Box<str>, Matcher)> = Vec::new();
        for (name, symbols) in groups {
            let name = name.into();
            let matcher = Matcher::new(symbols);
            if let Some(slot) = compiled.iter_mut().find(|(n, _)| *n == name) {
                slot.1 = matcher;
            } else {
                compiled.push((name, matcher));
            }
        }

        let all = Matcher::new(compiled.iter().flat_map(|(_, m)| m.symbols()));
        SymbolTable {
            groups: compiled,
            all,
        }
    }

    /// The matcher registered under `name`.
    pub fn group(&self, name: &str) -> Option<&Matcher> {
        if name == ALL_GROUP {
            return Some(&self.all);
        }
        self.groups
            .iter()
            .find_map(|(n, m)| (&**n == name).then_some(m))
    }

    /// The union of every group.
    pub fn all(&self) -> &Matcher {
        &self.all
    }

    /// Group names in the order they were first given.
    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|(n, _)| &**n)
    }
}

use std::collections::HashMap;

/// A single alias occurrence found while scanning a token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasHit {
    pub start: usize,
    pub len: usize,
    pub skill: usize,
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<String, usize>,
    skill: Option<usize>,
}

/// Token-level trie mapping normalized alias token sequences to skill ids
#[derive(Debug)]
pub struct AliasTrie {
    nodes: Vec<Node>,
    max_depth: usize,
}

impl Default for AliasTrie {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
            max_depth: 0,
        }
    }
}

impl AliasTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an alias. Returns the skill already stored under the same
    /// token sequence, if any, and leaves it untouched.
    pub fn insert(&mut self, tokens: &[String], skill: usize) -> Option<usize> {
        let mut node = 0;
        for token in tokens {
            node = match self.nodes[node].children.get(token) {
                Some(&next) => next,
                None => {
                    self.nodes.push(Node::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[node].children.insert(token.clone(), next);
                    next
                }
            };
        }

        if let Some(existing) = self.nodes[node].skill {
            return Some(existing);
        }
        self.nodes[node].skill = Some(skill);
        self.max_depth = self.max_depth.max(tokens.len());
        None
    }

    /// Exact lookup of a full token sequence
    pub fn get(&self, tokens: &[String]) -> Option<usize> {
        if tokens.is_empty() {
            return None;
        }
        let mut node = 0;
        for token in tokens {
            node = *self.nodes[node].children.get(token)?;
        }
        self.nodes[node].skill
    }

    /// Longest alias length in tokens
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// All alias occurrences in `tokens`, including overlapping ones
    pub fn scan(&self, tokens: &[String]) -> Vec<AliasHit> {
        let mut hits = Vec::new();
        for start in 0..tokens.len() {
            let mut node = 0;
            for (offset, token) in tokens[start..].iter().take(self.max_depth).enumerate() {
                match self.nodes[node].children.get(token) {
                    Some(&next) => node = next,
                    None => break,
                }
                if let Some(skill) = self.nodes[node].skill {
                    hits.push(AliasHit {
                        start,
                        len: offset + 1,
                        skill,
                    });
                }
            }
        }
        hits
    }
}

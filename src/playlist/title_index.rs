//! Prefix search over track titles.
//!
//! A character trie keyed by the lowercased title. Each node keeps the
//! original-case titles that end exactly there, capped at
//! [`MAX_TITLES_PER_NODE`] with the oldest entry evicted first.

use std::collections::{BTreeMap, HashSet, VecDeque};

pub const MAX_TITLES_PER_NODE: usize = 20;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    titles: VecDeque<String>,
}

#[derive(Debug, Default)]
pub struct TitleIndex {
    root: TrieNode,
}

fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

impl TitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `title`. Inserting the same title twice is a no-op.
    pub fn insert(&mut self, title: &str) {
        let mut node = &mut self.root;
        for ch in fold_case(title) {
            node = node.children.entry(ch).or_default();
        }

        if node.titles.iter().any(|t| t == title) {
            return;
        }
        node.titles.push_back(title.to_string());
        if node.titles.len() > MAX_TITLES_PER_NODE {
            node.titles.pop_front();
        }
    }

    /// Titles starting with `prefix`, case-insensitively, at most `limit`.
    ///
    /// Results come breadth-first from the node the prefix reaches: titles
    /// ending there first, then one level deeper, and so on, with siblings in
    /// ascending character order. Shorter completions therefore always come
    /// before longer ones. An unknown prefix yields nothing.
    pub fn search(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut results: Vec<String> = Vec::new();
        if limit == 0 {
            return results;
        }
        let Some(start) = self.descend(prefix) else {
            return results;
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&TrieNode> = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for title in &node.titles {
                if seen.insert(title.as_str()) {
                    results.push(title.clone());
                    if results.len() >= limit {
                        return results;
                    }
                }
            }
            queue.extend(node.children.values());
        }
        results
    }

    fn descend(&self, prefix: &str) -> Option<&TrieNode> {
        fold_case(prefix).try_fold(&self.root, |node, ch| node.children.get(&ch))
    }
}

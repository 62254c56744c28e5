//! Character trie caching one prediction response.
//!
//! Built fresh from each response and thrown away on the next one, so typing
//! inside a word can be served locally without another round trip.
//!
//! `find_all` walks to the node for the typed prefix and then runs a
//! pre-order DFS with children in character order. A node contributes its
//! suffix once if it holds a value. Leaves are always included, which only
//! matters for valueless leaves.

use std::collections::BTreeMap;

use tracing::debug;

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    value: Option<usize>,
}

impl TrieNode {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One cached completion below a looked-up prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Characters after the looked-up prefix; empty for an exact hit.
    pub suffix: String,
    /// Rank stored for the full key, lower is better.
    pub value: Option<usize>,
}

#[derive(Debug, Default, Clone)]
pub struct PrefixTrie {
    root: TrieNode,
    len: usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ranked phrases; a phrase's rank is its position.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for (rank, phrase) in phrases.into_iter().enumerate() {
            trie.add(phrase.as_ref(), rank);
        }
        debug!(keys = trie.len, "built prediction trie");
        trie
    }

    /// Insert `key`. An existing key keeps the smaller of the two values.
    /// Returns `false` only for an empty key.
    pub fn add(&mut self, key: &str, value: usize) -> bool {
        if key.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        match node.value {
            Some(existing) if existing <= value => {}
            Some(_) => node.value = Some(value),
            None => {
                node.value = Some(value);
                self.len += 1;
            }
        }
        true
    }

    /// Stored value for exactly `key`.
    pub fn get_value(&self, key: &str) -> Option<usize> {
        self.walk(key)?.value
    }

    /// Every cached key starting with `prefix`, as suffixes in pre-order.
    pub fn find_all(&self, prefix: &str) -> Vec<Completion> {
        let Some(start) = self.walk(prefix) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut stack: Vec<(&TrieNode, String)> = vec![(start, String::new())];
        while let Some((node, suffix)) = stack.pop() {
            let is_start = suffix.is_empty();
            if node.value.is_some() || (node.is_leaf() && !is_start) {
                out.push(Completion {
                    suffix: suffix.clone(),
                    value: node.value,
                });
            }
            // Reverse so the smallest character is popped first.
            for (&ch, child) in node.children.iter().rev() {
                let mut next = suffix.clone();
                next.push(ch);
                stack.push((child, next));
            }
        }
        out
    }

    /// `find_all`, keyed by stored value. Valueless nodes are skipped.
    pub fn find_all_by_value(&self, prefix: &str) -> BTreeMap<usize, String> {
        self.find_all(prefix)
            .into_iter()
            .filter_map(|c| c.value.map(|v| (v, c.suffix)))
            .collect()
    }

    /// Full keys starting with `prefix`, best value first.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.find_all_by_value(prefix)
            .into_values()
            .map(|suffix| format!("{prefix}{suffix}"))
            .collect()
    }

    /// Number of keys with a stored value.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    fn walk(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes(completions: &[Completion]) -> Vec<&str> {
        completions.iter().map(|c| c.suffix.as_str()).collect()
    }

    #[test]
    fn add_and_find() {
        let mut trie = PrefixTrie::new();
        assert!(trie.add("cat", 1));
        assert!(trie.add("car", 2));
        let found = trie.find_all("ca");
        assert_eq!(suffixes(&found), vec!["r", "t"]);
        assert_eq!(trie.get_value("cat"), Some(1));
        assert_eq!(trie.get_value("car"), Some(2));
        assert_eq!(trie.get_value("ca"), None);
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn add_empty_key_fails() {
        let mut trie = PrefixTrie::new();
        assert!(!trie.add("", 0));
        assert!(trie.is_empty());
    }

    #[test]
    fn keeps_smallest_value() {
        let mut trie = PrefixTrie::new();
        trie.add("chat", 3);
        trie.add("chat", 1);
        trie.add("chat", 5);
        assert_eq!(trie.get_value("chat"), Some(1));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn pre_order_includes_inner_values() {
        let trie = PrefixTrie::from_phrases(["le", "les", "le chat", "lent"]);
        let found = trie.find_all("le");
        // Exact hit first, then children in character order (' ' < 'n' < 's').
        assert_eq!(suffixes(&found), vec!["", " chat", "nt", "s"]);
        assert_eq!(found[0].value, Some(0));
    }

    #[test]
    fn miss_is_empty() {
        let trie = PrefixTrie::from_phrases(["cat"]);
        assert!(trie.find_all("xyz").is_empty());
        assert!(PrefixTrie::new().find_all("xyz").is_empty());
        assert!(PrefixTrie::new().find_all("").is_empty());
        assert_eq!(trie.get_value("xyz"), None);
        assert!(trie.find_all("cx").is_empty());
        assert_eq!(suffixes(&trie.find_all("ca")), vec!["t"]);
    }

    #[test]
    fn by_value_and_completions() {
        let trie = PrefixTrie::from_phrases(["car", "cat", "dog", "ca"]);
        let by_value = trie.find_all_by_value("ca");
        assert_eq!(by_value.get(&0).map(String::as_str), Some("r"));
        assert_eq!(by_value.get(&1).map(String::as_str), Some("t"));
        assert_eq!(by_value.get(&3).map(String::as_str), Some(""));
        assert_eq!(trie.completions("ca"), vec!["car", "cat", "ca"]);
    }

    #[test]
    fn multibyte_keys() {
        let trie = PrefixTrie::from_phrases(["été", "étudiant"]);
        assert_eq!(trie.completions("ét"), vec!["été", "étudiant"]);
        assert_eq!(trie.get_value("été"), Some(0));
    }

    #[test]
    fn clear_resets() {
        let mut trie = PrefixTrie::from_phrases(["cat"]);
        trie.clear();
        assert!(trie.is_empty());
        assert!(trie.find_all("c").is_empty());
    }
}

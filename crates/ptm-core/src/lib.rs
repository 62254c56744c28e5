pub mod alignment;
pub mod candidate;
pub mod continuation;
pub mod prefix;
pub mod ranker;
pub mod response;
pub mod settings;
pub mod trie;
pub mod word_query;

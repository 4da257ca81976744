// Dictionary and bag-of-words corpus.
//
// The dictionary assigns dense integer ids to tokens in first-seen order.
// The corpus holds one sparse (token id, count) vector per document, in the
// same order as the input documents.

use std::collections::HashMap;

/// Sparse term-frequency vector: (token id, count), sorted by token id.
pub type BowDocument = Vec<(usize, u32)>;

/// Token <-> id mapping built over one analysis run.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    token_to_id: HashMap<String, usize>,
    id_to_token: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from tokenized documents. Ids are assigned in
    /// first-seen order, so they are dense and start at 0.
    pub fn from_documents(documents: &[Vec<String>]) -> Self {
        let mut dictionary = Self::default();
        for document in documents {
            for token in document {
                dictionary.insert(token);
            }
        }
        dictionary
    }

    fn insert(&mut self, token: &str) -> usize {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }
        let id = self.id_to_token.len();
        self.token_to_id.insert(token.to_string(), id);
        self.id_to_token.push(token.to_string());
        id
    }

    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token_to_id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id_to_token.get(id).map(String::as_str)
    }

    /// Convert a tokenized document into a bag-of-words vector. Tokens that
    /// are not in the dictionary are ignored.
    pub fn doc2bow(&self, document: &[String]) -> BowDocument {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for token in document {
            if let Some(id) = self.id(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: BowDocument = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }
}

/// Ordered bag-of-words documents, one per processed comment.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<BowDocument>,
}

impl Corpus {
    pub fn from_documents(dictionary: &Dictionary, documents: &[Vec<String>]) -> Self {
        Self {
            documents: documents.iter().map(|d| dictionary.doc2bow(d)).collect(),
        }
    }

    pub fn documents(&self) -> &[BowDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Split space-separated processed comments into token lists.
pub fn tokenize_processed(processed: &[String]) -> Vec<Vec<String>> {
    processed
        .iter()
        .map(|doc| doc.split_whitespace().map(str::to_string).collect())
        .collect()
}

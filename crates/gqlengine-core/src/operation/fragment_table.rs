use gqlengine_parser::ast;
use indexmap::IndexMap;

/// Fragment name → definition, borrowed from one [`ast::Document`].
///
/// Spreads are resolved by name through this table. When a document defines
/// the same name twice, the first definition wins (validation reports the
/// duplicate).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentTable<'doc> {
    fragments: IndexMap<&'doc str, &'doc ast::FragmentDefinition>,
}

impl<'doc> FragmentTable<'doc> {
    pub fn from_document(document: &'doc ast::Document) -> Self {
        let mut fragments = IndexMap::new();
        for fragment in document.fragments() {
            fragments.entry(fragment.name.as_str()).or_insert(fragment);
        }
        Self { fragments }
    }

    pub fn get(&self, name: &str) -> Option<&'doc ast::FragmentDefinition> {
        self.fragments.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'doc ast::FragmentDefinition> + '_ {
        self.fragments.values().copied()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

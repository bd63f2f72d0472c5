use crate::domain::portfolio::{Language, LanguageId};
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown languages: {}", .0.join(", "))]
pub struct UnknownLanguages(pub Vec<String>);

/// The reference table of valid languages, indexed both ways.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    names: HashSet<String>,
    ids_by_name: HashMap<String, LanguageId>,
    names_by_id: HashMap<LanguageId, String>,
}

impl LanguageCatalog {
    pub fn from_languages(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut catalog = Self::default();

        for language in languages {
            catalog.names.insert(language.name.clone());
            catalog
                .ids_by_name
                .insert(language.name.clone(), language.id);
            catalog.names_by_id.insert(language.id, language.name);
        }

        catalog
    }

    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn id_of(&self, name: &str) -> Option<LanguageId> {
        self.ids_by_name.get(name).copied()
    }

    pub fn name_of(&self, id: LanguageId) -> Option<&str> {
        self.names_by_id.get(&id).map(String::as_str)
    }

    /// Names from `candidates` that are not in the catalog, without duplicates.
    pub fn unknown<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<String> {
        let mut unknown: Vec<String> = vec![];
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if !self.contains(candidate) && !unknown.iter().any(|name| name == candidate) {
                unknown.push(candidate.to_string());
            }
        }

        unknown
    }

    /// Validates every name and maps it to its id. Repeated names collapse.
    pub fn translate<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<BTreeSet<LanguageId>, UnknownLanguages> {
        if !verify_language_input(names, &self.names) {
            return Err(UnknownLanguages(self.unknown(names)));
        }

        Ok(names
            .iter()
            .filter_map(|name| self.id_of(name.as_ref()))
            .collect())
    }

    /// Maps ids back to names; ids missing from the catalog are skipped.
    pub fn names_of(&self, ids: &[LanguageId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.name_of(*id))
            .map(str::to_string)
            .collect()
    }
}

/// True when every candidate is a valid language name. An empty list is
/// trivially valid; callers enforce non-emptiness themselves.
pub fn verify_language_input<S: AsRef<str>>(candidates: &[S], valid_names: &HashSet<String>) -> bool {
    candidates
        .iter()
        .all(|candidate| valid_names.contains(candidate.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LanguageCatalog {
        LanguageCatalog::from_languages(vec![
            Language {
                id: 1,
                name: "Go".to_string(),
            },
            Language {
                id: 2,
                name: "Python".to_string(),
            },
        ])
    }

    #[test]
    fn test_from_languages() {
        let catalog = catalog();

        assert_eq!(2, catalog.len());
        assert!(catalog.contains("Go"));
        assert_eq!(Some(2), catalog.id_of("Python"));
        assert_eq!(Some("Go"), catalog.name_of(1));
        assert_eq!(None, catalog.id_of("go"));
    }

    #[test]
    fn test_verify_language_input() {
        let catalog = catalog();

        assert!(verify_language_input(&["Go", "Python"], catalog.names()));
        assert!(!verify_language_input(&["Go", "Cobol"], catalog.names()));
    }

    #[test]
    fn test_verify_language_input_empty_is_valid() {
        let empty: [&str; 0] = [];

        assert!(verify_language_input(&empty, catalog().names()));
        assert!(verify_language_input(&empty, &HashSet::new()));
    }

    #[test]
    fn test_verify_language_input_empty_catalog_rejects() {
        assert!(!verify_language_input(&["Go"], LanguageCatalog::default().names()));
    }

    #[test]
    fn test_translate() {
        let ids = catalog().translate(&["Python", "Go", "Python"]).unwrap();

        assert_eq!(BTreeSet::from([1, 2]), ids);
    }

    #[test]
    fn test_translate_unknown() {
        let result = catalog().translate(&["Go", "Cobol", "Fortran", "Cobol"]);

        assert_eq!(
            Err(UnknownLanguages(vec![
                "Cobol".to_string(),
                "Fortran".to_string()
            ])),
            result
        );
    }

    #[test]
    fn test_names_of() {
        assert_eq!(vec!["Python", "Go"], catalog().names_of(&[2, 1, 7]));
    }
}

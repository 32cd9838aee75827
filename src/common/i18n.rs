// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_LANG: &str = "pt";

// Dicionários embutidos no binário
const PT: &str = include_str!("../../locales/pt.json");
const EN: &str = include_str!("../../locales/en.json");

/// Mensagens traduzidas, indexadas por idioma e depois por chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> Self {
        let mut messages = HashMap::new();
        for (lang, raw) in [("pt", PT), ("en", EN)] {
            match serde_json::from_str::<HashMap<String, String>>(raw) {
                Ok(dict) => {
                    messages.insert(lang.to_string(), dict);
                }
                Err(e) => tracing::error!("🔥 Dicionário '{}' inválido: {}", lang, e),
            }
        }
        Self { messages: Arc::new(messages) }
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.messages.contains_key(lang)
    }

    /// Idioma desconhecido cai no português; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|dict| dict.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|dict| dict.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_dictionaries_have_the_same_keys() {
        let pt: HashMap<String, String> = serde_json::from_str(PT).unwrap();
        let en: HashMap<String, String> = serde_json::from_str(EN).unwrap();
        let mut pt_keys: Vec<_> = pt.keys().collect();
        let mut en_keys: Vec<_> = en.keys().collect();
        pt_keys.sort();
        en_keys.sort();
        assert_eq!(pt_keys, en_keys);
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::load();
        assert_eq!(
            store.translate("fr", "error.invalid_credentials"),
            store.translate("pt", "error.invalid_credentials")
        );
        assert!(!store.supports("fr"));
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::load();
        assert_eq!(store.translate("en", "error.nope"), "error.nope");
    }
}

// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

/// Idioma usado quando o cliente não manda Accept-Language ou pede um idioma sem tradução.
pub const DEFAULT_LANG: &str = "pt";

const PT: &[(&str, &str)] = &[
    ("validation", "Um ou mais campos são inválidos."),
    ("invalid_body", "O corpo da requisição não é um JSON válido para este recurso."),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("tenant_not_resolved", "Não foi possível identificar a empresa da requisição."),
    ("product_not_found", "Produto não encontrado."),
    ("tax_rule_not_found", "Regra fiscal não encontrada."),
    ("no_products_with_ncm", "Nenhum produto possui NCM. Preencha o NCM dos produtos primeiro."),
    ("default_rule_conflict", "Já existe uma regra padrão para este produto e tipo de operação."),
    ("internal", "Ocorreu um erro inesperado."),
];

const EN: &[(&str, &str)] = &[
    ("validation", "One or more fields are invalid."),
    ("invalid_body", "The request body is not valid JSON for this resource."),
    ("invalid_token", "Invalid or missing authentication token."),
    ("tenant_not_resolved", "Could not resolve the company for this request."),
    ("product_not_found", "Product not found."),
    ("tax_rule_not_found", "Tax rule not found."),
    ("no_products_with_ncm", "No product has an NCM code. Fill in the products' NCM first."),
    ("default_rule_conflict", "A default rule already exists for this product and operation type."),
    ("internal", "An unexpected error occurred."),
];

// Catálogo de mensagens, compartilhado pelo AppState
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages: Arc::new(messages) }
    }

    /// Traduz a chave para o idioma pedido, caindo para o português e, por último, para a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_to_requested_language() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "product_not_found"), "Product not found.");
        assert_eq!(store.translate("pt", "product_not_found"), "Produto não encontrado.");
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "tax_rule_not_found"), "Regra fiscal não encontrada.");
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "sem_traducao"), "sem_traducao");
    }

    #[test]
    fn both_catalogs_have_the_same_keys() {
        let pt: Vec<_> = PT.iter().map(|(k, _)| *k).collect();
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        assert_eq!(pt, en);
    }
}

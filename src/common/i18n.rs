// src/common/i18n.rs

use std::collections::HashMap;

const FALLBACK_LANG: &str = "en";

pub const SUPPORTED_LANGS: [&str; 2] = ["pt", "en"];

// Mensagens de erro por idioma. Chave = AppError::message_key
const PT: &[(&str, &str)] = &[
    ("validation", "Um ou mais campos são inválidos."),
    ("invalid_period", "Período inválido. Informe mês entre 1 e 12 e ano com quatro dígitos."),
    ("forbidden", "Apenas administradores podem acessar esta informação."),
    ("snapshot_unavailable", "Os indicadores ainda não foram calculados. Tente novamente em instantes."),
    ("upstream", "Não foi possível carregar os dados da API. Tente novamente."),
    ("internal", "Ocorreu um erro inesperado."),
];

const EN: &[(&str, &str)] = &[
    ("validation", "One or more fields are invalid."),
    ("invalid_period", "Invalid period. Month must be 1 to 12 and year must have four digits."),
    ("forbidden", "Only administrators can access this information."),
    ("snapshot_unavailable", "Indicators have not been computed yet. Try again shortly."),
    ("upstream", "Could not load data from the API. Please try again."),
    ("internal", "An unexpected error occurred."),
];

#[derive(Debug)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages }
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(FALLBACK_LANG).and_then(|table| table.get(key)))
            .map(|message| message.to_string())
            // Chave desconhecida: devolve a própria chave para não esconder o erro
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

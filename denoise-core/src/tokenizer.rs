//! # Tokenizador de Entidades
//!
//! Divide uma entidade em tokens e reconstrói spans a partir deles. Os dois
//! regimes compartilham o mesmo motor de n-gramas; só mudam três coisas:
//! como dividir, como juntar e como normalizar.
//!
//! ## Esquema de Tokenização
//!
//! - **CharLevel**: cada caractere (grapheme) é um token; spans são unidos sem separador.
//! - **Whitespace**: cada palavra é um token, em minúsculas; spans são unidos por `" "`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use denoise_core::tokenizer::{normalize, tokenize_with_mode, join, TokenizerMode};
//!
//! let text = normalize("  Apple Watch SE ", TokenizerMode::Whitespace);
//! let tokens = tokenize_with_mode(&text, TokenizerMode::Whitespace);
//! assert_eq!(tokens, vec!["apple", "watch", "se"]);
//! assert_eq!(join(&tokens[..2], TokenizerMode::Whitespace), "apple watch");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Estratégias de tokenização disponíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// **Caractere**: cada caractere é um token. Usado para chinês, onde não há
    /// espaços entre palavras.
    CharLevel,
    /// **Palavra**: separa por espaços em branco e converte para minúsculas.
    /// Usado para inglês.
    Whitespace,
}

impl TokenizerMode {
    /// Caractere usado para reconstruir um span a partir dos seus tokens.
    pub fn separator(&self) -> &'static str {
        match self {
            TokenizerMode::CharLevel => "",
            TokenizerMode::Whitespace => " ",
        }
    }
}

/// Normaliza a entidade antes da tokenização: remove espaços nas pontas e,
/// no modo palavra, converte para minúsculas.
pub fn normalize(text: &str, mode: TokenizerMode) -> Cow<'_, str> {
    let trimmed = text.trim();
    match mode {
        TokenizerMode::CharLevel => Cow::Borrowed(trimmed),
        TokenizerMode::Whitespace => Cow::Owned(trimmed.to_lowercase()),
    }
}

/// Tokeniza um texto com o modo especificado.
///
/// Os tokens emprestam do texto de entrada; nenhum é alocado.
pub fn tokenize_with_mode(text: &str, mode: TokenizerMode) -> Vec<&str> {
    match mode {
        TokenizerMode::CharLevel => text.graphemes(true).collect(),
        TokenizerMode::Whitespace => text.split_whitespace().collect(),
    }
}

/// Reconstrói um span unindo os tokens com o separador do modo.
pub fn join(tokens: &[&str], mode: TokenizerMode) -> String {
    tokens.join(mode.separator())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_char_level() {
        let tokens = tokenize_with_mode("蘋果手錶", TokenizerMode::CharLevel);
        assert_eq!(tokens, vec!["蘋", "果", "手", "錶"]);
    }

    #[test]
    fn test_char_level_keeps_inner_spaces() {
        // Espaços internos viram tokens próprios no regime por caractere
        let tokens = tokenize_with_mode("手錶 七代", TokenizerMode::CharLevel);
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[2], " ");
    }

    #[test]
    fn test_char_level_keeps_combining_marks_together() {
        // Um token por grafema: a marca combinante fica com a base
        let tokens = tokenize_with_mode("cafe\u{301}", TokenizerMode::CharLevel);
        assert_eq!(tokens, vec!["c", "a", "f", "e\u{301}"]);

        let tokens = tokenize_with_mode("手\r\n錶", TokenizerMode::CharLevel);
        assert_eq!(tokens, vec!["手", "\r\n", "錶"]);
    }

    #[test]
    fn test_tokenize_whitespace() {
        let tokens = tokenize_with_mode("apple  watch\tse", TokenizerMode::Whitespace);
        assert_eq!(tokens, vec!["apple", "watch", "se"]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" Apple Watch ", TokenizerMode::Whitespace), "apple watch");
        assert_eq!(normalize(" 蘋果 ", TokenizerMode::CharLevel), "蘋果");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&["蘋", "果"], TokenizerMode::CharLevel), "蘋果");
        assert_eq!(join(&["apple", "watch"], TokenizerMode::Whitespace), "apple watch");
        assert_eq!(join(&[], TokenizerMode::Whitespace), "");
    }
}

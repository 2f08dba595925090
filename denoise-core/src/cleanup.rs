//! # Limpeza de Texto
//!
//! Utilitários que preparam as entidades antes do pipeline de n-gramas:
//! remoção de padrões de ruído conhecidos (anos, unidades, valores monetários)
//! e colapso de espaços em branco.

use std::sync::LazyLock;

use regex::Regex;

/// Padrões de ruído, aplicados em ordem. Os ancorados (`^...$`) só removem a
/// entidade inteira; os demais removem trechos internos.
static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // anos (1999, 2023)
        r"(?:19|20)\d{2}",
        // quantidade com unidade isolada: "500ml", "3ghz", "2kg"
        r"^\d+(?:ml|ghz|kg)+$",
        // número decimal isolado
        r"^[-+]?[0-9]*\.?[0-9]?$",
        // código monetário: "NT1290"
        r"^NT\d+$",
        // volume embutido: "330ml", "1.5ml"
        r"\d+\.?\d?(?:ml)+",
        r"^ml$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("noise pattern"))
    .collect()
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace"));

/// Remove os padrões de ruído conhecidos de uma entidade.
pub fn strip_noise(text: &str) -> String {
    NOISE_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

/// Colapsa sequências de espaços em branco em um único espaço.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}

/// Aplica [`strip_noise`] a cada entidade de um grupo separado por vírgulas.
pub fn strip_noise_group(group: &str) -> String {
    group
        .split(',')
        .map(strip_noise)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_years() {
        assert_eq!(strip_noise("iphone 2023"), "iphone ");
        assert_eq!(strip_noise("1999年款"), "年款");
    }

    #[test]
    fn test_strip_whole_string_units() {
        assert_eq!(strip_noise("500ml"), "");
        assert_eq!(strip_noise("3ghz"), "");
        assert_eq!(strip_noise("NT1290"), "");
        assert_eq!(strip_noise("ml"), "");
    }

    #[test]
    fn test_strip_inline_volume() {
        assert_eq!(strip_noise("可樂330ml"), "可樂");
    }

    #[test]
    fn test_strip_bare_decimal() {
        assert_eq!(strip_noise("3.5"), "");
        assert_eq!(strip_noise("apple watch"), "apple watch");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("apple   watch\t se"), "apple watch se");
    }

    #[test]
    fn test_strip_noise_group() {
        assert_eq!(strip_noise_group("可樂330ml,NT500,雪碧"), "可樂,,雪碧");
    }
}

//! # Classificador de Idioma
//!
//! Decide se uma entidade é "só chinês" ou "só inglês". A regra é um simples
//! casamento de padrões: a string precisa ser não vazia, ter mais de um
//! caractere, não ser puramente numérica e casar **inteira** com o padrão do
//! idioma.
//!
//! - **Chinês**: apenas ideogramas CJK (U+4E00–U+9FA5), dígitos, espaços,
//!   `_`, `-` e `.`.
//! - **Inglês**: nenhum ideograma CJK e pelo menos uma letra latina, dígito
//!   ou espaço.
//!
//! Strings que não casam com nenhum dos dois passam intactas pelo denoiser.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tokenizer::TokenizerMode;

static CHINESE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}0-9_.\s-]+$").expect("chinese pattern"));
static CJK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4e00}-\x{9fa5}]").expect("cjk pattern"));
static LATIN_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9\s]+").expect("latin pattern"));

/// Ideogramas com valor numérico (Numeric_Type=Numeric), fora das categorias
/// Nd/Nl/No cobertas por `char::is_numeric`.
const CJK_NUMERALS: &str = "〇零一二三四五六七八九十百千万萬亿億兆壹贰貳叁參肆伍陆陸柒捌玖拾佰仟廿卅卌";

/// Os dois regimes de tokenização suportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Chinês: um token por caractere, unidos sem separador.
    Chinese,
    /// Inglês: um token por palavra (minúscula), unidos por espaço.
    English,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::Chinese => "chinese",
            Language::English => "english",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chinese" | "zh" | "ch" => Some(Language::Chinese),
            "english" | "en" | "eng" => Some(Language::English),
            _ => None,
        }
    }

    pub fn all() -> [Language; 2] {
        [Language::Chinese, Language::English]
    }

    /// Modo de tokenização usado por este idioma.
    pub fn tokenizer_mode(&self) -> TokenizerMode {
        match self {
            Language::Chinese => TokenizerMode::CharLevel,
            Language::English => TokenizerMode::Whitespace,
        }
    }

    /// A string pertence a este idioma?
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Language::Chinese => is_chinese(text),
            Language::English => is_english(text),
        }
    }

    /// Somente o regime inglês colapsa espaços antes de achatar o corpus.
    pub fn collapses_whitespace(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pré-condição comum aos dois idiomas.
fn is_sentence(text: &str, pattern: impl Fn(&str) -> bool) -> bool {
    if text.is_empty() || text.chars().count() <= 1 || text.chars().all(is_numeric_char) {
        return false;
    }
    pattern(text)
}

pub fn is_chinese(text: &str) -> bool {
    is_sentence(text, |t| CHINESE_RE.is_match(t))
}

pub fn is_english(text: &str) -> bool {
    is_sentence(text, |t| !CJK_RE.is_match(t) && LATIN_RUN_RE.is_match(t))
}

fn is_numeric_char(c: char) -> bool {
    c.is_numeric() || CJK_NUMERALS.contains(c)
}

fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

/// Reescreve dígitos de largura total em ASCII e remove `_` entre dígitos.
/// `None` quando um `_` aparece fora dessa posição.
fn ascii_numeral(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '０'..='９' => {
                let digit = c as u32 - '０' as u32;
                out.push(char::from_digit(digit, 10)?);
            }
            '_' => {
                let between_digits = i > 0
                    && i + 1 < chars.len()
                    && is_decimal_digit(chars[i - 1])
                    && is_decimal_digit(chars[i + 1]);
                if !between_digits {
                    return None;
                }
            }
            c => out.push(c),
        }
    }
    Some(out)
}

/// A string é interpretável como número de ponto flutuante?
///
/// Aceita separadores `_` entre dígitos e dígitos de largura total.
/// Falha de parse significa simplesmente "não é número"; nunca propaga erro.
pub fn is_number(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    ascii_numeral(trimmed).is_some_and(|n| n.parse::<f64>().is_ok())
}

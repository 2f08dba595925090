//! # Tabela de Frequência de N-gramas
//!
//! Para cada string do corpus, enumera todos os sub-spans contíguos com
//! tamanho entre `min_window` e `min(max_window, nº de tokens)` e conta
//! quantas vezes cada um aparece no corpus inteiro.
//!
//! ## Enumeração
//!
//! A ordem é sempre: tamanho da janela crescente (laço externo), depois
//! offset inicial crescente (laço interno). A tabela não depende da ordem,
//! mas o [`scorer`](crate::scorer) sim: em caso de empate vence o primeiro
//! candidato visto, ou seja, o mais curto.
//!
//! ```text
//! "apple watch se", min=1, max=15
//! w=1: apple | watch | se
//! w=2: apple watch | watch se
//! w=3: apple watch se
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DenoiseError, Result};
use crate::language::is_number;
use crate::tokenizer::{join, tokenize_with_mode, TokenizerMode};

/// Um span e sua contagem, para inspeção da tabela.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanCount {
    pub span: String,
    pub count: u32,
}

/// Tabela span → contagem, construída uma vez e imutável depois disso.
///
/// Toda chave presente tem contagem ≥ 1. Spans numéricos e vazios nunca
/// entram. Consultas a spans desconhecidos retornam 0.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
}

impl FrequencyTable {
    /// Contagem de um span (0 se nunca visto).
    pub fn count(&self, span: &str) -> u32 {
        self.counts.get(span).copied().unwrap_or(0)
    }

    pub fn contains(&self, span: &str) -> bool {
        self.counts.contains_key(span)
    }

    /// Número de spans distintos.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Visão ordenada por contagem decrescente (desempate: span crescente).
    ///
    /// Serve apenas para inspeção; a pontuação só consulta por chave.
    pub fn sorted(&self) -> Vec<SpanCount> {
        let mut entries: Vec<SpanCount> = self
            .counts
            .iter()
            .map(|(span, count)| SpanCount {
                span: span.clone(),
                count: *count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.span.cmp(&b.span)));
        entries
    }

    /// Os `n` spans mais frequentes.
    pub fn top(&self, n: usize) -> Vec<SpanCount> {
        let mut sorted = self.sorted();
        sorted.truncate(n);
        sorted
    }
}

/// Valida os limites de janela: `min_window` precisa ser ao menos 1.
pub fn check_window(min_window: usize, max_window: usize) -> Result<()> {
    if min_window < 1 {
        return Err(DenoiseError::InvalidWindow {
            min_window,
            max_window,
        });
    }
    Ok(())
}

/// Enumera os spans de uma sequência de tokens, na ordem janela → offset.
///
/// O teto efetivo é `min(max_window, tokens.len())`, então a própria string
/// inteira é sempre uma janela quando cabe no limite.
pub fn window_spans(
    tokens: &[&str],
    min_window: usize,
    max_window: usize,
    mode: TokenizerMode,
) -> Vec<String> {
    let max_len = max_window.min(tokens.len());
    let mut spans = Vec::new();

    for win in min_window.max(1)..=max_len {
        for window in tokens.windows(win) {
            spans.push(join(window, mode));
        }
    }
    spans
}

/// Constrói a tabela de frequência a partir de um corpus já filtrado e
/// normalizado para o idioma.
///
/// # Erros
/// Retorna [`DenoiseError::InvalidWindow`] se `min_window < 1`.
pub fn build_table<S: AsRef<str>>(
    corpus: &[S],
    min_window: usize,
    max_window: usize,
    mode: TokenizerMode,
) -> Result<FrequencyTable> {
    check_window(min_window, max_window)?;

    let mut counts: HashMap<String, u32> = HashMap::new();
    for text in corpus {
        let tokens = tokenize_with_mode(text.as_ref(), mode);
        for span in window_spans(&tokens, min_window, max_window, mode) {
            *counts.entry(span).or_insert(0) += 1;
        }
    }

    // Spans numéricos ou vazios nunca são candidatos válidos
    counts.retain(|span, _| !(span.is_empty() || is_number(span)));

    debug!(
        strings = corpus.len(),
        distinct_spans = counts.len(),
        min_window,
        max_window,
        ?mode,
        "frequency table built"
    );

    Ok(FrequencyTable { counts })
}

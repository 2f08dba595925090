//! # Seleção do Melhor Candidato
//!
//! A pontuação de um candidato é a sua contagem bruta na tabela (como `f64`).
//! Só um candidato **estritamente** maior substitui o melhor atual: empates
//! ficam com o primeiro visto, que pela ordem de geração é o span mais curto.

use crate::ngram::FrequencyTable;

/// Retorna `(melhor_span, melhor_pontuação)`.
///
/// Sem candidatos, ou com todos zerados, retorna `("", 0.0)`.
pub fn pick_best<S: AsRef<str>>(candidates: &[S], table: &FrequencyTable) -> (String, f64) {
    let mut best_score = 0.0;
    let mut best_span = "";

    for candidate in candidates {
        let score = table.count(candidate.as_ref()) as f64;
        if score > best_score {
            best_score = score;
            best_span = candidate.as_ref();
        }
    }

    (best_span.to_string(), best_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::build_table;
    use crate::tokenizer::TokenizerMode;

    fn table() -> FrequencyTable {
        build_table(
            &["apple watch", "apple watch se", "watch band"],
            1,
            15,
            TokenizerMode::Whitespace,
        )
        .unwrap()
    }

    #[test]
    fn test_pick_highest_count() {
        let (span, score) = pick_best(&["se", "apple watch", "watch"], &table());
        assert_eq!(span, "watch");
        assert_eq!(score, 3.0);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        // "apple" e "apple watch" têm contagem 2; o primeiro vence
        let (span, score) = pick_best(&["apple", "apple watch"], &table());
        assert_eq!(span, "apple");
        assert_eq!(score, 2.0);

        let (span, _) = pick_best(&["apple watch", "apple"], &table());
        assert_eq!(span, "apple watch");
    }

    #[test]
    fn test_empty_and_unknown_candidates() {
        let empty: [&str; 0] = [];
        assert_eq!(pick_best(&empty, &table()), (String::new(), 0.0));
        assert_eq!(pick_best(&["banana"], &table()), (String::new(), 0.0));
    }
}

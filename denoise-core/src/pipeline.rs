//! # Pipeline de Limpeza — Orquestrador com Eventos Observáveis
//!
//! O [`Denoiser`] coordena classificador, tabela de n-gramas e seleção de
//! candidatos. Ele roda em dois modos:
//!
//! - **Lote** ([`Denoiser::clean`]): constrói a tabela uma vez e limpa os grupos
//!   em paralelo com `rayon`, já que essa fase só lê a tabela.
//! - **Streaming** ([`Denoiser::clean_streaming`]): mesmo resultado, mas
//!   sequencial e emitindo um [`DenoiseEvent`] por passo via `mpsc`, para o
//!   servidor WebSocket transmitir o progresso.
//!
//! ## Fluxo
//!
//! 1. (Inglês) colapsa espaços em cada grupo.
//! 2. Achata todos os grupos num corpus único: junta com vírgula e divide de novo.
//!    A fronteira entre grupos é descartada de propósito; as estatísticas são do corpus.
//! 3. Filtra as entidades do idioma e constrói a [`FrequencyTable`].
//! 4. Para cada grupo **original**, escolhe o melhor sub-span de cada entidade.
//! 5. Deduplica e junta com vírgulas; um resultado por grupo, na ordem de entrada.

use std::collections::HashSet;
use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cleanup::{normalize_whitespace, strip_noise_group};
use crate::config::DenoiseConfig;
use crate::error::Result;
use crate::language::{is_number, Language};
use crate::ngram::{build_table, window_spans, FrequencyTable, SpanCount};
use crate::scorer::pick_best;
use crate::tokenizer::{normalize, tokenize_with_mode};

/// Quantos spans o evento `TableBuilt` carrega para visualização.
const TOP_SPANS_IN_EVENT: usize = 10;

/// O que aconteceu com uma entidade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityOutcome {
    /// O melhor sub-span atingiu o limiar e substitui a entidade.
    Replaced { span: String, score: f64 },
    /// Nenhum sub-span atingiu o limiar: a entidade sai do resultado.
    Dropped { best_span: String, best_score: f64 },
    /// A entidade não é do idioma alvo e segue intacta.
    PassedThrough { text: String },
}

impl EntityOutcome {
    /// Texto que entra no resultado do grupo, se algum.
    pub fn output(&self) -> Option<&str> {
        match self {
            EntityOutcome::Replaced { span, .. } => Some(span.as_str()),
            EntityOutcome::Dropped { .. } => None,
            EntityOutcome::PassedThrough { text } => Some(text.as_str()),
        }
    }
}

/// Eventos emitidos durante [`Denoiser::clean_streaming`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DenoiseEvent {
    /// **Passo 1**: corpus achatado e filtrado pelo idioma.
    CorpusFlattened {
        total_entities: usize,
        language_entities: usize,
    },
    /// **Passo 2**: tabela de frequência pronta.
    TableBuilt {
        distinct_spans: usize,
        top_spans: Vec<SpanCount>,
    },
    /// **Passo 3**: decisão tomada para uma entidade de um grupo.
    EntityResolved {
        group_index: usize,
        raw: String,
        outcome: EntityOutcome,
    },
    /// **Passo 4**: grupo concluído.
    GroupDone { group_index: usize, result: String },
    /// **Conclusão**: todos os grupos processados.
    Done {
        results: Vec<String>,
        processing_ms: u64,
    },
    /// **Falha**: configuração inválida.
    Error { message: String },
}

/// O denoiser de um idioma.
///
/// Guarda o idioma, a configuração e o conjunto de stopwords já normalizado.
/// Não guarda tabela: cada chamada a [`clean`](Self::clean) constrói a sua.
#[derive(Debug, Clone)]
pub struct Denoiser {
    language: Language,
    config: DenoiseConfig,
    stopwords: HashSet<String>,
}

impl Denoiser {
    /// Cria o denoiser validando a configuração.
    pub fn new(language: Language, config: DenoiseConfig) -> Result<Self> {
        config.validate()?;
        let stopwords = config
            .stopwords
            .iter()
            .map(|s| match language {
                Language::English => s.to_lowercase(),
                Language::Chinese => s.clone(),
            })
            .collect();
        Ok(Self {
            language,
            config,
            stopwords,
        })
    }

    /// Denoiser chinês com os padrões do idioma.
    pub fn chinese() -> Self {
        Self::with_defaults(Language::Chinese)
    }

    /// Denoiser inglês com os padrões do idioma.
    pub fn english() -> Self {
        Self::with_defaults(Language::English)
    }

    fn with_defaults(language: Language) -> Self {
        let config = DenoiseConfig::for_language(language);
        let stopwords = config.stopwords.iter().cloned().collect();
        Self {
            language,
            config,
            stopwords,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn config(&self) -> &DenoiseConfig {
        &self.config
    }

    /// Passo 1 (e limpeza opcional de ruído) aplicado a um grupo.
    fn prepare_group(&self, group: &str) -> String {
        let group = if self.config.strip_noise {
            strip_noise_group(group)
        } else {
            group.to_string()
        };
        if self.language.collapses_whitespace() {
            normalize_whitespace(&group)
        } else {
            group
        }
    }

    /// Passo 2: achata os grupos num corpus de entidades individuais.
    fn flatten(groups: &[String]) -> Vec<String> {
        groups
            .join(",")
            .split(',')
            .map(str::to_string)
            .collect()
    }

    /// Passo 3: mantém só as entidades do idioma, já normalizadas.
    ///
    /// A classificação olha a entidade crua, com os espaços das pontas; só
    /// depois ela é aparada. `" 錶"` entra na tabela como `"錶"`.
    fn language_corpus(&self, corpus: &[String]) -> Vec<String> {
        let mode = self.language.tokenizer_mode();
        corpus
            .iter()
            .filter(|entity| self.language.matches(entity))
            .map(|entity| normalize(entity, mode).into_owned())
            .collect()
    }

    /// Constrói a tabela de frequência a partir de um corpus de entidades
    /// individuais (sem vírgulas), filtrando pelo idioma.
    pub fn build_table<S: AsRef<str>>(&self, corpus: &[S]) -> Result<FrequencyTable> {
        let corpus: Vec<String> = corpus.iter().map(|s| s.as_ref().to_string()).collect();
        let filtered = self.language_corpus(&corpus);
        build_table(
            &filtered,
            self.config.min_window,
            self.config.table_window(),
            self.language.tokenizer_mode(),
        )
    }

    /// Passos 1–3: a tabela que [`clean`](Self::clean) usaria para estes grupos.
    pub fn table_for<S: AsRef<str>>(&self, groups: &[S]) -> Result<FrequencyTable> {
        let prepared: Vec<String> = groups.iter().map(|g| self.prepare_group(g.as_ref())).collect();
        self.build_table(&Self::flatten(&prepared))
    }

    /// Candidatos de uma entidade, na ordem janela → offset, sem números e
    /// sem stopwords.
    pub fn candidates(&self, entity: &str) -> Vec<String> {
        let mode = self.language.tokenizer_mode();
        let normalized = normalize(entity, mode);
        let tokens = tokenize_with_mode(&normalized, mode);

        window_spans(&tokens, self.config.min_window, self.config.max_window, mode)
            .into_iter()
            .filter(|span| !is_number(span) && !self.stopwords.contains(span))
            .collect()
    }

    /// Decide o destino de uma única entidade.
    pub fn denoise_entity(&self, raw: &str, table: &FrequencyTable) -> EntityOutcome {
        let entity = raw.trim();
        if !self.language.matches(entity) {
            return EntityOutcome::PassedThrough {
                text: entity.to_string(),
            };
        }

        let candidates = self.candidates(entity);
        let (best_span, best_score) = pick_best(&candidates, table);

        if best_score >= self.config.threshold {
            EntityOutcome::Replaced {
                span: best_span,
                score: best_score,
            }
        } else {
            EntityOutcome::Dropped {
                best_span,
                best_score,
            }
        }
    }

    /// Limpa uma lista de entidades e deduplica o resultado (mantendo a
    /// primeira ocorrência). Lista vazia volta vazia.
    pub fn denoise_entities<S: AsRef<str>>(&self, entities: &[S], table: &FrequencyTable) -> Vec<String> {
        let outcomes: Vec<EntityOutcome> = entities
            .iter()
            .map(|e| self.denoise_entity(e.as_ref(), table))
            .collect();
        dedup_outputs(&outcomes)
    }

    /// Limpa um grupo separado por vírgulas e devolve o grupo limpo.
    pub fn denoise_group(&self, group: &str, table: &FrequencyTable) -> String {
        let entities: Vec<&str> = group.split(',').collect();
        self.denoise_entities(&entities, table).join(",")
    }

    /// Executa o pipeline completo em lote.
    ///
    /// O resultado tem o mesmo tamanho e ordem que `groups`.
    pub fn clean<S: AsRef<str>>(&self, groups: &[S]) -> Result<Vec<String>> {
        self.clean_with_table(groups).map(|(results, _)| results)
    }

    /// Como [`clean`](Self::clean), devolvendo também a tabela usada.
    pub fn clean_with_table<S: AsRef<str>>(
        &self,
        groups: &[S],
    ) -> Result<(Vec<String>, FrequencyTable)> {
        let start = std::time::Instant::now();

        let prepared: Vec<String> = groups.iter().map(|g| self.prepare_group(g.as_ref())).collect();
        let table = self.build_table(&Self::flatten(&prepared))?;

        let results: Vec<String> = prepared
            .par_iter()
            .map(|group| self.denoise_group(group, &table))
            .collect();

        info!(
            language = %self.language,
            groups = results.len(),
            distinct_spans = table.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch cleaned"
        );
        Ok((results, table))
    }

    /// Executa o pipeline enviando eventos de progresso em tempo real.
    ///
    /// # Fluxo de Eventos
    /// 1. `CorpusFlattened`
    /// 2. `TableBuilt`
    /// 3. `EntityResolved` (para cada entidade de cada grupo)
    /// 4. `GroupDone` (para cada grupo)
    /// 5. `Done`, ou `Error` se a configuração for inválida
    pub fn clean_streaming<S: AsRef<str>>(
        &self,
        groups: &[S],
        tx: mpsc::Sender<DenoiseEvent>,
    ) -> Result<Vec<String>> {
        let start = std::time::Instant::now();

        // === Passos 1 e 2: preparação e achatamento ===
        let prepared: Vec<String> = groups.iter().map(|g| self.prepare_group(g.as_ref())).collect();
        let corpus = Self::flatten(&prepared);
        let filtered = self.language_corpus(&corpus);
        let _ = tx.send(DenoiseEvent::CorpusFlattened {
            total_entities: corpus.len(),
            language_entities: filtered.len(),
        });

        // === Passo 3: tabela de frequência ===
        let table = match build_table(
            &filtered,
            self.config.min_window,
            self.config.table_window(),
            self.language.tokenizer_mode(),
        ) {
            Ok(table) => table,
            Err(err) => {
                let _ = tx.send(DenoiseEvent::Error {
                    message: err.to_string(),
                });
                return Err(err);
            }
        };
        let _ = tx.send(DenoiseEvent::TableBuilt {
            distinct_spans: table.len(),
            top_spans: table.top(TOP_SPANS_IN_EVENT),
        });

        // === Passo 4: limpeza por grupo ===
        let mut results = Vec::with_capacity(prepared.len());
        for (group_index, group) in prepared.iter().enumerate() {
            let outcomes: Vec<EntityOutcome> = group
                .split(',')
                .map(|raw| {
                    let outcome = self.denoise_entity(raw, &table);
                    let _ = tx.send(DenoiseEvent::EntityResolved {
                        group_index,
                        raw: raw.to_string(),
                        outcome: outcome.clone(),
                    });
                    outcome
                })
                .collect();

            let result = dedup_outputs(&outcomes).join(",");
            debug!(group_index, %result, "group cleaned");
            let _ = tx.send(DenoiseEvent::GroupDone {
                group_index,
                result: result.clone(),
            });
            results.push(result);
        }

        let _ = tx.send(DenoiseEvent::Done {
            results: results.clone(),
            processing_ms: start.elapsed().as_millis() as u64,
        });
        Ok(results)
    }
}

/// Conjunto dos textos de saída, na ordem da primeira ocorrência.
fn dedup_outputs(outcomes: &[EntityOutcome]) -> Vec<String> {
    let mut seen = HashSet::new();
    outcomes
        .iter()
        .filter_map(EntityOutcome::output)
        .filter(|text| seen.insert(*text))
        .map(str::to_string)
        .collect()
}

/// Atalho: limpa `groups` no idioma dado com a configuração dada.
pub fn clean<S: AsRef<str>>(
    language: Language,
    groups: &[S],
    config: DenoiseConfig,
) -> Result<Vec<String>> {
    Denoiser::new(language, config)?.clean(groups)
}

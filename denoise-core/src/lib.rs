//! # denoise-core — Limpeza de Entidades NER por Frequência de N-gramas
//!
//! Extratores NER erram as bordas das entidades: unidades coladas no fim,
//! artigos no começo, marcas truncadas. Este crate "encaixa" cada entidade
//! ruidosa na sua forma canônica mais comum: constrói uma tabela com a
//! frequência de todos os sub-spans do corpus inteiro e, para cada entidade,
//! escolhe o sub-span mais frequente.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Entrada**: grupos de entidades, cada um uma string separada por vírgulas.
//! 2.  **Classificação** ([`language`]): chinês, inglês ou nenhum dos dois.
//! 3.  **Tokenização** ([`tokenizer`]): caracteres (chinês) ou palavras (inglês).
//! 4.  **Tabela de N-gramas** ([`ngram`]): contagem de todos os sub-spans do corpus.
//! 5.  **Seleção** ([`scorer`]): o candidato mais frequente, empates para o mais curto.
//! 6.  **Orquestração** ([`pipeline`]): limiar, descarte, deduplicação, eventos.
//! 7.  **Saída**: um grupo limpo por grupo de entrada, na mesma ordem.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use denoise_core::{DenoiseConfig, Denoiser, Language};
//!
//! let denoiser = Denoiser::new(
//!     Language::English,
//!     DenoiseConfig::english().with_windows(2, 10),
//! ).unwrap();
//!
//! let groups = ["apple watch,apple watch series 7,apple watch se"];
//! let results = denoiser.clean(&groups).unwrap();
//! assert_eq!(results, vec!["apple watch"]);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: orquestrador em lote e em streaming.
//! - [`ngram`]: construção da tabela de frequência.
//! - [`config`]: padrões por idioma e carregamento TOML.
//! - [`cleanup`]: remoção de ruído e normalização de espaços.

pub mod cleanup;
pub mod config;
pub mod corpus;
pub mod error;
pub mod language;
pub mod ngram;
pub mod pipeline;
pub mod scorer;
pub mod tokenizer;

pub use config::{ConfigOverrides, DenoiseConfig, DenoiseSettings};
pub use error::{DenoiseError, Result};
pub use language::{is_chinese, is_english, Language};
pub use ngram::{FrequencyTable, SpanCount};
pub use pipeline::{clean, DenoiseEvent, Denoiser, EntityOutcome};
pub use tokenizer::TokenizerMode;

//! # Corpus de Demonstração
//!
//! Grupos de entidades de produto com ruído típico de extratores NER:
//! unidades e anos colados, artigos no início, nomes truncados ou
//! estendidos. Cada string é um grupo separado por vírgulas, no mesmo
//! formato aceito por [`Denoiser::clean`](crate::pipeline::Denoiser::clean).

use crate::language::Language;

/// Grupos de demonstração do regime chinês.
pub fn chinese_demo_groups() -> Vec<&'static str> {
    vec![
        "蘋果手錶,蘋果手錶七代",
        "蘋果手錶 七代,小米手環",
        "小米手環六代,小米手環",
        "星巴克咖啡,星巴克",
        "可口可樂,可口可樂330ml",
        "!!,台積電",
    ]
}

/// Grupos de demonstração do regime inglês.
pub fn english_demo_groups() -> Vec<&'static str> {
    vec![
        "apple watch,apple watch series 7",
        "Apple Watch SE,the apple watch",
        "samsung galaxy s22,samsung galaxy",
        "Samsung  Galaxy Buds,nike air max",
        "nike air force 1,the nike air",
        "!!,kindle paperwhite",
    ]
}

/// Grupos de demonstração de um idioma.
pub fn demo_groups(language: Language) -> Vec<&'static str> {
    match language {
        Language::Chinese => chinese_demo_groups(),
        Language::English => english_demo_groups(),
    }
}

//! # Configuração do Denoiser
//!
//! Cada idioma tem seus próprios padrões (janelas, limiar, stopwords). A
//! configuração é um valor imutável passado explicitamente a cada execução;
//! não existe estado padrão compartilhado e mutável.
//!
//! ## Arquivo TOML
//!
//! ```toml
//! bind = "0.0.0.0:3000"
//!
//! [chinese]
//! max_window = 12
//!
//! [english]
//! threshold = 2.0
//! stopwords = ["the", "of", "an", "a"]
//! ```
//!
//! Campos ausentes herdam o padrão do idioma.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DenoiseError, Result};
use crate::language::Language;
use crate::ngram::check_window;

pub const DEFAULT_THRESHOLD: f64 = 1.2;
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Parâmetros de uma execução de limpeza.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenoiseConfig {
    /// Pontuação mínima (contagem bruta) para aceitar o candidato vencedor.
    /// Com 1.2, o span precisa aparecer pelo menos duas vezes no corpus.
    pub threshold: f64,
    /// Menor tamanho de span, em tokens. Precisa ser ≥ 1.
    pub min_window: usize,
    /// Maior tamanho de span considerado como candidato de uma entidade.
    pub max_window: usize,
    /// Maior tamanho de span contado na tabela de frequência.
    pub table_max_window: usize,
    /// Spans que nunca são escolhidos, qualquer que seja a frequência.
    pub stopwords: Vec<String>,
    /// Remove anos, unidades e códigos monetários antes de processar.
    pub strip_noise: bool,
}

impl DenoiseConfig {
    /// Padrões do regime chinês (por caractere).
    pub fn chinese() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_window: 1,
            max_window: 30,
            table_max_window: 30,
            stopwords: vec![],
            strip_noise: false,
        }
    }

    /// Padrões do regime inglês (por palavra).
    pub fn english() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_window: 1,
            max_window: 10,
            table_max_window: 15,
            stopwords: ["the", "of", "an"].iter().map(|s| s.to_string()).collect(),
            strip_noise: false,
        }
    }

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Chinese => Self::chinese(),
            Language::English => Self::english(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_windows(mut self, min_window: usize, max_window: usize) -> Self {
        self.min_window = min_window;
        self.max_window = max_window;
        self
    }

    pub fn with_stopwords(mut self, stopwords: &[&str]) -> Self {
        self.stopwords = stopwords.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_strip_noise(mut self, strip_noise: bool) -> Self {
        self.strip_noise = strip_noise;
        self
    }

    /// Teto de janela usado na construção da tabela. Nunca menor que
    /// `max_window`, senão candidatos longos teriam contagem zero.
    pub fn table_window(&self) -> usize {
        self.table_max_window.max(self.max_window)
    }

    pub fn validate(&self) -> Result<()> {
        check_window(self.min_window, self.max_window)?;
        if !self.threshold.is_finite() {
            return Err(DenoiseError::Config(format!(
                "threshold must be a finite number (got {})",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Sobrescritas parciais de um [`DenoiseConfig`].
///
/// Usado nas seções do arquivo TOML e nas requisições do servidor web.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub threshold: Option<f64>,
    pub min_window: Option<usize>,
    pub max_window: Option<usize>,
    pub table_max_window: Option<usize>,
    pub stopwords: Option<Vec<String>>,
    pub strip_noise: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut base: DenoiseConfig) -> DenoiseConfig {
        if let Some(threshold) = self.threshold {
            base.threshold = threshold;
        }
        if let Some(min_window) = self.min_window {
            base.min_window = min_window;
        }
        if let Some(max_window) = self.max_window {
            base.max_window = max_window;
        }
        if let Some(table_max_window) = self.table_max_window {
            base.table_max_window = table_max_window;
        }
        if let Some(stopwords) = &self.stopwords {
            base.stopwords = stopwords.clone();
        }
        if let Some(strip_noise) = self.strip_noise {
            base.strip_noise = strip_noise;
        }
        base
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    bind: Option<String>,
    chinese: ConfigOverrides,
    english: ConfigOverrides,
}

/// Configuração completa do serviço: endereço e um [`DenoiseConfig`] por idioma.
#[derive(Debug, Clone, PartialEq)]
pub struct DenoiseSettings {
    pub bind: String,
    pub chinese: DenoiseConfig,
    pub english: DenoiseConfig,
}

impl Default for DenoiseSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            chinese: DenoiseConfig::chinese(),
            english: DenoiseConfig::english(),
        }
    }
}

impl DenoiseSettings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(text)?;
        let settings = Self {
            bind: file.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
            chinese: file.chinese.apply(DenoiseConfig::chinese()),
            english: file.english.apply(DenoiseConfig::english()),
        };
        settings.chinese.validate()?;
        settings.english.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn for_language(&self, language: Language) -> &DenoiseConfig {
        match language {
            Language::Chinese => &self.chinese,
            Language::English => &self.english,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_language_defaults() {
        let zh = DenoiseConfig::chinese();
        assert_eq!((zh.min_window, zh.max_window), (1, 30));
        assert!(zh.stopwords.is_empty());

        let en = DenoiseConfig::english();
        assert_eq!((en.min_window, en.max_window, en.table_max_window), (1, 10, 15));
        assert_eq!(en.stopwords, vec!["the", "of", "an"]);
        assert_eq!(en.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_table_window_never_below_max_window() {
        let cfg = DenoiseConfig::english().with_windows(1, 20);
        assert_eq!(cfg.table_window(), 20);
        assert_eq!(DenoiseConfig::english().table_window(), 15);
    }

    #[test]
    fn test_validate() {
        assert!(DenoiseConfig::chinese().validate().is_ok());
        assert!(matches!(
            DenoiseConfig::chinese().with_windows(0, 5).validate(),
            Err(DenoiseError::InvalidWindow { .. })
        ));
        assert!(matches!(
            DenoiseConfig::chinese().with_threshold(f64::NAN).validate(),
            Err(DenoiseError::Config(_))
        ));
    }

    #[test]
    fn test_overrides_keep_language_defaults() {
        let overrides = ConfigOverrides {
            threshold: Some(3.0),
            ..Default::default()
        };
        let cfg = overrides.apply(DenoiseConfig::english());
        assert_eq!(cfg.threshold, 3.0);
        assert_eq!(cfg.max_window, 10);
        assert_eq!(cfg.stopwords, vec!["the", "of", "an"]);
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = DenoiseSettings::from_toml_str(
            r#"
            bind = "127.0.0.1:8080"

            [chinese]
            max_window = 12

            [english]
            stopwords = ["a"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.bind, "127.0.0.1:8080");
        assert_eq!(settings.chinese.max_window, 12);
        assert_eq!(settings.chinese.min_window, 1);
        assert_eq!(settings.english.stopwords, vec!["a"]);
        assert_eq!(settings.for_language(Language::English).max_window, 10);
    }

    #[test]
    fn test_settings_reject_bad_window() {
        let err = DenoiseSettings::from_toml_str("[english]\nmin_window = 0\n").unwrap_err();
        assert!(matches!(err, DenoiseError::InvalidWindow { .. }));
    }

    #[test]
    fn test_settings_reject_unknown_field() {
        let err = DenoiseSettings::from_toml_str("[english]\nthreshhold = 2.0\n").unwrap_err();
        assert!(matches!(err, DenoiseError::Config(_)));
    }

    #[test]
    fn test_settings_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chinese]\nthreshold = 2.5").unwrap();
        let settings = DenoiseSettings::load(file.path()).unwrap();
        assert_eq!(settings.chinese.threshold, 2.5);
        assert_eq!(settings.bind, DEFAULT_BIND);

        let missing = DenoiseSettings::load(Path::new("/nonexistent/denoise.toml"));
        assert!(matches!(missing, Err(DenoiseError::Io(_))));
    }
}

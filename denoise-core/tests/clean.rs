use std::sync::mpsc;

use denoise_core::corpus::demo_groups;
use denoise_core::ngram::build_table;
use denoise_core::scorer::pick_best;
use denoise_core::{
    clean, DenoiseConfig, DenoiseEvent, Denoiser, EntityOutcome, Language, TokenizerMode,
};

#[test]
fn english_apple_watch_snaps_to_canonical_form() {
    let denoiser = Denoiser::english();
    let table = denoiser
        .build_table(&["apple watch", "apple watch series 7", "apple watch se"])
        .unwrap();
    assert_eq!(table.count("apple watch"), 3);

    let results = clean(
        Language::English,
        &["apple watch,apple watch series 7,apple watch se"],
        DenoiseConfig::english().with_windows(2, 10),
    )
    .unwrap();
    assert_eq!(results, vec!["apple watch"]);
}

#[test]
fn chinese_full_name_beats_spans_seen_once() {
    let denoiser = Denoiser::chinese();
    let table = denoiser.build_table(&["蘋果手錶", "蘋果手錶七代"]).unwrap();
    assert_eq!(table.count("蘋果手錶"), 2);
    assert_eq!(table.count("手錶七代"), 1);

    let results = clean(
        Language::Chinese,
        &["蘋果手錶", "蘋果手錶七代"],
        DenoiseConfig::chinese().with_windows(4, 30),
    )
    .unwrap();
    assert_eq!(results, vec!["蘋果手錶", "蘋果手錶"]);
}

#[test]
fn chinese_keeps_inner_space_as_token() {
    let results = clean(
        Language::Chinese,
        &["蘋果手錶 七代,蘋果手錶"],
        DenoiseConfig::chinese().with_windows(4, 30),
    )
    .unwrap();
    assert_eq!(results, vec!["蘋果手錶"]);
}

#[test]
fn single_pass_is_deterministic() {
    for language in Language::all() {
        let groups = demo_groups(language);
        let denoiser = Denoiser::new(language, DenoiseConfig::for_language(language)).unwrap();
        let first = denoiser.clean(&groups).unwrap();
        for _ in 0..5 {
            assert_eq!(denoiser.clean(&groups).unwrap(), first);
        }
    }
}

#[test]
fn tie_break_prefers_shorter_earlier_candidate() {
    let table = build_table(&["nike air", "nike air"], 1, 15, TokenizerMode::Whitespace).unwrap();
    let denoiser = Denoiser::english();
    let candidates = denoiser.candidates("Nike Air");
    assert_eq!(candidates, vec!["nike", "air", "nike air"]);
    assert_eq!(pick_best(&candidates, &table), ("nike".to_string(), 2.0));
}

#[test]
fn unclassified_entities_survive_any_threshold() {
    let results = clean(
        Language::English,
        &["!!,???", "…"],
        DenoiseConfig::english().with_threshold(1000.0),
    )
    .unwrap();
    assert_eq!(results, vec!["!!,???", "…"]);
}

#[test]
fn stopword_at_corpus_maximum_is_never_chosen() {
    let groups = ["the beatles,the who", "the doors,the beatles"];
    let results = clean(Language::English, &groups, DenoiseConfig::english()).unwrap();
    assert_eq!(results, vec!["beatles", "beatles"]);

    let no_stopwords = clean(
        Language::English,
        &groups,
        DenoiseConfig::english().with_stopwords(&[]),
    )
    .unwrap();
    assert_eq!(no_stopwords, vec!["the", "the"]);
}

#[test]
fn events_serialize_as_tagged_json() {
    let denoiser = Denoiser::english();
    let (tx, rx) = mpsc::channel();
    denoiser
        .clean_streaming(&["apple watch,apple watch se"], tx)
        .unwrap();

    let events: Vec<DenoiseEvent> = rx.try_iter().collect();
    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["type"], "CorpusFlattened");
    assert_eq!(json["data"]["total_entities"], 2);

    let resolved = events
        .iter()
        .find_map(|e| match e {
            DenoiseEvent::EntityResolved { outcome, .. } => Some(outcome.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        resolved,
        EntityOutcome::Replaced {
            span: "apple".to_string(),
            score: 2.0
        }
    );
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(json["kind"], "replaced");
}

//! Tests for marker filtering

use super::*;
use crate::dataset::LocationRecord;
use crate::marker::TypePalette;

fn sample_index() -> MarkerIndex {
    let records = vec![
        LocationRecord::new("Cluj", "Liceul Teoretic Ion Agârbiceanu", "Liceu", 46.55, 23.57),
        LocationRecord::new("Cluj", "Școala Gimnazială Avram Iancu", "Școală Gimnazială", 46.77, 23.59),
        LocationRecord::new("Cluj", "Grădinița nr. 5", "Grădiniță", 46.76, 23.60),
        LocationRecord::new("Timiș", "Liceul Pedagogic Carmen Sylva", "Liceu", 45.75, 21.23),
        LocationRecord::new("Timiș", "Școala Gimnazială nr. 2", "Școală Gimnazială", 45.74, 21.22),
        LocationRecord::new("Alba", "Colegiul Național Horea, Cloșca și Crișan", "Colegiu", 46.07, 23.58),
    ];
    MarkerIndex::build(records, &TypePalette::default())
}

fn ids(values: &[usize]) -> VisibleSet {
    values.iter().map(|v| MarkerId(*v)).collect()
}

#[test]
fn test_empty_state_shows_everything() {
    let index = sample_index();
    assert_eq!(select(&index, &FilterState::new()), index.all_ids());
}

#[test]
fn test_cluj_example() {
    let index = sample_index();
    let cluj = select(&index, &FilterState::new().with_county("Cluj"));
    assert!(cluj.contains(&MarkerId(0)));
    assert_eq!(cluj, ids(&[0, 1, 2]));

    let timis = select(&index, &FilterState::new().with_county("Timiș"));
    assert!(!timis.contains(&MarkerId(0)));
}

#[test]
fn test_county_is_case_sensitive() {
    let index = sample_index();
    assert!(select(&index, &FilterState::new().with_county("cluj")).is_empty());
}

#[test]
fn test_type_filter() {
    let index = sample_index();
    assert_eq!(
        select(&index, &FilterState::new().with_kind("Liceu")),
        ids(&[0, 3])
    );
}

#[test]
fn test_search_is_case_insensitive() {
    let index = sample_index();
    let upper = select(&index, &FilterState::new().with_search("ȘCOAL"));
    let lower = select(&index, &FilterState::new().with_search("școal"));
    assert_eq!(upper, lower);
    assert_eq!(upper, ids(&[1, 4]));
}

#[test]
fn test_search_keeps_surrounding_whitespace() {
    let index = MarkerIndex::build(
        vec![
            LocationRecord::new("Cluj", "Clujana", "Liceu", 46.77, 23.62),
            LocationRecord::new("Cluj", "Liceul Cluj", "Liceu", 46.76, 23.58),
            LocationRecord::new("Cluj", "Grădinița", "Grădiniță", 46.75, 23.57),
        ],
        &TypePalette::default(),
    );

    assert_eq!(select(&index, &FilterState::new().with_search(" cluj")), ids(&[1]));
    assert_eq!(select(&index, &FilterState::new().with_search("cluj")), ids(&[0, 1]));
    assert_eq!(select(&index, &FilterState::new().with_search(" ")), ids(&[1]));
    assert!(!FilterState::new().with_search(" ").is_empty());
    assert!(FilterState::new().with_search("").is_empty());
}

#[test]
fn test_filters_combine_by_conjunction() {
    let index = sample_index();
    let state = FilterState::new()
        .with_county("Cluj")
        .with_kind("Școală Gimnazială")
        .with_search("iancu");

    let combined = select(&index, &state);
    assert_eq!(combined, ids(&[1]));

    let by_county = select(&index, &FilterState::new().with_county(&state.county));
    let by_kind = select(&index, &FilterState::new().with_kind(&state.kind));
    let by_search = select(&index, &FilterState::new().with_search(&state.search));

    let intersection: VisibleSet = by_county
        .intersection(&by_kind)
        .copied()
        .collect::<VisibleSet>()
        .intersection(&by_search)
        .copied()
        .collect();
    assert!(combined.is_subset(&intersection));
}

#[test]
fn test_conjunction_law_over_many_states() {
    let index = sample_index();
    let counties = ["", "Cluj", "Timiș", "Alba", "Bihor"];
    let kinds = ["", "Liceu", "Școală Gimnazială", "Colegiu"];
    let searches = ["", "liceul", "ȘCOALA", "nr.", "zzz"];

    for county in counties {
        for kind in kinds {
            for search in searches {
                let state = FilterState::new()
                    .with_county(county)
                    .with_kind(kind)
                    .with_search(search);
                let combined = select(&index, &state);

                let by_county = select(&index, &FilterState::new().with_county(county));
                let by_kind = select(&index, &FilterState::new().with_kind(kind));
                let by_search = select(&index, &FilterState::new().with_search(search));

                assert!(combined.is_subset(&by_county));
                assert!(combined.is_subset(&by_kind));
                assert!(combined.is_subset(&by_search));
            }
        }
    }
}

#[test]
fn test_unknown_values_yield_empty_set() {
    let index = sample_index();
    assert!(select(&index, &FilterState::new().with_county("Bihor")).is_empty());
    assert!(select(&index, &FilterState::new().with_kind("Universitate")).is_empty());
    assert!(select(
        &index,
        &FilterState::new().with_county("Alba").with_kind("Liceu")
    )
    .is_empty());
}

#[test]
fn test_empty_index_selects_nothing() {
    let index = MarkerIndex::new();
    assert!(select(&index, &FilterState::new()).is_empty());
}

#[test]
fn test_state_helpers() {
    let mut state = FilterState::new().with_county("Cluj").with_search("x");
    assert!(!state.is_empty());
    state.clear();
    assert!(state.is_empty());
    assert_eq!(state, FilterState::default());
}

// ============================================================================
// FilterEngine
// ============================================================================

#[test]
fn test_engine_first_pass_adds_everything() {
    let index = sample_index();
    let mut engine = FilterEngine::new();
    let mut layer = MarkerLayer::new();

    let delta = engine.apply(&index, &FilterState::new(), &mut layer);
    assert_eq!(delta.added.len(), index.len());
    assert!(delta.removed.is_empty());
    assert_eq!(layer.shown(), &index.all_ids());
    assert_eq!(engine.visible(), &index.all_ids());
}

#[test]
fn test_engine_reconciles_only_changes() {
    let index = sample_index();
    let mut engine = FilterEngine::new();
    let mut layer = MarkerLayer::new();

    engine.apply(&index, &FilterState::new(), &mut layer);
    let adds_before = layer.add_count();

    let delta = engine.apply(&index, &FilterState::new().with_county("Cluj"), &mut layer);
    assert!(delta.added.is_empty());
    assert_eq!(delta.removed, vec![MarkerId(3), MarkerId(4), MarkerId(5)]);
    assert_eq!(layer.add_count(), adds_before);
    assert_eq!(layer.remove_count(), 3);
    assert_eq!(layer.shown(), &ids(&[0, 1, 2]));

    let delta = engine.apply(&index, &FilterState::new().with_kind("Liceu"), &mut layer);
    assert_eq!(delta.added, vec![MarkerId(3)]);
    assert_eq!(delta.removed, vec![MarkerId(1), MarkerId(2)]);
    assert_eq!(layer.shown(), &ids(&[0, 3]));
}

#[test]
fn test_engine_same_state_is_a_no_op() {
    let index = sample_index();
    let mut engine = FilterEngine::new();
    let mut layer = MarkerLayer::new();
    let state = FilterState::new().with_search("liceul");

    engine.apply(&index, &state, &mut layer);
    let calls = layer.add_count() + layer.remove_count();

    let delta = engine.apply(&index, &state, &mut layer);
    assert!(delta.is_empty());
    assert_eq!(layer.add_count() + layer.remove_count(), calls);
}

#[test]
fn test_engine_reset_matches_empty_state() {
    let index = sample_index();
    let mut engine = FilterEngine::new();
    let mut layer = MarkerLayer::new();
    let mut state = FilterState::new().with_county("Alba").with_search("horea");

    engine.apply(&index, &state, &mut layer);
    assert_eq!(layer.len(), 1);

    engine.reset(&index, &mut state, &mut layer);
    assert!(state.is_empty());
    assert_eq!(engine.visible(), &select(&index, &FilterState::new()));
    assert_eq!(layer.shown(), &index.all_ids());
}

#[test]
fn test_engine_clear_removes_everything() {
    let index = sample_index();
    let mut engine = FilterEngine::new();
    let mut layer = MarkerLayer::new();

    engine.apply(&index, &FilterState::new(), &mut layer);
    engine.clear(&index, &mut layer);
    assert!(layer.is_empty());
    assert!(engine.visible().is_empty());
}

//! Tests for the selection synchronizer's observable properties.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_multiselect::{
    ItemId, ItemRef, ItemsSource, SelectableItem, SelectionFlags, SelectionSynchronizer,
};

fn people() -> ItemsSource {
    ItemsSource::new(vec![
        SelectableItem::shared(0, "Tom", false),
        SelectableItem::shared(1, "John Doe", false),
        SelectableItem::shared(2, "Harry", false),
        SelectableItem::shared(3, "Ma Six", false),
        SelectableItem::shared(4, "Zhao Qi", true),
    ])
    .expect("unique ids")
}

fn numbered(ids: &[ItemId]) -> ItemsSource {
    ItemsSource::new(
        ids.iter()
            .map(|&id| SelectableItem::shared(id, format!("item {id}"), false))
            .collect(),
    )
    .expect("unique ids")
}

fn item(source: &ItemsSource, id: ItemId) -> ItemRef {
    source.find(id).cloned().expect("item present")
}

/// Selects an item in the popup and applies the resulting change.
fn click(sync: &mut SelectionSynchronizer, item: ItemRef) {
    let change = sync.popup_mut().select(item, SelectionFlags::TOGGLE);
    sync.on_source_selection_changed(&change.added, &change.removed);
}

#[test]
fn test_insertion_order_independence() {
    let source = numbered(&[1, 3, 5]);
    let mut sync = SelectionSynchronizer::new();

    for id in [5, 1, 3] {
        sync.on_source_selection_changed(&[item(&source, id)], &[]);
    }

    assert_eq!(sync.checked_items().ids(), vec![1, 3, 5]);
}

#[test]
fn test_repeated_add_is_idempotent() {
    let source = numbered(&[1, 2, 3]);
    let mut sync = SelectionSynchronizer::new();
    let two = item(&source, 2);

    assert!(sync.on_source_selection_changed(std::slice::from_ref(&two), &[]));
    let before = sync.checked_items().ids();

    assert!(!sync.on_source_selection_changed(std::slice::from_ref(&two), &[]));
    assert_eq!(sync.checked_items().ids(), before);
    assert!(two.is_checked());
}

#[test]
fn test_removal_via_display_two_hops() {
    let source = numbered(&[1, 3, 5]);
    let mut sync = SelectionSynchronizer::new();
    for id in [1, 3, 5] {
        click(&mut sync, item(&source, id));
    }
    assert_eq!(sync.popup().selected_ids(), vec![1, 3, 5]);

    let three = item(&source, 3);
    let hop = sync.on_display_selection_changed(std::slice::from_ref(&three));
    let removed: Vec<ItemId> = hop.removed.iter().map(|item| item.id()).collect();
    assert_eq!(removed, vec![3]);
    assert!(hop.added.is_empty());

    sync.on_source_selection_changed(&hop.added, &hop.removed);

    assert_eq!(sync.checked_items().ids(), vec![1, 5]);
    assert_eq!(sync.popup().selected_ids(), vec![1, 5]);
    assert!(!three.is_checked());
    assert!(sync.is_consistent(&source));
}

#[test]
fn test_second_hop_is_not_repeated() {
    let source = numbered(&[1, 3]);
    let mut sync = SelectionSynchronizer::new();
    click(&mut sync, item(&source, 3));

    let three = item(&source, 3);
    let first = sync.on_display_selection_changed(std::slice::from_ref(&three));
    sync.on_source_selection_changed(&first.added, &first.removed);

    let second = sync.on_display_selection_changed(std::slice::from_ref(&three));
    assert!(second.is_empty());
}

#[test]
fn test_initialize_from_persisted_flags() {
    let source = people();
    let mut sync = SelectionSynchronizer::new();

    assert!(sync.initialize(Some(&source)));

    assert_eq!(sync.checked_items().ids(), vec![4]);
    assert_eq!(sync.popup().selected_ids(), vec![4]);
    assert!(sync.is_consistent(&source));
}

#[test]
fn test_initialize_restores_sorted_order() {
    let source = ItemsSource::new(vec![
        SelectableItem::shared(9, "nine", true),
        SelectableItem::shared(2, "two", true),
        SelectableItem::shared(5, "five", false),
        SelectableItem::shared(-1, "minus one", true),
    ])
    .expect("unique ids");
    let mut sync = SelectionSynchronizer::new();

    sync.initialize(Some(&source));
    assert_eq!(sync.checked_items().ids(), vec![-1, 2, 9]);
}

#[test]
fn test_empty_change_is_silent() {
    let source = people();
    let mut sync = SelectionSynchronizer::new();
    sync.initialize(Some(&source));

    let emissions = Arc::new(AtomicUsize::new(0));
    let rows = Arc::new(AtomicUsize::new(0));

    let emissions_clone = emissions.clone();
    sync.checked_items_changed.connect(move |_| {
        emissions_clone.fetch_add(1, Ordering::SeqCst);
    });
    let rows_clone = rows.clone();
    sync.checked_items().signals().rows_inserted.connect(move |_| {
        rows_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert!(!sync.on_source_selection_changed(&[], &[]));
    assert_eq!(emissions.load(Ordering::SeqCst), 0);
    assert_eq!(rows.load(Ordering::SeqCst), 0);
    assert_eq!(sync.checked_items().ids(), vec![4]);
}

#[test]
fn test_flag_tracks_membership_through_clicks() {
    let source = people();
    let mut sync = SelectionSynchronizer::new();
    sync.initialize(Some(&source));

    for id in [2, 0, 4, 2, 3, 1, 0] {
        click(&mut sync, item(&source, id));
        assert!(sync.is_consistent(&source), "inconsistent after toggling {id}");
    }
    assert_eq!(sync.checked_items().ids(), vec![1, 3]);
}

#[test]
fn test_checked_changed_emitted_on_flip_only() {
    let source = numbered(&[7]);
    let seven = item(&source, 7);
    let flips = Arc::new(AtomicUsize::new(0));

    let flips_clone = flips.clone();
    seven.checked_changed.connect(move |_| {
        flips_clone.fetch_add(1, Ordering::SeqCst);
    });

    let mut sync = SelectionSynchronizer::new();
    sync.on_source_selection_changed(std::slice::from_ref(&seven), &[]);
    sync.on_source_selection_changed(std::slice::from_ref(&seven), &[]);
    sync.on_source_selection_changed(&[], std::slice::from_ref(&seven));

    assert_eq!(flips.load(Ordering::SeqCst), 2);
}

//! Integration tests for header clicks, glyph rendering and attach/detach.

use std::sync::Arc;

use parking_lot::Mutex;
use tablesort::header::{DefaultHeaderRenderer, HeaderRenderer, SortIcon, SortableHeaderRenderer};
use tablesort::prelude::*;

fn inventory() -> Arc<SimpleTableModel> {
    Arc::new(SimpleTableModel::from_data(
        vec![
            Column::new("item", ColumnType::Text),
            Column::new("count", ColumnType::Integer),
            Column::new("note", ColumnType::Any),
        ],
        vec![
            vec!["bolt".into(), 40.into(), "".into()],
            vec!["nut".into(), 15.into(), CellValue::Null],
            vec!["axle".into(), 15.into(), "spare".into()],
        ],
    ))
}

fn attached() -> (Arc<TableSorter<SimpleTableModel>>, Arc<HeaderView>) {
    let header = Arc::new(HeaderView::new(3));
    let sorter = TableSorterBuilder::new()
        .source(inventory())
        .header(header.clone())
        .build();
    (sorter, header)
}

#[test]
fn test_text_column_cycle() {
    let (sorter, header) = attached();

    header.click_section(0, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(0), SortDirection::Ascending);
    assert_eq!(sorter.view_order(), vec![2, 0, 1]);

    header.click_section(0, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(0), SortDirection::Descending);
    assert_eq!(sorter.view_order(), vec![1, 0, 2]);

    header.click_section(0, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(0), SortDirection::NotSorted);
    assert!(!sorter.is_sorting());
    assert_eq!(sorter.view_order(), vec![0, 1, 2]);
}

#[test]
fn test_numeric_column_starts_descending() {
    let (sorter, header) = attached();

    header.click_section(1, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(1), SortDirection::Descending);
    header.click_section(1, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(1), SortDirection::Ascending);
    header.click_section(1, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(1), SortDirection::NotSorted);
}

#[test]
fn test_reverse_click_cycles_backwards() {
    let (sorter, header) = attached();

    header.click_section(0, ClickModifiers::REVERSE);
    assert_eq!(sorter.sorting_status(0), SortDirection::Descending);
    header.click_section(0, ClickModifiers::REVERSE);
    assert_eq!(sorter.sorting_status(0), SortDirection::Ascending);
    header.click_section(0, ClickModifiers::REVERSE);
    assert_eq!(sorter.sorting_status(0), SortDirection::NotSorted);
}

#[test]
fn test_compound_clicks() {
    let (sorter, header) = attached();

    header.click_section(1, ClickModifiers::NONE);
    header.click_section(0, ClickModifiers::COMPOUND);
    assert_eq!(
        sorter.sorting_columns(),
        vec![
            Directive::new(1, SortDirection::Descending),
            Directive::new(0, SortDirection::Ascending),
        ]
    );
    // count desc, then item asc among the two 15s.
    assert_eq!(sorter.view_order(), vec![0, 2, 1]);

    // A plain click on the secondary key starts a fresh single-column sort.
    header.click_section(0, ClickModifiers::NONE);
    assert_eq!(
        sorter.sorting_columns(),
        vec![Directive::new(0, SortDirection::Ascending)]
    );
}

#[test]
fn test_plain_click_on_primary_key_drops_others() {
    let (sorter, header) = attached();

    header.click_section(1, ClickModifiers::NONE);
    header.click_section(0, ClickModifiers::COMPOUND);
    header.click_section(1, ClickModifiers::NONE);

    assert_eq!(
        sorter.sorting_columns(),
        vec![Directive::new(1, SortDirection::Ascending)]
    );
}

#[test]
fn test_click_uses_logical_column() {
    let (sorter, header) = attached();
    header.move_section(2, 0);

    // Visual 1 now shows model column 0.
    header.click_section(1, ClickModifiers::NONE);
    assert_eq!(sorter.sorting_status(0), SortDirection::Ascending);
}

#[test]
fn test_click_outside_columns_is_ignored() {
    let (sorter, header) = attached();
    let events = Arc::new(Mutex::new(0));
    let events_slot = events.clone();
    sorter
        .signals()
        .table_changed
        .connect(move |_| *events_slot.lock() += 1);

    header.click_section(7, ClickModifiers::NONE);
    sorter.header_clicked(&HeaderClick::new(Some(3)));

    assert!(!sorter.is_sorting());
    assert_eq!(*events.lock(), 0);
}

#[test]
fn test_click_emits_one_layout_change_and_repaints() {
    let (sorter, header) = attached();
    header.click_section(1, ClickModifiers::NONE);
    header.click_section(0, ClickModifiers::COMPOUND);

    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_slot = changes.clone();
    sorter
        .signals()
        .table_changed
        .connect(move |change| changes_slot.lock().push(*change));
    let repaints = Arc::new(Mutex::new(0));
    let repaints_slot = repaints.clone();
    header
        .repaint_requested
        .connect(move |_| *repaints_slot.lock() += 1);

    header.click_section(2, ClickModifiers::NONE);

    assert_eq!(*changes.lock(), vec![TableChange::LayoutChanged]);
    assert_eq!(*repaints.lock(), 1);
}

#[test]
fn test_header_cells_show_priority_glyphs() {
    let (sorter, header) = attached();
    header.click_section(1, ClickModifiers::NONE);
    header.click_section(0, ClickModifiers::COMPOUND);

    let cells = header.render_sections(sorter.as_ref());
    assert_eq!(
        cells.iter().map(|cell| cell.text.as_str()).collect::<Vec<_>>(),
        vec!["item", "count", "note"]
    );
    assert_eq!(cells[0].icon, Some(SortIcon::new(true, 12, 1)));
    assert_eq!(cells[1].icon, Some(SortIcon::new(false, 12, 0)));
    assert_eq!(cells[2].icon, None);
    assert!(cells.iter().all(|cell| cell.text_before_icon));
}

#[test]
fn test_detach_restores_renderer() {
    let header = Arc::new(HeaderView::new(3));
    header.set_default_renderer(Arc::new(DefaultHeaderRenderer { font_size: 9 }));

    let sorter = TableSorter::new(inventory());
    sorter.set_header(Some(header.clone() as Arc<dyn SortHeader>));
    assert!(header
        .default_renderer()
        .as_any()
        .is::<SortableHeaderRenderer>());
    assert_eq!(header.section_clicked.connection_count(), 1);

    sorter.set_header(None);
    assert!(sorter.header().is_none());
    assert_eq!(header.section_clicked.connection_count(), 0);
    let renderer = header.default_renderer();
    assert_eq!(
        renderer.as_any().downcast_ref::<DefaultHeaderRenderer>(),
        Some(&DefaultHeaderRenderer { font_size: 9 })
    );

    // Clicks no longer reach the sorter.
    header.click_section(0, ClickModifiers::NONE);
    assert!(!sorter.is_sorting());
}

#[test]
fn test_dropping_sorter_detaches_header() {
    let (sorter, header) = attached();
    drop(sorter);

    assert_eq!(header.section_clicked.connection_count(), 0);
    assert!(header
        .default_renderer()
        .as_any()
        .is::<DefaultHeaderRenderer>());
}

#[test]
fn test_custom_indicator_style() {
    let header = Arc::new(HeaderView::new(3));
    let style = tablesort::header::IndicatorStyle {
        shrink_factor: 0.5,
        baseline_ratio: (1, 2),
    };
    let sorter = TableSorterBuilder::new()
        .source(inventory())
        .header(header.clone())
        .indicator_style(style)
        .sort(1, SortDirection::Descending)
        .sort(0, SortDirection::Descending)
        .build();

    let cell = header.render_section(0, "item").expect("section 0");
    let icon = cell.icon.expect("sorting column");
    // 6 * 0.5 = 3; baseline 12 / 2 = 6.
    assert_eq!(icon.triangle(0, 0), [(0, 6), (1, 3), (-1, 3)]);
    assert!(sorter.is_sorting());
}

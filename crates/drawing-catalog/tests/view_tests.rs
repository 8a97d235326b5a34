//! Catalog view integration tests

mod common;

use common::fixtures::{load_catalog, load_fabrication, record};
use drawing_catalog::{
    build_view, entry_count, CatalogConfig, CatalogSources, Category, PanelFilters, ViewItem,
};
use rstest::rstest;

fn headers(items: &[ViewItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            ViewItem::GroupHeader { block, .. } => Some(block.clone()),
            ViewItem::Entry(_) => None,
        })
        .collect()
}

// === Fixture datasets ===

#[test]
fn test_assembly_pdf_view_from_fixtures() {
    let drawings = load_catalog();
    let fabrication = load_fabrication();
    let sources = CatalogSources::new(&drawings, &fabrication);
    let config = CatalogConfig::default();

    let items = build_view(
        Category::AssemblyPdf,
        &sources,
        &PanelFilters::default(),
        &config,
    );

    // five rows, one duplicate filename
    assert_eq!(entry_count(&items), 4);
    assert_eq!(headers(&items), vec!["A1", "B1", "Z9"]);

    let b1 = items
        .iter()
        .filter_map(ViewItem::as_entry)
        .find(|e| e.module_no == "SA01")
        .unwrap();
    assert_eq!(b1.title, "B1-SA01-002_R2");
    assert_eq!(b1.sheet, "002");
    assert_eq!(
        b1.location.as_deref(),
        Some("D:/balwin2/1. 조립도/REV.2/PDF/BA21-OS-TOPS-ST-706406-002-EN_02.pdf")
    );
    assert_eq!(b1.source_index, 0);
}

#[test]
fn test_assembly_cad_view_uses_block_folders() {
    let drawings = load_catalog();
    let sources = CatalogSources::new(&drawings, &[]);
    let items = build_view(
        Category::AssemblyCad,
        &sources,
        &PanelFilters::new("a1", "", ""),
        &CatalogConfig::default(),
    );

    assert_eq!(entry_count(&items), 1);
    let entry = items[1].as_entry().unwrap();
    assert_eq!(
        entry.location.as_deref(),
        Some("D:/balwin2/1. 조립도/REV.2/CAD/A1-28ea/AA10-OS-DECK-ST-100200-001-EN_02.dwg")
    );
    assert_eq!(entry.icon, "file-cad");
}

#[test]
fn test_fabrication_view_excludes_rows_without_nesting_token() {
    let fabrication = load_fabrication();
    let sources = CatalogSources::new(&[], &fabrication);
    let items = build_view(
        Category::FabricationPdf,
        &sources,
        &PanelFilters::default(),
        &CatalogConfig::default(),
    );

    let locations: Vec<&str> = items
        .iter()
        .filter_map(ViewItem::as_entry)
        .filter_map(|e| e.location.as_deref())
        .collect();
    assert_eq!(
        locations,
        vec![
            "D:/balwin2/2. 가공도/최종/N2002.pdf",
            "D:/balwin2/2. 가공도/최종/N1001.pdf",
        ]
    );
    assert_eq!(
        items,
        vec![
            ViewItem::GroupHeader {
                block: "A1".to_string(),
                count: 1
            },
            items[1].clone(),
            ViewItem::GroupHeader {
                block: "B1".to_string(),
                count: 1
            },
            items[3].clone(),
        ]
    );
}

// === Properties ===

#[test]
fn test_view_is_idempotent() {
    let drawings = load_catalog();
    let fabrication = load_fabrication();
    let sources = CatalogSources::new(&drawings, &fabrication);
    let config = CatalogConfig::default();
    let filters = PanelFilters::new("", "sa", "");

    for category in Category::ALL {
        let first = build_view(category, &sources, &filters, &config);
        let second = build_view(category, &sources, &filters, &config);
        assert_eq!(first, second);
    }
}

#[rstest]
#[case(Category::AssemblyPdf)]
#[case(Category::AssemblyCad)]
fn test_assembly_views_deduplicate_filenames(#[case] category: Category) {
    let drawings = vec![
        record("B1", "M1", "F-001-EN"),
        record("B1", "M2", "F-001-EN"),
        record("B1", "M3", "F-002-EN"),
    ];
    let sources = CatalogSources::new(&drawings, &[]);
    let items = build_view(
        category,
        &sources,
        &PanelFilters::default(),
        &CatalogConfig::default(),
    );

    let modules: Vec<&str> = items
        .iter()
        .filter_map(ViewItem::as_entry)
        .map(|e| e.module_no.as_str())
        .collect();
    assert_eq!(modules, vec!["M1", "M3"]);
}

#[test]
fn test_group_headers_ascend_without_duplicates() {
    let drawings = vec![
        record("C3", "M1", "F-001-EN"),
        record("a1", "M1", "F-002-EN"),
        record("B2", "M1", "F-003-EN"),
        record("C3", "M2", "F-004-EN"),
        record("A1", "M2", "F-005-EN"),
    ];
    let sources = CatalogSources::new(&drawings, &[]);
    let items = build_view(
        Category::AssemblyPdf,
        &sources,
        &PanelFilters::default(),
        &CatalogConfig::default(),
    );

    assert_eq!(headers(&items), vec!["a1", "A1", "B2", "C3"]);
    match &items[items.len() - 3] {
        ViewItem::GroupHeader { block, count } => {
            assert_eq!(block, "C3");
            assert_eq!(*count, 2);
        }
        other => panic!("expected header, got {:?}", other),
    }
}

#[rstest]
#[case(PanelFilters::default())]
#[case(PanelFilters::new("nope", "", ""))]
fn test_empty_results_are_empty_lists(#[case] filters: PanelFilters) {
    let drawings = if filters.is_empty() {
        Vec::new()
    } else {
        load_catalog()
    };
    let sources = CatalogSources::new(&drawings, &[]);
    for category in Category::ALL {
        assert!(build_view(category, &sources, &filters, &CatalogConfig::default()).is_empty());
    }
}

#[rstest]
#[case("b1", "", "", 2)]
#[case("", "sa0", "", 3)]
#[case("", "", "-003-", 1)]
#[case("B1", "SA01", "706406", 1)]
fn test_panel_filters_combine(
    #[case] block: &str,
    #[case] module: &str,
    #[case] search: &str,
    #[case] expected: usize,
) {
    let drawings = load_catalog();
    let sources = CatalogSources::new(&drawings, &[]);
    let items = build_view(
        Category::AssemblyPdf,
        &sources,
        &PanelFilters::new(block, module, search),
        &CatalogConfig::default(),
    );
    assert_eq!(entry_count(&items), expected);
}

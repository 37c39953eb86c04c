//! Exports over journaled sales recorded through real checkouts.

use std::sync::Arc;

use testresult::TestResult;

use kasir::{
    cart::Cart,
    catalog::{Catalog, NewProduct},
    checkout::checkout,
    fixtures::FixedClock,
    journal::SalesJournal,
    reporting::SalesReport,
    store::{MemoryStore, Store},
};

#[test]
fn delimited_export_matches_the_recorded_orders() -> TestResult {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
    let mut catalog = Catalog::open(store.clone())?;
    let mut cart = Cart::open(store.clone())?;
    let mut journal = SalesJournal::open(store)?;
    let clock = FixedClock("2026-08-06T03:00:00Z".parse().expect("valid timestamp"));

    let kopi = catalog
        .add(NewProduct {
            name: "Kopi".to_string(),
            price: 15_000,
            stock: 10,
            image: None,
        })?
        .id;
    let teh = catalog
        .add(NewProduct {
            name: "Teh".to_string(),
            price: 8_000,
            stock: 10,
            image: None,
        })?
        .id;

    cart.add_item(&catalog, kopi)?;
    cart.add_item(&catalog, kopi)?;
    let first = checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

    cart.add_item(&catalog, teh)?;
    let second = checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

    let report = SalesReport::new(journal.orders());
    let export = report.export_delimited();
    let lines: Vec<_> = export.lines().collect();

    assert_eq!(lines.len(), 3, "header plus one row per order");
    assert_eq!(lines.first().copied(), Some("Tanggal,ID Pesanan,Items,Jumlah,Total"));

    assert!(
        lines
            .get(1)
            .is_some_and(|row| row.contains(&first.id.to_string())
                && row.ends_with(&format!(",{}", first.total))),
        "first row must carry the first order verbatim, got {:?}",
        lines.get(1)
    );
    assert!(
        lines
            .get(2)
            .is_some_and(|row| row.contains(&second.id.to_string())
                && row.ends_with(&format!(",{}", second.total))),
        "second row must carry the second order verbatim, got {:?}",
        lines.get(2)
    );

    Ok(())
}

#[test]
fn printable_report_reflects_journal_aggregates() -> TestResult {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::default());
    let mut catalog = Catalog::open(store.clone())?;
    let mut cart = Cart::open(store.clone())?;
    let mut journal = SalesJournal::open(store)?;
    let clock = FixedClock("2026-08-06T03:00:00Z".parse().expect("valid timestamp"));

    let kue = catalog
        .add(NewProduct {
            name: "Kue".to_string(),
            price: 18_000,
            stock: 6,
            image: None,
        })?
        .id;

    cart.add_item(&catalog, kue)?;
    cart.add_item(&catalog, kue)?;
    checkout(&mut cart, &mut catalog, &mut journal, &clock)?;

    let report = SalesReport::new(journal.orders());
    let doc = report.export_printable(&clock);

    assert!(doc.contains("Total Pendapatan: Rp 36.000"));
    assert!(doc.contains("Total Pesanan: 1"));
    assert!(doc.contains("Item Terjual: 2"));
    assert!(doc.contains("2x Kue"));

    Ok(())
}

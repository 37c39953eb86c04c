//! Sales Reporting
//!
//! Read-only aggregation over the journal. Nothing here mutates state; the
//! exports are plain strings for the outer shell to download or print.

use jiff::{
    Timestamp,
    tz::{TimeZone, offset},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{clock::Clock, journal::Order, money::format_idr};

/// Column headers of the delimited export.
const EXPORT_HEADER: &str = "Tanggal,ID Pesanan,Items,Jumlah,Total";

/// All dates are presented in Waktu Indonesia Barat (UTC+7), the fixed
/// locale of the shell.
fn format_date(date: Timestamp) -> String {
    date.to_zoned(TimeZone::fixed(offset(7)))
        .strftime("%d/%m/%Y %H.%M.%S")
        .to_string()
}

/// Read-only view over a slice of recorded orders.
#[derive(Debug, Clone, Copy)]
pub struct SalesReport<'a> {
    orders: &'a [Order],
}

impl<'a> SalesReport<'a> {
    /// Builds a report over the given orders (typically
    /// [`crate::journal::SalesJournal::orders`]).
    #[must_use]
    pub fn new(orders: &'a [Order]) -> Self {
        Self { orders }
    }

    /// Σ of every order's total.
    #[must_use]
    pub fn total_revenue(&self) -> u64 {
        self.orders.iter().map(|order| order.total).sum()
    }

    /// Σ of every line quantity across every order.
    #[must_use]
    pub fn total_items_sold(&self) -> u64 {
        self.orders.iter().map(Order::units_sold).sum()
    }

    /// Number of recorded orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Delimited export: the fixed header plus one row per order.
    ///
    /// Dates, order ids and the item list are quoted (the item list
    /// contains free-form product names); the quantity and total columns
    /// carry the raw integers.
    #[must_use]
    pub fn export_delimited(&self) -> String {
        let mut out = String::from(EXPORT_HEADER);
        out.push('\n');

        for order in self.orders {
            let items = order
                .items
                .iter()
                .map(|line| format!("{} ({})", line.snapshot.name, line.quantity))
                .collect::<Vec<_>>()
                .join("; ");

            out.push_str(&format!(
                "\"{}\",\"{}\",\"{}\",{},{}\n",
                format_date(order.date),
                order.id,
                items,
                order.units_sold(),
                order.total,
            ));
        }

        out
    }

    /// Printable report: summary statistics followed by a table of orders.
    ///
    /// The clock stamps the "generated at" line; revenue and per-order
    /// totals are formatted for display, everything else stays plain text.
    #[must_use]
    pub fn export_printable(&self, clock: &dyn Clock) -> String {
        let mut doc = String::new();

        doc.push_str("Laporan Penjualan\n");
        doc.push_str(&format!("Dibuat pada: {}\n\n", format_date(clock.now())));

        doc.push_str(&format!(
            "Total Pendapatan: {}\n",
            format_idr(self.total_revenue())
        ));
        doc.push_str(&format!("Total Pesanan: {}\n", self.order_count()));
        doc.push_str(&format!("Item Terjual: {}\n\n", self.total_items_sold()));

        doc.push_str(&self.orders_table());
        doc.push('\n');

        doc
    }

    fn orders_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Tanggal", "ID Pesanan", "Items", "Total"]);

        for order in self.orders {
            let items = order
                .items
                .iter()
                .map(|line| format!("{}x {}", line.quantity, line.snapshot.name))
                .collect::<Vec<_>>()
                .join(", ");

            builder.push_record([
                format_date(order.date),
                format!("#{}", order.id),
                items,
                format_idr(order.total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..4), Alignment::right());

        table.to_string()
    }
}

use std::fmt::{Debug, Display, Formatter};

use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};

use crate::{
    api::engine::ImpactMethod,
    core::{
        accumulator::ResultTable,
        allocation::{Allocations, Granularity},
    },
};

/// A share rendered as a percentage with one decimal.
struct FormattedPercentage(f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// The four-granularity grid/PV split, with the operative row highlighted.
pub fn build_allocation_table(allocations: &Allocations, operative: Granularity) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Allocation cap", "Grid", "PV"]);
    for granularity in
        [Granularity::Annual, Granularity::Monthly, Granularity::Daily, Granularity::Hourly]
    {
        let split = allocations.select(granularity);
        let mut label = Cell::new(granularity.label());
        if granularity == operative {
            label = label.add_attribute(Attribute::Bold).fg(Color::Green);
        } else {
            label = label.add_attribute(Attribute::Dim);
        }
        table.add_row(vec![
            label,
            Cell::new(FormattedPercentage(split.grid())).set_alignment(CellAlignment::Right),
            Cell::new(FormattedPercentage(split.renewable()))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Yellow),
        ]);
    }
    table
}

/// The scenario comparison table, transposed: one row per impact category, one
/// column per appended result.
pub fn build_comparison_table(results: &ResultTable, methods: &[ImpactMethod]) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Impact category").add_attribute(Attribute::Bold)];
    header.extend(results.rows().iter().map(|row| Cell::new(&row.name)));
    table.set_header(header);
    for (index, method) in methods.iter().enumerate() {
        let mut cells = vec![Cell::new(method.label)];
        cells.extend(results.rows().iter().map(|row| {
            row.impacts.get(index).map_or_else(
                || Cell::new("-").add_attribute(Attribute::Dim),
                |impact| Cell::new(format!("{impact:.3e}")).set_alignment(CellAlignment::Right),
            )
        }));
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::engine::EF_METHODS, core::allocation::ElectricitySplit};

    #[test]
    fn percentage_renders_one_decimal() {
        assert_eq!(FormattedPercentage(0.3456).to_string(), "34.6%");
        assert_eq!(FormattedPercentage(1.0).to_string(), "100.0%");
    }

    #[test]
    fn allocation_table_has_four_rows() {
        let allocations = Allocations {
            hourly: ElectricitySplit::from_grid_share(0.8),
            daily: ElectricitySplit::from_grid_share(0.6),
            monthly: ElectricitySplit::from_grid_share(0.5),
            annual: ElectricitySplit::from_grid_share(0.4),
        };
        let table = build_allocation_table(&allocations, Granularity::Daily);
        assert_eq!(table.row_iter().count(), 4);
    }

    #[test]
    fn comparison_table_has_one_row_per_method() {
        let mut results = ResultTable::new();
        results.push(vec![1.0; EF_METHODS.len()]);
        results.push(vec![2.0; EF_METHODS.len()]);
        let table = build_comparison_table(&results, &EF_METHODS);
        assert_eq!(table.row_iter().count(), EF_METHODS.len());
    }
}

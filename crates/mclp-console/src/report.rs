//! Colored report rendering.

use std::io::{self, Write};

use mclp_core::Report;
use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;

/// Renders `report` with covered points in green and uncovered ones in red.
///
/// Carries the same facts as the plain `Display` output of [`Report`].
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Optimal objective function value is {}\n",
        super::format_objective(report.objective_value)
            .bright_magenta()
            .bold()
    ));
    out.push_str(&format!(
        "Covered demand points: {} of {}\n",
        report.covered_count().to_string().bright_green(),
        report.demand.len()
    ));

    out.push_str(&format!("{}\n", "The following facilities are open:".bold()));
    if report.open_facilities.is_empty() {
        out.push_str(&format!("  {}\n", "(none)".bright_black()));
    }
    for facility in &report.open_facilities {
        out.push_str(&format!(
            "  {} {}\n",
            format!("[{}]", facility.index).bright_black(),
            facility.name.bright_cyan()
        ));
    }

    out.push_str(&format!("{}\n", "Customers are covered as follows:".bold()));
    let width = report.demand.iter().map(|d| d.name.len()).max().unwrap_or(0);
    for point in &report.demand {
        let by = if point.is_coverable() {
            point
                .covering_facilities
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            "-".to_string()
        };
        let name = format!("{:<width$}", point.name);
        if point.covered {
            out.push_str(&format!(
                "  {} {} -> {}\n",
                "covered  ".bright_green().bold(),
                name.green(),
                by
            ));
        } else {
            out.push_str(&format!(
                "  {} {} -> {}\n",
                "uncovered".bright_red().bold(),
                name.red(),
                by
            ));
        }
    }

    if let Some(cost) = report.open_fixed_cost {
        out.push_str(&format!(
            "Fixed cost of open facilities: {}\n",
            super::format_objective(cost).bright_yellow()
        ));
    }
    if let Some(population) = report.covered_population_2022() {
        out.push_str(&format!("Covered population (2022): {}\n", whole(population)));
    }
    if let Some(population) = report.covered_population_2030() {
        out.push_str(&format!("Covered population (2030): {}\n", whole(population)));
    }

    out
}

/// Writes [`render_report`] to stdout.
pub fn print_report(report: &Report) {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "{}", render_report(report));
    let _ = stdout.flush();
}

fn whole(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

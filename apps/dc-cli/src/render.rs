//! Plain-text tables for terminal output.

use dc_app::EquipmentSummary;
use dc_demand::{CalculationReport, DemandSummary};
use std::fmt::Write as _;

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(4)
}

pub fn equipment_list(list: &[EquipmentSummary]) -> String {
    let w = name_width(list.iter().map(|e| e.name.as_str()));
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<w$}  {:>4}  {:>9}  {:>10}  {:>5}  {}",
        "Name", "n", "P_H [kW]", "nP_H [kW]", "K_V", "group"
    );
    for e in list {
        let _ = writeln!(
            out,
            "  {:<w$}  {:>4}  {:>9.2}  {:>10.2}  {:>5.2}  {}",
            e.name,
            e.quantity,
            e.rated_power_kw,
            e.total_power_kw,
            e.utilization,
            if e.include_in_group { "yes" } else { "no" }
        );
    }
    out
}

/// Per-equipment table with the group sums as a footer.
pub fn results_table(report: &CalculationReport) -> String {
    let w = name_width(report.results.iter().map(|r| r.name.as_str()));
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w$}  {:>10}  {:>11}  {:>14}  {:>12}  {:>9}",
        "Name", "nP_H [kW]", "K_V·nP_H", "K_V·nP_H·tgφ", "nP_H² [kW²]", "I [A]"
    );
    for r in &report.results {
        let marker = if r.included { "" } else { " *" };
        let _ = writeln!(
            out,
            "{:<w$}  {:>10.2}  {:>11.3}  {:>14.3}  {:>12.1}  {:>9.2}{}",
            r.name,
            r.total_power_kw,
            r.weighted_power_kw,
            r.weighted_reactive_kvar,
            r.squared_power_kw2,
            r.current_a,
            marker
        );
    }
    let sums = &report.group_sums;
    let _ = writeln!(
        out,
        "{:<w$}  {:>10.2}  {:>11.3}  {:>14.3}  {:>12.1}",
        "Σ group",
        sums.total_power_kw,
        sums.weighted_power_kw,
        sums.weighted_reactive_kvar,
        sums.squared_power_kw2
    );
    if report.results.iter().any(|r| !r.included) {
        let _ = writeln!(out, "* not included in the group sums");
    }
    out
}

pub fn summary_block(title: &str, s: &DemandSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title} demand:");
    let _ = writeln!(out, "  K_V  = {:.4}", s.utilization);
    let _ = writeln!(out, "  n_e  = {:.3}", s.effective_count);
    let _ = writeln!(
        out,
        "  k_R  = {:.4} (n_e = {}, K_V = {:.1})",
        s.demand_factor, s.rounded_effective_count, s.rounded_utilization
    );
    if s.applied_factor != s.demand_factor {
        let _ = writeln!(out, "  k_R applied = {:.2}", s.applied_factor);
    }
    let _ = writeln!(out, "  P_p  = {:.3} kW", s.active_power_kw);
    let _ = writeln!(out, "  Q_p  = {:.3} kvar", s.reactive_power_kvar);
    let _ = writeln!(out, "  S_p  = {:.3} kVA", s.apparent_power_kva);
    let _ = writeln!(out, "  I_p  = {:.2} A", s.current_a);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_demand::{GroupAggregate, compute_workshop};

    #[test]
    fn summary_shows_applied_factor_only_when_rounded() {
        let s = compute_workshop(
            &GroupAggregate::workshop_totals(),
            &dc_tables::workshop_table(),
        )
        .unwrap();
        let text = summary_block("Workshop", &s);
        assert!(text.starts_with("Workshop demand:"));
        assert!(text.contains("P_p  = 526.400 kW"));
        assert_eq!(text.contains("applied"), s.applied_factor != s.demand_factor);
    }
}

//! Plain-text rendering of command output.

use std::io::{self, Write};

use roster_security::Identity;
use student_records_sdk::{CellValue, Response, ResultStatus};

const NULL_CELL: CellValue = CellValue::Null;

/// Write `response` as an aligned table with a short header and footer.
///
/// # Errors
/// Propagates write failures.
pub fn response(out: &mut impl Write, response: &Response) -> io::Result<()> {
    writeln!(
        out,
        "intent: {}  status: {}",
        response.intent,
        response.status.as_str()
    )?;
    if !response.interpreted.is_empty() {
        writeln!(out, "interpreted: {}", response.interpreted)?;
    }
    writeln!(out, "filters: {}", filters(response))?;

    match response.status {
        ResultStatus::Unrecognized => {
            writeln!(out, "Query not understood. Try one of the follow-ups below.")?;
        }
        ResultStatus::EmptyScope => {
            writeln!(out, "The query asks for records outside your access scope.")?;
        }
        ResultStatus::NoMatches => writeln!(out, "No matching records.")?,
        ResultStatus::Rows => table(out, response)?,
    }

    let summary = &response.summary;
    writeln!(
        out,
        "{} rows, {} students",
        summary.rows, summary.distinct_students
    )?;
    if let Some(scores) = summary.scores {
        writeln!(
            out,
            "scores: min {} max {} avg {:.1} ({} scored)",
            scores.min, scores.max, scores.average, scores.scored
        )?;
    }
    let export = if response.export_allowed {
        "allowed"
    } else {
        "not permitted"
    };
    writeln!(out, "export: {export}")?;
    let follow_ups: Vec<String> = response.follow_ups.iter().map(ToString::to_string).collect();
    writeln!(out, "follow-ups: {}", follow_ups.join(", "))
}

fn filters(response: &Response) -> String {
    let eff = &response.filters;
    let mut parts: Vec<String> = eff
        .allowed()
        .iter()
        .map(|(dimension, values)| {
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("{dimension} in {{{}}}", values.join(", "))
        })
        .collect();
    parts.extend(eff.value_filters().iter().map(ToString::to_string));
    if let Some(window) = eff.time_window() {
        parts.push(format!("{} in {window}", eff.dataset().date_column()));
    }
    if parts.is_empty() {
        "none".to_owned()
    } else {
        parts.join("; ")
    }
}

fn table(out: &mut impl Write, response: &Response) -> io::Result<()> {
    let cells: Vec<Vec<String>> = response
        .rows
        .iter()
        .map(|row| {
            response
                .columns
                .iter()
                .map(|c| row.get(c).unwrap_or(&NULL_CELL).to_string())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = response
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .fold(header.len(), usize::max)
        })
        .collect();

    padded_line(out, &widths, response.columns.iter().copied())?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    padded_line(out, &widths, rule.iter().map(String::as_str))?;
    for row in &cells {
        padded_line(out, &widths, row.iter().map(String::as_str))?;
    }
    Ok(())
}

fn padded_line<'a>(
    out: &mut impl Write,
    widths: &[usize],
    values: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let padded: Vec<String> = values
        .zip(widths)
        .map(|(v, w)| format!("{v:<w$}"))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

/// One line per identity: id, level, scope and capabilities.
///
/// # Errors
/// Propagates write failures.
pub fn identities(out: &mut impl Write, identities: &[Identity]) -> io::Result<()> {
    for identity in identities {
        let scope: Vec<String> = identity
            .constraints()
            .iter()
            .map(|(dimension, values)| {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!("{dimension}={}", values.join("|"))
            })
            .collect();
        let caps = identity.capabilities();
        writeln!(
            out,
            "{:<16} {:<10} {:<28} sensitive={} export={}  {}",
            identity.id(),
            identity.access_level().as_str(),
            if scope.is_empty() {
                "*".to_owned()
            } else {
                scope.join(" ")
            },
            caps.can_view_sensitive,
            caps.can_export,
            identity.display_name()
        )?;
    }
    Ok(())
}

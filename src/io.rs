use crate::agenda::format_minute;
use crate::model::{
    AvailabilityRule, OwnerId, Polarity, ResolvedInterval, RuleBook, RuleKind,
};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de règles depuis CSV:
/// header `owner,kind,polarity,start_date,end_date,start_time,end_time[,days_of_week]`
pub fn import_rules_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<AvailabilityRule>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let owner = rec.get(0).context("missing owner")?.trim();
        if owner.is_empty() {
            bail!("invalid rule row (empty owner)");
        }
        let kind = parse_kind(rec.get(1).context("missing kind")?.trim())?;
        let polarity = parse_polarity(rec.get(2).context("missing polarity")?.trim())?;
        let start_date = parse_date(rec.get(3).context("missing start_date")?.trim())?;
        let end_date = parse_date(rec.get(4).context("missing end_date")?.trim())?;
        let start_time = parse_time(rec.get(5).context("missing start_time")?.trim())?;
        let end_time = parse_time(rec.get(6).context("missing end_time")?.trim())?;

        let rule = match kind {
            RuleKind::Range => AvailabilityRule::range(
                OwnerId::new(owner),
                polarity,
                start_date,
                end_date,
                start_time,
                end_time,
            ),
            RuleKind::Periodicity => {
                let raw = rec
                    .get(7)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .with_context(|| format!("missing days_of_week for periodicity rule of {owner}"))?;
                let days = parse_days(raw)
                    .with_context(|| format!("invalid days_of_week value for owner {owner}"))?;
                AvailabilityRule::periodicity(
                    OwnerId::new(owner),
                    polarity,
                    start_date,
                    end_date,
                    start_time,
                    end_time,
                    days,
                )
            }
        };
        out.push(rule);
    }
    Ok(out)
}

pub fn parse_kind(s: &str) -> anyhow::Result<RuleKind> {
    match s.to_ascii_lowercase().as_str() {
        "range" | "plage" => Ok(RuleKind::Range),
        "periodicity" | "periodicite" | "périodicité" => Ok(RuleKind::Periodicity),
        _ => bail!("expected kind `range` or `periodicity`, got `{s}`"),
    }
}

pub fn parse_polarity(s: &str) -> anyhow::Result<Polarity> {
    match s.to_ascii_lowercase().as_str() {
        "available" | "dispo" | "disponible" => Ok(Polarity::Available),
        "unavailable" | "indispo" | "indisponible" => Ok(Polarity::Unavailable),
        _ => bail!("expected polarity `available` or `unavailable`, got `{s}`"),
    }
}

/// Date calendaire `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date: {s}"))
}

/// Heure murale `HH:MM`. Seule frontière où les heures sont des chaînes ;
/// le resolver ne voit que des minutes entières.
pub fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").with_context(|| format!("invalid time: {s}"))
}

/// Jours de semaine `0;1;..;6` (0=dimanche), séparés par `;`.
pub fn parse_days(raw: &str) -> anyhow::Result<Vec<u8>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            chunk
                .trim()
                .parse::<u8>()
                .with_context(|| format!("invalid weekday index: {chunk}"))
        })
        .collect()
}

/// Export JSON du carnet (jolie mise en forme)
pub fn export_rules_json<P: AsRef<Path>>(path: P, book: &RuleBook) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(book)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV de fenêtres résolues: header `owner,date,start,end`
pub fn export_windows_csv<P: AsRef<Path>>(
    path: P,
    owner: &OwnerId,
    days: &[(NaiveDate, Vec<ResolvedInterval>)],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["owner", "date", "start", "end"])?;
    for (date, windows) in days {
        for win in windows {
            let date = date.format("%Y-%m-%d").to_string();
            w.write_record([
                owner.as_str(),
                date.as_str(),
                format_minute(win.start_minute).as_str(),
                format_minute(win.end_minute).as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

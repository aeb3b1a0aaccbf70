// DK24 Calendar CLI
// Renders a month summary from a JSON event file and optionally writes
// the downloadable .ics document.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use dk24_calendar::models::event::RawEvent;
use dk24_calendar::services::calendar::CalendarService;
use dk24_calendar::services::icalendar::{ICalendarService, ICS_FILE_NAME};
use dk24_calendar::utils::date::parse_month_token;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: dk24-calendar <events.json> <mon-yyyy> [output.ics]");
    }

    let events_path = PathBuf::from(&args[0]);
    let reference = parse_month_token(&args[1])?;
    let ics_path = args.get(2).map(PathBuf::from);

    log::info!("Loading events from {:?}", events_path);
    let content = fs::read_to_string(&events_path)
        .context(format!("Failed to read events file: {:?}", events_path))?;
    let raw: Vec<RawEvent> =
        serde_json::from_str(&content).context("Failed to parse events JSON")?;

    let service = CalendarService::new();
    let view = service.month_view(&raw, reference);
    if view.skipped > 0 {
        eprintln!("warning: {} event(s) skipped as unparsable", view.skipped);
    }

    for cell in view.layout.grid().cells() {
        let day = view.layout.day(cell.date);
        if day.total() == 0 {
            continue;
        }
        let marker = if cell.current_month { ' ' } else { '~' };
        print!("{marker}{}", cell.date);
        for positioned in &day.visible {
            print!("  [{}] {}", positioned.slot, positioned.event.title);
        }
        if day.overflow > 0 {
            print!("  +{} more", day.overflow);
        }
        println!();
    }

    if let Some(path) = ics_path {
        let exporter = ICalendarService::new();
        let (ics, skipped) = exporter.export_raw(&raw)?;
        if skipped > 0 {
            eprintln!("warning: {skipped} event(s) left out of the export");
        }
        fs::write(&path, ics).context(format!("Failed to write {:?}", path))?;
        log::info!("Wrote {:?} (suggested name: {})", path, ICS_FILE_NAME);
    }

    Ok(())
}

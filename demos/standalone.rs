use std::path::Path;
use tracing::info;

use timesheet_pdf::{
    TimeOfDay, TimeRange, TimesheetConfig, TimesheetDocument, TimesheetService,
};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting timesheet rendering example");

    // Scaffold a whole month, then fill in a few worked days
    let mut document =
        TimesheetDocument::for_month("Jo Doe", 2024, 4).map_err(anyhow::Error::msg)?;

    document.days[0].ranges.push(TimeRange {
        begin: TimeOfDay::new(9, 0),
        end: TimeOfDay::new(12, 0),
        code: "N".to_string(),
    });
    document.days[0].ranges.push(TimeRange {
        begin: TimeOfDay::new(13, 0),
        end: TimeOfDay::new(17, 30),
        code: "N".to_string(),
    });
    document.days[1].ranges.push(TimeRange {
        begin: TimeOfDay::new(8, 0),
        end: TimeOfDay::new(10, 0),
        code: "T".to_string(),
    });
    document.days[1].ranges.push(TimeRange {
        begin: TimeOfDay::new(10, 0),
        end: TimeOfDay::new(16, 0),
        code: "E".to_string(),
    });
    document.days[2].ranges.push(TimeRange {
        begin: TimeOfDay::new(9, 0),
        end: TimeOfDay::new(17, 0),
        code: "TR".to_string(),
    });

    println!("{}", document);

    // Create the timesheet service and write the artifact
    let service = TimesheetService::new(TimesheetConfig::default());
    let path = service.save(&document, Path::new("."))?;

    info!("Wrote {}", path.display());

    Ok(())
}

/*
Example usage of the service:

1. TimesheetService::generate(&document)
   - Validates the document and returns the PDF as bytes

2. TimesheetService::generate_from_json(json)
   - Accepts the JSON wire shape:
     { "name": "...", "month": "...",
       "days": [ { "date": "...", "is_weekend": true,
                   "ranges": [ { "begin": { "hours": 9, "minutes": 0 },
                                 "end": { "hours": 12, "minutes": 0 },
                                 "code": "N" } ] } ] }

3. TimesheetService::save(&document, dir)
   - Writes the single-page artifact as a4.pdf into dir

The service will:
- Reject malformed documents with a descriptive validation error
- Clamp time ranges to the 7:30-19:00 planning window (warning logged)
- Render weekend rows with a light-gray background
*/

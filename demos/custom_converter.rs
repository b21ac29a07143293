use std::net::IpAddr;

use record_file_log::dynamic::DynamicRecord;
use record_file_log::noop_sink::NoopSink;
use record_file_log::{FieldValue, LogEntry, RecordLogger};

/// Shows how to teach the serializer about a type it has no rule for,
/// and what happens before the rule exists.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut logger = RecordLogger::with_sink(NoopSink, false);

    let record = DynamicRecord::new()
        .field("event", "login")
        .field("peer", FieldValue::opaque("10.0.0.8".parse::<IpAddr>()?));

    if let Err(e) = logger.log_record(&record, false) {
        println!("before registering: {e}");
    }

    logger.converters_mut().register::<IpAddr, _>(|ip| ip.to_string());
    let map = logger.convert_to_mapping(&record, false)?;
    print!("{}", logger.render(LogEntry::from(map))?);
    Ok(())
}

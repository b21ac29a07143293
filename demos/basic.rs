use record_file_log::dynamic::DynamicRecord;
use record_file_log::init::init_stdout_tracing;
use record_file_log::model_record;
use record_file_log::{LoggerConfig, RecordLogger};
use rust_decimal::Decimal;
use tracing::Level;
use uuid::Uuid;

struct Line {
    sku: String,
    quantity: u32,
    price: Decimal,
}

struct Order {
    id: Uuid,
    customer: String,
    lines: Vec<Line>,
    coupon: Option<Line>,
}

model_record!(Line { sku, quantity, price });
model_record!(Order { id, customer } relations { lines, coupon });

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_tracing(Level::DEBUG);

    let config = LoggerConfig::new("orders.txt")
        .deleting_existing(true)
        .timestamped(true);
    let logger = RecordLogger::new(config)?;

    logger.log_message("order import started")?;

    let order = Order {
        id: Uuid::new_v4(),
        customer: "Jürgen".to_string(),
        lines: vec![
            Line { sku: "A-1".into(), quantity: 2, price: Decimal::new(1999, 2) },
            Line { sku: "B-7".into(), quantity: 1, price: Decimal::new(500, 2) },
        ],
        coupon: None,
    };
    logger.log_record(&order, true)?;

    let ad_hoc = DynamicRecord::new().field("step", "done").field("orders", 1);
    logger.log_records([&ad_hoc], false)?;

    println!("wrote {}", logger.path().display());
    Ok(())
}

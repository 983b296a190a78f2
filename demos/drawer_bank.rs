//! 抽屜櫃示例：自訂抽屜高度，列出裁切清單

use anyhow::Result;
use cabinetry::*;
use rust_decimal::Decimal;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 抽屜櫃裁切清單 ===\n");

    let config = CabinetConfig::default();

    // 上方淺抽屜固定 5"，下方三個依 1:2:2 分配
    let layout = FaceFrameLayout::NDrawer {
        rows: vec![
            Track::Fixed(Decimal::from(5)),
            Track::Weighted(Decimal::ONE),
            Track::Weighted(Decimal::from(2)),
            Track::Weighted(Decimal::from(2)),
        ],
    };
    let cabinet = LowerCabinet::build(
        &LowerCabinetSpec::new("Drawer Bank", Decimal::from(30), &config).with_layout(layout),
        &config,
    )?;

    println!("{:<60} {:<20} {:>10} {:>10}", "path", "material", "width", "height");
    for record in cut_list(&cabinet) {
        println!(
            "{:<60} {:<20} {:>10} {:>10}",
            record.path,
            record.material.to_string(),
            record.width.round_dp(3),
            record.height.round_dp(3)
        );
    }

    let report = MaterialAggregator::from_config(&config)?.aggregate(&cabinet);
    println!("\n{report}");

    Ok(())
}

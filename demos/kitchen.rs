//! 廚房物料清單示例
//!
//! 一排下櫃（含爐具空位）加一排吊櫃，輸出元件摘要、材料摘要與 JSON 報表

use anyhow::Result;
use cabinetry::*;
use rust_decimal::Decimal;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== 廚房物料清單 ===\n");

    let config = CabinetConfig::default();
    config.validate()?;

    // 下櫃：水槽櫃、爐具空位、抽屜櫃、儲物櫃
    let sink = LowerCabinet::build(
        &LowerCabinetSpec::new("Sink Base", Decimal::from(36), &config).with_layout(
            FaceFrameLayout::OneDrawerTwoDoor {
                drawer_height: Decimal::from(6),
            },
        ),
        &config,
    )?;
    let range = Component::ghost("Range", Decimal::from(30), Position::origin())?;
    let drawers = LowerCabinet::build(
        &LowerCabinetSpec::new("Drawer Base", Decimal::from(18), &config),
        &config,
    )?;
    let pantry = LowerCabinet::build(
        &LowerCabinetSpec::new("Pantry Base", Decimal::from(24), &config)
            .with_layout(FaceFrameLayout::doors(1))
            .with_shelves(ShelfPlan::new(ShelfStyle::Banded, ShelfSpacing::Even(2))),
        &config,
    )?;
    let lowers = assemble_in_row(
        "Lowers",
        vec![sink, range, drawers, pantry],
        Decimal::ZERO,
    )?;

    // 吊櫃：兩個雙門吊櫃，中間留抽油煙機空位
    let left_upper = UpperCabinet::build(
        &UpperCabinetSpec::new("Left Upper", Decimal::from(36), &config)
            .with_shelves(ShelfPlan::new(ShelfStyle::Standard, ShelfSpacing::Even(2))),
        &config,
    )?;
    let hood = Component::ghost("Hood", Decimal::from(30), Position::origin())?;
    let right_upper = UpperCabinet::build(
        &UpperCabinetSpec::new("Right Upper", Decimal::from(42), &config)
            .with_layout(FaceFrameLayout::NDoor {
                cols: Track::evenly(3),
                hinge: HingePreference::Alternate,
            })
            .with_shelves(ShelfPlan::new(ShelfStyle::Standard, ShelfSpacing::Even(2))),
        &config,
    )?;
    let uppers = assemble_in_row(
        "Uppers",
        vec![left_upper, hood, right_upper],
        Decimal::ZERO,
    )?;

    let aggregator = MaterialAggregator::from_config(&config)?;
    let report = aggregator.aggregate_all(&[lowers, uppers]);

    println!("{report}");
    println!("JSON 報表:\n{}", report.to_json()?);

    Ok(())
}

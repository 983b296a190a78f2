//! 層板

use cabinet_core::{CabinetConfig, CabinetError, Component, ComponentKind, Dimension, Position, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grid::SHARE_SCALE;

/// 層板樣式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelfStyle {
    /// 單片板材
    Standard,
    /// 前緣加實木封邊
    Banded,
}

/// 層板間距
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShelfSpacing {
    /// n 片層板，上下間距相等
    Even(usize),
    /// 每片層板底面距櫃內底部的高度
    Manual(Vec<Decimal>),
}

impl ShelfSpacing {
    /// 各層板底面高度
    pub fn offsets(&self, interior_height: Decimal, thickness: Decimal) -> Result<Vec<Decimal>> {
        match self {
            ShelfSpacing::Even(0) => Ok(Vec::new()),
            ShelfSpacing::Even(count) => {
                let n = Decimal::from(*count as u64);
                let gap = ((interior_height - thickness * n) / (n + Decimal::ONE))
                    .round_dp(SHARE_SCALE);
                if gap <= Decimal::ZERO {
                    return Err(CabinetError::InvalidDimension(format!(
                        "櫃內高度 {interior_height} 放不下 {count} 片層板"
                    )));
                }
                Ok((1..=*count)
                    .map(|i| {
                        let i = Decimal::from(i as u64);
                        gap * i + thickness * (i - Decimal::ONE)
                    })
                    .collect())
            }
            ShelfSpacing::Manual(offsets) => {
                let max = interior_height - thickness;
                if let Some(bad) = offsets
                    .iter()
                    .find(|offset| **offset < Decimal::ZERO || **offset > max)
                {
                    return Err(CabinetError::InvalidDimension(format!(
                        "層板高度 {bad} 超出範圍 [0, {max}]"
                    )));
                }
                Ok(offsets.clone())
            }
        }
    }
}

/// 層板建構器
pub struct Shelf;

impl Shelf {
    /// 標準層板：單片板材，寬 × 深
    pub fn standard(
        name: impl Into<String>,
        width: Decimal,
        depth: Decimal,
        position: Position,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let name = name.into();
        let material = config.shelf_material;
        let panel = Component::panel(
            format!("{name} Panel"),
            width,
            depth,
            material,
            Position::origin(),
        )?;

        Component::composite(
            ComponentKind::StandardShelf,
            name,
            Dimension::new(width, material.thickness(), depth),
            position,
            vec![panel],
        )
    }

    /// 封邊層板：板材深度扣除封邊條，前緣加一條實木封邊
    pub fn banded(
        name: impl Into<String>,
        width: Decimal,
        depth: Decimal,
        position: Position,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let name = name.into();
        let band_depth = config.shelf_banding_depth;
        if depth <= band_depth {
            return Err(CabinetError::InvalidDimension(format!(
                "{name}: 層板深度 {depth} 不大於封邊寬度 {band_depth}"
            )));
        }

        let material = config.shelf_material;
        let panel = Component::panel(
            format!("{name} Panel"),
            width,
            depth - band_depth,
            material,
            Position::new(Decimal::ZERO, band_depth, Decimal::ZERO),
        )?;
        let banding = Component::panel(
            format!("{name} Banding"),
            width,
            band_depth,
            config.shelf_banding_material,
            Position::origin(),
        )?;

        Component::composite(
            ComponentKind::BandedShelf,
            name,
            Dimension::new(width, material.thickness(), depth),
            position,
            vec![panel, banding],
        )
    }

    /// 在櫃內空間依間距配置層板；寬深各扣除 `shelf_clearance`
    ///
    /// `origin` 為櫃內空間的左前下角
    pub fn fill_interior(
        prefix: &str,
        style: ShelfStyle,
        spacing: &ShelfSpacing,
        interior: Dimension,
        origin: Position,
        config: &CabinetConfig,
    ) -> Result<Vec<Component>> {
        let width = interior.width - config.shelf_clearance;
        let depth = interior.depth - config.shelf_clearance;
        let thickness = config.shelf_material.thickness();
        let offsets = spacing.offsets(interior.height, thickness)?;

        tracing::debug!("{} 配置 {} 片層板", prefix, offsets.len());

        offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let name = format!("{prefix} Shelf {:02}", i + 1);
                let position = origin
                    + Position::new(config.shelf_clearance / Decimal::from(2), Decimal::ZERO, *offset);
                match style {
                    ShelfStyle::Standard => Self::standard(name, width, depth, position, config),
                    ShelfStyle::Banded => Self::banded(name, width, depth, position, config),
                }
            })
            .collect()
    }
}

//! Blum 抽屜（抽屜箱 + Shaker 抽屜面板）
//!
//! 尺寸依 Blum TANDEM plus BLUMOTION 滑軌安裝說明計算。

use cabinet_core::{
    fraction, CabinetConfig, CabinetError, Component, ComponentKind, Dimension, Position, Result,
};
use rust_decimal::Decimal;

use crate::door::shaker_panel;

/// 滑軌長度對照表：（滑軌長度, 最小櫃內深度分子, 分母）
const BLUM_RUNNERS: [(i64, i64, i64); 5] = [
    (21, 702, 32),
    (18, 605, 32),
    (15, 509, 32),
    (12, 413, 32),
    (9, 335, 32),
];

/// Blum 抽屜建構器
pub struct BlumDrawer;

impl BlumDrawer {
    /// 櫃內深度可容納的最長滑軌
    pub fn runner_length(interior_depth: Decimal) -> Result<Decimal> {
        BLUM_RUNNERS
            .iter()
            .find(|(_, num, den)| interior_depth >= fraction(*num, *den))
            .map(|(length, _, _)| Decimal::from(*length))
            .ok_or_else(|| {
                CabinetError::InvalidOpening(format!(
                    "櫃內深度 {interior_depth} 不足以安裝最短的滑軌"
                ))
            })
    }

    /// 抽屜箱高度 = min(最大箱高, 開口高 − 垂直間隙)
    pub fn box_height(opening_height: Decimal, config: &CabinetConfig) -> Result<Decimal> {
        let available = opening_height - config.drawer_vertical_clearance;
        if available <= Decimal::ZERO {
            return Err(CabinetError::InvalidOpening(format!(
                "開口高度 {opening_height} 不大於垂直間隙 {}",
                config.drawer_vertical_clearance
            )));
        }
        Ok(available.min(config.max_drawer_box_height))
    }

    /// 依開口與櫃內深度建立抽屜
    pub fn build(
        name: impl Into<String>,
        opening_width: Decimal,
        opening_height: Decimal,
        interior_depth: Decimal,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let name = name.into();
        let stock = config.drawer_stock_for(opening_width).ok_or_else(|| {
            CabinetError::InvalidOpening(format!(
                "{name}: 開口寬度 {opening_width} 低於抽屜用料門檻"
            ))
        })?;
        let wall = stock.wall_material;
        let bottom = stock.bottom_material;

        let box_height = Self::box_height(opening_height, config)?;
        let inside_width = opening_width - config.drawer_side_clearance;
        if inside_width <= Decimal::ZERO {
            return Err(CabinetError::InvalidOpening(format!(
                "{name}: 開口寬度 {opening_width} 不足以容納滑軌"
            )));
        }
        let length = Self::runner_length(interior_depth)?;

        let two = Decimal::from(2);
        let t = wall.thickness();
        let dado = config.drawer_bottom_dado_ratio * t;
        let side_length = length - t * two;
        let outside_width = inside_width + t * two;

        tracing::debug!(
            "建立抽屜 {}：開口 {} x {}，箱高 {}，滑軌 {}，箱壁 {}",
            name,
            opening_width,
            opening_height,
            box_height,
            length,
            wall
        );

        let parts = vec![
            Component::panel(
                "Drawer Left Side",
                side_length,
                box_height,
                wall,
                Position::new(Decimal::ZERO, t, Decimal::ZERO),
            )?,
            Component::panel(
                "Drawer Right Side",
                side_length,
                box_height,
                wall,
                Position::new(t + inside_width, t, Decimal::ZERO),
            )?,
            Component::panel(
                "Drawer Bottom",
                inside_width + dado * two,
                side_length + dado * two,
                bottom,
                Position::new(
                    t - dado,
                    t - dado,
                    bottom.thickness() + config.drawer_bottom_recess,
                ),
            )?,
            Component::panel(
                "Drawer Front",
                outside_width,
                box_height,
                wall,
                Position::origin(),
            )?,
            Component::panel(
                "Drawer Back",
                outside_width,
                box_height,
                wall,
                Position::new(Decimal::ZERO, side_length + t, Decimal::ZERO),
            )?,
        ];

        // 抽屜箱在開口內置中，底部離開口一段距離
        let drawer_box = Component::composite(
            ComponentKind::DrawerBox,
            format!("{name} Box"),
            Dimension::new(outside_width, box_height, length),
            Position::new(
                (opening_width - outside_width) / two,
                Decimal::ZERO,
                config.drawer_height_above_opening,
            ),
            parts,
        )?;

        let face = Self::face(format!("{name} Face"), opening_width, opening_height, config)?;

        Component::composite(
            ComponentKind::BlumDrawer,
            name,
            Dimension::new(opening_width, opening_height, length),
            Position::origin(),
            vec![drawer_box, face],
        )
    }

    /// 抽屜面板：開口左右加大覆蓋量、上下加小覆蓋量
    pub fn face(
        name: impl Into<String>,
        opening_width: Decimal,
        opening_height: Decimal,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let side = config.large_overlay();
        let top_bottom = config.small_overlay();
        let two = Decimal::from(2);

        shaker_panel(
            ComponentKind::ShakerDrawerFace,
            name.into(),
            opening_width + side * two,
            opening_height + top_bottom * two,
            Position::new(
                -side,
                -config.shaker_frame_material.thickness(),
                -top_bottom,
            ),
            true,
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::MaterialKind;
    use rstest::rstest;

    #[rstest]
    #[case(fraction(93, 4), 21)]
    #[case(fraction(702, 32), 21)]
    #[case(fraction(701, 32), 18)]
    #[case(Decimal::from(17), 15)]
    #[case(Decimal::from(13), 12)]
    #[case(fraction(335, 32), 9)]
    fn test_runner_length(#[case] depth: Decimal, #[case] expected: i64) {
        assert_eq!(
            BlumDrawer::runner_length(depth).unwrap(),
            Decimal::from(expected)
        );
    }

    #[test]
    fn test_runner_too_shallow() {
        assert!(matches!(
            BlumDrawer::runner_length(Decimal::from(10)),
            Err(CabinetError::InvalidOpening(_))
        ));
    }

    #[rstest]
    #[case(Decimal::from(8), Decimal::from(5))]
    // 8 − 25/32 > 5，取最大值；5 − 25/32 < 5
    #[case(Decimal::from(5), fraction(135, 32))]
    fn test_box_height(#[case] opening: Decimal, #[case] expected: Decimal) {
        let config = CabinetConfig::default();
        assert_eq!(BlumDrawer::box_height(opening, &config).unwrap(), expected);
    }

    #[test]
    fn test_opening_too_short() {
        let config = CabinetConfig::default();
        let result = BlumDrawer::build(
            "Drawer",
            Decimal::from(20),
            fraction(25, 32),
            Decimal::from(23),
            &config,
        );
        assert!(matches!(result, Err(CabinetError::InvalidOpening(_))));
    }

    #[test]
    fn test_opening_too_narrow() {
        let config = CabinetConfig::default();
        let result = BlumDrawer::build(
            "Drawer",
            fraction(31, 16),
            Decimal::from(8),
            Decimal::from(23),
            &config,
        );
        assert!(matches!(result, Err(CabinetError::InvalidOpening(_))));
    }

    #[test]
    fn test_drawer_box_parts() {
        let config = CabinetConfig::default();
        let drawer = BlumDrawer::build(
            "Drawer",
            Decimal::from(20),
            Decimal::from(8),
            Decimal::from(23),
            &config,
        )
        .unwrap();

        assert_eq!(drawer.kind(), ComponentKind::BlumDrawer);
        assert_eq!(drawer.count_kind(ComponentKind::DrawerBox), 1);
        assert_eq!(drawer.count_kind(ComponentKind::ShakerDrawerFace), 1);

        // 寬度 20 < 24：1/2" 箱壁、1/4" 底板
        let t = fraction(15, 32);
        let inside = Decimal::from(20) - fraction(31, 16);
        let side_length = Decimal::from(21) - t * Decimal::from(2);

        let left = drawer.find("Drawer Left Side").unwrap();
        assert_eq!(left.material(), Some(MaterialKind::Ply1_2));
        assert_eq!(left.dimension().width, side_length);
        assert_eq!(left.dimension().height, Decimal::from(5));

        let bottom = drawer.find("Drawer Bottom").unwrap();
        assert_eq!(bottom.material(), Some(MaterialKind::Ply1_4));
        assert_eq!(bottom.dimension().width, inside + t);
        assert_eq!(bottom.dimension().height, side_length + t);

        let front = drawer.find("Drawer Front").unwrap();
        assert_eq!(front.dimension().width, inside + t * Decimal::from(2));
    }

    #[test]
    fn test_threshold_width_uses_thicker_walls() {
        let config = CabinetConfig::default();
        let drawer = BlumDrawer::build(
            "Drawer",
            Decimal::from(24),
            Decimal::from(8),
            Decimal::from(23),
            &config,
        )
        .unwrap();

        let left = drawer.find("Drawer Left Side").unwrap();
        assert_eq!(left.material(), Some(MaterialKind::Ply5_8));
    }

    #[test]
    fn test_drawer_face_panels() {
        let config = CabinetConfig::default();
        let face = BlumDrawer::face("Face", Decimal::from(20), Decimal::from(8), &config).unwrap();

        // 20 + 2 × 1.375, 8 + 2 × 0.625
        assert_eq!(face.dimension().width, fraction(91, 4));
        assert_eq!(face.dimension().height, fraction(37, 4));
        assert!(face.find("Face Inset Panel (Dadoed)").is_some());

        let glue_on = face.find("Face Inset Panel (Glue-on)").unwrap();
        // 內框 22.75 − 4, 9.25 − 4
        assert_eq!(glue_on.dimension().width, fraction(75, 4));
        assert_eq!(glue_on.dimension().height, fraction(21, 4));
    }

    #[test]
    fn test_drawer_face_too_short() {
        let config = CabinetConfig::default();
        // 面板高 2.25 小於上下框料 4
        let result = BlumDrawer::build(
            "Drawer",
            Decimal::from(20),
            Decimal::ONE,
            Decimal::from(23),
            &config,
        );
        assert!(matches!(result, Err(CabinetError::InvalidOpening(_))));

        let face = BlumDrawer::face("Face", Decimal::from(20), Decimal::ONE, &config);
        assert!(matches!(face, Err(CabinetError::InvalidOpening(_))));
    }
}

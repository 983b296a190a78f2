//! Shaker 門板

use cabinet_core::{CabinetConfig, CabinetError, Component, ComponentKind, Position, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::face_frame::FaceFrame;
use crate::grid::{GridCell, GridSpec, Padding};

/// 鉸鏈側
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingeSide {
    Left,
    Right,
}

/// 鉸鏈側立梃寬度：整條（double）或與相鄰門板平分（single）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingeStile {
    Single,
    Double,
}

/// 一排門的中間門板鉸鏈方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingePreference {
    Left,
    Right,
    /// 由右開始左右交替
    Alternate,
}

/// 門板選項
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorOptions {
    pub hinge_side: HingeSide,
    pub hinge_stile: HingeStile,
    /// 非鉸鏈側是否與另一扇門相鄰
    pub paired: bool,
}

impl Default for DoorOptions {
    fn default() -> Self {
        Self {
            hinge_side: HingeSide::Left,
            hinge_stile: HingeStile::Double,
            paired: true,
        }
    }
}

impl DoorOptions {
    pub fn new(hinge_side: HingeSide, hinge_stile: HingeStile, paired: bool) -> Self {
        Self {
            hinge_side,
            hinge_stile,
            paired,
        }
    }

    /// 單獨一扇門：左鉸鏈、整條立梃、不成對
    pub fn single() -> Self {
        Self::new(HingeSide::Left, HingeStile::Double, false)
    }

    /// 左右覆蓋量
    pub fn overlays(&self, config: &CabinetConfig) -> (Decimal, Decimal) {
        let hinge_overlay = match self.hinge_stile {
            HingeStile::Single => config.small_overlay(),
            HingeStile::Double => config.large_overlay(),
        };
        let other_overlay = if self.paired {
            config.small_overlay()
        } else {
            config.large_overlay()
        };

        match self.hinge_side {
            HingeSide::Left => (hinge_overlay, other_overlay),
            HingeSide::Right => (other_overlay, hinge_overlay),
        }
    }
}

/// Shaker 門板建構器
pub struct ShakerDoor;

impl ShakerDoor {
    /// 依開口建立門板：開口加上覆蓋量，兩立梃兩橫檔加嵌槽中心板
    pub fn build(
        name: impl Into<String>,
        opening_width: Decimal,
        opening_height: Decimal,
        options: DoorOptions,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let name = name.into();
        let (left, right) = options.overlays(config);
        let vertical = config.small_overlay();

        let width = opening_width + left + right;
        let height = opening_height + vertical * Decimal::from(2);
        let position = Position::new(
            -left,
            -config.shaker_frame_material.thickness(),
            -vertical,
        );

        tracing::debug!(
            "建立門板 {}：{} x {}，鉸鏈 {:?}",
            name,
            width,
            height,
            options.hinge_side
        );

        shaker_panel(
            ComponentKind::ShakerDoor,
            name,
            width,
            height,
            position,
            false,
            config,
        )
    }

    /// 一排 n 扇門的選項：第一扇左鉸鏈、最後一扇右鉸鏈，兩端為整條立梃
    pub fn row_options(count: usize, preference: HingePreference) -> Vec<DoorOptions> {
        let paired = count > 1;
        (0..count)
            .map(|i| {
                if i == 0 {
                    DoorOptions::new(HingeSide::Left, HingeStile::Double, paired)
                } else if i == count - 1 {
                    DoorOptions::new(HingeSide::Right, HingeStile::Double, paired)
                } else {
                    let side = match preference {
                        HingePreference::Left => HingeSide::Left,
                        HingePreference::Right => HingeSide::Right,
                        HingePreference::Alternate if (i - 1) % 2 == 0 => HingeSide::Right,
                        HingePreference::Alternate => HingeSide::Left,
                    };
                    DoorOptions::new(side, HingeStile::Single, paired)
                }
            })
            .collect()
    }

    /// 為同一列的單元各建立一扇門，回傳（單元名稱, 門板）
    pub fn build_row(
        prefix: &str,
        cells: &[&GridCell],
        preference: HingePreference,
        config: &CabinetConfig,
    ) -> Result<Vec<(String, Component)>> {
        let options = Self::row_options(cells.len(), preference);
        cells
            .iter()
            .zip(options)
            .map(|(cell, opts)| -> Result<(String, Component)> {
                let door = Self::build(
                    format!("{prefix} {} Door", cell.name),
                    cell.width,
                    cell.height,
                    opts,
                    config,
                )?;
                Ok((cell.name.clone(), door))
            })
            .collect()
    }
}

/// 單格框架加中心板（門板與抽屜面板共用）
///
/// 嵌槽中心板每邊多出一個中心板厚度；`glue_on` 時另加一片與開口同尺寸的貼板
pub(crate) fn shaker_panel(
    kind: ComponentKind,
    name: String,
    width: Decimal,
    height: Decimal,
    position: Position,
    glue_on: bool,
    config: &CabinetConfig,
) -> Result<Component> {
    let member = config.shaker_member_width;
    let frame_allowance = member * Decimal::from(2);
    if width <= frame_allowance || height <= frame_allowance {
        return Err(CabinetError::InvalidOpening(format!(
            "{name}: 尺寸 {width} x {height} 放不下兩側 {member} 框料"
        )));
    }
    let spec = GridSpec::new(width, height).with_padding(Padding::uniform(member));
    let frame = FaceFrame::new(name.clone(), spec, config.shaker_frame_material)?;
    let cell = frame.grid().cell("r0c0")?.clone();

    let inset_material = config.panel_inset_material;
    let inset = inset_material.thickness();
    let inset_depth = config.shaker_frame_material.thickness() - inset * Decimal::from(2);

    let mut panels = vec![(
        cell.name.clone(),
        Component::panel(
            format!("{name} Inset Panel (Dadoed)"),
            cell.width + inset * Decimal::from(2),
            cell.height + inset * Decimal::from(2),
            inset_material,
            Position::new(-inset, inset_depth, -inset),
        )?,
    )];
    if glue_on {
        panels.push((
            cell.name.clone(),
            Component::panel(
                format!("{name} Inset Panel (Glue-on)"),
                cell.width,
                cell.height,
                inset_material,
                Position::new(Decimal::ZERO, inset_depth + inset, Decimal::ZERO),
            )?,
        ));
    }

    frame.assemble_as(kind, position, panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::{fraction, MaterialKind};
    use rstest::rstest;

    #[rstest]
    #[case(HingeSide::Left, HingeStile::Double, true, fraction(11, 8), fraction(5, 8))]
    #[case(HingeSide::Left, HingeStile::Single, true, fraction(5, 8), fraction(5, 8))]
    #[case(HingeSide::Right, HingeStile::Double, true, fraction(5, 8), fraction(11, 8))]
    #[case(HingeSide::Left, HingeStile::Double, false, fraction(11, 8), fraction(11, 8))]
    fn test_overlays(
        #[case] side: HingeSide,
        #[case] stile: HingeStile,
        #[case] paired: bool,
        #[case] left: Decimal,
        #[case] right: Decimal,
    ) {
        let config = CabinetConfig::default();
        let options = DoorOptions::new(side, stile, paired);

        assert_eq!(options.overlays(&config), (left, right));
    }

    #[test]
    fn test_door_parts() {
        let config = CabinetConfig::default();
        let door = ShakerDoor::build(
            "Door",
            Decimal::from(15),
            Decimal::from(28),
            DoorOptions::single(),
            &config,
        )
        .unwrap();

        // 15 + 2 × 1.375, 28 + 2 × 0.625
        assert_eq!(door.dimension().width, fraction(71, 4));
        assert_eq!(door.dimension().height, fraction(117, 4));
        assert_eq!(door.kind(), ComponentKind::ShakerDoor);

        // 兩立梃、兩橫檔、一片中心板
        assert_eq!(door.children().len(), 5);
        let quantities = door.material_quantities();
        assert!(quantities.contains_key(&MaterialKind::HardwoodPaint3_4));
        assert!(quantities.contains_key(&MaterialKind::Ply1_4));

        let panel = door.find("Door Inset Panel (Dadoed)").unwrap();
        // 內框 17.75 − 4 + 0.5
        assert_eq!(panel.dimension().width, fraction(57, 4));
    }

    #[test]
    fn test_door_too_small_for_frame() {
        let config = CabinetConfig::default();
        let result = ShakerDoor::build(
            "Tiny",
            Decimal::ONE,
            Decimal::from(20),
            DoorOptions::single(),
            &config,
        );
        assert!(matches!(result, Err(CabinetError::InvalidOpening(_))));

        // 寬度剛好等於兩側框料也不行
        let exact = ShakerDoor::build(
            "Exact",
            Decimal::from(4) - fraction(11, 8) - fraction(11, 8),
            Decimal::from(20),
            DoorOptions::single(),
            &config,
        );
        assert!(matches!(exact, Err(CabinetError::InvalidOpening(_))));
    }

    #[test]
    fn test_row_options() {
        let single = ShakerDoor::row_options(1, HingePreference::Left);
        assert_eq!(single, vec![DoorOptions::single()]);

        let pair = ShakerDoor::row_options(2, HingePreference::Left);
        assert_eq!(pair[0].hinge_side, HingeSide::Left);
        assert_eq!(pair[1].hinge_side, HingeSide::Right);
        assert!(pair.iter().all(|o| o.paired && o.hinge_stile == HingeStile::Double));

        let five = ShakerDoor::row_options(5, HingePreference::Alternate);
        let sides: Vec<_> = five.iter().map(|o| o.hinge_side).collect();
        assert_eq!(
            sides,
            vec![
                HingeSide::Left,
                HingeSide::Right,
                HingeSide::Left,
                HingeSide::Right,
                HingeSide::Right,
            ]
        );
        assert_eq!(five[2].hinge_stile, HingeStile::Single);
    }
}

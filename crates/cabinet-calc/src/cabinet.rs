//! 下櫃與吊櫃
//!
//! 櫃子由箱體、面框（含單元內的抽屜／門板）以及選用的層板組成。
//! 轉角櫃以一般箱體近似，不另外處理。

use cabinet_core::{
    CabinetConfig, CabinetError, Component, ComponentKind, Dimension, Position, Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::door::{HingePreference, ShakerDoor};
use crate::face_frame::{CellFill, FaceFrame};
use crate::grid::{GridSpec, Padding, Track};
use crate::shelf::{Shelf, ShelfSpacing, ShelfStyle};

/// 面框配置
#[derive(Debug, Clone, PartialEq)]
pub enum FaceFrameLayout {
    /// M × N 空格
    MxNEmpty { rows: Vec<Track>, cols: Vec<Track> },
    /// 單欄，每列一個抽屜
    NDrawer { rows: Vec<Track> },
    /// 單列，每欄一扇門
    NDoor {
        cols: Vec<Track>,
        hinge: HingePreference,
    },
    /// 上方一個固定高度抽屜，下方一對門
    OneDrawerTwoDoor { drawer_height: Decimal },
    /// 自訂網格與填充
    Custom {
        rows: Vec<Track>,
        cols: Vec<Track>,
        fills: Vec<(String, CellFill)>,
    },
}

impl FaceFrameLayout {
    /// n 個等高抽屜
    pub fn drawers(n: usize) -> Self {
        FaceFrameLayout::NDrawer {
            rows: Track::evenly(n),
        }
    }

    /// n 扇等寬門
    pub fn doors(n: usize) -> Self {
        FaceFrameLayout::NDoor {
            cols: Track::evenly(n),
            hinge: HingePreference::Left,
        }
    }

    fn tracks(&self) -> (Vec<Track>, Vec<Track>) {
        match self {
            FaceFrameLayout::MxNEmpty { rows, cols } => (rows.clone(), cols.clone()),
            FaceFrameLayout::NDrawer { rows } => (rows.clone(), vec![Track::even()]),
            FaceFrameLayout::NDoor { cols, .. } => (vec![Track::even()], cols.clone()),
            FaceFrameLayout::OneDrawerTwoDoor { drawer_height } => (
                vec![Track::Fixed(*drawer_height), Track::even()],
                vec![Track::even()],
            ),
            FaceFrameLayout::Custom { rows, cols, .. } => (rows.clone(), cols.clone()),
        }
    }

    fn fills(&self) -> Vec<(String, CellFill)> {
        match self {
            FaceFrameLayout::MxNEmpty { .. } => Vec::new(),
            FaceFrameLayout::NDrawer { rows } => (0..rows.len())
                .map(|row| (format!("r{row}c0"), CellFill::Drawer))
                .collect(),
            FaceFrameLayout::NDoor { cols, hinge } => ShakerDoor::row_options(cols.len(), *hinge)
                .into_iter()
                .enumerate()
                .map(|(col, options)| (format!("r0c{col}"), CellFill::Door(options)))
                .collect(),
            FaceFrameLayout::OneDrawerTwoDoor { .. } => vec![
                ("r0c0".to_string(), CellFill::Drawer),
                (
                    "r1c0".to_string(),
                    CellFill::Doors {
                        count: 2,
                        hinge: HingePreference::Left,
                    },
                ),
            ],
            FaceFrameLayout::Custom { fills, .. } => fills.clone(),
        }
    }
}

/// 層板配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfPlan {
    pub style: ShelfStyle,
    pub spacing: ShelfSpacing,
}

impl ShelfPlan {
    pub fn new(style: ShelfStyle, spacing: ShelfSpacing) -> Self {
        Self { style, spacing }
    }
}

/// 下櫃參數
#[derive(Debug, Clone, PartialEq)]
pub struct LowerCabinetSpec {
    pub name: String,
    pub width: Decimal,
    pub height: Decimal,
    pub layout: FaceFrameLayout,
    pub shelves: Option<ShelfPlan>,
}

impl LowerCabinetSpec {
    /// 預設高度取自配置，面框為四個等高抽屜
    pub fn new(name: impl Into<String>, width: Decimal, config: &CabinetConfig) -> Self {
        Self {
            name: name.into(),
            width,
            height: config.lower_height,
            layout: FaceFrameLayout::drawers(4),
            shelves: None,
        }
    }

    /// 建構器模式：設置高度
    pub fn with_height(mut self, height: Decimal) -> Self {
        self.height = height;
        self
    }

    /// 建構器模式：設置面框配置
    pub fn with_layout(mut self, layout: FaceFrameLayout) -> Self {
        self.layout = layout;
        self
    }

    /// 建構器模式：設置層板
    pub fn with_shelves(mut self, plan: ShelfPlan) -> Self {
        self.shelves = Some(plan);
        self
    }
}

/// 吊櫃參數
#[derive(Debug, Clone, PartialEq)]
pub struct UpperCabinetSpec {
    pub name: String,
    pub width: Decimal,
    pub height: Decimal,
    /// 櫃底離地高度
    pub mount_height: Decimal,
    pub layout: FaceFrameLayout,
    pub shelves: Option<ShelfPlan>,
}

impl UpperCabinetSpec {
    /// 預設高度與安裝高度取自配置，面框為一對門
    pub fn new(name: impl Into<String>, width: Decimal, config: &CabinetConfig) -> Self {
        Self {
            name: name.into(),
            width,
            height: config.upper_height(),
            mount_height: config.upper_mount_height(),
            layout: FaceFrameLayout::doors(2),
            shelves: None,
        }
    }

    /// 建構器模式：設置高度
    pub fn with_height(mut self, height: Decimal) -> Self {
        self.height = height;
        self
    }

    /// 建構器模式：設置安裝高度
    pub fn with_mount_height(mut self, mount_height: Decimal) -> Self {
        self.mount_height = mount_height;
        self
    }

    /// 建構器模式：設置面框配置
    pub fn with_layout(mut self, layout: FaceFrameLayout) -> Self {
        self.layout = layout;
        self
    }

    /// 建構器模式：設置層板
    pub fn with_shelves(mut self, plan: ShelfPlan) -> Self {
        self.shelves = Some(plan);
        self
    }
}

/// 下櫃建構器
pub struct LowerCabinet;

impl LowerCabinet {
    /// 下櫃箱體：側板、底板、踢腳、底座、頂部拉條與背板
    pub fn case(
        name: impl Into<String>,
        width: Decimal,
        height: Decimal,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let name = name.into();
        let two = Decimal::from(2);
        let material = config.lower_case_material;
        let back = config.lower_back_material;
        let t = material.thickness();

        let bottom_height = Self::bottom_height(config);
        let box_depth = Self::box_depth(config);
        let inside = width - t * two;
        let toe_kick_cutout = bottom_height - t - config.dado_above_toe_kick;
        let base_block_height = bottom_height - t;
        let stretcher = config.stretcher_width;
        let rabbet = t / two;

        let part = |label: &str, w: Decimal, h: Decimal, x: Decimal, y: Decimal, z: Decimal| {
            Component::panel(
                format!("{name} {label}"),
                w,
                h,
                material,
                Position::new(x, y, z),
            )
        };

        let children = vec![
            part("Left Side", box_depth, height, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)?,
            part("Right Side", box_depth, height, width - t, Decimal::ZERO, Decimal::ZERO)?,
            part(
                "Bottom",
                inside + config.floor_dado_depth * two,
                box_depth,
                t - config.floor_dado_depth,
                Decimal::ZERO,
                bottom_height - t,
            )?,
            part(
                "Toekick",
                width,
                toe_kick_cutout,
                Decimal::ZERO,
                config.toe_kick_depth,
                Decimal::ZERO,
            )?,
            part(
                "Base Block - Front",
                inside,
                base_block_height,
                t,
                config.toe_kick_depth + t,
                Decimal::ZERO,
            )?,
            part(
                "Base Block - Rear",
                inside,
                base_block_height,
                t,
                box_depth - t,
                Decimal::ZERO,
            )?,
            part("Top Stretcher - Front", inside, stretcher, t, Decimal::ZERO, height - t)?,
            part(
                "Top Stretcher - Rear (Horiz)",
                inside,
                stretcher,
                t,
                box_depth - stretcher,
                height - t,
            )?,
            part(
                "Top Stretcher - Rear (Vert)",
                inside,
                stretcher,
                t,
                box_depth - t,
                height - (t + stretcher),
            )?,
            Component::panel(
                format!("{name} Back"),
                inside + rabbet * two,
                height,
                back,
                Position::new(t - rabbet, box_depth - back.thickness(), Decimal::ZERO),
            )?,
        ];

        Component::composite(
            ComponentKind::LowerCabinetCase,
            name,
            Dimension::new(width, height, box_depth),
            Position::new(
                Decimal::ZERO,
                config.face_frame_material.thickness(),
                Decimal::ZERO,
            ),
            children,
        )
    }

    /// 底板上緣離地高度
    pub fn bottom_height(config: &CabinetConfig) -> Decimal {
        config.toe_kick_height + config.face_frame_member_width
    }

    /// 箱體深度（不含面框）
    pub fn box_depth(config: &CabinetConfig) -> Decimal {
        config.lower_depth - config.face_frame_material.thickness()
    }

    /// 櫃內空間（寬, 高, 深）
    pub fn interior(width: Decimal, height: Decimal, config: &CabinetConfig) -> Dimension {
        let t = config.lower_case_material.thickness();
        Dimension::new(
            width - t * Decimal::from(2),
            height - t - Self::bottom_height(config),
            Self::box_depth(config) - config.lower_back_material.thickness(),
        )
    }

    /// 建立完整下櫃
    pub fn build(spec: &LowerCabinetSpec, config: &CabinetConfig) -> Result<Component> {
        config.validate()?;
        let overhang = config.face_frame_side_overhang;
        let member = config.face_frame_member_width;
        let interior = Self::interior(spec.width, spec.height, config);

        let case = Self::case(format!("{} Case", spec.name), spec.width, spec.height, config)?;

        let grid = GridSpec::new(
            spec.width + overhang * Decimal::from(2),
            spec.height - config.toe_kick_height,
        )
        .with_padding(Padding::uniform(member))
        .with_spacing(member, member);
        let face = layout_face_frame(
            format!("{} Face Frame", spec.name),
            grid,
            &spec.layout,
            interior.depth,
            Position::new(-overhang, Decimal::ZERO, config.toe_kick_height),
            config,
        )?;

        let mut children = vec![case, face];
        if let Some(plan) = &spec.shelves {
            let t = config.lower_case_material.thickness();
            let origin = Position::new(
                t,
                config.face_frame_material.thickness(),
                Self::bottom_height(config),
            );
            children.extend(Shelf::fill_interior(
                &spec.name,
                plan.style,
                &plan.spacing,
                interior,
                origin,
                config,
            )?);
        }

        tracing::info!(
            "下櫃 {}：{} x {} x {}",
            spec.name,
            spec.width,
            spec.height,
            config.lower_depth
        );

        Component::composite(
            ComponentKind::LowerCabinet,
            spec.name.clone(),
            Dimension::new(spec.width, spec.height, config.lower_depth),
            Position::origin(),
            children,
        )
    }
}

/// 吊櫃建構器
pub struct UpperCabinet;

impl UpperCabinet {
    /// 吊櫃箱體：側板、頂底板（嵌槽）、上下掛條與背板
    pub fn case(
        name: impl Into<String>,
        width: Decimal,
        height: Decimal,
        config: &CabinetConfig,
    ) -> Result<Component> {
        let name = name.into();
        let two = Decimal::from(2);
        let material = config.upper_case_material;
        let nailer = config.upper_nailer_material;
        let back = config.upper_back_material;
        let t = material.thickness();

        let box_depth = Self::box_depth(config);
        let inside = width - t * two;
        let dado = t / two;
        let rabbet = t / two;
        let panel_depth = box_depth - back.thickness();
        let nailer_y = box_depth - (back.thickness() + nailer.thickness());

        let children = vec![
            Component::panel(
                format!("{name} Left Side"),
                box_depth,
                height,
                material,
                Position::origin(),
            )?,
            Component::panel(
                format!("{name} Right Side"),
                box_depth,
                height,
                material,
                Position::along_x(width - t),
            )?,
            Component::panel(
                format!("{name} Top"),
                inside + dado * two,
                panel_depth,
                material,
                Position::new(t - dado, Decimal::ZERO, height - config.upper_top_inset - t),
            )?,
            Component::panel(
                format!("{name} Bottom"),
                inside + dado * two,
                panel_depth,
                material,
                Position::new(t - dado, Decimal::ZERO, config.upper_bottom_inset),
            )?,
            Component::panel(
                format!("{name} Bottom Nailer"),
                inside,
                config.nailer_width,
                nailer,
                Position::new(t, nailer_y, config.upper_bottom_inset + t),
            )?,
            Component::panel(
                format!("{name} Top Nailer"),
                inside,
                config.nailer_width,
                nailer,
                Position::new(
                    t,
                    nailer_y,
                    height - (config.upper_top_inset + t + config.nailer_width),
                ),
            )?,
            Component::panel(
                format!("{name} Back Panel"),
                inside + rabbet * two,
                height,
                back,
                Position::new(t - rabbet, panel_depth, Decimal::ZERO),
            )?,
        ];

        Component::composite(
            ComponentKind::UpperCabinetCase,
            name,
            Dimension::new(width, height, box_depth),
            Position::new(
                Decimal::ZERO,
                config.face_frame_material.thickness(),
                Decimal::ZERO,
            ),
            children,
        )
    }

    /// 箱體深度（不含面框）
    pub fn box_depth(config: &CabinetConfig) -> Decimal {
        config.upper_depth - config.face_frame_material.thickness()
    }

    /// 櫃內空間（寬, 高, 深）
    pub fn interior(width: Decimal, height: Decimal, config: &CabinetConfig) -> Dimension {
        let t = config.upper_case_material.thickness();
        Dimension::new(
            width - t * Decimal::from(2),
            height - (config.upper_top_inset + t) - (config.upper_bottom_inset + t),
            Self::box_depth(config)
                - config.upper_back_material.thickness()
                - config.upper_nailer_material.thickness(),
        )
    }

    /// 建立完整吊櫃，位置為安裝高度
    pub fn build(spec: &UpperCabinetSpec, config: &CabinetConfig) -> Result<Component> {
        config.validate()?;
        let overhang = config.face_frame_side_overhang;
        let member = config.face_frame_member_width;
        let t = config.upper_case_material.thickness();
        let interior = Self::interior(spec.width, spec.height, config);

        let case = Self::case(format!("{} Case", spec.name), spec.width, spec.height, config)?;

        // 上下橫檔蓋住頂底板
        let grid = GridSpec::new(spec.width + overhang * Decimal::from(2), spec.height)
            .with_padding(Padding::new(
                member,
                config.upper_bottom_inset + t,
                member,
                config.upper_top_inset + t,
            ))
            .with_spacing(member, member);
        let face = layout_face_frame(
            format!("{} Face Frame", spec.name),
            grid,
            &spec.layout,
            interior.depth,
            Position::along_x(-overhang),
            config,
        )?;

        let mut children = vec![case, face];
        if let Some(plan) = &spec.shelves {
            let origin = Position::new(
                t,
                config.face_frame_material.thickness(),
                config.upper_bottom_inset + t,
            );
            children.extend(Shelf::fill_interior(
                &spec.name,
                plan.style,
                &plan.spacing,
                interior,
                origin,
                config,
            )?);
        }

        tracing::info!(
            "吊櫃 {}：{} x {} x {}，安裝高度 {}",
            spec.name,
            spec.width,
            spec.height,
            config.upper_depth,
            spec.mount_height
        );

        Component::composite(
            ComponentKind::UpperCabinet,
            spec.name.clone(),
            Dimension::new(spec.width, spec.height, config.upper_depth),
            Position::along_z(spec.mount_height),
            children,
        )
    }
}

fn layout_face_frame(
    name: String,
    grid: GridSpec,
    layout: &FaceFrameLayout,
    interior_depth: Decimal,
    position: Position,
    config: &CabinetConfig,
) -> Result<Component> {
    let (rows, cols) = layout.tracks();
    let frame = FaceFrame::new(
        name,
        grid.with_rows(rows).with_cols(cols),
        config.face_frame_material,
    )?;
    let contents = frame.fill(&layout.fills(), interior_depth, config)?;
    frame.assemble(position, contents)
}

/// 將多個櫃子（或佔位元件）由左至右排成一排
pub fn assemble_in_row(
    name: impl Into<String>,
    components: Vec<Component>,
    spacing: Decimal,
) -> Result<Component> {
    let name = name.into();
    if spacing < Decimal::ZERO {
        return Err(CabinetError::InvalidDimension(format!(
            "{name}: 間距不可為負，實際 {spacing}"
        )));
    }

    let mut cursor = Decimal::ZERO;
    let mut height = Decimal::ZERO;
    let mut depth = Decimal::ZERO;
    let mut children = Vec::with_capacity(components.len());

    for (i, component) in components.into_iter().enumerate() {
        if i > 0 {
            cursor += spacing;
        }
        let dimension = *component.dimension();
        let offset = component.position();
        height = height.max(offset.z + dimension.height);
        depth = depth.max(dimension.depth);

        children.push(component.with_position(Position::new(cursor, offset.y, offset.z)));
        cursor += dimension.width;
    }

    tracing::debug!("排列 {}：{} 個元件，總寬 {}", name, children.len(), cursor);

    Component::composite(
        ComponentKind::Assembly,
        name,
        Dimension::new(cursor, height, depth),
        Position::origin(),
        children,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::{fraction, MaterialKind};

    #[test]
    fn test_lower_case_parts() {
        let config = CabinetConfig::default();
        let case = LowerCabinet::case("Case", Decimal::from(24), fraction(69, 2), &config).unwrap();

        assert_eq!(case.kind(), ComponentKind::LowerCabinetCase);
        assert_eq!(case.children().len(), 10);

        let t = fraction(23, 32);
        let bottom = case.find("Case Bottom").unwrap();
        // 內寬 24 − 2t + 2 × 3/8
        assert_eq!(
            bottom.dimension().width,
            Decimal::from(24) - t * Decimal::from(2) + fraction(3, 4)
        );
        // 箱深 24 − 3/4
        assert_eq!(bottom.dimension().height, fraction(93, 4));

        let toe_kick = case.find("Case Toekick").unwrap();
        assert_eq!(toe_kick.dimension().height, Decimal::from(5) - t - fraction(1, 2));

        let back = case.find("Case Back").unwrap();
        assert_eq!(back.material(), Some(MaterialKind::Ply1_4));
    }

    #[test]
    fn test_lower_cabinet_with_drawers() {
        let config = CabinetConfig::default();
        let spec = LowerCabinetSpec::new("Sink", Decimal::from(36), &config);
        let cabinet = LowerCabinet::build(&spec, &config).unwrap();

        assert_eq!(cabinet.kind(), ComponentKind::LowerCabinet);
        assert_eq!(cabinet.count_kind(ComponentKind::BlumDrawer), 4);
        assert_eq!(cabinet.count_kind(ComponentKind::FaceFrame), 1);

        let face = cabinet.find("Sink Face Frame").unwrap();
        // 36 + 2 × 1/8, 34.5 − 3.5
        assert_eq!(face.dimension().width, fraction(145, 4));
        assert_eq!(face.dimension().height, Decimal::from(31));
        assert_eq!(face.position().z, fraction(7, 2));
    }

    #[test]
    fn test_one_drawer_two_door() {
        let config = CabinetConfig::default();
        let spec = LowerCabinetSpec::new("Base", Decimal::from(30), &config)
            .with_layout(FaceFrameLayout::OneDrawerTwoDoor {
                drawer_height: Decimal::from(6),
            })
            .with_shelves(ShelfPlan::new(ShelfStyle::Banded, ShelfSpacing::Even(1)));
        let cabinet = LowerCabinet::build(&spec, &config).unwrap();

        assert_eq!(cabinet.count_kind(ComponentKind::BlumDrawer), 1);
        assert_eq!(cabinet.count_kind(ComponentKind::ShakerDoor), 2);
        // 外層面框 + 門板子面框
        assert_eq!(cabinet.count_kind(ComponentKind::FaceFrame), 2);
        assert_eq!(cabinet.count_kind(ComponentKind::BandedShelf), 1);
    }

    #[test]
    fn test_upper_cabinet_defaults() {
        let config = CabinetConfig::default();
        let spec = UpperCabinetSpec::new("Upper", Decimal::from(30), &config)
            .with_shelves(ShelfPlan::new(ShelfStyle::Standard, ShelfSpacing::Even(2)));
        let cabinet = UpperCabinet::build(&spec, &config).unwrap();

        assert_eq!(cabinet.kind(), ComponentKind::UpperCabinet);
        assert_eq!(cabinet.dimension().height, Decimal::from(39));
        assert_eq!(cabinet.position().z, Decimal::from(54));
        assert_eq!(cabinet.count_kind(ComponentKind::ShakerDoor), 2);
        assert_eq!(cabinet.count_kind(ComponentKind::StandardShelf), 2);

        let quantities = cabinet.material_quantities();
        assert!(quantities.contains_key(&MaterialKind::HardwoodPaint3_4));
        assert!(quantities.contains_key(&MaterialKind::Ply1_4));
    }

    #[test]
    fn test_upper_case_nailers() {
        let config = CabinetConfig::default();
        let case = UpperCabinet::case("Case", Decimal::from(30), Decimal::from(39), &config).unwrap();

        assert_eq!(case.children().len(), 7);
        let nailer = case.find("Case Top Nailer").unwrap();
        assert_eq!(nailer.material(), Some(MaterialKind::HardwoodPaint3_4));
        assert_eq!(nailer.dimension().height, fraction(5, 2));
    }

    #[test]
    fn test_custom_layout_unknown_cell() {
        let config = CabinetConfig::default();
        let spec = LowerCabinetSpec::new("Custom", Decimal::from(24), &config).with_layout(
            FaceFrameLayout::Custom {
                rows: Track::evenly(1),
                cols: Track::evenly(1),
                fills: vec![("r1c0".to_string(), CellFill::Drawer)],
            },
        );

        assert_eq!(
            LowerCabinet::build(&spec, &config).unwrap_err(),
            CabinetError::UnknownGridCell("r1c0".to_string())
        );
    }

    #[test]
    fn test_assemble_in_row() {
        let config = CabinetConfig::default();
        let left = LowerCabinet::build(
            &LowerCabinetSpec::new("Left", Decimal::from(18), &config),
            &config,
        )
        .unwrap();
        let gap = Component::ghost("Range", Decimal::from(30), Position::origin()).unwrap();
        let right = LowerCabinet::build(
            &LowerCabinetSpec::new("Right", Decimal::from(24), &config),
            &config,
        )
        .unwrap();

        let row = assemble_in_row("Run", vec![left, gap, right], Decimal::ZERO).unwrap();

        assert_eq!(row.kind(), ComponentKind::Assembly);
        assert_eq!(row.dimension().width, Decimal::from(72));
        assert_eq!(row.children()[2].position().x, Decimal::from(48));
        assert_eq!(row.count_kind(ComponentKind::GhostComponent), 1);
    }
}

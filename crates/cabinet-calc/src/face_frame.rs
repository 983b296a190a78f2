//! 面框建構
//!
//! 面框是一個網格：內距即外側立梃與上下橫檔，間隔即中間立梃與橫檔。
//! 構件與所有單元剛好鋪滿整個面框。

use cabinet_core::{
    CabinetConfig, CabinetError, Component, ComponentKind, Dimension, MaterialKind, Position,
    Result,
};
use rust_decimal::Decimal;

use crate::door::{DoorOptions, HingePreference, ShakerDoor};
use crate::drawer::BlumDrawer;
use crate::grid::{ComponentGrid, GridCell, GridSpec, Padding, Track};

/// 單元填充方式
#[derive(Debug, Clone, PartialEq)]
pub enum CellFill {
    /// 留空（如開放層架）
    Empty,
    /// Blum 抽屜
    Drawer,
    /// 單扇門
    Door(DoorOptions),
    /// 以無內距子面框分隔的多扇門
    Doors {
        count: usize,
        hinge: HingePreference,
    },
}

/// 面框
#[derive(Debug, Clone)]
pub struct FaceFrame {
    name: String,
    grid: ComponentGrid,
    material: MaterialKind,
}

impl FaceFrame {
    /// 以任意網格配置建立面框
    pub fn new(name: impl Into<String>, spec: GridSpec, material: MaterialKind) -> Result<Self> {
        let name = name.into();
        let grid = spec.build()?;
        Ok(Self {
            name,
            grid,
            material,
        })
    }

    /// 標準面框：立梃與橫檔寬度皆為 `face_frame_member_width`
    pub fn standard(
        name: impl Into<String>,
        width: Decimal,
        height: Decimal,
        rows: Vec<Track>,
        cols: Vec<Track>,
        config: &CabinetConfig,
    ) -> Result<Self> {
        let member = config.face_frame_member_width;
        let spec = GridSpec::new(width, height)
            .with_padding(Padding::uniform(member))
            .with_spacing(member, member)
            .with_rows(rows)
            .with_cols(cols);
        Self::new(name, spec, config.face_frame_material)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &ComponentGrid {
        &self.grid
    }

    pub fn material(&self) -> MaterialKind {
        self.material
    }

    /// 立梃與橫檔
    pub fn members(&self) -> Result<Vec<Component>> {
        let grid = &self.grid;
        let padding = grid.padding();
        let mut members = Vec::new();

        // 全高外側立梃
        if padding.left > Decimal::ZERO {
            members.push(self.member("Left Stile", padding.left, grid.height(), Decimal::ZERO, Decimal::ZERO)?);
        }
        if padding.right > Decimal::ZERO {
            members.push(self.member(
                "Right Stile",
                padding.right,
                grid.height(),
                grid.width() - padding.right,
                Decimal::ZERO,
            )?);
        }

        // 上下橫檔，跨內部寬度
        if padding.bottom > Decimal::ZERO {
            members.push(self.member(
                "Bottom Rail",
                grid.interior_width(),
                padding.bottom,
                padding.left,
                Decimal::ZERO,
            )?);
        }
        if padding.top > Decimal::ZERO {
            members.push(self.member(
                "Top Rail",
                grid.interior_width(),
                padding.top,
                padding.left,
                grid.height() - padding.top,
            )?);
        }

        // 欄與欄之間的立梃，高度為內部高度
        for cell in grid.row(0).take(grid.col_count().saturating_sub(1)) {
            members.push(self.member(
                format!("Stile c{}", cell.col + 1),
                grid.column_spacing(),
                grid.interior_height(),
                cell.x + cell.width,
                padding.bottom,
            )?);
        }

        // 第 0 列以外的每個單元上方各有一條橫檔
        for cell in grid.cells().iter().filter(|cell| cell.row > 0) {
            members.push(self.member(
                format!("Rail {}", cell.name),
                cell.width,
                grid.row_spacing(),
                cell.x,
                cell.z + cell.height,
            )?);
        }

        Ok(members)
    }

    fn member(
        &self,
        label: impl Into<String>,
        width: Decimal,
        height: Decimal,
        x: Decimal,
        z: Decimal,
    ) -> Result<Component> {
        Component::panel(
            format!("{} {}", self.name, label.into()),
            width,
            height,
            self.material,
            Position::new(x, Decimal::ZERO, z),
        )
    }

    /// 組裝面框：構件加上依單元名稱指定的元件（元件位置相對於其單元）
    pub fn assemble<I>(&self, position: Position, contents: I) -> Result<Component>
    where
        I: IntoIterator<Item = (String, Component)>,
    {
        self.assemble_as(ComponentKind::FaceFrame, position, contents)
    }

    /// 以指定類型組裝（Shaker 門板與抽屜面板也是單格面框）
    pub fn assemble_as<I>(
        &self,
        kind: ComponentKind,
        position: Position,
        contents: I,
    ) -> Result<Component>
    where
        I: IntoIterator<Item = (String, Component)>,
    {
        let mut children = self.members()?;
        for (cell_name, component) in contents {
            let cell = self.grid.cell(&cell_name)?;
            children.push(component.translated(cell.position()));
        }

        let dimension = Dimension::new(
            self.grid.width(),
            self.grid.height(),
            self.material.thickness(),
        );

        tracing::debug!(
            "組裝 {} {}：{} 個子元件",
            kind,
            self.name,
            children.len()
        );

        Component::composite(kind, self.name.clone(), dimension, position, children)
    }

    /// 依填充方式產生各單元的元件
    pub fn fill(
        &self,
        fills: &[(String, CellFill)],
        interior_depth: Decimal,
        config: &CabinetConfig,
    ) -> Result<Vec<(String, Component)>> {
        let mut contents = Vec::new();
        for (cell_name, fill) in fills {
            let cell = self.grid.cell(cell_name)?;
            if let Some(component) = self.fill_cell(cell, fill, interior_depth, config)? {
                contents.push((cell_name.clone(), component));
            }
        }
        Ok(contents)
    }

    fn fill_cell(
        &self,
        cell: &GridCell,
        fill: &CellFill,
        interior_depth: Decimal,
        config: &CabinetConfig,
    ) -> Result<Option<Component>> {
        let label = format!("{} {}", self.name, cell.name);
        let component = match fill {
            CellFill::Empty => return Ok(None),
            CellFill::Drawer => BlumDrawer::build(
                format!("{label} Drawer"),
                cell.width,
                cell.height,
                interior_depth,
                config,
            )?,
            CellFill::Door(options) => ShakerDoor::build(
                format!("{label} Door"),
                cell.width,
                cell.height,
                *options,
                config,
            )?,
            CellFill::Doors { count, hinge } => {
                if *count == 0 {
                    return Err(CabinetError::InvalidConfig(format!(
                        "{label}: 門數量不可為零"
                    )));
                }
                let member = config.face_frame_member_width;
                let spec = GridSpec::new(cell.width, cell.height)
                    .with_spacing(member, member)
                    .with_cols(Track::evenly(*count));
                let sub_frame = FaceFrame::new(format!("{label} Doors"), spec, self.material)?;
                let row: Vec<&GridCell> = sub_frame.grid().row(0).collect();
                let doors = ShakerDoor::build_row(&sub_frame.name, &row, *hinge, config)?;
                sub_frame.assemble(Position::origin(), doors)?
            }
        };
        Ok(Some(component))
    }
}

//! 元件樹模型
//!
//! 一棵元件樹由葉節點（帶材料的矩形板件）與組合節點（抽屜、門、面框、櫃體等）
//! 組成。子元件由父元件獨佔擁有，建構完成後不可再修改。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::{Dimension, Position};
use crate::material::{MaterialKind, UnitKind};
use crate::{CabinetError, Result};

/// 元件類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// 矩形板件（唯一帶材料的葉節點）
    RectangularComponent,
    /// Blum 抽屜（抽屜箱 + 抽屜面板）
    BlumDrawer,
    /// 抽屜箱
    DrawerBox,
    /// Shaker 抽屜面板
    ShakerDrawerFace,
    /// Shaker 門板
    ShakerDoor,
    /// 標準層板
    StandardShelf,
    /// 封邊層板
    BandedShelf,
    /// 面框
    FaceFrame,
    /// 下櫃箱體
    LowerCabinetCase,
    /// 下櫃
    LowerCabinet,
    /// 吊櫃箱體
    UpperCabinetCase,
    /// 吊櫃
    UpperCabinet,
    /// 一般容器（如一整排櫃子）
    Assembly,
    /// 佔位元件（如家電空位），不含材料
    GhostComponent,
}

impl ComponentKind {
    /// 類型名稱（報表使用）
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::RectangularComponent => "RectangularComponent",
            ComponentKind::BlumDrawer => "BlumDrawer",
            ComponentKind::DrawerBox => "DrawerBox",
            ComponentKind::ShakerDrawerFace => "ShakerDrawerFace",
            ComponentKind::ShakerDoor => "ShakerDoor",
            ComponentKind::StandardShelf => "StandardShelf",
            ComponentKind::BandedShelf => "BandedShelf",
            ComponentKind::FaceFrame => "FaceFrame",
            ComponentKind::LowerCabinetCase => "LowerCabinetCase",
            ComponentKind::LowerCabinet => "LowerCabinet",
            ComponentKind::UpperCabinetCase => "UpperCabinetCase",
            ComponentKind::UpperCabinet => "UpperCabinet",
            ComponentKind::Assembly => "Assembly",
            ComponentKind::GhostComponent => "GhostComponent",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// 幾何元件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    dimension: Dimension,
    position: Position,
    material: Option<MaterialKind>,
    children: Vec<Component>,
}

impl Component {
    /// 以材料標稱厚度為深度建立矩形板件
    pub fn panel(
        name: impl Into<String>,
        width: Decimal,
        height: Decimal,
        material: MaterialKind,
        position: Position,
    ) -> Result<Self> {
        let dimension = Dimension::new(width, height, material.thickness());
        Self::rectangular(name, dimension, material, position)
    }

    /// 建立矩形板件（深度自訂）
    pub fn rectangular(
        name: impl Into<String>,
        dimension: Dimension,
        material: MaterialKind,
        position: Position,
    ) -> Result<Self> {
        let name = name.into();
        dimension.ensure_positive(&name)?;

        Ok(Self {
            name,
            kind: ComponentKind::RectangularComponent,
            dimension,
            position,
            material: Some(material),
            children: Vec::new(),
        })
    }

    /// 建立組合元件，只透過子元件貢獻材料
    pub fn composite(
        kind: ComponentKind,
        name: impl Into<String>,
        dimension: Dimension,
        position: Position,
        children: Vec<Component>,
    ) -> Result<Self> {
        let name = name.into();
        if kind == ComponentKind::RectangularComponent {
            return Err(CabinetError::InvalidConfig(format!(
                "{name}: 矩形板件必須指定材料"
            )));
        }
        dimension.ensure_non_negative(&name)?;

        Ok(Self {
            name,
            kind,
            dimension,
            position,
            material: None,
            children,
        })
    }

    /// 建立佔位元件（只佔寬度）
    pub fn ghost(name: impl Into<String>, width: Decimal, position: Position) -> Result<Self> {
        let name = name.into();
        if width <= Decimal::ZERO {
            return Err(CabinetError::InvalidDimension(format!(
                "{name}: 佔位寬度必須大於零，實際 {width}"
            )));
        }
        Self::composite(
            ComponentKind::GhostComponent,
            name,
            Dimension::new(width, Decimal::ZERO, Decimal::ZERO),
            position,
            Vec::new(),
        )
    }

    /// 建構器模式：設置相對位置（加入父元件前使用）
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// 在現有偏移上再平移（放入網格單元時使用）
    pub fn translated(mut self, offset: Position) -> Self {
        self.position = self.position + offset;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn material(&self) -> Option<MaterialKind> {
        self.material
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.material.is_some()
    }

    /// 面積 = 寬 × 高
    pub fn area(&self) -> Decimal {
        self.dimension.area()
    }

    /// 體積 = 寬 × 高 × 深
    pub fn volume(&self) -> Decimal {
        self.dimension.volume()
    }

    /// 絕對位置 = 父元件絕對位置 + 自身偏移
    pub fn absolute_position(&self, parent: Position) -> Position {
        parent + self.position
    }

    /// 葉節點的材料貢獻：板材計面積，實木計體積
    pub fn contribution(&self) -> Option<(MaterialKind, Decimal)> {
        self.material.map(|material| {
            let quantity = match material.unit_kind() {
                UnitKind::Area => self.area(),
                UnitKind::Volume => self.volume(),
            };
            (material, quantity)
        })
    }

    /// 遞迴彙總子樹內各材料的用量
    pub fn material_quantities(&self) -> BTreeMap<MaterialKind, Decimal> {
        let mut totals = BTreeMap::new();
        self.accumulate_quantities(&mut totals);
        totals
    }

    fn accumulate_quantities(&self, totals: &mut BTreeMap<MaterialKind, Decimal>) {
        if let Some((material, quantity)) = self.contribution() {
            *totals.entry(material).or_insert(Decimal::ZERO) += quantity;
        }
        for child in &self.children {
            child.accumulate_quantities(totals);
        }
    }

    /// 深度優先（前序）走訪
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: vec![(self, Position::origin(), 0)],
        }
    }

    /// 子樹內指定類型的元件數量
    pub fn count_kind(&self, kind: ComponentKind) -> usize {
        self.depth_first()
            .filter(|visit| visit.component.kind == kind)
            .count()
    }

    /// 依名稱找出第一個符合的元件
    pub fn find(&self, name: &str) -> Option<&Component> {
        self.depth_first()
            .map(|visit| visit.component)
            .find(|component| component.name == name)
    }
}

/// 走訪節點
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub component: &'a Component,
    /// 節點的絕對位置
    pub absolute: Position,
    /// 深度（根為 0）
    pub depth: usize,
}

/// 深度優先走訪器（顯式堆疊，子元件依宣告順序輸出）
pub struct DepthFirst<'a> {
    stack: Vec<(&'a Component, Position, usize)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (component, parent_absolute, depth) = self.stack.pop()?;
        let absolute = component.absolute_position(parent_absolute);

        for child in component.children.iter().rev() {
            self.stack.push((child, absolute, depth + 1));
        }

        Some(Visit {
            component,
            absolute,
            depth,
        })
    }
}
